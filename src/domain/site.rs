use crate::error::FocusError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strip scheme, leading "www." and trailing slashes, lowercase the rest
pub fn normalize_url(url: &str) -> String {
    let mut rest = url.trim();
    for prefix in ["https://", "http://", "www."] {
        if let Some(head) = rest.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                rest = &rest[prefix.len()..];
            }
        }
    }
    rest.trim_end_matches('/').to_lowercase()
}

/// A site label the user wants to stay away from during focus mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedSite {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub blocked_count: u32,
}

impl BlockedSite {
    /// Whether a visited host falls under this entry
    pub fn matches_host(&self, host: &str) -> bool {
        !self.url.is_empty() && normalize_url(host).contains(&self.url)
    }
}

/// The blocked-site list, stored as a plain JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockedSites(Vec<BlockedSite>);

impl BlockedSites {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockedSite> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&BlockedSite> {
        self.0.get(index)
    }

    /// Add a site. The name defaults to the normalized url.
    pub fn add(&mut self, url: &str, name: &str, now: DateTime<Utc>) -> Result<&BlockedSite, FocusError> {
        let url = normalize_url(url);
        if url.is_empty() {
            return Err(FocusError::EmptyUrl);
        }
        if self.0.iter().any(|site| site.url == url) {
            return Err(FocusError::DuplicateSite(url));
        }

        let name = match name.trim() {
            "" => url.clone(),
            given => given.to_string(),
        };

        self.0.push(BlockedSite {
            id: Uuid::new_v4(),
            url,
            name,
            added_at: now,
            blocked_count: 0,
        });
        Ok(&self.0[self.0.len() - 1])
    }

    /// Remove by id or by url
    pub fn remove(&mut self, id_or_url: &str) -> Result<BlockedSite, FocusError> {
        let wanted_id = Uuid::parse_str(id_or_url.trim()).ok();
        let wanted_url = normalize_url(id_or_url);

        let position = self
            .0
            .iter()
            .position(|site| Some(site.id) == wanted_id || site.url == wanted_url)
            .ok_or_else(|| FocusError::SiteNotFound(id_or_url.to_string()))?;

        Ok(self.0.remove(position))
    }

    /// Remove by list position
    pub fn remove_at(&mut self, index: usize) -> Option<BlockedSite> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    /// Find the entry blocking `host`, counting the hit
    pub fn record_hit(&mut self, host: &str) -> Option<&BlockedSite> {
        let site = self.0.iter_mut().find(|site| site.matches_host(host))?;
        site.blocked_count = site.blocked_count.saturating_add(1);
        Some(site)
    }
}
