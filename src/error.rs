//! Validation errors for user input.
//!
//! Plumbing (files, terminal, CLI) uses `anyhow`; these are the errors a user
//! can actually cause, so they carry messages meant to be shown as-is.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    #[error("Duration must be a whole number of minutes, got {0:?}")]
    NotANumber(String),

    #[error("Duration must be between {min} and {max} minutes, got {value}")]
    DurationOutOfRange { value: u64, min: u64, max: u64 },

    #[error("Site URL is empty")]
    EmptyUrl,

    #[error("This site is already blocked: {0}")]
    DuplicateSite(String),

    #[error("No blocked site matches {0:?}")]
    SiteNotFound(String),
}
