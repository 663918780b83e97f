use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and in $HOME
pub const FOCUS_DIR_NAME: &str = ".focus";

/// Get the focus directory - an explicit override wins, then a local .focus, then ~/.focus
pub fn get_focus_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    // Check for local .focus directory
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_focus(&current_dir) {
        return Ok(local_dir);
    }

    // Fall back to global ~/.focus
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(FOCUS_DIR_NAME))
}

/// Find local .focus directory by walking up the directory tree
fn find_local_focus(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let focus_dir = current.join(FOCUS_DIR_NAME);
        if focus_dir.is_dir() {
            return Some(focus_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the focus directory exists
pub fn ensure_focus_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = get_focus_dir(override_dir)?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .focus directory in `parent`
pub fn init_local_focus(parent: &Path) -> Result<PathBuf> {
    let focus_dir = parent.join(FOCUS_DIR_NAME);

    if focus_dir.exists() {
        anyhow::bail!("Focus directory already exists: {}", focus_dir.display());
    }

    fs::create_dir_all(&focus_dir)
        .with_context(|| format!("Failed to create directory: {}", focus_dir.display()))?;

    Ok(focus_dir)
}

/// Path of the log file inside the focus directory
pub fn log_file(focus_dir: &Path) -> PathBuf {
    focus_dir.join("focus.log")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    // Temp file must live on the same filesystem for the rename to be atomic
    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
