use crate::utils::error::{FetchError, Result};
use std::path::Path;

/// Keeps trimmed, non-blank lines that do not start with `#`, in file order.
pub fn parse_identifiers(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

pub fn load_identifiers<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FetchError::config(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        FetchError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let identifiers = parse_identifiers(&content);
    if identifiers.is_empty() {
        return Err(FetchError::config(format!(
            "{} is empty (or contains only comments)",
            path.display()
        )));
    }

    tracing::debug!("Loaded {} identifiers from {}", identifiers.len(), path.display());
    Ok(identifiers)
}
