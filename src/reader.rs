//! Reads the canonical version from the project's version file.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::config::VersionFileConfig;
use crate::error::{Result, UpdateVersionsError};

/// Returns the first capture group of the configured pattern in the version file.
///
/// # Returns
/// * `Ok(String)` - The version exactly as written in the file
/// * `Err` - If the file cannot be read, the pattern is invalid or absent
pub fn read_current_version(root: &Path, version_file: &VersionFileConfig) -> Result<String> {
    let path = root.join(&version_file.path);
    let text = fs::read_to_string(&path).map_err(|e| UpdateVersionsError::io(&path, e))?;

    let re = Regex::new(&version_file.pattern).map_err(|source| UpdateVersionsError::Regex {
        rule: "version_file".to_string(),
        source,
    })?;

    let version = re
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| UpdateVersionsError::PatternNotFound {
            path: path.clone(),
            pattern: version_file.pattern.clone(),
        })?;

    tracing::debug!(path = %path.display(), %version, "read current version");
    Ok(version)
}
