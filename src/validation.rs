//! Version ordering gate applied to `--new-version` before anything is written.

use crate::domain::Version;
use crate::error::{Result, UpdateVersionsError};

/// Checks that `new` parses and is not older than `current`.
///
/// Both failure modes are parameter errors so the CLI can report them
/// against the `--new-version` option.
///
/// # Returns
/// * `Ok(Version)` - The parsed new version
/// * `Err(BadParameter)` - If `new` is unparseable or precedes `current`
pub fn validate_new_version(new: &str, current: &str) -> Result<Version> {
    let new_version = new
        .parse::<Version>()
        .map_err(|e| UpdateVersionsError::bad_parameter(e.to_string()))?;
    let current_version = current
        .parse::<Version>()
        .map_err(|e| UpdateVersionsError::version(format!("current version: {}", e)))?;

    if new_version < current_version {
        return Err(UpdateVersionsError::bad_parameter(format!(
            "New version {} is not greater than or equal to current version {}",
            new_version, current_version
        )));
    }
    Ok(new_version)
}

/// Requires the current version to be a dev build.
///
/// Post-release bumps only make sense on the development branch; a release
/// or RC version here means the command ran on a release branch.
pub fn ensure_dev_version(current: &Version) -> Result<()> {
    if current.is_devrelease() {
        return Ok(());
    }
    Err(UpdateVersionsError::precondition(format!(
        "It appears you ran this command on a release branch because the current version \
         ({}) is not a dev version. Please re-run this command on the master branch.",
        current
    )))
}
