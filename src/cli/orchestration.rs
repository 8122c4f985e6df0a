//! Release workflow orchestration
//!
//! Ties validation, the version reader and the substitution engine together
//! for the two release commands, independent of clap.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::Version;
use crate::error::{Result, UpdateVersionsError};
use crate::reader::read_current_version;
use crate::substitution::{update_versions_from, UpdateReport};
use crate::validation::{ensure_dev_version, validate_new_version};

/// Arguments shared by both release workflows
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Project root all configured paths are relative to
    pub root: PathBuf,

    /// Value passed as `--new-version`
    pub new_version: String,

    /// Report changes without writing them
    pub dry_run: bool,
}

/// Updates versions BEFORE a release.
///
/// Validates `--new-version` against the current version and propagates it
/// verbatim, e.g. `2.1.0rc0` or `2.1.0`.
pub fn run_pre_release(args: &ReleaseArgs, config: &Config) -> Result<UpdateReport> {
    let current = read_current_version(&args.root, &config.version_file)?;
    validate_new_version(&args.new_version, &current)?;
    update_versions_from(
        &args.root,
        config,
        &current,
        &args.new_version,
        args.dry_run,
    )
}

/// Updates versions AFTER a release.
///
/// `--new-version` is the version that was just released. The working tree
/// must still be on a dev version; it moves to the next patch dev build,
/// e.g. releasing `2.1.0` turns `2.1.0.dev0` into `2.1.1.dev0`.
pub fn run_post_release(args: &ReleaseArgs, config: &Config) -> Result<UpdateReport> {
    let current = read_current_version(&args.root, &config.version_file)?;
    let released = validate_new_version(&args.new_version, &current)?;
    ensure_dev_version(&current.parse::<Version>()?)?;

    let next = released
        .next_patch_dev()
        .map_err(|e| UpdateVersionsError::bad_parameter(e.to_string()))?
        .to_string();
    tracing::debug!(released = %released, next = %next, "computed next dev version");
    update_versions_from(&args.root, config, &current, &next, args.dry_run)
}
