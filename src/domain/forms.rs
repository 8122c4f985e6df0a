//! Derived string forms of the current and new versions.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static DEV_OR_RC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.dev0$|rc\d+$").expect("suffix regex is valid"));

/// Maven's qualifier for in-development builds
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Replaces a trailing `.dev0` or `rcN` suffix with `repl`.
///
/// Versions without such a suffix are returned unchanged.
///
/// # Examples
/// ```ignore
/// assert_eq!(replace_dev_or_rc_suffix_with("2.1.0.dev0", "-SNAPSHOT"), "2.1.0-SNAPSHOT");
/// assert_eq!(replace_dev_or_rc_suffix_with("2.1.0rc1", ""), "2.1.0");
/// ```
pub fn replace_dev_or_rc_suffix_with(version: &str, repl: &str) -> String {
    DEV_OR_RC_SUFFIX
        .replace(version, NoExpand(repl))
        .into_owned()
}

/// Every spelling of the versions a rule template can refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionForms {
    pub current: String,
    pub current_base: String,
    pub new: String,
    pub new_base: String,
    pub new_snapshot: String,
}

impl VersionForms {
    pub fn new(current: &str, new: &str) -> Self {
        VersionForms {
            current: current.to_string(),
            current_base: replace_dev_or_rc_suffix_with(current, ""),
            new: new.to_string(),
            new_base: replace_dev_or_rc_suffix_with(new, ""),
            new_snapshot: replace_dev_or_rc_suffix_with(new, SNAPSHOT_SUFFIX),
        }
    }

    /// Template placeholders paired with their values
    pub fn placeholders(&self) -> [(&'static str, &str); 5] {
        [
            ("{{current}}", self.current.as_str()),
            ("{{current_base}}", self.current_base.as_str()),
            ("{{new}}", self.new.as_str()),
            ("{{new_base}}", self.new_base.as_str()),
            ("{{new_snapshot}}", self.new_snapshot.as_str()),
        ]
    }
}
