//! Domain logic - version ordering and the string forms rules substitute

pub mod forms;
pub mod version;

pub use forms::{replace_dev_or_rc_suffix_with, VersionForms, SNAPSHOT_SUFFIX};
pub use version::{PreKind, Version};
