//! User interface module - terminal output for the release commands.

pub mod formatter;

pub use formatter::{
    display_error, display_notice, display_report, display_status, display_success,
    display_version_change, format_changed_files,
};
