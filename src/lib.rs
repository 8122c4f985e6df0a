pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod notice;
pub mod reader;
pub mod substitution;
pub mod ui;
pub mod validation;

pub use error::{Result, UpdateVersionsError};
