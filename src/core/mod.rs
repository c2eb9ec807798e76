//! # Core Module
//!
//! Core configuration, the command error taxonomy, and the report render
//! model shared by every command.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Add report module with the embed render model
//! - 1.1.0: Add the command error taxonomy
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod errors;
pub mod report;

// Re-export commonly used items
pub use config::Config;
pub use errors::{CommandError, Disposition};
pub use report::{truncate_field, Report, ReportField, COLOR_DANGER, COLOR_INFO, FIELD_LIMIT};
