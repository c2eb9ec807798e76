// Core layer - configuration, error taxonomy, report model
pub mod core;

// Platform seam - the gateway trait and its implementations
pub mod gateway;

// Access control - permission gate over read-only settings
pub mod permissions;
pub mod settings;

// Application layer - the command pipeline
pub mod commands;

// Re-export core config for convenience
pub use crate::core::Config;
