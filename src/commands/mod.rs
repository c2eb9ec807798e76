//! # Command System
//!
//! Message command handling: invocation parsing, argument resolution,
//! confirmation, feedback, and dispatch.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

pub mod confirm;
pub mod context;
pub mod dispatch;
pub mod feedback;
pub mod handler;
pub mod handlers;
pub mod invocation;
pub mod registry;
pub mod resolver;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use dispatch::dispatch;
pub use handler::MessageCommand;
pub use handlers::create_all_handlers;
pub use invocation::{split_command, Invocation};
pub use registry::CommandRegistry;
