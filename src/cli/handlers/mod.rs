//! Command handlers for CLI operations
//!
//! Handlers produce a [`CommandOutput`]; printing and exit codes are left to
//! the executor.

pub mod gateway;
pub mod send;

pub use gateway::GatewayCommandHandler;
pub use send::SendCommandHandler;

use serde_json::Value;

/// JSON document to print and whether the command achieved its goal
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub body: Value,
    pub success: bool,
}

impl CommandOutput {
    pub fn success(body: Value) -> Self {
        Self {
            body,
            success: true,
        }
    }
}
