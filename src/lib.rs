//! sms-relay library
//!
//! Dual-backend SMS dispatch: a hosted gateway reached through its API client,
//! or a self-hosted gateway reached with a direct authenticated POST.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod services;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
