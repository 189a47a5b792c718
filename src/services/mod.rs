//! Service layer.
//!
//! `sms` holds the dispatch logic; the CLI handlers call into it.

pub mod sms;

pub use sms::DispatchService;
