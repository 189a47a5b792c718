//! Client for the hosted SMS gateway (sms-gate.app third-party API)

mod client;
mod error;
pub mod types;

pub use client::{DEFAULT_BASE_URL, SmsGateClient};
pub use error::GatewayError;
pub use types::{
    Message, MessageState, ProcessState, RecipientState, RegisterWebHookRequest, WebHook,
    WebHookEventType,
};
