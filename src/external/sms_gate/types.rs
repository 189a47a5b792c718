use serde::{Deserialize, Serialize};

/// Outgoing message accepted by `POST /message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub message: String,

    pub phone_numbers: Vec<String>,

    /// 1-based SIM slot on the sending phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_number: Option<u8>,

    /// Seconds before an undelivered message expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_delivery_report: Option<bool>,
}

impl Message {
    pub fn new(message: impl Into<String>, phone_numbers: Vec<String>) -> Self {
        Self {
            id: None,
            message: message.into(),
            phone_numbers,
            sim_number: None,
            ttl: None,
            with_delivery_report: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    Pending,
    Processed,
    Sent,
    Delivered,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientState {
    pub phone_number: String,
    pub state: ProcessState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageState {
    pub id: String,
    pub state: ProcessState,
    #[serde(default)]
    pub recipients: Vec<RecipientState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebHookEventType {
    #[serde(rename = "sms:received")]
    SmsReceived,
    #[serde(rename = "sms:sent")]
    SmsSent,
    #[serde(rename = "sms:delivered")]
    SmsDelivered,
    #[serde(rename = "sms:failed")]
    SmsFailed,
    #[serde(rename = "system:ping")]
    SystemPing,
}

impl WebHookEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebHookEventType::SmsReceived => "sms:received",
            WebHookEventType::SmsSent => "sms:sent",
            WebHookEventType::SmsDelivered => "sms:delivered",
            WebHookEventType::SmsFailed => "sms:failed",
            WebHookEventType::SystemPing => "system:ping",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebHook {
    pub id: String,
    pub event: WebHookEventType,
    pub url: String,
}

/// Body of `POST /webhooks`. Supplying an existing `id` replaces that webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterWebHookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub event: WebHookEventType,
    pub url: String,
}
