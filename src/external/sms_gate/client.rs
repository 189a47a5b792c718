use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::GatewayError;
use super::types::{Message, MessageState, RegisterWebHookRequest, WebHook};
use crate::external::transport::{Headers, HttpTransport, basic_auth};

pub const DEFAULT_BASE_URL: &str = "https://api.sms-gate.app/3rdparty/v1";

/// Client for the hosted SMS gateway's third-party API.
///
/// Scoped to one set of credentials. All HTTP goes through the injected
/// [`HttpTransport`].
pub struct SmsGateClient {
    base_url: String,
    default_headers: Headers,
    transport: Arc<dyn HttpTransport>,
}

impl SmsGateClient {
    pub fn new(username: &str, password: &str, transport: Arc<dyn HttpTransport>) -> Self {
        let mut default_headers = Headers::new();
        default_headers.insert(
            USER_AGENT.to_string(),
            format!("sms-relay/{}", crate::pkg_version()),
        );
        default_headers.insert(AUTHORIZATION.to_string(), basic_auth(username, password));

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_headers,
            transport,
        }
    }

    /// Point the client at another deployment (self-hosted server, staging).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url).map_err(|e| GatewayError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidBaseUrl {
                url: base_url,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        self.base_url = base_url;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a message. Returns the gateway's confirmation as received.
    pub async fn send(&self, message: &Message) -> Result<Value, GatewayError> {
        let url = self.endpoint(&["message"])?;
        let body = serde_json::to_value(message).map_err(|e| GatewayError::Decode {
            context: "message",
            source: e,
        })?;

        tracing::debug!(
            url = %url,
            recipients = message.phone_numbers.len(),
            "Submitting message to SMS gateway"
        );
        Ok(self.transport.post(&url, &body, &self.json_headers()).await?)
    }

    pub async fn get_state(&self, id: &str) -> Result<MessageState, GatewayError> {
        let url = self.endpoint(&["message", id])?;
        let value = self.transport.get(&url, &self.default_headers).await?;
        decode("message state", value)
    }

    pub async fn list_webhooks(&self) -> Result<Vec<WebHook>, GatewayError> {
        let url = self.endpoint(&["webhooks"])?;
        let value = self.transport.get(&url, &self.default_headers).await?;
        decode("webhook list", value)
    }

    pub async fn register_webhook(
        &self,
        request: &RegisterWebHookRequest,
    ) -> Result<WebHook, GatewayError> {
        let url = self.endpoint(&["webhooks"])?;
        let body = serde_json::to_value(request).map_err(|e| GatewayError::Decode {
            context: "webhook",
            source: e,
        })?;
        let value = self.transport.post(&url, &body, &self.json_headers()).await?;
        decode("webhook", value)
    }

    pub async fn delete_webhook(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.endpoint(&["webhooks", id])?;
        self.transport.delete(&url, &self.default_headers).await?;
        Ok(())
    }

    fn json_headers(&self) -> Headers {
        let mut headers = self.default_headers.clone();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        headers
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<String, GatewayError> {
        let invalid = |reason: String| GatewayError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot have path segments".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }
}

impl fmt::Debug for SmsGateClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsGateClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(context: &'static str, value: Value) -> Result<T, GatewayError> {
    serde_json::from_value(value).map_err(|source| GatewayError::Decode { context, source })
}
