//! Cloud path: hand the message to the hosted gateway's client.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::dispatcher::SmsDispatcher;
use super::request::{Backend, DispatchRequest, DispatchResult};
use crate::external::sms_gate::{DEFAULT_BASE_URL, GatewayError, Message, SmsGateClient};
use crate::external::transport::HttpTransport;

/// Sends through [`SmsGateClient`], building one client per call from the
/// request's credentials and the injected transport.
pub struct CloudDispatcher {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl CloudDispatcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn try_send(&self, request: &DispatchRequest) -> Result<Value, GatewayError> {
        let client = SmsGateClient::new(
            &request.credentials.username,
            &request.credentials.password,
            Arc::clone(&self.transport),
        )
        .with_base_url(self.base_url.as_str())?;

        let message = Message::new(request.message.as_str(), request.phone_numbers.clone());
        client.send(&message).await
    }
}

#[async_trait]
impl SmsDispatcher for CloudDispatcher {
    async fn dispatch(&self, request: &DispatchRequest) -> DispatchResult {
        tracing::debug!(
            base_url = %self.base_url,
            recipients = request.phone_numbers.len(),
            "Dispatching SMS through cloud gateway"
        );

        match self.try_send(request).await {
            Ok(data) => DispatchResult::sent(data),
            Err(e) => DispatchResult::failed(e.to_string()),
        }
    }

    fn backend(&self) -> Backend {
        Backend::Cloud
    }
}
