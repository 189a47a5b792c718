//! Hosted gateway management: message status and webhooks.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use super::CommandOutput;
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::external::sms_gate::{
    GatewayError, RegisterWebHookRequest, SmsGateClient, WebHookEventType,
};
use crate::external::{ReqwestTransport, build_http_client};

const GATEWAY_NAME: &str = "sms-gate";

pub struct GatewayCommandHandler {
    client: SmsGateClient,
}

impl GatewayCommandHandler {
    /// Build a client for the hosted gateway from the `[cloud]` settings.
    ///
    /// # Errors
    /// - Missing username or password
    /// - HTTP client construction or an invalid base URL
    pub fn new(config: &Settings) -> AppResult<Self> {
        let cloud = &config.cloud;
        if cloud.username.trim().is_empty() {
            return Err(AppError::Validation {
                field: "cloud.username".to_string(),
                reason: "Username is required (--username or SMS_RELAY_CLOUD__USERNAME)"
                    .to_string(),
            });
        }
        if cloud.password.is_empty() {
            return Err(AppError::Validation {
                field: "cloud.password".to_string(),
                reason: "Password is required (--password or SMS_RELAY_CLOUD__PASSWORD)"
                    .to_string(),
            });
        }

        let http = build_http_client(&config.http).map_err(|e| AppError::Configuration {
            key: "http".to_string(),
            source: e.into(),
        })?;
        let transport = Arc::new(ReqwestTransport::new(http));
        let client = SmsGateClient::new(&cloud.username, &cloud.password, transport)
            .with_base_url(cloud.base_url.as_str())
            .map_err(|e| Self::make_error("invalid gateway configuration", e))?;
        tracing::debug!(base_url = client.base_url(), "Hosted gateway client ready");

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: SmsGateClient) -> Self {
        Self { client }
    }

    fn make_error(context: &str, source: GatewayError) -> AppError {
        AppError::ExternalApi {
            gateway: GATEWAY_NAME.into(),
            message: format!("{}: {}", context, source),
            source: Some(source.into()),
        }
    }

    pub async fn status(&self, id: &str) -> AppResult<CommandOutput> {
        let state = self
            .client
            .get_state(id)
            .await
            .map_err(|e| Self::make_error(&format!("get_state({})", id), e))?;
        to_output(&state)
    }

    pub async fn list_webhooks(&self) -> AppResult<CommandOutput> {
        let hooks = self
            .client
            .list_webhooks()
            .await
            .map_err(|e| Self::make_error("list_webhooks", e))?;
        to_output(&hooks)
    }

    pub async fn register_webhook(
        &self,
        event: WebHookEventType,
        url: &str,
        id: Option<&str>,
    ) -> AppResult<CommandOutput> {
        let request = RegisterWebHookRequest {
            id: id.map(str::to_string),
            event,
            url: url.to_string(),
        };
        let hook = self
            .client
            .register_webhook(&request)
            .await
            .map_err(|e| Self::make_error("register_webhook", e))?;

        tracing::info!(id = %hook.id, event = hook.event.as_str(), "Webhook registered");
        to_output(&hook)
    }

    pub async fn delete_webhook(&self, id: &str) -> AppResult<CommandOutput> {
        self.client
            .delete_webhook(id)
            .await
            .map_err(|e| Self::make_error(&format!("delete_webhook({})", id), e))?;

        tracing::info!(id, "Webhook deleted");
        Ok(CommandOutput::success(json!({ "deleted": id })))
    }
}

fn to_output<T: Serialize>(value: &T) -> AppResult<CommandOutput> {
    let body: Value =
        serde_json::to_value(value).map_err(|e| AppError::Internal { source: e.into() })?;
    Ok(CommandOutput::success(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::transport::stub::StubTransport;

    fn handler(stub: &Arc<StubTransport>) -> GatewayCommandHandler {
        GatewayCommandHandler::with_client(SmsGateClient::new("user", "pass", stub.clone()))
    }

    #[test]
    fn test_new_requires_credentials() {
        let result = GatewayCommandHandler::new(&Settings::default());
        match result {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cloud.username"),
            Err(other) => panic!("Expected Validation error, got {:?}", other),
            Ok(_) => panic!("Expected Validation error"),
        }

        let mut config = Settings::default();
        config.cloud.username = "user".to_string();
        match GatewayCommandHandler::new(&config) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cloud.password"),
            Err(other) => panic!("Expected Validation error, got {:?}", other),
            Ok(_) => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_new_with_credentials() {
        let mut config = Settings::default();
        config.cloud.username = "user".to_string();
        config.cloud.password = "pass".to_string();
        assert!(GatewayCommandHandler::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_status_output() {
        let stub = Arc::new(StubTransport::ok(json!({
            "id": "m-1",
            "state": "Sent",
            "recipients": [{"phoneNumber": "+15550100", "state": "Sent"}]
        })));

        let output = handler(&stub).status("m-1").await.unwrap();
        assert!(output.success);
        assert_eq!(output.body["state"], json!("Sent"));
        assert_eq!(output.body["recipients"][0]["phoneNumber"], json!("+15550100"));
    }

    #[tokio::test]
    async fn test_status_gateway_error() {
        let stub = Arc::new(StubTransport::rejecting(404, "Message not found"));

        let err = handler(&stub).status("missing").await.unwrap_err();
        match err {
            AppError::ExternalApi {
                gateway, message, ..
            } => {
                assert_eq!(gateway, "sms-gate");
                assert_eq!(message, "get_state(missing): Message not found");
            }
            other => panic!("Expected ExternalApi error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_and_delete_webhook() {
        let stub = Arc::new(StubTransport::ok(json!({
            "id": "w-1",
            "event": "sms:delivered",
            "url": "https://hooks.example/sms"
        })));
        let handler = handler(&stub);

        let output = handler
            .register_webhook(
                WebHookEventType::SmsDelivered,
                "https://hooks.example/sms",
                Some("w-1"),
            )
            .await
            .unwrap();
        assert_eq!(output.body["event"], json!("sms:delivered"));
        assert_eq!(stub.calls()[0].body.as_ref().unwrap()["id"], json!("w-1"));

        let output = handler.delete_webhook("w-1").await.unwrap();
        assert_eq!(output.body, json!({"deleted": "w-1"}));
        assert_eq!(stub.calls()[1].method, "DELETE");
    }

    #[tokio::test]
    async fn test_list_webhooks_output() {
        let stub = Arc::new(StubTransport::ok(json!([])));
        let output = handler(&stub).list_webhooks().await.unwrap();
        assert_eq!(output.body, json!([]));
    }
}
