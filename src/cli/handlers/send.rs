//! Send command handler
//!
//! Builds a [`DispatchRequest`] from settings and flags, then either previews
//! it (`--dry-run`) or hands it to the [`DispatchService`].

use serde_json::json;

use super::CommandOutput;
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::services::sms::{Backend, Credentials, DispatchRequest, DispatchService};

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
    service: DispatchService,
}

impl SendCommandHandler {
    /// Create a handler whose dispatchers share one HTTP client built from `config`
    pub fn new(config: Settings) -> AppResult<Self> {
        let service = DispatchService::from_settings(&config)?;
        Ok(Self::with_service(config, service))
    }

    pub fn with_service(config: Settings, service: DispatchService) -> Self {
        Self { config, service }
    }

    /// Combine flags with the configured credentials and endpoint for `backend`
    pub fn build_request(
        &self,
        backend: Backend,
        to: &[String],
        message: &str,
    ) -> DispatchRequest {
        match backend {
            Backend::Cloud => {
                let cloud = &self.config.cloud;
                DispatchRequest::new(
                    backend,
                    Credentials::new(cloud.username.as_str(), cloud.password.as_str()),
                    message,
                    to,
                )
            }
            Backend::Local => {
                let local = &self.config.local;
                DispatchRequest::new(
                    backend,
                    Credentials::new(local.username.as_str(), local.password.as_str()),
                    message,
                    to,
                )
                .with_endpoint(local.endpoint.as_str())
            }
        }
    }

    /// Execute the send command
    ///
    /// # Errors
    /// - Request validation errors (nothing is sent)
    /// - Serialization of the result
    ///
    /// A gateway failure is not an error here: it comes back as an output with
    /// `success == false`.
    pub async fn execute(
        &self,
        backend: Backend,
        to: &[String],
        message: &str,
        dry_run: bool,
    ) -> AppResult<CommandOutput> {
        let request = self.build_request(backend, to, message);

        if dry_run {
            request.validate_request()?;
            tracing::info!(backend = %backend, "Dry run: request is valid, nothing sent");
            return Ok(CommandOutput::success(self.preview(&request)));
        }

        let result = self.service.send(&request).await?;
        let success = result.is_success();
        let body =
            serde_json::to_value(&result).map_err(|e| AppError::Internal { source: e.into() })?;

        Ok(CommandOutput { body, success })
    }

    fn preview(&self, request: &DispatchRequest) -> serde_json::Value {
        let target = match request.backend {
            Backend::Cloud => self.config.cloud.base_url.as_str(),
            Backend::Local => request.endpoint.as_deref().unwrap_or_default(),
        };

        json!({
            "dryRun": true,
            "backend": request.backend,
            "target": target,
            "username": request.credentials.username,
            "phoneNumbers": request.phone_numbers,
            "message": request.message,
        })
    }
}
