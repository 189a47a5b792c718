use std::sync::Arc;

use super::cloud_dispatcher::CloudDispatcher;
use super::dispatcher::SmsDispatcher;
use super::local_dispatcher::LocalDispatcher;
use super::request::{Backend, DispatchRequest, DispatchResult};
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::external::{ReqwestTransport, build_http_client};

/// Routes each request to the dispatcher for its backend.
///
/// Cloning is cheap; both dispatchers sit behind `Arc`.
#[derive(Clone)]
pub struct DispatchService {
    cloud: Arc<dyn SmsDispatcher>,
    local: Arc<dyn SmsDispatcher>,
}

impl DispatchService {
    pub fn new(cloud: Arc<dyn SmsDispatcher>, local: Arc<dyn SmsDispatcher>) -> Self {
        Self { cloud, local }
    }

    /// Wire both dispatchers onto one HTTP client built from `[http]`.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let client = build_http_client(&settings.http).map_err(|e| AppError::Configuration {
            key: "http".to_string(),
            source: e.into(),
        })?;

        let transport = Arc::new(ReqwestTransport::new(client.clone()));
        let cloud = CloudDispatcher::new(transport).with_base_url(settings.cloud.base_url.as_str());
        let local = LocalDispatcher::new(client);

        Ok(Self::new(Arc::new(cloud), Arc::new(local)))
    }

    pub fn dispatcher_for(&self, backend: Backend) -> &dyn SmsDispatcher {
        match backend {
            Backend::Cloud => self.cloud.as_ref(),
            Backend::Local => self.local.as_ref(),
        }
    }

    /// Dispatch without validating. Never fails; see [`DispatchResult`].
    pub async fn dispatch(&self, request: &DispatchRequest) -> DispatchResult {
        let dispatcher = self.dispatcher_for(request.backend);
        let result = dispatcher.dispatch(request).await;

        match &result {
            DispatchResult::Sent { .. } => tracing::info!(
                backend = dispatcher.name(),
                recipients = request.phone_numbers.len(),
                "SMS dispatched"
            ),
            DispatchResult::Failed { error } => tracing::warn!(
                backend = dispatcher.name(),
                recipients = request.phone_numbers.len(),
                error = %error,
                "SMS dispatch failed"
            ),
        }

        result
    }

    /// Validate the request, then dispatch it.
    ///
    /// An invalid request is the caller's error and comes back as `Err`; it is
    /// never sent.
    pub async fn send(&self, request: &DispatchRequest) -> AppResult<DispatchResult> {
        request.validate_request()?;
        Ok(self.dispatch(request).await)
    }
}
