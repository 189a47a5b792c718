use async_trait::async_trait;

use super::request::{Backend, DispatchRequest, DispatchResult};

/// A route for sending one SMS request.
///
/// Implementations are total: every failure, whether transport, authentication
/// or a malformed response, comes back as [`DispatchResult::Failed`] rather
/// than as an `Err` or a panic.
///
/// # Example Implementation
/// ```ignore
/// pub struct EchoDispatcher;
///
/// #[async_trait]
/// impl SmsDispatcher for EchoDispatcher {
///     async fn dispatch(&self, request: &DispatchRequest) -> DispatchResult {
///         DispatchResult::sent(serde_json::json!({ "echo": request.message }))
///     }
///
///     fn backend(&self) -> Backend {
///         Backend::Cloud
///     }
/// }
/// ```
#[async_trait]
pub trait SmsDispatcher: Send + Sync {
    /// Send the request once and report the normalized outcome
    async fn dispatch(&self, request: &DispatchRequest) -> DispatchResult;

    /// Backend this dispatcher serves
    fn backend(&self) -> Backend;

    /// Name used in log fields
    fn name(&self) -> &'static str {
        self.backend().as_str()
    }
}
