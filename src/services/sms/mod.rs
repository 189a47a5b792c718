//! SMS dispatch over two backends.
//!
//! `CloudDispatcher` goes through the hosted gateway client; `LocalDispatcher`
//! posts straight to a self-hosted endpoint. Both normalize their outcome to
//! [`DispatchResult`], and `DispatchService` picks one per request.

mod cloud_dispatcher;
mod dispatch_service;
mod dispatcher;
mod local_dispatcher;
mod request;

pub use cloud_dispatcher::CloudDispatcher;
pub use dispatch_service::DispatchService;
pub use dispatcher::SmsDispatcher;
pub use local_dispatcher::{DEFAULT_FAILURE_MESSAGE, LocalDispatcher};
pub use request::{Backend, Credentials, DispatchRequest, DispatchResult, NO_RECIPIENTS_MESSAGE};
