pub mod client;
pub mod sms_gate;
pub mod transport;

pub use client::build_http_client;
pub use transport::{HttpTransport, ReqwestTransport, TransportError};
