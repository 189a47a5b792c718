use thiserror::Error;

use crate::external::transport::TransportError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unexpected {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid gateway base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
