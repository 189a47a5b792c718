//! HTTP transport capability injected into gateway clients.
//!
//! A client asks the transport for `get`, `post` and `delete` calls and gets
//! back the parsed JSON body. The reqwest-backed implementation is used in
//! production; tests substitute their own.

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;

/// Request headers, sorted by name
pub type Headers = BTreeMap<String, String>;

/// `Authorization` value for HTTP Basic authentication
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, refused connection, timeout)
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body was not JSON
    #[error("invalid JSON in response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    /// HTTP status of a rejected call
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(e) => e.status().map(|s| s.as_u16()),
            TransportError::Decode(_) => None,
        }
    }
}

/// HTTP capability a gateway client depends on
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Value, TransportError>;

    async fn post(&self, url: &str, body: &Value, headers: &Headers)
    -> Result<Value, TransportError>;

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Value, TransportError>;
}

/// [`HttpTransport`] over a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &Headers,
    ) -> Result<Value, TransportError> {
        let mut request = self.client.request(method.clone(), url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            if !headers.keys().any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE.as_str())) {
                request = request.header(CONTENT_TYPE, "application/json");
            }
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%method, url, status = status.as_u16(), "gateway response");

        let parsed = parse_body(&text);
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: failure_message(&text, parsed.as_ref().ok(), status),
            });
        }
        parsed.map_err(TransportError::from)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Value, TransportError> {
        self.execute(Method::GET, url, None, headers).await
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &Headers,
    ) -> Result<Value, TransportError> {
        self.execute(Method::POST, url, Some(body), headers).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Value, TransportError> {
        self.execute(Method::DELETE, url, None, headers).await
    }
}

/// Empty bodies (204 No Content) parse as `null`.
fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(text)
    }
}

/// Pick a description for a rejected call: the body's `message`, then its
/// `error`, then the raw body, then the status line.
fn failure_message(text: &str, parsed: Option<&Value>, status: reqwest::StatusCode) -> String {
    let field = |name: &str| {
        parsed
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    field("message")
        .or_else(|| field("error"))
        .or_else(|| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| format!("HTTP {}", status))
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(reqwest::Client::new())
    }

    #[test]
    fn test_basic_auth_known_value() {
        assert_eq!(basic_auth("username", "password"), "Basic dXNlcm5hbWU6cGFzc3dvcmQ=");
        assert_eq!(basic_auth("", ""), "Basic Og==");
    }

    #[test]
    fn test_failure_message_precedence() {
        let status = reqwest::StatusCode::UNAUTHORIZED;
        let both = json!({"message": "from message", "error": "from error"});
        assert_eq!(failure_message("", Some(&both), status), "from message");

        let only_error = json!({"error": "from error"});
        assert_eq!(failure_message("", Some(&only_error), status), "from error");

        assert_eq!(failure_message("  upstream down ", None, status), "upstream down");
        assert_eq!(failure_message("", None, status), "HTTP 401 Unauthorized");
    }

    #[tokio::test]
    async fn test_post_sends_json_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/message"))
            .and(header("content-type", "application/json"))
            .and(header("x-trace", "abc"))
            .and(body_json(json!({"message": "hi"})))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "m-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = Headers::new();
        headers.insert("X-Trace".to_string(), "abc".to_string());

        let value = transport()
            .post(&format!("{}/message", server.uri()), &json!({"message": "hi"}), &headers)
            .await
            .unwrap();
        assert_eq!(value, json!({"id": "m-1"}));
    }

    #[tokio::test]
    async fn test_delete_with_empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/webhooks/w-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let value = transport()
            .delete(&format!("{}/webhooks/w-1", server.uri()), &Headers::new())
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_error_status_uses_message_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = transport()
            .get(&format!("{}/message/1", server.uri()), &Headers::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[tokio::test]
    async fn test_success_with_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let err = transport()
            .get(&server.uri(), &Headers::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
        assert!(err.to_string().starts_with("invalid JSON in response body"));
    }
}
