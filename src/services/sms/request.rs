//! Request and result types shared by both dispatchers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::cli::validation::validate_http_url;
use crate::error::AppResult;
use crate::external::transport::basic_auth;

pub const NO_RECIPIENTS_MESSAGE: &str = "Please add at least one phone number";

/// Which gateway carries the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Hosted gateway reached through the vendor client
    Cloud,
    /// Self-hosted gateway reached with a direct POST
    Local,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Cloud => "cloud",
            Backend::Local => "local",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Basic base64(username:password)`
    pub fn basic_auth_header(&self) -> String {
        basic_auth(&self.username, &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Message cannot be empty".into()));
    }
    Ok(())
}

fn no_blank_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::new("blank_entry")
            .with_message("Phone numbers cannot be blank".into()));
    }
    Ok(())
}

/// Same rule as the `--endpoint` flag: absolute http(s) with a host.
fn http_endpoint(value: &str) -> Result<(), ValidationError> {
    validate_http_url(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new("url").with_message(e.into()))
}

/// One send action: who to send to, what, and through which backend.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct DispatchRequest {
    pub backend: Backend,

    pub credentials: Credentials,

    #[validate(custom(function = "not_blank"))]
    pub message: String,

    #[validate(
        length(min = 1, message = "Please add at least one phone number"),
        custom(function = "no_blank_entries")
    )]
    pub phone_numbers: Vec<String>,

    /// Target URL for the local backend; ignored by the cloud backend
    #[validate(custom(function = "http_endpoint"))]
    pub endpoint: Option<String>,
}

impl DispatchRequest {
    /// Build a request, dropping recipients that are blank after trimming.
    pub fn new<I>(
        backend: Backend,
        credentials: Credentials,
        message: impl Into<String>,
        phone_numbers: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let phone_numbers = phone_numbers
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        Self {
            backend,
            credentials,
            message: message.into(),
            phone_numbers,
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        self.endpoint = (!endpoint.trim().is_empty()).then(|| endpoint.trim().to_string());
        self
    }

    /// Check the request before it is handed to a dispatcher.
    ///
    /// Runs the field rules above plus the cross-field ones: credentials are
    /// required and the local backend needs an endpoint.
    pub fn validate_request(&self) -> AppResult<()> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.credentials.username.trim().is_empty() {
            errors.add(
                "username",
                ValidationError::new("required").with_message("Username is required".into()),
            );
        }
        if self.credentials.password.is_empty() {
            errors.add(
                "password",
                ValidationError::new("required").with_message("Password is required".into()),
            );
        }
        if self.backend == Backend::Local && self.endpoint.is_none() {
            errors.add(
                "endpoint",
                ValidationError::new("required")
                    .with_message("Endpoint is required for the local backend".into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}

/// Normalized outcome of one dispatch.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "DispatchEnvelope", try_from = "DispatchEnvelope")]
pub enum DispatchResult {
    Sent { data: Value },
    Failed { error: String },
}

impl DispatchResult {
    pub fn sent(data: Value) -> Self {
        DispatchResult::Sent { data }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        DispatchResult::Failed {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchResult::Sent { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            DispatchResult::Sent { data } => Some(data),
            DispatchResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DispatchResult::Sent { .. } => None,
            DispatchResult::Failed { error } => Some(error),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct DispatchEnvelope {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<DispatchResult> for DispatchEnvelope {
    fn from(result: DispatchResult) -> Self {
        match result {
            DispatchResult::Sent { data } => DispatchEnvelope {
                success: true,
                data: Some(data),
                error: None,
            },
            DispatchResult::Failed { error } => DispatchEnvelope {
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<DispatchEnvelope> for DispatchResult {
    type Error = String;

    fn try_from(envelope: DispatchEnvelope) -> Result<Self, Self::Error> {
        match (envelope.success, envelope.error) {
            (true, _) => Ok(DispatchResult::Sent {
                data: envelope.data.unwrap_or(Value::Null),
            }),
            (false, Some(error)) => Ok(DispatchResult::Failed { error }),
            (false, None) => Err("failed result without an error message".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use proptest::prelude::*;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials::new("operator", "secret")
    }

    fn failed_fields(request: &DispatchRequest) -> Vec<(String, String)> {
        match request.validate_request() {
            Err(AppError::ValidationErrors { errors }) => {
                errors.into_iter().map(|e| (e.field, e.message)).collect()
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_new_filters_blank_recipients() {
        let request = DispatchRequest::new(
            Backend::Cloud,
            credentials(),
            "hi",
            ["+15550100", "  ", "", " +15550101 "],
        );
        assert_eq!(request.phone_numbers, vec!["+15550100", "+15550101"]);
    }

    #[test]
    fn test_all_blank_recipients_rejected() {
        let request = DispatchRequest::new(Backend::Cloud, credentials(), "hi", ["", "   "]);
        assert!(request.phone_numbers.is_empty());

        let fields = failed_fields(&request);
        assert_eq!(
            fields,
            vec![("phone_numbers".to_string(), NO_RECIPIENTS_MESSAGE.to_string())]
        );
    }

    #[test]
    fn test_valid_cloud_request_needs_no_endpoint() {
        let request = DispatchRequest::new(Backend::Cloud, credentials(), "hi", ["+15550100"]);
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_local_request_requires_endpoint() {
        let request = DispatchRequest::new(Backend::Local, credentials(), "hi", ["+15550100"]);
        let fields = failed_fields(&request);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "endpoint");

        let request = request.with_endpoint("http://192.168.1.11:8080/message");
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_blank_endpoint_counts_as_missing() {
        let request = DispatchRequest::new(Backend::Local, credentials(), "hi", ["1"])
            .with_endpoint("   ");
        assert_eq!(request.endpoint, None);
    }

    #[test]
    fn test_invalid_endpoint_and_blank_message() {
        let request = DispatchRequest::new(Backend::Local, credentials(), "  ", ["1"])
            .with_endpoint("not a url");
        let fields: Vec<String> = failed_fields(&request).into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["endpoint", "message"]);
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let request = DispatchRequest::new(Backend::Local, credentials(), "hi", ["1"])
            .with_endpoint("ftp://192.168.1.11/message");
        let fields = failed_fields(&request);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "endpoint");
        assert!(fields[0].1.contains("ftp"));

        let request = request.with_endpoint("https://192.168.1.11:8443/message");
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_missing_credentials() {
        let request =
            DispatchRequest::new(Backend::Cloud, Credentials::new(" ", ""), "hi", ["1"]);
        let fields = failed_fields(&request);
        assert_eq!(
            fields,
            vec![
                ("password".to_string(), "Password is required".to_string()),
                ("username".to_string(), "Username is required".to_string()),
            ]
        );
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let debug = format!("{:?}", credentials());
        assert!(debug.contains("operator"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_result_serialization_shape() {
        let sent = DispatchResult::sent(json!({"id": "abc"}));
        assert_eq!(
            serde_json::to_value(&sent).unwrap(),
            json!({"success": true, "data": {"id": "abc"}})
        );

        let failed = DispatchResult::failed("bad credentials");
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"success": false, "error": "bad credentials"})
        );
    }

    #[test]
    fn test_result_deserialization() {
        let sent: DispatchResult =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert_eq!(sent, DispatchResult::sent(Value::Null));
        assert!(sent.is_success());

        let failed: DispatchResult =
            serde_json::from_value(json!({"success": false, "error": "nope"})).unwrap();
        assert_eq!(failed.error(), Some("nope"));
        assert_eq!(failed.data(), None);

        assert!(serde_json::from_value::<DispatchResult>(json!({"success": false})).is_err());
    }

    proptest! {
        #[test]
        fn prop_basic_auth_header_decodes_to_credentials(
            username in "[^:]{0,24}",
            password in "\\PC{0,24}",
        ) {
            let header = Credentials::new(username.clone(), password.clone()).basic_auth_header();
            let encoded = header.strip_prefix("Basic ").unwrap();
            let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
            prop_assert_eq!(decoded, format!("{}:{}", username, password));
        }

        #[test]
        fn prop_new_drops_exactly_blank_recipients(
            numbers in prop::collection::vec(prop_oneof!["[ \\t]{0,3}", "[ ]{0,2}\\+?[0-9]{3,12}[ ]{0,2}"], 0..8),
        ) {
            let request = DispatchRequest::new(Backend::Cloud, credentials(), "hi", &numbers);
            let expected: Vec<String> = numbers
                .iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect();
            prop_assert_eq!(&request.phone_numbers, &expected);
            prop_assert!(request.phone_numbers.iter().all(|n| !n.trim().is_empty()));
        }
    }
}
