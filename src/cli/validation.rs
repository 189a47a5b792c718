//! CLI argument validation functions
//!
//! Value parsers for arguments that need more than clap's built-in checks.

use reqwest::Url;
use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate an absolute http(s) URL such as a gateway endpoint
pub fn validate_http_url(url_str: &str) -> Result<String, String> {
    let url_str = url_str.trim();
    let url = Url::parse(url_str).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url_str.to_string()),
        "http" | "https" => Err(format!("URL must include a host: '{}'", url_str)),
        other => Err(format!(
            "Unsupported URL scheme '{}' in '{}'. Use http or https.",
            other, url_str
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_file_path_existing_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());
    }

    #[test]
    fn test_config_file_path_missing_file() {
        let err = validate_config_file_path("/nonexistent/sms-relay.toml").unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_config_file_path_directory() {
        let dir = TempDir::new().unwrap();
        let err = validate_config_file_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.contains("not a file"));
    }

    #[test]
    fn test_http_url_valid() {
        let valid = [
            "http://192.168.1.11:8080/message",
            "https://api.sms-gate.app/3rdparty/v1",
            "http://localhost:8080/message",
            " http://10.0.0.5/send ",
        ];

        for url in valid {
            assert!(validate_http_url(url).is_ok(), "URL {} should be valid", url);
        }
        assert_eq!(
            validate_http_url(" http://10.0.0.5/send ").unwrap(),
            "http://10.0.0.5/send"
        );
    }

    #[test]
    fn test_http_url_invalid() {
        let invalid = [
            "",
            "192.168.1.11:8080/message",
            "ftp://files.example/upload",
            "mailto:ops@example.com",
            "not a url",
        ];

        for url in invalid {
            assert!(validate_http_url(url).is_err(), "URL {} should be invalid", url);
        }
    }
}
