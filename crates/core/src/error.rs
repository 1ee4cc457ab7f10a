use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("Control API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error envelope returned by the Control API for non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    /// Ably error code (0 when the server did not send an envelope).
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub details: Option<BTreeMap<String, Vec<String>>>,
    /// The API path that produced this error. Never on the wire.
    #[serde(skip)]
    pub api_path: String,
}

impl ApiError {
    /// Map a failed response body to an [`ApiError`].
    ///
    /// Bodies that are not a JSON envelope are kept verbatim as the message,
    /// with `code = 0` and the HTTP status of the response.
    pub fn from_response(path: &str, status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiError>(body) {
            Ok(mut envelope) => {
                envelope.api_path = path.to_string();
                if envelope.status_code == 0 {
                    envelope.status_code = status;
                }
                envelope
            }
            Err(_) => ApiError {
                message: String::from_utf8_lossy(body).into_owned(),
                code: 0,
                status_code: status,
                href: None,
                details: None,
                api_path: path.to_string(),
            },
        }
    }

    /// Documentation link, falling back to the help page for the error code.
    pub fn help_href(&self) -> Option<String> {
        match self.href.as_deref() {
            Some(href) if !href.is_empty() => Some(href.to_string()),
            _ if self.code != 0 => Some(format!("https://help.ably.io/error/{}", self.code)),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: code {}: status code: {}",
            self.api_path, self.message, self.code, self.status_code
        )?;
        if let Some(href) = self.help_href() {
            write!(f, " see: {}", href)?;
        }
        if let Some(details) = &self.details {
            for (key, messages) in details {
                write!(f, "\n  {}:", key)?;
                for message in messages {
                    write!(f, "\n    {}", message)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_envelope_and_keeps_path() {
        let body = br#"{"message":"Not found","code":40400,"statusCode":404,"href":"https://help.ably.io/error/40400"}"#;
        let err = ApiError::from_response("/apps/a1/rules/r1", 404, body);
        assert_eq!(err.message, "Not found");
        assert_eq!(err.code, 40400);
        assert_eq!(err.status_code, 404);
        assert_eq!(err.api_path, "/apps/a1/rules/r1");
        assert_eq!(
            err.to_string(),
            "/apps/a1/rules/r1: Not found: code 40400: status code: 404 see: https://help.ably.io/error/40400"
        );
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = ApiError::from_response("/me", 502, b"<html>bad gateway</html>");
        assert_eq!(err.message, "<html>bad gateway</html>");
        assert_eq!(err.code, 0);
        assert_eq!(err.status_code, 502);
        assert_eq!(err.help_href(), None);
        assert_eq!(err.to_string(), "/me: <html>bad gateway</html>: code 0: status code: 502");
    }

    #[test]
    fn href_defaults_from_code() {
        let body = br#"{"message":"bad","code":40000,"statusCode":400}"#;
        let err = ApiError::from_response("/apps", 400, body);
        assert_eq!(err.help_href().as_deref(), Some("https://help.ably.io/error/40000"));
    }

    #[test]
    fn renders_details_sorted() {
        let body = br#"{"message":"invalid","code":40000,"statusCode":400,"href":"x","details":{"target":["bad url"],"source":["bad filter","too long"]}}"#;
        let err = ApiError::from_response("/apps/a/rules", 400, body);
        assert_eq!(
            err.to_string(),
            "/apps/a/rules: invalid: code 40000: status code: 400 see: x\n  source:\n    bad filter\n    too long\n  target:\n    bad url"
        );
    }

    #[test]
    fn api_errors_convert_into_control_errors() {
        let api = ApiError::from_response("/apps", 404, br#"{"message":"gone","code":40400}"#);
        let err = ControlError::from(api);
        assert!(matches!(&err, ControlError::Api(inner) if inner.status_code == 404));
        assert_eq!(
            err.to_string(),
            "Control API error: /apps: gone: code 40400: status code: 404 see: https://help.ably.io/error/40400"
        );
    }

    #[test]
    fn status_filled_when_envelope_omits_it() {
        let err = ApiError::from_response("/apps", 401, br#"{"message":"unauthorized"}"#);
        assert_eq!(err.status_code, 401);
    }
}
