use serde_json::Value;
use thiserror::Error;

/// What the caller should offer the user after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Prompt for a fresh login.
    Relogin,
    /// Show an explicit "Retry" control. Retries are never automatic.
    Retry,
    /// Static message only.
    None,
}

/// Classified outcome of a failed request.
///
/// The Resource Client never lets a failure escape in any other form, so every
/// caller can render `user_message()` as a banner and keep its prior state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// 401, or a protected endpoint called without a session.
    #[error("not authenticated")]
    Unauthenticated,

    /// 405: the deployment does not accept this verb on this path.
    #[error("method not supported by {path}")]
    MethodNotSupported { path: String },

    /// 4xx with a structured body; `message` is every field message flattened.
    #[error("validation failed ({status}): {message}")]
    ValidationFailed { status: u16, message: String },

    /// No response at all (DNS, refused connection, reset, TLS).
    #[error("connectivity failure: {message}")]
    ConnectivityFailure { message: String },

    /// 5xx.
    #[error("server fault ({status})")]
    ServerFault { status: u16 },

    /// 404: the configured route does not exist on this backend.
    #[error("endpoint not found: {path}")]
    EndpointMissing { path: String },

    /// Any other 4xx whose body carried nothing structured.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A success response whose body did not match the expected record shape.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

impl RequestError {
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::ConnectivityFailure {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::ConnectivityFailure { .. })
    }

    /// The follow-up the UI should offer.
    pub fn affordance(&self) -> Affordance {
        match self {
            Self::Unauthenticated => Affordance::Relogin,
            Self::ConnectivityFailure { .. }
            | Self::ServerFault { .. }
            | Self::MalformedResponse { .. } => Affordance::Retry,
            Self::MethodNotSupported { .. }
            | Self::ValidationFailed { .. }
            | Self::EndpointMissing { .. }
            | Self::Rejected { .. } => Affordance::None,
        }
    }

    /// Human-readable banner text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Session expired. Please login again.".to_string(),
            Self::MethodNotSupported { .. } => {
                "This action is not configured properly on the server. Please contact support."
                    .to_string()
            }
            Self::ValidationFailed { message, .. } | Self::Rejected { message, .. } => {
                message.clone()
            }
            Self::ConnectivityFailure { .. } => {
                "No response from server. Please check your connection.".to_string()
            }
            Self::ServerFault { .. } => {
                "The server encountered an error. Please try again.".to_string()
            }
            Self::EndpointMissing { path } => format!(
                "The EyeCare service endpoint '{path}' was not found. Check the configured API URL."
            ),
            Self::MalformedResponse { .. } => {
                "The server returned an unexpected response. Please try again.".to_string()
            }
        }
    }
}

const FALLBACK_REJECTION: &str = "The request was rejected by the server.";

/// Classifies a non-success HTTP status and its raw body.
///
/// Must only be called for statuses outside 2xx.
pub fn classify_status(status: u16, path: &str, body: &str) -> RequestError {
    match status {
        401 => RequestError::Unauthenticated,
        404 => RequestError::EndpointMissing {
            path: path.to_string(),
        },
        405 => RequestError::MethodNotSupported {
            path: path.to_string(),
        },
        400..=499 => match serde_json::from_str::<Value>(body) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => RequestError::ValidationFailed {
                status,
                message: flatten_messages(&value),
            },
            _ => {
                let trimmed = body.trim();
                RequestError::Rejected {
                    status,
                    message: if trimmed.is_empty() || trimmed.starts_with('<') {
                        FALLBACK_REJECTION.to_string()
                    } else {
                        trimmed.to_string()
                    },
                }
            }
        },
        _ => RequestError::ServerFault { status },
    }
}

/// Flattens a structured error body into one display string.
///
/// `detail`, `error` and `message` win when present as strings; otherwise every
/// field's messages are joined with a space in field order. Never empty.
pub fn flatten_messages(body: &Value) -> String {
    if let Value::Object(map) = body {
        for key in ["detail", "error", "message"] {
            if let Some(Value::String(text)) = map.get(key)
                && !text.trim().is_empty()
            {
                return text.trim().to_string();
            }
        }
    }

    let mut parts = Vec::new();
    collect_messages(body, &mut parts);

    if parts.is_empty() {
        FALLBACK_REJECTION.to_string()
    } else {
        parts.join(" ")
    }
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            let text = text.trim();
            if !text.is_empty() {
                out.push(text.to_string());
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_messages(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_messages(item, out)),
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_401_is_unauthenticated_and_prompts_relogin() {
        let err = classify_status(401, "scans/", "{\"detail\":\"Token expired\"}");
        assert_eq!(err, RequestError::Unauthenticated);
        assert_eq!(err.affordance(), Affordance::Relogin);
    }

    #[test]
    fn test_405_is_configuration_fault() {
        let err = classify_status(405, "scans/", "");
        assert!(matches!(err, RequestError::MethodNotSupported { .. }));
        assert_eq!(err.affordance(), Affordance::None);
        assert!(err.user_message().contains("contact support"));
    }

    #[test]
    fn test_404_is_endpoint_missing() {
        let err = classify_status(404, "consultations/", "<html>Not Found</html>");
        assert_eq!(
            err,
            RequestError::EndpointMissing {
                path: "consultations/".to_string()
            }
        );
    }

    #[test]
    fn test_field_errors_are_flattened_in_order() {
        let body = r#"{"subject":["Subject must be at least 5 characters long."],"message":["Message must be at least 10 characters long."]}"#;
        let err = classify_status(400, "contact-messages/", body);
        assert_eq!(
            err,
            RequestError::ValidationFailed {
                status: 400,
                message: "Subject must be at least 5 characters long. Message must be at least 10 characters long."
                    .to_string()
            }
        );
    }

    #[test]
    fn test_detail_takes_precedence() {
        let body = json!({"detail": "Scan failed.", "image": ["bad"]});
        assert_eq!(flatten_messages(&body), "Scan failed.");

        let body = json!({"error": "Not authorized to approve this consultation"});
        assert_eq!(
            flatten_messages(&body),
            "Not authorized to approve this consultation"
        );
    }

    #[test]
    fn test_nested_and_non_string_values() {
        let body = json!({
            "user": {"username": ["A user with that username already exists."]},
            "count": 3,
            "non_field_errors": ["Passwords must match."]
        });
        assert_eq!(
            flatten_messages(&body),
            "A user with that username already exists. Passwords must match."
        );
    }

    #[test]
    fn test_empty_structure_uses_fallback() {
        assert_eq!(flatten_messages(&json!({})), FALLBACK_REJECTION);
        assert_eq!(flatten_messages(&json!([])), FALLBACK_REJECTION);
    }

    #[test]
    fn test_unstructured_4xx_is_rejected() {
        let err = classify_status(403, "scans/1/review/", "Forbidden");
        assert_eq!(
            err,
            RequestError::Rejected {
                status: 403,
                message: "Forbidden".to_string()
            }
        );

        let err = classify_status(400, "scans/", "");
        assert_eq!(err.user_message(), FALLBACK_REJECTION);
    }

    #[test]
    fn test_5xx_is_server_fault_with_retry() {
        let err = classify_status(502, "articles/", "Bad gateway");
        assert_eq!(err, RequestError::ServerFault { status: 502 });
        assert_eq!(err.affordance(), Affordance::Retry);
    }

    #[test]
    fn test_connectivity_is_distinct_from_unauthenticated() {
        let err = RequestError::connectivity("connection refused");
        assert!(err.is_connectivity());
        assert!(!err.is_unauthenticated());
        assert_eq!(err.affordance(), Affordance::Retry);
    }
}
