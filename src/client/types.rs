//! Submission types and error definitions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Immutable key/value payload delivered to an endpoint.
///
/// Serializes as a flat JSON object. Field order is stable (sorted by field
/// name), so every attempt in a fallback sequence puts identical bytes on
/// the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Response body an endpoint is expected to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Whether the endpoint accepted the submission.
    pub success: bool,

    /// Optional human-readable detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Optional echo of the received payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Failure classification for a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No response within the per-attempt deadline.
    Timeout,

    /// DNS failure, connection refused, or another transport error.
    Unreachable,

    /// The endpoint answered with a non-2xx status.
    ServerRejected,

    /// Success status, but a body that could not be parsed.
    BadResponse,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorCategory::Timeout => "timed out",
            ErrorCategory::Unreachable => "unreachable",
            ErrorCategory::ServerRejected => "rejected by server",
            ErrorCategory::BadResponse => "bad response",
        };
        f.write_str(text)
    }
}

/// Outcome of one bounded try against one endpoint.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// The endpoint accepted the payload and returned a well-formed body.
    Delivered,

    /// The attempt failed; the next endpoint (if any) is tried.
    Failed {
        category: ErrorCategory,
        message: String,
    },
}

/// One entry in the ordered attempt log.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// Endpoint address exactly as supplied by the caller.
    pub endpoint: String,
    pub outcome: AttemptOutcome,
}

impl AttemptRecord {
    /// Failure category, if this attempt failed.
    pub fn category(&self) -> Option<ErrorCategory> {
        match &self.outcome {
            AttemptOutcome::Failed { category, .. } => Some(*category),
            AttemptOutcome::Delivered => None,
        }
    }
}

/// Successful delivery: the parsed response plus the full attempt trail.
///
/// The final log entry is always the accepting endpoint.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub response: SubmitResponse,
    pub attempts: Vec<AttemptRecord>,
}

/// Errors surfaced to the caller of a submission.
///
/// The first three variants are local precondition failures, rejected before
/// any network activity.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("payload must contain at least one field")]
    EmptyPayload,

    #[error("endpoint list must not be empty")]
    NoEndpoints,

    #[error("per-attempt timeout must be positive")]
    ZeroTimeout,

    /// The caller cancelled the submission mid-flight. Attempts completed
    /// before the trigger remain recorded.
    #[error("submission cancelled after {} completed attempts", .attempts.len())]
    Cancelled { attempts: Vec<AttemptRecord> },

    /// Every endpoint failed. Category and message come from the final
    /// attempt; the log covers all of them.
    #[error("all {} endpoints failed, last attempt {}: {}", .attempts.len(), .category, .message)]
    Exhausted {
        category: ErrorCategory,
        message: String,
        attempts: Vec<AttemptRecord>,
    },
}

/// Result type for submission operations.
pub type SubmitResult<T> = Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_as_flat_object() {
        let payload: Payload = [("name", "ada"), ("department", "Engineering")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"department":"Engineering","name":"ada"}"#);
    }

    #[test]
    fn response_parses_without_optional_fields() {
        let parsed: SubmitResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.message.is_none());
        assert!(parsed.data.is_none());
    }

    #[test]
    fn category_display() {
        assert_eq!(ErrorCategory::Timeout.to_string(), "timed out");
        assert_eq!(ErrorCategory::Unreachable.to_string(), "unreachable");
        assert_eq!(
            ErrorCategory::ServerRejected.to_string(),
            "rejected by server"
        );
        assert_eq!(ErrorCategory::BadResponse.to_string(), "bad response");
    }

    #[test]
    fn exhausted_display_counts_endpoints() {
        let attempts = vec![
            AttemptRecord {
                endpoint: "http://localhost:3000/post".to_string(),
                outcome: AttemptOutcome::Failed {
                    category: ErrorCategory::ServerRejected,
                    message: "server returned status 500 Internal Server Error".to_string(),
                },
            },
            AttemptRecord {
                endpoint: "http://localhost:5000/post".to_string(),
                outcome: AttemptOutcome::Failed {
                    category: ErrorCategory::Timeout,
                    message: "no response within 5000ms".to_string(),
                },
            },
        ];
        let err = SubmitError::Exhausted {
            category: ErrorCategory::Timeout,
            message: "no response within 5000ms".to_string(),
            attempts,
        };
        let text = err.to_string();
        assert!(text.contains("2 endpoints"));
        assert!(text.contains("timed out"));
    }
}
