//! Single bounded delivery attempt.
//!
//! # Responsibilities
//! - Issue exactly one POST carrying the JSON payload
//! - Enforce the per-attempt deadline over the whole exchange
//! - Classify the outcome into an error category on failure

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use url::Url;
use uuid::Uuid;

use crate::client::types::{ErrorCategory, Payload, SubmitResponse};

/// Category plus human-readable detail for a failed attempt.
pub(crate) type AttemptFailure = (ErrorCategory, String);

/// Try one endpoint once, bounded by `limit`.
///
/// The deadline covers the full exchange: connect, send, and body read.
pub(crate) async fn run_attempt(
    http: &reqwest::Client,
    endpoint: &str,
    payload: &Payload,
    request_id: Uuid,
    limit: Duration,
) -> Result<SubmitResponse, AttemptFailure> {
    // An address that does not parse can never be reached as given.
    let url: Url = endpoint.parse().map_err(|e| {
        (
            ErrorCategory::Unreachable,
            format!("invalid endpoint URL: {e}"),
        )
    })?;

    let request = http
        .post(url)
        .header("x-request-id", request_id.to_string())
        .json(payload);

    let exchange = async {
        let response = request.send().await.map_err(classify_transport)?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            (
                ErrorCategory::Unreachable,
                format!("error reading response body: {e}"),
            )
        })?;
        Ok::<(StatusCode, String), AttemptFailure>((status, body))
    };

    let (status, body) = match bounded(limit, exchange).await {
        None => {
            return Err((
                ErrorCategory::Timeout,
                format!("no response within {}ms", limit.as_millis()),
            ))
        }
        Some(result) => result?,
    };

    if !status.is_success() {
        return Err((
            ErrorCategory::ServerRejected,
            rejection_message(status, &body),
        ));
    }

    serde_json::from_str::<SubmitResponse>(&body).map_err(|e| {
        (
            ErrorCategory::BadResponse,
            format!("malformed response body: {e}"),
        )
    })
}

/// Race a future against a deadline.
///
/// The timer is polled first, so a future completing at exactly the deadline
/// still counts as timed out.
pub(crate) async fn bounded<F>(limit: Duration, fut: F) -> Option<F::Output>
where
    F: Future,
{
    let deadline = tokio::time::sleep(limit);
    tokio::pin!(deadline);
    tokio::pin!(fut);
    tokio::select! {
        biased;
        () = &mut deadline => None,
        out = &mut fut => Some(out),
    }
}

fn classify_transport(error: reqwest::Error) -> AttemptFailure {
    if error.is_timeout() {
        (ErrorCategory::Timeout, error.to_string())
    } else {
        (ErrorCategory::Unreachable, error.to_string())
    }
}

/// Prefer the message the server put in its body; fall back to the status.
fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<SubmitResponse>(body)
        .ok()
        .and_then(|response| response.message)
        .unwrap_or_else(|| format!("server returned status {status}"))
}
