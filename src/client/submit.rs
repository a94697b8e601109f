//! Ordered-fallback submission engine.
//!
//! # Responsibilities
//! - Validate preconditions before any network activity
//! - Try endpoints strictly in the caller's order, one attempt each
//! - Short-circuit on the first accepted delivery
//! - Aggregate the full attempt log on exhaustion or cancellation

use std::time::Duration;

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::client::attempt;
use crate::client::types::{
    AttemptOutcome, AttemptRecord, Delivery, ErrorCategory, Payload, SubmitError, SubmitResult,
};

/// Ordered-fallback submission client.
///
/// Wraps a shared `reqwest` client; cheap to clone and safe to use from many
/// tasks at once. Each call owns its attempt log and timers, so concurrent
/// submissions share nothing but the connection pool.
#[derive(Debug, Clone)]
pub struct Submitter {
    http: reqwest::Client,
}

impl Submitter {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Build on top of a caller-configured `reqwest` client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Deliver `payload` to the first endpoint that accepts it.
    ///
    /// Endpoints are tried strictly in order, one bounded POST each. The
    /// first 2xx response with a parseable body wins and no further endpoint
    /// is contacted. If every endpoint fails, the returned error carries the
    /// category of the final attempt and the full ordered log.
    pub async fn submit(
        &self,
        payload: &Payload,
        endpoints: &[String],
        per_attempt_timeout: Duration,
    ) -> SubmitResult<Delivery> {
        self.run(payload, endpoints, per_attempt_timeout, None).await
    }

    /// Like [`Submitter::submit`], but racing each attempt against a
    /// cancellation signal.
    ///
    /// When the signal fires, the in-flight attempt is aborted and the call
    /// returns [`SubmitError::Cancelled`] immediately; later endpoints are
    /// never contacted. Attempts completed before the trigger stay recorded.
    pub async fn submit_with_shutdown(
        &self,
        payload: &Payload,
        endpoints: &[String],
        per_attempt_timeout: Duration,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> SubmitResult<Delivery> {
        self.run(payload, endpoints, per_attempt_timeout, Some(shutdown))
            .await
    }

    async fn run(
        &self,
        payload: &Payload,
        endpoints: &[String],
        per_attempt_timeout: Duration,
        mut shutdown: Option<&mut broadcast::Receiver<()>>,
    ) -> SubmitResult<Delivery> {
        if payload.is_empty() {
            return Err(SubmitError::EmptyPayload);
        }
        if endpoints.is_empty() {
            return Err(SubmitError::NoEndpoints);
        }
        if per_attempt_timeout.is_zero() {
            return Err(SubmitError::ZeroTimeout);
        }

        // One request id for the whole fallback sequence; every attempt
        // carries it so receiver logs can be correlated.
        let request_id = Uuid::new_v4();
        let mut attempts: Vec<AttemptRecord> = Vec::with_capacity(endpoints.len());

        for (position, endpoint) in endpoints.iter().enumerate() {
            tracing::debug!(%request_id, endpoint = %endpoint, position, "attempting delivery");

            let outcome = match shutdown.as_mut() {
                Some(rx) => {
                    tokio::select! {
                        biased;
                        _ = rx.recv() => {
                            tracing::info!(
                                %request_id,
                                endpoint = %endpoint,
                                completed = attempts.len(),
                                "submission cancelled"
                            );
                            return Err(SubmitError::Cancelled { attempts });
                        }
                        out = attempt::run_attempt(
                            &self.http,
                            endpoint,
                            payload,
                            request_id,
                            per_attempt_timeout,
                        ) => out,
                    }
                }
                None => {
                    attempt::run_attempt(
                        &self.http,
                        endpoint,
                        payload,
                        request_id,
                        per_attempt_timeout,
                    )
                    .await
                }
            };

            match outcome {
                Ok(response) => {
                    tracing::info!(
                        %request_id,
                        endpoint = %endpoint,
                        attempts = attempts.len() + 1,
                        "delivery accepted"
                    );
                    attempts.push(AttemptRecord {
                        endpoint: endpoint.clone(),
                        outcome: AttemptOutcome::Delivered,
                    });
                    return Ok(Delivery { response, attempts });
                }
                Err((category, message)) => {
                    tracing::warn!(
                        %request_id,
                        endpoint = %endpoint,
                        category = %category,
                        error = %message,
                        "attempt failed"
                    );
                    attempts.push(AttemptRecord {
                        endpoint: endpoint.clone(),
                        outcome: AttemptOutcome::Failed { category, message },
                    });
                }
            }
        }

        // Every attempt failed; the terminal error is derived from the log
        // rather than tracked in a separate mutable slot.
        let (category, message) = attempts
            .iter()
            .rev()
            .find_map(|record| match &record.outcome {
                AttemptOutcome::Failed { category, message } => {
                    Some((*category, message.clone()))
                }
                AttemptOutcome::Delivered => None,
            })
            .unwrap_or((
                ErrorCategory::Unreachable,
                String::from("no attempts recorded"),
            ));

        Err(SubmitError::Exhausted {
            category,
            message,
            attempts,
        })
    }
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new()
    }
}
