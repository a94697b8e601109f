//! Caller-side cancellation tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use submit_relay::{ErrorCategory, Payload, Shutdown, SubmitError, Submitter};

mod common;

const ACCEPT_BODY: &str = r#"{"success":true}"#;

fn sample_payload() -> Payload {
    [("name", "ada")].into_iter().collect()
}

#[tokio::test]
async fn trigger_aborts_in_flight_attempt_and_skips_later_endpoints() {
    let slow = common::start_programmable_receiver(|| async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        (200, ACCEPT_BODY.to_string())
    })
    .await;

    let later_hits = Arc::new(AtomicU32::new(0));
    let hits = later_hits.clone();
    let later = common::start_programmable_receiver(move || {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            (200, ACCEPT_BODY.to_string())
        }
    })
    .await;

    let shutdown = Shutdown::new();
    let mut cancel = shutdown.subscribe();
    let endpoints = vec![common::endpoint(slow), common::endpoint(later)];
    let payload = sample_payload();

    let handle = tokio::spawn(async move {
        let submitter = Submitter::new();
        submitter
            .submit_with_shutdown(&payload, &endpoints, Duration::from_secs(20), &mut cancel)
            .await
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    let triggered = Instant::now();
    shutdown.trigger();

    let result = handle.await.unwrap();
    assert!(
        triggered.elapsed() < Duration::from_secs(2),
        "cancellation should return promptly"
    );
    assert!(matches!(result, Err(SubmitError::Cancelled { .. })));
    assert_eq!(later_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn completed_attempts_survive_cancellation() {
    let rejecting = common::start_fixed_receiver(500, r#"{"success":false,"message":"boom"}"#).await;
    let slow = common::start_programmable_receiver(|| async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        (200, ACCEPT_BODY.to_string())
    })
    .await;

    let shutdown = Shutdown::new();
    let mut cancel = shutdown.subscribe();
    let endpoints = vec![common::endpoint(rejecting), common::endpoint(slow)];
    let payload = sample_payload();

    let handle = tokio::spawn(async move {
        let submitter = Submitter::new();
        submitter
            .submit_with_shutdown(&payload, &endpoints, Duration::from_secs(20), &mut cancel)
            .await
    });

    tokio::time::sleep(Duration::from_millis(500)).await;
    shutdown.trigger();

    match handle.await.unwrap() {
        Err(SubmitError::Cancelled { attempts }) => {
            assert_eq!(attempts.len(), 1);
            assert_eq!(attempts[0].category(), Some(ErrorCategory::ServerRejected));
        }
        other => panic!("expected Cancelled, got {other:?}"),
    }
}

#[tokio::test]
async fn attempt_timeout_does_not_cancel_the_call() {
    let slow = common::start_programmable_receiver(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, ACCEPT_BODY.to_string())
    })
    .await;
    let accepting = common::start_fixed_receiver(200, ACCEPT_BODY).await;

    let shutdown = Shutdown::new();
    let mut cancel = shutdown.subscribe();

    let submitter = Submitter::new();
    let delivery = submitter
        .submit_with_shutdown(
            &sample_payload(),
            &[common::endpoint(slow), common::endpoint(accepting)],
            Duration::from_millis(300),
            &mut cancel,
        )
        .await
        .unwrap();

    assert_eq!(delivery.attempts.len(), 2);
    assert_eq!(delivery.attempts[0].category(), Some(ErrorCategory::Timeout));
    assert!(delivery.response.success);
}
