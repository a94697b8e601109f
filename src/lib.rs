//! Resilient form-submission client.
//!
//! Delivers a JSON key/value payload to the first endpoint in a
//! caller-supplied ordered list that accepts it, falling back through the
//! list on failure. Each attempt is bounded by an independent timeout and
//! classified on failure; the caller gets either the first success or an
//! aggregated error carrying the full attempt log.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌─────────────────────────────────────────────────┐
//!                     │               SUBMISSION CLIENT                  │
//!                     │                                                  │
//!   payload +         │  ┌─────────┐    ┌──────────┐    ┌────────────┐  │
//!   endpoint list ────┼─▶│ submit  │───▶│ attempt  │───▶│  endpoint  │──┼──▶ first 2xx wins
//!                     │  │ (order) │    │ (bounded)│    │   (POST)   │  │
//!                     │  └────┬────┘    └──────────┘    └────────────┘  │
//!                     │       │ on failure: next endpoint                │
//!                     │       ▼ on exhaustion: aggregated error + log    │
//!                     │                                                  │
//!                     │  ┌────────────────────────────────────────────┐ │
//!                     │  │            Cross-Cutting Concerns           │ │
//!                     │  │  ┌────────┐  ┌─────────────┐  ┌──────────┐ │ │
//!                     │  │  │ config │  │ diagnostics │  │ lifecycle│ │ │
//!                     │  │  │        │  │  (probing)  │  │ (cancel) │ │ │
//!                     │  │  └────────┘  └─────────────┘  └──────────┘ │ │
//!                     │  └────────────────────────────────────────────┘ │
//!                     └─────────────────────────────────────────────────┘
//! ```

// Core subsystem
pub mod client;

// Cross-cutting concerns
pub mod config;
pub mod diagnostics;
pub mod lifecycle;

pub use client::submit::Submitter;
pub use client::types::{
    AttemptOutcome, AttemptRecord, Delivery, ErrorCategory, Payload, SubmitError, SubmitResponse,
    SubmitResult,
};
pub use config::schema::ClientConfig;
pub use lifecycle::Shutdown;
