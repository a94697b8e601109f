//! Submission subsystem.
//!
//! # Data Flow
//! ```text
//! caller payload + endpoint list
//!     → submit.rs (ordered fallback loop, short-circuit on first success)
//!     → attempt.rs (one bounded POST per endpoint, outcome classification)
//!     → types.rs (attempt log, Delivery on success, SubmitError otherwise)
//! ```
//!
//! # Design Decisions
//! - Endpoints are tried sequentially, never raced; the intent is graceful
//!   degradation toward later addresses, not fastest-responder wins
//! - Exactly one try per endpoint; "retry" means the next distinct address
//! - The attempt deadline is polled before the request future, so the cutoff
//!   is inclusive: a response landing exactly on it counts as timed out
//! - The attempt log is part of the result on success and failure alike

mod attempt;
pub mod submit;
pub mod types;

pub use submit::Submitter;
pub use types::{
    AttemptOutcome, AttemptRecord, Delivery, ErrorCategory, Payload, SubmitError, SubmitResponse,
    SubmitResult,
};
