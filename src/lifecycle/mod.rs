//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Cancellation (shutdown.rs):
//!     caller or signal handler → trigger → in-flight attempt aborted,
//!     later endpoints never contacted
//!
//! Signals (signals.rs):
//!     SIGINT → trigger cancellation
//! ```
//!
//! # Design Decisions
//! - Per-attempt timeouts and caller cancellation are independent scopes:
//!   an attempt deadline never outlives its attempt, and a trigger never
//!   disturbs attempts already recorded

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
