//! Diagnostics subsystem.
//!
//! # Data Flow
//! ```text
//! configured endpoint list
//!     → probe.rs (URL parse → DNS → TCP connect, bounded per step)
//!     → ProbeReport per endpoint, in the caller's order
//!     → CLI renders the reachability summary
//! ```
//!
//! # Design Decisions
//! - Probes are transport-level only; nothing is POSTed
//! - One probe per endpoint per invocation, sequential like delivery

pub mod probe;

pub use probe::{probe_endpoint, probe_endpoints, ProbeReport, ProbeStatus};
