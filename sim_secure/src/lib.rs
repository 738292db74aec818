//! # Simulated Secure Side
//!
//! An in-process double of the secure partition, for testing the bridge
//! without hardware.
//!
//! ## Philosophy
//!
//! - **Deterministic**: no randomness in behavior; faults come from an
//!   explicit plan and fire in a reproducible order
//! - **Observable**: every crossing is recorded as a typed audit event
//!   with a correlation id, and per-primitive counters let tests assert
//!   "the transport was never invoked"
//! - **Test-focused**: not intended for production use
//!
//! ## Structure
//!
//! [`SimSecureSide`] implements both consumed transport seams: the
//! client-call primitive (connect / call / close / version queries against
//! a registered-service table) and the one-shot service request (payloads
//! appended to a delivery log).

pub mod fault;
pub mod secure_side;

pub use fault::{FaultInjector, FaultPlan, TransportFault};
pub use secure_side::{CallHandler, EventId, MailboxEvent, SimSecureSide};
