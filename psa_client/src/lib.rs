//! # PSA Client
//!
//! The public face of the bridge: four entry points (version queries,
//! connect, call, close) over the mailbox client-call marshaller.
//!
//! ## Philosophy
//!
//! - **Sentinels, not error types**: transport failure is mapped onto
//!   domain sentinels (null handle, no version, reserved status codes) so
//!   callers never see a raw transport error at this layer
//! - **Validate before touching the channel**: malformed descriptor lists
//!   are rejected synchronously with zero side effects
//! - **Never retry**: one submission per operation; retry policy, if any,
//!   belongs below the transport seam

pub mod client;
pub mod marshaller;

pub use client::PsaClient;
pub use marshaller::submit;
