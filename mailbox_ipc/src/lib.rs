//! # Mailbox IPC
//!
//! This crate defines the logical message shapes placed on the inter-core
//! mailbox, and the transport seams the bridge consumes.
//!
//! ## Philosophy
//!
//! - **Fixed layout**: every payload and reply fits a single mailbox slot;
//!   variable-length data must be pre-chunked before reaching this boundary
//! - **Closed sum type**: one parameter constructor per operation, so the
//!   secure-side match is exhaustive at compile time
//! - **Seams, not bindings**: the cross-core call and the one-shot service
//!   request are traits; hardware framing and queuing live behind them
//!
//! ## Architecture
//!
//! The client-call path carries a tagged [`ClientCallParams`] value and a
//! [`MailboxReply`] that the far side fills in. The one-shot path carries a
//! single bounded input descriptor and reports only success or failure.

pub mod iovec;
pub mod params;
pub mod reply;
pub mod transport;

pub use iovec::{InVec, OutVec, PSA_MAX_IOVEC};
pub use params::{ClientCallOp, ClientCallParams};
pub use reply::{MailboxReply, REPLY_UNSET};
pub use transport::{ClientCallTransport, ServiceRequest};
