//! # PSA Client Types
//!
//! This crate defines the identifier and status vocabulary shared by the
//! non-secure mailbox bridge.
//!
//! ## Philosophy
//!
//! - **Newtypes, not bare integers**: a service id, a connection handle and
//!   a client id are different things and cannot be confused
//! - **Sentinels are named**: the null handle, the "no version" value and
//!   the out-of-band status codes are constants, not magic literals
//! - **Wire-fixed**: every type here fits a single mailbox slot field

pub mod error;
pub mod ids;
pub mod status;

pub use error::{MailboxError, MAILBOX_SUCCESS};
pub use ids::{ClientId, Handle, ServiceId};
pub use status::{PsaStatus, PSA_IPC_CALL, VERSION_NONE};
