//! Fixed-layout mailbox reply

use crate::iovec::PSA_MAX_IOVEC;
use psa_types::{Handle, PsaStatus};
use serde::{Deserialize, Serialize};

/// Return value a reply carries before the far side has written anything
///
/// Decodes as a generic error, so an aborted transport exchange can never
/// be mistaken for success.
pub const REPLY_UNSET: i32 = i32::MIN;

/// Reply filled in by the secure side for one client call
///
/// Fixed size, suitable for a single mailbox slot. `out_vec_len` holds the
/// actual number of bytes written per output descriptor slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxReply {
    /// Signed return value (version, handle or status depending on the op)
    pub return_val: i32,
    /// Actual output lengths, one per output descriptor slot
    pub out_vec_len: [usize; PSA_MAX_IOVEC],
}

impl MailboxReply {
    /// Creates a reply with the error sentinel pre-filled
    pub fn new() -> Self {
        Self {
            return_val: REPLY_UNSET,
            out_vec_len: [0; PSA_MAX_IOVEC],
        }
    }

    /// Decodes the return value as a version number
    pub fn version(&self) -> u32 {
        self.return_val as u32
    }

    /// Decodes the return value as a connection handle
    pub fn handle(&self) -> Handle {
        Handle::from_raw(self.return_val)
    }

    /// Decodes the return value as a service status
    pub fn status(&self) -> PsaStatus {
        PsaStatus::from_raw(self.return_val)
    }
}

impl Default for MailboxReply {
    fn default() -> Self {
        Self::new()
    }
}
