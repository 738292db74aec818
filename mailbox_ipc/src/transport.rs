//! Transport seams consumed by the bridge
//!
//! Implementations own wire framing, queuing and the actual transition
//! into secure execution. The bridge never retries through these seams;
//! retry policy, if any, belongs to the implementation.

use crate::iovec::OutVec;
use crate::params::ClientCallParams;
use crate::reply::MailboxReply;
use psa_types::{ClientId, MailboxError};

/// Cross-core client-call primitive
///
/// Carries one tagged parameter set to the secure side and fills in the
/// reply. A transport error means the reply contents are unspecified; the
/// sentinel pre-fill guards against decoding them.
pub trait ClientCallTransport: Send + Sync {
    /// Submits one client call and blocks until the channel settles
    fn client_call(
        &self,
        params: &mut ClientCallParams<'_, '_>,
        client: ClientId,
        reply: &mut MailboxReply,
    ) -> Result<(), MailboxError>;
}

/// One-shot service-request primitive
///
/// Used for connectionless requests such as diagnostic writes. The input
/// must already fit a single mailbox slot; chunking is the caller's job.
pub trait ServiceRequest: Send + Sync {
    /// Submits one bounded request and reports only success or failure
    fn one_shot(
        &self,
        request: u32,
        input: &[u8],
        output: Option<&mut OutVec<'_>>,
    ) -> Result<(), MailboxError>;
}
