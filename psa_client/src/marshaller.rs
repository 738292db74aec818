//! Mailbox client-call marshaller

use mailbox_ipc::{ClientCallParams, ClientCallTransport, MailboxReply};
use psa_types::{ClientId, MailboxError};

/// Submits one client call through the cross-core primitive
///
/// The reply is pre-filled with the error sentinel so a transport failure
/// can never be decoded as a successful return value. The transport is
/// invoked exactly once; a failed call is never retried here — mapping the
/// failure onto a caller-visible result is the façade's job.
pub fn submit<T: ClientCallTransport>(
    transport: &T,
    params: &mut ClientCallParams<'_, '_>,
    client: ClientId,
) -> (Result<(), MailboxError>, MailboxReply) {
    let mut reply = MailboxReply::new();
    let result = transport.client_call(params, client, &mut reply);
    (result, reply)
}
