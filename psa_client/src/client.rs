//! PSA client façade

use crate::marshaller;
use mailbox_ipc::{ClientCallParams, ClientCallTransport, InVec, OutVec, PSA_MAX_IOVEC};
use ns_interface::ClientIdentity;
use psa_types::{Handle, PsaStatus, ServiceId, VERSION_NONE};
use std::sync::Arc;

/// The four public entry points of the bridge
///
/// Holds the cross-core transport and the injected identity resolver.
/// Each operation resolves the caller's identity once, submits once, and
/// maps transport failure onto its operation's sentinel.
pub struct PsaClient<T: ClientCallTransport> {
    transport: T,
    identity: Arc<dyn ClientIdentity>,
}

impl<T: ClientCallTransport> PsaClient<T> {
    /// Creates a client over a transport and an identity resolver
    pub fn new(transport: T, identity: Arc<dyn ClientIdentity>) -> Self {
        Self {
            transport,
            identity,
        }
    }

    /// Returns the transport, for embedders that share it
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Queries the secure framework version
    ///
    /// Returns [`VERSION_NONE`] if the version could not be obtained.
    pub fn framework_version(&self) -> u32 {
        let client = self.identity.current_client_id();
        let mut params = ClientCallParams::FrameworkVersion;
        let (result, reply) = marshaller::submit(&self.transport, &mut params, client);
        match result {
            Ok(()) => reply.version(),
            Err(_) => VERSION_NONE,
        }
    }

    /// Queries the version of one secure service
    ///
    /// Returns [`VERSION_NONE`] if the version could not be obtained,
    /// whether because the service is unknown or the channel failed.
    pub fn version(&self, sid: ServiceId) -> u32 {
        let client = self.identity.current_client_id();
        let mut params = ClientCallParams::Version { sid };
        let (result, reply) = marshaller::submit(&self.transport, &mut params, client);
        match result {
            Ok(()) => reply.version(),
            Err(_) => VERSION_NONE,
        }
    }

    /// Connects to a secure service
    ///
    /// Returns [`Handle::NULL`] on any failure. The secure side's own
    /// refusal and a transport failure are indistinguishable here; this
    /// API has no separate error channel.
    pub fn connect(&self, sid: ServiceId, version: u32) -> Handle {
        let client = self.identity.current_client_id();
        let mut params = ClientCallParams::Connect { sid, version };
        let (result, reply) = marshaller::submit(&self.transport, &mut params, client);
        match result {
            Ok(()) => reply.handle(),
            Err(_) => Handle::NULL,
        }
    }

    /// Invokes an established connection
    ///
    /// Descriptor lists are validated before any transport interaction:
    /// each list and their sum must stay within [`PSA_MAX_IOVEC`].
    /// Violations return [`PsaStatus::PROGRAMMER_ERROR`] with no side
    /// effects. Once the call reaches the transport, every output
    /// descriptor's length is overwritten with the actual per-slot length
    /// from the reply — even when the returned status is an error.
    pub fn call(
        &self,
        handle: Handle,
        request_type: i32,
        inputs: &[InVec<'_>],
        outputs: &mut [OutVec<'_>],
    ) -> PsaStatus {
        if inputs.len() > PSA_MAX_IOVEC
            || outputs.len() > PSA_MAX_IOVEC
            || inputs.len() + outputs.len() > PSA_MAX_IOVEC
        {
            return PsaStatus::PROGRAMMER_ERROR;
        }

        let client = self.identity.current_client_id();
        let mut params = ClientCallParams::Call {
            handle,
            request_type,
            inputs,
            outputs: &mut *outputs,
        };
        let (result, reply) = marshaller::submit(&self.transport, &mut params, client);

        let status = match result {
            Ok(()) => reply.status(),
            Err(_) => PsaStatus::INTER_CORE_COMM_ERR,
        };

        for (slot, out) in outputs.iter_mut().enumerate() {
            out.set_len(reply.out_vec_len[slot]);
        }

        status
    }

    /// Tears down a connection
    ///
    /// Fire-and-forget: the transport result is discarded and no error is
    /// ever reported to the caller.
    pub fn close(&self, handle: Handle) {
        let client = self.identity.current_client_id();
        let mut params = ClientCallParams::Close { handle };
        let _ = marshaller::submit(&self.transport, &mut params, client);
    }
}
