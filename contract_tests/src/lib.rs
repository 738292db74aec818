//! # Bridge Contract Tests
//!
//! This crate provides "golden" tests for the bridge's observable
//! contracts to ensure they don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: each guarantee is written as code
//! - **Whole-stack first**: tests exercise the façade over the real
//!   dispatch and transport layers, not isolated units
//! - **Deterministic doubles**: the simulated secure side and its fault
//!   plans replace hardware, never timing luck
//!
//! ## Structure
//!
//! Each seam has a module pinning its contract:
//! - Façade sentinel mapping, descriptor validation and identity flow
//! - Dispatch serialization and gate-construction discipline
//! - Chunked log delivery through the one-shot primitive

pub mod client_facade;
pub mod dispatch;
pub mod logging;

/// Common helpers wiring a façade over the simulated secure side
pub mod test_helpers {
    use mailbox_ipc::PSA_MAX_IOVEC;
    use ns_interface::{
        ClientIdentity, GatedClientCall, SharedClientId, StaticSchedulerProbe,
        SynchronizedDispatch,
    };
    use psa_client::PsaClient;
    use psa_types::{PsaStatus, ServiceId};
    use sim_secure::{CallHandler, SimSecureSide};
    use std::sync::Arc;

    /// SID of the echo service every test bridge registers
    pub const ECHO_SID: ServiceId = ServiceId::new(0x4000_0042);

    /// Version the echo service is registered with
    pub const ECHO_VERSION: u32 = 2;

    /// A façade wired through the scheduler-aware dispatcher to the
    /// simulated secure side
    pub type Bridge = PsaClient<GatedClientCall<SimSecureSide, SynchronizedDispatch>>;

    /// Handler copying the first input into the first output
    pub fn echo_handler() -> CallHandler {
        Box::new(|_request_type, inputs, outputs| {
            if let (Some(input), Some(output)) = (inputs.first(), outputs.first_mut()) {
                output.write_from(input.as_slice());
            }
            PsaStatus::SUCCESS
        })
    }

    /// Builds a bridge with an explicit scheduler state and identity
    pub fn bridge_with(scheduler_running: bool, identity: Arc<dyn ClientIdentity>) -> Bridge {
        let secure = SimSecureSide::new();
        secure.register_service(ECHO_SID, ECHO_VERSION, echo_handler());

        let probe = StaticSchedulerProbe::shared(scheduler_running);
        let dispatch = SynchronizedDispatch::new(probe);
        dispatch.init().expect("gate creation failed");

        PsaClient::new(GatedClientCall::new(secure, dispatch), identity)
    }

    /// Builds a bridge with a running scheduler and the shared identity
    pub fn bridge() -> Bridge {
        bridge_with(true, Arc::new(SharedClientId::default()))
    }

    /// Returns the simulated secure side beneath a bridge
    pub fn secure_side(bridge: &Bridge) -> &SimSecureSide {
        bridge.transport().transport()
    }

    /// Largest descriptor list split the call contract allows
    pub fn max_split() -> (usize, usize) {
        (PSA_MAX_IOVEC / 2, PSA_MAX_IOVEC - PSA_MAX_IOVEC / 2)
    }
}
