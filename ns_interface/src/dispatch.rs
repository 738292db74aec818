//! Call dispatcher strategies
//!
//! The dispatch capability wraps a four-argument entry point ("veneer")
//! with the mutual-exclusion gate. Two strategies implement it:
//! [`SynchronizedDispatch`] consults the kernel-state probe and locks only
//! when a scheduler is running; [`BareMetalDispatch`] always calls through
//! directly and is not safe under concurrent callers.

use crate::gate::{GateError, NsLock, OsGateFactory};
use crate::probe::SchedulerProbe;
use mailbox_ipc::{ClientCallParams, ClientCallTransport, MailboxReply};
use psa_types::{ClientId, MailboxError};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by bridge initialization
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InitError {
    /// The gate's lock primitive could not be created
    #[error("failed to create the ns lock: {0}")]
    LockCreation(#[from] GateError),
}

/// Dispatch capability for the cross-core call path
///
/// Exactly one logical call may be in flight across the bridge at a time;
/// implementations decide how that exclusivity is provided.
pub trait DispatchPolicy: Send + Sync {
    /// Invokes the veneer with the four arguments, serialized as required
    fn dispatch(
        &self,
        veneer: &mut dyn FnMut(u32, u32, u32, u32) -> i32,
        a0: u32,
        a1: u32,
        a2: u32,
        a3: u32,
    ) -> i32;
}

/// Scheduler-aware dispatcher guarding the call path with [`NsLock`]
pub struct SynchronizedDispatch {
    probe: Arc<dyn SchedulerProbe>,
    lock: NsLock,
}

impl SynchronizedDispatch {
    /// Creates a dispatcher over the standard lock factory
    ///
    /// The lock primitive is not constructed until it is first needed.
    pub fn new(probe: Arc<dyn SchedulerProbe>) -> Self {
        Self::with_lock(probe, NsLock::with_os_factory())
    }

    /// Creates a dispatcher over a caller-supplied gate
    pub fn with_lock(probe: Arc<dyn SchedulerProbe>, lock: NsLock) -> Self {
        Self { probe, lock }
    }

    /// One-time initialization of the call path
    ///
    /// Creates the gate when a scheduler is already running; in the
    /// scheduler-absent configuration the lock primitive is never
    /// constructed. Callers are expected to halt on failure rather than
    /// proceed without synchronization.
    pub fn init(&self) -> Result<(), InitError> {
        if self.probe.kernel_running() {
            self.lock.ensure_created()?;
        }
        Ok(())
    }

    /// Returns the gate, for embedders that share it
    pub fn lock(&self) -> &NsLock {
        &self.lock
    }
}

impl DispatchPolicy for SynchronizedDispatch {
    fn dispatch(
        &self,
        veneer: &mut dyn FnMut(u32, u32, u32, u32) -> i32,
        a0: u32,
        a1: u32,
        a2: u32,
        a3: u32,
    ) -> i32 {
        if !self.probe.kernel_running() {
            // No scheduler, no concurrent caller on this core. The lock
            // primitive may itself depend on the scheduler, so it is not
            // touched at all on this path.
            return veneer(a0, a1, a2, a3);
        }

        self.lock.acquire();
        let result = veneer(a0, a1, a2, a3);
        self.lock.release();
        result
    }
}

/// Dispatcher for hosts without any scheduler
///
/// Always takes the direct path. Not safe under concurrent callers.
#[derive(Debug, Default)]
pub struct BareMetalDispatch;

impl BareMetalDispatch {
    /// Creates the bare-metal dispatcher
    pub fn new() -> Self {
        Self
    }

    /// One-time initialization; nothing to create
    pub fn init(&self) -> Result<(), InitError> {
        Ok(())
    }
}

impl DispatchPolicy for BareMetalDispatch {
    fn dispatch(
        &self,
        veneer: &mut dyn FnMut(u32, u32, u32, u32) -> i32,
        a0: u32,
        a1: u32,
        a2: u32,
        a3: u32,
    ) -> i32 {
        veneer(a0, a1, a2, a3)
    }
}

/// Client-call transport routed through a dispatch policy
///
/// Models the privileged transport side: the cross-core primitive crosses
/// into secure execution inside the dispatcher's critical section. The
/// operation code rides in the veneer's first argument for visibility.
pub struct GatedClientCall<T, P> {
    transport: T,
    policy: P,
}

impl<T, P> GatedClientCall<T, P>
where
    T: ClientCallTransport,
    P: DispatchPolicy,
{
    /// Wraps a transport so every client call crosses through `policy`
    pub fn new(transport: T, policy: P) -> Self {
        Self { transport, policy }
    }

    /// Returns the wrapped transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the dispatch policy
    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<T, P> ClientCallTransport for GatedClientCall<T, P>
where
    T: ClientCallTransport,
    P: DispatchPolicy,
{
    fn client_call(
        &self,
        params: &mut ClientCallParams<'_, '_>,
        client: ClientId,
        reply: &mut MailboxReply,
    ) -> Result<(), MailboxError> {
        let op = params.op() as u32;
        let transport = &self.transport;
        let mut veneer = |_a0: u32, _a1: u32, _a2: u32, _a3: u32| -> i32 {
            match transport.client_call(params, client, reply) {
                Ok(()) => psa_types::MAILBOX_SUCCESS,
                Err(err) => err.status(),
            }
        };
        let status = self.policy.dispatch(&mut veneer, op, 0, 0, 0);
        MailboxError::from_status(status)
    }
}
