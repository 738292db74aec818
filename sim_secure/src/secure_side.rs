//! The simulated secure partition

use crate::fault::{FaultInjector, FaultPlan};
use mailbox_ipc::{
    ClientCallOp, ClientCallParams, ClientCallTransport, InVec, MailboxReply, OutVec,
    ServiceRequest,
};
use psa_types::{ClientId, Handle, MailboxError, PsaStatus, ServiceId, VERSION_NONE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Correlation id tying together the events of one crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// Audit event recorded for every crossing of the simulated boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MailboxEvent {
    /// A client call arrived
    CallReceived {
        id: EventId,
        op: ClientCallOp,
        client: ClientId,
    },
    /// A client call was answered
    CallCompleted {
        id: EventId,
        op: ClientCallOp,
        return_val: i32,
    },
    /// A client call was dropped by the fault injector
    CallFaulted { id: EventId, op: ClientCallOp },
    /// A one-shot request was delivered
    OneShotReceived {
        id: EventId,
        request: u32,
        len: usize,
    },
    /// A one-shot request was dropped by the fault injector
    OneShotFaulted { id: EventId, request: u32 },
}

/// Handler invoked for calls on an established connection
///
/// Receives the request type and the caller's descriptor lists; writes
/// outputs through [`OutVec::write_from`] and returns the service status.
pub type CallHandler =
    Box<dyn Fn(i32, &[InVec<'_>], &mut [OutVec<'_>]) -> PsaStatus + Send + Sync>;

struct ServiceEntry {
    version: u32,
    handler: CallHandler,
}

struct SecureState {
    framework_version: u32,
    services: HashMap<ServiceId, ServiceEntry>,
    connections: HashMap<Handle, ServiceId>,
    next_handle: i32,
    injector: FaultInjector,
    audit: Vec<MailboxEvent>,
    one_shot_log: Vec<Vec<u8>>,
    client_calls: usize,
    one_shots: usize,
}

/// In-process double of the secure partition
///
/// Implements both consumed transport seams. Interior state sits behind
/// one lock, which also stands in for the one-shot primitive's own
/// concurrency discipline.
pub struct SimSecureSide {
    state: Mutex<SecureState>,
}

impl SimSecureSide {
    /// Creates a secure side with no registered services
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SecureState {
                framework_version: 0x0101,
                services: HashMap::new(),
                connections: HashMap::new(),
                next_handle: 1,
                injector: FaultInjector::new(FaultPlan::new()),
                audit: Vec::new(),
                one_shot_log: Vec::new(),
                client_calls: 0,
                one_shots: 0,
            }),
        }
    }

    /// Overrides the reported framework version
    pub fn set_framework_version(&self, version: u32) {
        self.lock().framework_version = version;
    }

    /// Registers a service with its version and call handler
    pub fn register_service(&self, sid: ServiceId, version: u32, handler: CallHandler) {
        self.lock()
            .services
            .insert(sid, ServiceEntry { version, handler });
    }

    /// Installs a fault plan, replacing any previous one
    pub fn set_fault_plan(&self, plan: FaultPlan) {
        self.lock().injector = FaultInjector::new(plan);
    }

    /// Returns a snapshot of the audit log
    pub fn audit(&self) -> Vec<MailboxEvent> {
        self.lock().audit.clone()
    }

    /// Returns how many client calls reached this side
    pub fn client_call_count(&self) -> usize {
        self.lock().client_calls
    }

    /// Returns how many one-shot requests reached this side
    pub fn one_shot_count(&self) -> usize {
        self.lock().one_shots
    }

    /// Returns the payloads of successfully delivered one-shot requests
    pub fn one_shot_payloads(&self) -> Vec<Vec<u8>> {
        self.lock().one_shot_log.clone()
    }

    /// Returns the number of live connections
    pub fn connection_count(&self) -> usize {
        self.lock().connections.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SecureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimSecureSide {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientCallTransport for SimSecureSide {
    fn client_call(
        &self,
        params: &mut ClientCallParams<'_, '_>,
        client: ClientId,
        reply: &mut MailboxReply,
    ) -> Result<(), MailboxError> {
        let mut state = self.lock();
        let op = params.op();
        let id = EventId::new();
        state.client_calls += 1;
        state
            .audit
            .push(MailboxEvent::CallReceived { id, op, client });

        if let Err(err) = state.injector.check_client_call(op) {
            state.audit.push(MailboxEvent::CallFaulted { id, op });
            return Err(err);
        }

        match params {
            ClientCallParams::FrameworkVersion => {
                reply.return_val = state.framework_version as i32;
            }
            ClientCallParams::Version { sid } => {
                reply.return_val = state
                    .services
                    .get(sid)
                    .map(|entry| entry.version)
                    .unwrap_or(VERSION_NONE) as i32;
            }
            ClientCallParams::Connect { sid, version } => {
                let accepted = state
                    .services
                    .get(sid)
                    .map(|entry| *version <= entry.version)
                    .unwrap_or(false);
                if accepted {
                    let handle = Handle::from_raw(state.next_handle);
                    state.next_handle += 1;
                    state.connections.insert(handle, *sid);
                    reply.return_val = handle.into_raw();
                } else {
                    // Refusal travels in-band as the null handle.
                    reply.return_val = Handle::NULL.into_raw();
                }
            }
            ClientCallParams::Call {
                handle,
                request_type,
                inputs,
                outputs,
            } => match state.connections.get(handle).copied() {
                None => {
                    reply.return_val = PsaStatus::PROGRAMMER_ERROR.into_raw();
                }
                Some(sid) => {
                    for out in outputs.iter_mut() {
                        out.set_len(0);
                    }
                    let status = match state.services.get(&sid) {
                        Some(entry) => (entry.handler)(*request_type, inputs, outputs),
                        None => PsaStatus::PROGRAMMER_ERROR,
                    };
                    for (slot, out) in outputs.iter().enumerate() {
                        reply.out_vec_len[slot] = out.len();
                    }
                    reply.return_val = status.into_raw();
                }
            },
            ClientCallParams::Close { handle } => {
                state.connections.remove(handle);
                reply.return_val = PsaStatus::SUCCESS.into_raw();
            }
        }

        let return_val = reply.return_val;
        state.audit.push(MailboxEvent::CallCompleted {
            id,
            op,
            return_val,
        });
        Ok(())
    }
}

impl ServiceRequest for SimSecureSide {
    fn one_shot(
        &self,
        request: u32,
        input: &[u8],
        _output: Option<&mut OutVec<'_>>,
    ) -> Result<(), MailboxError> {
        let mut state = self.lock();
        let id = EventId::new();
        state.one_shots += 1;

        if let Err(err) = state.injector.check_one_shot() {
            state
                .audit
                .push(MailboxEvent::OneShotFaulted { id, request });
            return Err(err);
        }

        state.one_shot_log.push(input.to_vec());
        state.audit.push(MailboxEvent::OneShotReceived {
            id,
            request,
            len: input.len(),
        });
        Ok(())
    }
}
