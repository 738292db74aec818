//! Deterministic fault injection for the simulated transport
//!
//! Tests configure a [`FaultPlan`] describing which crossings should fail;
//! a stateful [`FaultInjector`] applies it before any secure-side state is
//! touched, so a faulted call has no side effects beyond its audit event.

use mailbox_ipc::ClientCallOp;
use psa_types::MailboxError;

/// A fault to inject into the transport
#[derive(Debug, Clone)]
pub enum TransportFault {
    /// Fail the next N client calls, regardless of operation
    FailNext { count: usize },

    /// Fail every client call carrying this operation code
    FailOnOp { op: ClientCallOp },

    /// Fail the one-shot request with this zero-based index
    FailOneShotAt { index: usize },
}

/// A plan describing all faults to inject
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    faults: Vec<TransportFault>,
}

impl FaultPlan {
    /// Creates an empty fault plan
    pub fn new() -> Self {
        Self { faults: Vec::new() }
    }

    /// Adds a fault to the plan
    pub fn with_fault(mut self, fault: TransportFault) -> Self {
        self.faults.push(fault);
        self
    }

    /// Returns the configured faults
    pub fn faults(&self) -> &[TransportFault] {
        &self.faults
    }
}

/// Stateful injector applying a plan to successive crossings
#[derive(Debug, Default)]
pub struct FaultInjector {
    plan: FaultPlan,
    fail_next: usize,
    one_shots_seen: usize,
}

impl FaultInjector {
    /// Creates an injector for the given plan
    pub fn new(plan: FaultPlan) -> Self {
        let mut fail_next = 0;
        for fault in plan.faults() {
            if let TransportFault::FailNext { count } = fault {
                fail_next += count;
            }
        }
        Self {
            plan,
            fail_next,
            one_shots_seen: 0,
        }
    }

    /// Decides the fate of one client call
    pub fn check_client_call(&mut self, op: ClientCallOp) -> Result<(), MailboxError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(MailboxError::Generic);
        }
        for fault in self.plan.faults() {
            if let TransportFault::FailOnOp { op: target } = fault {
                if *target == op {
                    return Err(MailboxError::Generic);
                }
            }
        }
        Ok(())
    }

    /// Decides the fate of one one-shot request
    pub fn check_one_shot(&mut self) -> Result<(), MailboxError> {
        let index = self.one_shots_seen;
        self.one_shots_seen += 1;
        for fault in self.plan.faults() {
            if let TransportFault::FailOneShotAt { index: target } = fault {
                if *target == index {
                    return Err(MailboxError::QueueFull);
                }
            }
        }
        Ok(())
    }
}
