//! Client identity resolution
//!
//! The secure side attributes every call to a signed client id. Resolution
//! happens once per call and is never cached beyond it. Two modes exist:
//! a fixed shared id for single-identity configurations, and a per-thread
//! assignment table for multi-client configurations. The table is an
//! explicit injected dependency: the embedder creates it, writes the
//! assignments before the first cross-core call, and keeps it alive for
//! the process duration.

use psa_types::ClientId;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

/// Resolves the identity of the current caller
pub trait ClientIdentity: Send + Sync {
    /// Returns the client id the secure side should see for this call
    fn current_client_id(&self) -> ClientId;
}

/// Single-identity mode: every caller shares one id
#[derive(Debug, Clone, Copy)]
pub struct SharedClientId(ClientId);

impl SharedClientId {
    /// Creates the shared identity
    pub const fn new(id: ClientId) -> Self {
        Self(id)
    }
}

impl Default for SharedClientId {
    fn default() -> Self {
        Self(ClientId::DEFAULT)
    }
}

impl ClientIdentity for SharedClientId {
    fn current_client_id(&self) -> ClientId {
        self.0
    }
}

/// Multi-client mode: per-thread assignments with a shared fallback
#[derive(Debug)]
pub struct NsContextManager {
    assignments: Mutex<HashMap<ThreadId, ClientId>>,
    fallback: ClientId,
}

impl NsContextManager {
    /// Creates an empty table with the default shared fallback
    pub fn new() -> Self {
        Self::with_fallback(ClientId::DEFAULT)
    }

    /// Creates an empty table with an explicit fallback id
    pub fn with_fallback(fallback: ClientId) -> Self {
        Self {
            assignments: Mutex::new(HashMap::new()),
            fallback,
        }
    }

    /// Assigns a client id to the calling thread
    pub fn assign_current_thread(&self, id: ClientId) {
        self.assignments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(thread::current().id(), id);
    }

    /// Removes the calling thread's assignment
    pub fn clear_current_thread(&self) {
        self.assignments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&thread::current().id());
    }
}

impl Default for NsContextManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientIdentity for NsContextManager {
    fn current_client_id(&self) -> ClientId {
        self.assignments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&thread::current().id())
            .copied()
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_shared_identity_is_constant() {
        let identity = SharedClientId::default();
        assert_eq!(identity.current_client_id(), ClientId::DEFAULT);
        assert_eq!(identity.current_client_id(), ClientId::DEFAULT);
    }

    #[test]
    fn test_unassigned_thread_gets_fallback() {
        let manager = NsContextManager::new();
        assert_eq!(manager.current_client_id(), ClientId::DEFAULT);
    }

    #[test]
    fn test_assignment_is_per_thread() {
        let manager = Arc::new(NsContextManager::new());
        manager.assign_current_thread(ClientId::new(-10));
        assert_eq!(manager.current_client_id(), ClientId::new(-10));

        let other = {
            let manager = manager.clone();
            std::thread::spawn(move || {
                manager.assign_current_thread(ClientId::new(-20));
                manager.current_client_id()
            })
        };
        assert_eq!(other.join().unwrap(), ClientId::new(-20));
        // Our own assignment is untouched by the other thread.
        assert_eq!(manager.current_client_id(), ClientId::new(-10));
    }

    #[test]
    fn test_cleared_thread_falls_back() {
        let manager = NsContextManager::with_fallback(ClientId::new(-5));
        manager.assign_current_thread(ClientId::new(-11));
        manager.clear_current_thread();
        assert_eq!(manager.current_client_id(), ClientId::new(-5));
    }
}
