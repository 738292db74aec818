//! Mutual-exclusion gate for the cross-core call path

use std::sync::{Condvar, Mutex, OnceLock, PoisonError};
use thiserror::Error;

/// Errors reported by the OS-wrapper lock primitive
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GateError {
    /// The lock primitive could not be created
    #[error("gate lock creation failed")]
    CreationFailed,

    /// The primitive reported a transient acquire/release failure
    #[error("gate lock operation failed")]
    OperationFailed,
}

/// OS-wrapper mutex seam: create once, then acquire/release
///
/// `acquire` blocks with no timeout until the lock is free. Both
/// operations may report transient failure; the gate retries them.
pub trait GateLock: Send + Sync {
    /// Blocks until the lock is held by the caller
    fn acquire(&self) -> Result<(), GateError>;
    /// Releases the lock
    fn release(&self) -> Result<(), GateError>;
}

/// Fallible one-shot creation of the lock primitive
pub trait GateFactory: Send + Sync {
    /// Creates the underlying lock
    fn create(&self) -> Result<Box<dyn GateLock>, GateError>;
}

/// Binary lock over a Mutex/Condvar pair
///
/// Not re-entrant; a second acquire from the holding thread blocks
/// forever, which matches the one-call-in-flight discipline.
struct CondvarLock {
    held: Mutex<bool>,
    freed: Condvar,
}

impl CondvarLock {
    fn new() -> Self {
        Self {
            held: Mutex::new(false),
            freed: Condvar::new(),
        }
    }
}

impl GateLock for CondvarLock {
    fn acquire(&self) -> Result<(), GateError> {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        while *held {
            held = self
                .freed
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *held = true;
        Ok(())
    }

    fn release(&self) -> Result<(), GateError> {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        *held = false;
        self.freed.notify_one();
        Ok(())
    }
}

/// Standard factory producing the Condvar-based lock
#[derive(Debug, Default)]
pub struct OsGateFactory;

impl GateFactory for OsGateFactory {
    fn create(&self) -> Result<Box<dyn GateLock>, GateError> {
        Ok(Box::new(CondvarLock::new()))
    }
}

/// The lazily-created gate guarding the cross-core call path
///
/// Created at most once, never destroyed during normal operation.
/// Acquisition is a blocking, non-abandonable wait: the underlying
/// primitive is retried until it reports success, because the call path
/// must never proceed with a partially-held lock and callers have no
/// meaningful recovery from a misbehaving lock primitive.
pub struct NsLock {
    factory: Box<dyn GateFactory>,
    lock: OnceLock<Box<dyn GateLock>>,
}

impl NsLock {
    /// Creates an empty gate around the given factory
    pub fn new(factory: Box<dyn GateFactory>) -> Self {
        Self {
            factory,
            lock: OnceLock::new(),
        }
    }

    /// Creates an empty gate around the standard factory
    pub fn with_os_factory() -> Self {
        Self::new(Box::new(OsGateFactory))
    }

    /// Creates the lock primitive if it does not exist yet
    ///
    /// Idempotent; subsequent invocations are no-ops. Creation failure is
    /// an initialization failure for the caller to act on.
    pub fn ensure_created(&self) -> Result<(), GateError> {
        if self.lock.get().is_some() {
            return Ok(());
        }
        let created = self.factory.create()?;
        // A racing creator may have won; the spare lock is dropped.
        let _ = self.lock.set(created);
        Ok(())
    }

    /// Returns whether the lock primitive has been created
    pub fn is_created(&self) -> bool {
        self.lock.get().is_some()
    }

    /// Acquires the gate, retrying the primitive until it succeeds
    ///
    /// Creation normally happens at init; if the gate is reached first,
    /// creation is retried here rather than letting the call path run
    /// unlocked.
    pub fn acquire(&self) {
        let lock = self.lock_blocking();
        while lock.acquire().is_err() {}
    }

    /// Releases the gate, retrying the primitive until it succeeds
    ///
    /// A failed release is treated as transient and never surfaced.
    pub fn release(&self) {
        let lock = self.lock_blocking();
        while lock.release().is_err() {}
    }

    fn lock_blocking(&self) -> &dyn GateLock {
        loop {
            if let Some(lock) = self.lock.get() {
                return lock.as_ref();
            }
            let _ = self.ensure_created();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Factory that counts creations and can be told to fail
    struct CountingFactory {
        created: Arc<AtomicUsize>,
        fail: bool,
    }

    impl GateFactory for CountingFactory {
        fn create(&self) -> Result<Box<dyn GateLock>, GateError> {
            if self.fail {
                return Err(GateError::CreationFailed);
            }
            self.created.fetch_add(1, Ordering::SeqCst);
            OsGateFactory.create()
        }
    }

    #[test]
    fn test_ensure_created_is_idempotent() {
        let created = Arc::new(AtomicUsize::new(0));
        let gate = NsLock::new(Box::new(CountingFactory {
            created: created.clone(),
            fail: false,
        }));

        assert!(!gate.is_created());
        gate.ensure_created().unwrap();
        gate.ensure_created().unwrap();
        gate.ensure_created().unwrap();
        assert!(gate.is_created());
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_creation_failure_is_surfaced() {
        let gate = NsLock::new(Box::new(CountingFactory {
            created: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }));
        assert_eq!(gate.ensure_created(), Err(GateError::CreationFailed));
        assert!(!gate.is_created());
    }

    #[test]
    fn test_acquire_release_round_trip() {
        let gate = NsLock::with_os_factory();
        gate.ensure_created().unwrap();
        gate.acquire();
        gate.release();
        gate.acquire();
        gate.release();
    }

    /// Lock that fails the first N acquire and release attempts
    struct FlakyLock {
        inner: CondvarLock,
        acquire_failures: AtomicUsize,
        release_failures: AtomicUsize,
        acquire_attempts: AtomicUsize,
        release_attempts: AtomicUsize,
    }

    impl GateLock for FlakyLock {
        fn acquire(&self) -> Result<(), GateError> {
            self.acquire_attempts.fetch_add(1, Ordering::SeqCst);
            if self.acquire_failures.load(Ordering::SeqCst) > 0 {
                self.acquire_failures.fetch_sub(1, Ordering::SeqCst);
                return Err(GateError::OperationFailed);
            }
            self.inner.acquire()
        }

        fn release(&self) -> Result<(), GateError> {
            self.release_attempts.fetch_add(1, Ordering::SeqCst);
            if self.release_failures.load(Ordering::SeqCst) > 0 {
                self.release_failures.fetch_sub(1, Ordering::SeqCst);
                return Err(GateError::OperationFailed);
            }
            self.inner.release()
        }
    }

    struct FlakyFactory {
        acquire_failures: usize,
        release_failures: usize,
        attempts: Arc<(AtomicUsize, AtomicUsize)>,
    }

    impl GateFactory for FlakyFactory {
        fn create(&self) -> Result<Box<dyn GateLock>, GateError> {
            Ok(Box::new(FlakyShim {
                lock: FlakyLock {
                    inner: CondvarLock::new(),
                    acquire_failures: AtomicUsize::new(self.acquire_failures),
                    release_failures: AtomicUsize::new(self.release_failures),
                    acquire_attempts: AtomicUsize::new(0),
                    release_attempts: AtomicUsize::new(0),
                },
                attempts: self.attempts.clone(),
            }))
        }
    }

    /// Mirrors attempt counters into a place the test can reach
    struct FlakyShim {
        lock: FlakyLock,
        attempts: Arc<(AtomicUsize, AtomicUsize)>,
    }

    impl GateLock for FlakyShim {
        fn acquire(&self) -> Result<(), GateError> {
            let result = self.lock.acquire();
            self.attempts
                .0
                .store(self.lock.acquire_attempts.load(Ordering::SeqCst), Ordering::SeqCst);
            result
        }

        fn release(&self) -> Result<(), GateError> {
            let result = self.lock.release();
            self.attempts
                .1
                .store(self.lock.release_attempts.load(Ordering::SeqCst), Ordering::SeqCst);
            result
        }
    }

    #[test]
    fn test_transient_failures_are_retried_until_success() {
        let attempts = Arc::new((AtomicUsize::new(0), AtomicUsize::new(0)));
        let gate = NsLock::new(Box::new(FlakyFactory {
            acquire_failures: 3,
            release_failures: 2,
            attempts: attempts.clone(),
        }));
        gate.ensure_created().unwrap();

        // Neither call returns an error to us; the retries are internal.
        gate.acquire();
        gate.release();

        assert_eq!(attempts.0.load(Ordering::SeqCst), 4); // 3 failures + 1 success
        assert_eq!(attempts.1.load(Ordering::SeqCst), 3); // 2 failures + 1 success
    }

    #[test]
    fn test_gate_blocks_second_acquirer() {
        let gate = Arc::new(NsLock::with_os_factory());
        gate.ensure_created().unwrap();
        gate.acquire();

        let entered = Arc::new(AtomicUsize::new(0));
        let handle = {
            let gate = gate.clone();
            let entered = entered.clone();
            std::thread::spawn(move || {
                gate.acquire();
                entered.fetch_add(1, Ordering::SeqCst);
                gate.release();
            })
        };

        // The second acquirer must not get in while we hold the gate.
        std::thread::sleep(std::time::Duration::from_millis(50));
        assert_eq!(entered.load(Ordering::SeqCst), 0);

        gate.release();
        handle.join().unwrap();
        assert_eq!(entered.load(Ordering::SeqCst), 1);
    }
}
