//! # Non-Secure Interface
//!
//! This crate implements the synchronization layer between non-secure
//! callers and the cross-core call path.
//!
//! ## Philosophy
//!
//! - **One gate, one call in flight**: the cross-core path is guarded by a
//!   single binary lock, never a counting primitive
//! - **Degrade, don't break**: with no scheduler running there can be no
//!   concurrent caller on this core, so the lock is skipped entirely
//! - **Never half-locked**: lock acquire and release retry until the
//!   underlying primitive reports success; a partially-held gate is the
//!   one state the bridge refuses to be in
//!
//! ## Design
//!
//! The dispatch capability is a strategy object selected once at startup:
//! [`SynchronizedDispatch`] for scheduler-capable hosts,
//! [`BareMetalDispatch`] for single-context hosts. Client identity is an
//! explicit injected dependency, not a global.

pub mod dispatch;
pub mod gate;
pub mod identity;
pub mod probe;

pub use dispatch::{
    BareMetalDispatch, DispatchPolicy, GatedClientCall, InitError, SynchronizedDispatch,
};
pub use gate::{GateError, GateFactory, GateLock, NsLock, OsGateFactory};
pub use identity::{ClientIdentity, NsContextManager, SharedClientId};
pub use probe::{SchedulerProbe, StaticSchedulerProbe};
