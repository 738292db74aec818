//! Identifiers crossing the secure/non-secure boundary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a secure service
///
/// Services are addressed by a 32-bit SID literal assigned by the secure
/// side's manifest; the non-secure side treats the value as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(u32);

impl ServiceId {
    /// Creates a service id from its SID literal
    pub const fn new(sid: u32) -> Self {
        Self(sid)
    }

    /// Returns the raw SID value
    pub const fn sid(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Service({:#010x})", self.0)
    }
}

/// Opaque handle to an established service connection
///
/// Only the secure side can interpret the value. The distinguished null
/// handle means "no connection" and is the safe return on any failure
/// during connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle(i32);

impl Handle {
    /// The "no connection" sentinel
    pub const NULL: Handle = Handle(0);

    /// Creates a handle from its raw value
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value
    pub const fn into_raw(self) -> i32 {
        self.0
    }

    /// Checks whether this is the null handle
    pub const fn is_null(&self) -> bool {
        self.0 == Self::NULL.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

/// Identity of a non-secure caller, as presented to the secure side
///
/// Resolved once per call and never cached beyond it. In single-identity
/// configurations every caller shares [`ClientId::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(i32);

impl ClientId {
    /// Shared identity used when per-thread identification is not configured
    pub const DEFAULT: ClientId = ClientId(-1);

    /// Creates a client id from its raw value
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw client id
    pub const fn into_raw(self) -> i32 {
        self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client({})", self.0)
    }
}
