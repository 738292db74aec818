//! Signed status vocabulary for PSA client calls

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel returned by version queries when no version could be obtained
pub const VERSION_NONE: u32 = 0;

/// Request type for a plain service call
pub const PSA_IPC_CALL: i32 = 0;

/// Signed status of a PSA service call
///
/// Zero is success, negative values are errors. Service-defined status
/// codes pass through untouched; the two constants below are reserved by
/// the bridge itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PsaStatus(i32);

impl PsaStatus {
    /// The call completed successfully
    pub const SUCCESS: PsaStatus = PsaStatus(0);

    /// The caller violated the call contract (oversized descriptor lists)
    pub const PROGRAMMER_ERROR: PsaStatus = PsaStatus(-129);

    /// The inter-core channel failed before a reply was obtained
    ///
    /// Deliberately placed in an out-of-band negative range so it can never
    /// collide with a legitimate service status.
    pub const INTER_CORE_COMM_ERR: PsaStatus = PsaStatus(i32::MIN + 0xFF);

    /// Creates a status from its raw signed value
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw signed value
    pub const fn into_raw(self) -> i32 {
        self.0
    }

    /// Checks for success
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Checks for any error
    pub const fn is_error(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for PsaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PsaStatus({})", self.0)
    }
}
