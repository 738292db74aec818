//! Tagged client-call parameters

use crate::iovec::{InVec, OutVec};
use psa_types::{Handle, ServiceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation code carried alongside the parameters
///
/// Derivable from [`ClientCallParams`]; kept as a separate enum so audit
/// logs and fault plans can name operations without holding borrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientCallOp {
    /// Query the framework version
    FrameworkVersion,
    /// Query the version of one service
    Version,
    /// Establish a connection to a service
    Connect,
    /// Invoke an established connection
    Call,
    /// Tear down a connection
    Close,
}

impl fmt::Display for ClientCallOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClientCallOp::FrameworkVersion => "framework-version",
            ClientCallOp::Version => "version",
            ClientCallOp::Connect => "connect",
            ClientCallOp::Call => "call",
            ClientCallOp::Close => "close",
        };
        f.write_str(name)
    }
}

/// Parameters for one client call, one constructor per operation
///
/// The `Call` variant borrows the caller's descriptor lists for the
/// duration of the call; output descriptors are writable by the far side.
/// Invariant (enforced by the façade before submission):
/// `inputs.len() + outputs.len() <= PSA_MAX_IOVEC`, each list individually
/// within that cap.
#[derive(Debug)]
pub enum ClientCallParams<'v, 'b> {
    /// Framework version query, no payload
    FrameworkVersion,
    /// Service version query
    Version {
        /// Target service
        sid: ServiceId,
    },
    /// Connection request
    Connect {
        /// Target service
        sid: ServiceId,
        /// Minimum version the caller requires
        version: u32,
    },
    /// Service invocation
    Call {
        /// Established connection
        handle: Handle,
        /// Service-defined request type
        request_type: i32,
        /// Read-only input descriptors
        inputs: &'v [InVec<'v>],
        /// Writable output descriptors
        outputs: &'v mut [OutVec<'b>],
    },
    /// Connection teardown
    Close {
        /// Connection to tear down
        handle: Handle,
    },
}

impl ClientCallParams<'_, '_> {
    /// Returns the operation code matching this parameter set
    pub fn op(&self) -> ClientCallOp {
        match self {
            ClientCallParams::FrameworkVersion => ClientCallOp::FrameworkVersion,
            ClientCallParams::Version { .. } => ClientCallOp::Version,
            ClientCallParams::Connect { .. } => ClientCallOp::Connect,
            ClientCallParams::Call { .. } => ClientCallOp::Call,
            ClientCallParams::Close { .. } => ClientCallOp::Close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_codes_match_variants() {
        assert_eq!(
            ClientCallParams::FrameworkVersion.op(),
            ClientCallOp::FrameworkVersion
        );
        assert_eq!(
            ClientCallParams::Version {
                sid: ServiceId::new(1)
            }
            .op(),
            ClientCallOp::Version
        );
        assert_eq!(
            ClientCallParams::Connect {
                sid: ServiceId::new(1),
                version: 1
            }
            .op(),
            ClientCallOp::Connect
        );
        assert_eq!(
            ClientCallParams::Close {
                handle: Handle::from_raw(3)
            }
            .op(),
            ClientCallOp::Close
        );
    }

    #[test]
    fn test_call_variant_borrows_descriptors() {
        let input = [0u8; 4];
        let mut output = [0u8; 4];
        let inputs = [InVec::new(&input)];
        let mut outputs = [OutVec::new(&mut output)];
        let params = ClientCallParams::Call {
            handle: Handle::from_raw(1),
            request_type: 0,
            inputs: &inputs,
            outputs: &mut outputs,
        };
        assert_eq!(params.op(), ClientCallOp::Call);
    }

    #[test]
    fn test_op_display() {
        assert_eq!(ClientCallOp::Connect.to_string(), "connect");
        assert_eq!(
            ClientCallOp::FrameworkVersion.to_string(),
            "framework-version"
        );
    }
}
