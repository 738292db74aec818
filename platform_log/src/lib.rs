//! # Platform Log Transport
//!
//! Chunked forwarding of diagnostic text through the one-shot service
//! request primitive.
//!
//! ## Philosophy
//!
//! The mailbox accepts a bounded input per message, so arbitrary-length
//! diagnostics are split here, on the non-secure side, before they reach
//! the channel. Delivery is best effort: the first failed chunk stops the
//! transfer and the caller learns how many bytes actually made it. Nothing
//! is retried and nothing blocks beyond the one-shot request itself.

use mailbox_ipc::ServiceRequest;

/// Request code for a one-shot diagnostic write
pub const LOG_MSG_REQUEST: u32 = 0x1;

/// Chunked log transport over a one-shot service request
///
/// Each chunk is copied into one reusable staging buffer, prefixed if a
/// prefix is configured, and submitted as a single bounded request.
pub struct LogTransport<S: ServiceRequest> {
    service: S,
    capacity: usize,
    prefix: Vec<u8>,
    staging: Vec<u8>,
}

impl<S: ServiceRequest> LogTransport<S> {
    /// Creates a transport without a per-chunk prefix
    ///
    /// `capacity` is the single-message input limit of the channel and
    /// must be non-zero.
    pub fn new(service: S, capacity: usize) -> Self {
        Self::with_prefix(service, capacity, &[])
    }

    /// Creates a transport applying `prefix` to every chunk
    ///
    /// If the prefix does not fit within `capacity` it is dropped for
    /// this configuration and the whole capacity carries payload.
    pub fn with_prefix(service: S, capacity: usize, prefix: &[u8]) -> Self {
        debug_assert!(capacity > 0, "mailbox input capacity must be non-zero");
        let prefix = if prefix.len() >= capacity {
            Vec::new()
        } else {
            prefix.to_vec()
        };
        Self {
            service,
            capacity,
            prefix,
            staging: Vec::with_capacity(capacity),
        }
    }

    /// Returns the payload bytes available per chunk
    pub fn max_chunk_len(&self) -> usize {
        self.capacity - self.prefix.len()
    }

    /// Returns the one-shot service seam
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Forwards `msg`, chunk by chunk, to the diagnostic service
    ///
    /// Returns the number of payload bytes from fully-accepted chunks.
    /// On the first chunk whose submission fails the transfer stops; the
    /// failing chunk contributes nothing to the count, not even bytes the
    /// channel may have consumed before failing.
    pub fn send(&mut self, msg: &[u8]) -> usize {
        let max_chunk_len = self.max_chunk_len();
        let mut accepted = 0;

        for chunk in msg.chunks(max_chunk_len) {
            self.staging.clear();
            self.staging.extend_from_slice(&self.prefix);
            self.staging.extend_from_slice(chunk);

            if self
                .service
                .one_shot(LOG_MSG_REQUEST, &self.staging, None)
                .is_err()
            {
                return accepted;
            }
            accepted += chunk.len();
        }

        accepted
    }
}
