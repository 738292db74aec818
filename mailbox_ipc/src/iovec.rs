//! Caller-owned buffer descriptors for service calls

/// Maximum combined number of input and output descriptors per call
///
/// Each list is also individually capped at this value.
pub const PSA_MAX_IOVEC: usize = 4;

/// Read-only view of a caller-owned input buffer
///
/// The caller retains ownership for the duration of the call; the secure
/// side only reads through it.
#[derive(Debug, Clone, Copy)]
pub struct InVec<'a> {
    data: &'a [u8],
}

impl<'a> InVec<'a> {
    /// Wraps a caller-owned buffer
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Returns the byte length of the view
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the view is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying bytes
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }
}

/// Caller-owned output buffer the secure side may write into
///
/// `len` carries the buffer capacity on input and is overwritten with the
/// number of bytes actually written when the call returns, even when the
/// overall status is an error (as long as the call reached the transport).
#[derive(Debug)]
pub struct OutVec<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> OutVec<'a> {
    /// Wraps a caller-owned buffer; the initial length is its capacity
    pub fn new(buf: &'a mut [u8]) -> Self {
        let len = buf.len();
        Self { buf, len }
    }

    /// Returns the buffer capacity
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the current length field (actual bytes written, on return)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the length field is zero
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Overwrites the length field with the actual byte count reported
    /// for this slot
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Copies `data` into the buffer, truncating at capacity
    ///
    /// Sets the length field to the number of bytes copied and returns it.
    /// Used by the far side of the channel.
    pub fn write_from(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.buf.len());
        self.buf[..n].copy_from_slice(&data[..n]);
        self.len = n;
        n
    }

    /// Returns the written portion of the buffer
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len.min(self.buf.len())]
    }
}
