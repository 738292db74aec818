//! Mailbox transport error types

use thiserror::Error;

/// Status value reported by the mailbox transport on success
pub const MAILBOX_SUCCESS: i32 = 0;

/// Errors reported by the inter-core mailbox transport
///
/// These never reach façade callers as-is; the façade maps them onto
/// domain sentinels (null handle, no version, reserved status codes).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MailboxError {
    /// The mailbox queue has no free slot
    #[error("mailbox queue is full")]
    QueueFull,

    /// The request was malformed at the transport layer
    #[error("invalid mailbox parameters")]
    InvalidParams,

    /// No reply event is pending for this slot
    #[error("no pending mailbox event")]
    NoPendingEvent,

    /// The channel is occupied by another in-flight message
    #[error("mailbox channel is busy")]
    ChannelBusy,

    /// The mailbox layer failed to initialize
    #[error("mailbox initialization failed")]
    InitFailed,

    /// Unspecified transport failure
    #[error("generic mailbox error")]
    Generic,
}

impl MailboxError {
    /// Encodes this error as the transport's signed status value
    pub const fn status(&self) -> i32 {
        match self {
            MailboxError::QueueFull => -1,
            MailboxError::InvalidParams => -2,
            MailboxError::NoPendingEvent => -3,
            MailboxError::ChannelBusy => -4,
            MailboxError::InitFailed => -5,
            MailboxError::Generic => -6,
        }
    }

    /// Decodes a transport status value
    ///
    /// `MAILBOX_SUCCESS` decodes to `Ok(())`; unknown negative values
    /// collapse to [`MailboxError::Generic`].
    pub const fn from_status(status: i32) -> Result<(), MailboxError> {
        match status {
            0 => Ok(()),
            -1 => Err(MailboxError::QueueFull),
            -2 => Err(MailboxError::InvalidParams),
            -3 => Err(MailboxError::NoPendingEvent),
            -4 => Err(MailboxError::ChannelBusy),
            -5 => Err(MailboxError::InitFailed),
            _ => Err(MailboxError::Generic),
        }
    }
}
