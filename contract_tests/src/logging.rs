//! Log transport contract tests
//!
//! These tests pin the chunked delivery contract: full reconstruction on
//! the receiving side, a prefix on every chunk, and a short byte count
//! when the channel fails mid-transfer.
