//! Dispatch-layer contract tests
//!
//! These tests pin the concurrency discipline of the call path: one
//! logical call in flight at a time under a running scheduler, the lock
//! primitive never constructed when no scheduler exists, and transport
//! errors surviving the trip through the gated veneer.
