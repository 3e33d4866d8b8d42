//! Application layer containing the ledger orchestration.
//!
//! This module defines the `LedgerEngine`, the primary entry point for
//! creating accounts and moving funds between them. Concurrency control is
//! delegated to the account store; the engine adds validation and post-commit
//! notification around it.

pub mod engine;
