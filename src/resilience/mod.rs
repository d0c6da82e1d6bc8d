//! Resilience helpers.
//!
//! # Design Decisions
//! - Every external call has a deadline (ledger and relay clients enforce their own)
//! - No silent retries of ledger or relay calls; only confirmation polling repeats
//! - Poll spacing uses jittered exponential backoff

pub mod backoff;
