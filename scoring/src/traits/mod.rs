//!
//! Traits Module
//!
//! Seams between the scoring engine and its storage collaborators.
//!
//! - [`provider`]: read-only lookups for options, results and question order.
//!
//! Implement these traits over any storage layer; the engine never writes through them.

pub mod provider;
