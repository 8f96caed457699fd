//! Donor repository abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the donor data access contract used by the service layer.
//! - Own donor records for the lifetime of one process run.
//!
//! # Invariants
//! - Email is unique across all donors in a repository.
//! - Insertion order is preserved by every listing API.
//! - Lookup misses are empty results, not errors.

pub mod donor_repo;
