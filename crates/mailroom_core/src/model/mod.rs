//! Donor domain model.
//!
//! # Responsibility
//! - Define the donor record and its donation history.
//! - Keep aggregate giving statistics consistent with that history.
//!
//! # Invariants
//! - A donor is identified by email within a collection; `DonorId` is only a
//!   stable handle and never a uniqueness key.
//! - Donors are never deleted, only soft-deactivated.

pub mod display;
pub mod donor;
