//! Donor repository contract and in-memory `DonorCollection`.
//!
//! # Responsibility
//! - Enforce email uniqueness on insert and on email updates.
//! - Answer all/email/name queries in insertion order.
//! - Produce report and roster projections.
//!
//! # Invariants
//! - Records are never removed; deactivation is a soft flag on the donor.
//! - `capacity_hint` is reserved and never limits insertion.

use crate::model::donor::{Donor, DonorUpdate};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default capacity hint for new collections.
pub const DEFAULT_CAPACITY_HINT: usize = 10;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for donor writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Another donor already uses this email.
    DuplicateEmail(String),
    /// No donor has this email.
    NotFound(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "donor already exists: {email}"),
            Self::NotFound(email) => write!(f, "donor not found: {email}"),
        }
    }
}

impl Error for RepoError {}

/// Typed donor query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonorQuery {
    /// Every donor.
    All,
    /// Exact email match; at most one donor.
    Email(String),
    /// Exact first-name or last-name match; any number of donors.
    Name(String),
}

impl DonorQuery {
    /// Builds a query from a (value, field) pair where field is `*|email|name`.
    ///
    /// Returns `None` for unsupported field names.
    pub fn parse(query: &str, field: &str) -> Option<Self> {
        match field {
            "*" => Some(Self::All),
            "email" => Some(Self::Email(query.to_string())),
            "name" => Some(Self::Name(query.to_string())),
            _ => None,
        }
    }

    fn matches(&self, donor: &Donor) -> bool {
        match self {
            Self::All => true,
            Self::Email(email) => donor.email() == email,
            Self::Name(name) => donor.first_name() == name || donor.last_name() == name,
        }
    }
}

/// Repository interface for donor records.
pub trait DonorRepository {
    /// Inserts a prepared donor.
    ///
    /// # Errors
    /// - `RepoError::DuplicateEmail` when the email is already taken.
    fn insert_donor(&mut self, donor: Donor) -> RepoResult<&mut Donor>;

    /// All donors in insertion order.
    fn donors(&self) -> &[Donor];

    fn donor_mut(&mut self, email: &str) -> Option<&mut Donor>;

    /// Creates and inserts a donor with no donations.
    fn add_donor(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<&mut Donor> {
        self.insert_donor(Donor::new(email, first_name, last_name))
    }

    /// Donors matching `query`, in insertion order. Empty when nothing matches.
    fn find(&self, query: &DonorQuery) -> Vec<&Donor> {
        self.donors()
            .iter()
            .filter(|donor| query.matches(donor))
            .collect()
    }

    fn find_by_email(&self, email: &str) -> Option<&Donor> {
        self.donors().iter().find(|donor| donor.email() == email)
    }

    /// Applies a field update, rejecting email changes that would collide.
    fn update_donor(&mut self, email: &str, update: DonorUpdate) -> RepoResult<()> {
        if let DonorUpdate::Email(new_email) = &update {
            if new_email != email && self.find_by_email(new_email).is_some() {
                return Err(RepoError::DuplicateEmail(new_email.clone()));
            }
        }
        let donor = self
            .donor_mut(email)
            .ok_or_else(|| RepoError::NotFound(email.to_string()))?;
        donor.update(update);
        Ok(())
    }

    fn deactivate_donor(&mut self, email: &str) -> RepoResult<()> {
        let donor = self
            .donor_mut(email)
            .ok_or_else(|| RepoError::NotFound(email.to_string()))?;
        donor.deactivate();
        Ok(())
    }

    /// One `format_summary` row per donor.
    fn report(&self) -> Vec<String> {
        self.donors().iter().map(Donor::format_summary).collect()
    }

    /// One `format_list_entry` line per donor.
    fn roster(&self) -> Vec<String> {
        self.donors().iter().map(Donor::format_list_entry).collect()
    }

    fn len(&self) -> usize {
        self.donors().len()
    }

    fn is_empty(&self) -> bool {
        self.donors().is_empty()
    }
}

/// In-memory donor repository for a single process run.
#[derive(Debug, Clone)]
pub struct DonorCollection {
    donors: Vec<Donor>,
    capacity_hint: usize,
}

impl DonorCollection {
    pub fn new() -> Self {
        Self::with_capacity_hint(DEFAULT_CAPACITY_HINT)
    }

    /// Creates a collection with a storage hint. The hint is not a limit.
    pub fn with_capacity_hint(capacity_hint: usize) -> Self {
        Self {
            donors: Vec::with_capacity(capacity_hint),
            capacity_hint,
        }
    }

    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }
}

impl Default for DonorCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl DonorRepository for DonorCollection {
    fn insert_donor(&mut self, donor: Donor) -> RepoResult<&mut Donor> {
        if self.find_by_email(donor.email()).is_some() {
            debug!(
                "event=donor_insert module=repo status=rejected reason=duplicate_email size={}",
                self.donors.len()
            );
            return Err(RepoError::DuplicateEmail(donor.email().to_string()));
        }

        let index = self.donors.len();
        self.donors.push(donor);
        debug!(
            "event=donor_insert module=repo status=ok index={} size={}",
            index,
            self.donors.len()
        );
        Ok(&mut self.donors[index])
    }

    fn donors(&self) -> &[Donor] {
        &self.donors
    }

    fn donor_mut(&mut self, email: &str) -> Option<&mut Donor> {
        self.donors.iter_mut().find(|donor| donor.email() == email)
    }
}
