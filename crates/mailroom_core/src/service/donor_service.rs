//! Donor use-case service.
//!
//! # Responsibility
//! - Register donors and record validated donations.
//! - Produce roster/report projections and thank-you letters.
//!
//! # Invariants
//! - Donation amounts are validated here before they reach `Donor`.
//! - Service APIs never bypass repository uniqueness rules.
//! - Letter write failures abort the batch and are returned unchanged.

use crate::letters::{
    render_letter, LetterError, LetterWriter, THANK_YOU_TEMPLATE, THANK_YOU_TEMPLATE_CUMULATIVE,
};
use crate::model::donor::Donor;
use crate::repo::donor_repo::{DonorQuery, DonorRepository, RepoError};
use crate::validation::{validate_donation_amount, validate_donation_total, ValidationError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for donor use cases.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    Repo(RepoError),
    Letter(LetterError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Letter(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Letter(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<LetterError> for ServiceError {
    fn from(value: LetterError) -> Self {
        Self::Letter(value)
    }
}

/// Outcome of one donor in a thank-you letter batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterOutcome {
    Saved {
        first: String,
        last: String,
        path: PathBuf,
    },
    /// Donor has no donations to thank for.
    Skipped { first: String, last: String },
}

/// Use-case service over a donor repository.
pub struct DonorService<R: DonorRepository> {
    repo: R,
}

impl<R: DonorRepository> DonorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Looks up a donor by exact email.
    pub fn lookup(&self, email: &str) -> Option<&Donor> {
        self.repo.find_by_email(email)
    }

    /// Registers a donor with no donations.
    pub fn register_donor(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> ServiceResult<&Donor> {
        let donor = self.repo.add_donor(email, first_name, last_name)?;
        info!(
            "event=donor_registered module=service status=ok donor_id={}",
            donor.id()
        );
        Ok(&*donor)
    }

    /// Records a donation for an existing donor.
    ///
    /// # Errors
    /// - `ServiceError::Validation` when `amount` is not finite and positive, or
    ///   when it would overflow the donor total.
    /// - `ServiceError::Repo(RepoError::NotFound)` for an unknown email.
    pub fn record_donation(&mut self, email: &str, amount: f64) -> ServiceResult<&Donor> {
        validate_donation_amount(amount)?;
        let donor = self
            .repo
            .donor_mut(email)
            .ok_or_else(|| RepoError::NotFound(email.to_string()))?;
        validate_donation_total(donor.donation_total(), amount)?;
        donor.add_donation(amount);
        info!(
            "event=donation_recorded module=service status=ok donor_id={} donation_count={}",
            donor.id(),
            donor.donation_count()
        );
        Ok(&*donor)
    }

    /// Renders the single-donation letter for the donor's latest donation.
    ///
    /// Returns `None` for unknown donors or donors without donations.
    pub fn donation_receipt(&self, email: &str) -> Option<String> {
        let fields = self.lookup(email)?.thank_you_fields()?;
        Some(render_letter(THANK_YOU_TEMPLATE, &fields))
    }

    pub fn donor_report(&self) -> Vec<String> {
        self.repo.report()
    }

    pub fn donor_roster(&self) -> Vec<String> {
        self.repo.roster()
    }

    /// Writes a cumulative thank-you letter for every donor, in insertion order.
    ///
    /// # Errors
    /// - `ServiceError::Letter` on the first write failure; earlier letters stay
    ///   on disk.
    pub fn write_thank_you_letters<W: LetterWriter>(
        &self,
        writer: &W,
    ) -> ServiceResult<Vec<LetterOutcome>> {
        let mut outcomes = Vec::with_capacity(self.repo.len());
        for donor in self.repo.find(&DonorQuery::All) {
            let first = donor.first_name().to_string();
            let last = donor.last_name().to_string();
            let Some(fields) = donor.thank_you_fields_cumulative() else {
                outcomes.push(LetterOutcome::Skipped { first, last });
                continue;
            };

            let letter = render_letter(THANK_YOU_TEMPLATE_CUMULATIVE, &fields);
            let path = writer.save(&first, &last, &letter).map_err(|err| {
                error!(
                    "event=letters_written module=service status=error written={}",
                    outcomes.len()
                );
                err
            })?;
            outcomes.push(LetterOutcome::Saved { first, last, path });
        }

        info!(
            "event=letters_written module=service status=ok donors={} saved={}",
            outcomes.len(),
            outcomes
                .iter()
                .filter(|outcome| matches!(outcome, LetterOutcome::Saved { .. }))
                .count()
        );
        Ok(outcomes)
    }
}
