//! Donor domain record.
//!
//! # Responsibility
//! - Hold one donor's identity fields and donation history.
//! - Recompute aggregate giving statistics after every donation.
//! - Provide report, roster and thank-you letter projections.
//!
//! # Invariants
//! - `donation_total`, `donation_count` and `donation_average` always match
//!   `donations`.
//! - `donation_average` stays `0.0` until the first donation exists; it is
//!   never computed by dividing by zero.
//! - Field updates never check email uniqueness; the collection owns that rule.

use crate::model::display::{format_amount, human_date};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable in-process handle for a donor record.
pub type DonorId = Uuid;

/// One monetary contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Donation {
    /// Positive finite amount; validated before it reaches the model.
    pub amount: f64,
    /// Local time when the donation was recorded.
    pub received_at: DateTime<Local>,
}

/// Optional donor details beyond the identity fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DonorAttributes {
    pub organization: Option<String>,
    pub phone: Option<String>,
    pub note: Option<String>,
}

/// Soft-deactivation flag plus the time it last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeactivationState {
    pub deactivated: bool,
    pub changed_at: DateTime<Local>,
}

/// Field update applied by `Donor::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonorUpdate {
    Email(String),
    FirstName(String),
    LastName(String),
}

impl DonorUpdate {
    /// Builds an update from a field name (`email|first_name|last_name`).
    ///
    /// # Errors
    /// - Returns `DonorFieldError::UnknownField` for any other field name.
    pub fn parse(field: &str, value: impl Into<String>) -> Result<Self, DonorFieldError> {
        match field {
            "email" => Ok(Self::Email(value.into())),
            "first_name" => Ok(Self::FirstName(value.into())),
            "last_name" => Ok(Self::LastName(value.into())),
            other => Err(DonorFieldError::UnknownField(other.to_string())),
        }
    }
}

/// Error for string-keyed donor field updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonorFieldError {
    UnknownField(String),
}

impl Display for DonorFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(field) => write!(
                f,
                "unknown donor field `{field}`; expected email|first_name|last_name"
            ),
        }
    }
}

impl Error for DonorFieldError {}

/// Values substituted into a thank-you letter template.
#[derive(Debug, Clone, PartialEq)]
pub struct ThankYouFields {
    /// Human date of the referenced donation.
    pub date: String,
    pub first: String,
    pub last: String,
    /// Single donation amount, or lifetime total for cumulative letters.
    pub amount: f64,
    /// Human date of donor creation; only set for cumulative letters.
    pub created: Option<String>,
}

/// Donor record with donation history and cached aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Donor {
    id: DonorId,
    email: String,
    first_name: String,
    last_name: String,
    donations: Vec<Donation>,
    donation_total: f64,
    donation_count: usize,
    donation_average: f64,
    created_at: DateTime<Local>,
    deactivated: DeactivationState,
    attributes: DonorAttributes,
}

impl Donor {
    /// Creates an active donor with no donations.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let created_at = Local::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            donations: Vec::new(),
            donation_total: 0.0,
            donation_count: 0,
            donation_average: 0.0,
            created_at,
            deactivated: DeactivationState {
                deactivated: false,
                changed_at: created_at,
            },
            attributes: DonorAttributes::default(),
        }
    }

    /// Replaces the optional donor details.
    pub fn with_attributes(mut self, attributes: DonorAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> DonorId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn donations(&self) -> &[Donation] {
        &self.donations
    }

    pub fn donation_total(&self) -> f64 {
        self.donation_total
    }

    pub fn donation_count(&self) -> usize {
        self.donation_count
    }

    pub fn donation_average(&self) -> f64 {
        self.donation_average
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn attributes(&self) -> &DonorAttributes {
        &self.attributes
    }

    /// Records a donation at the current local time.
    ///
    /// The caller validates `amount` (positive, finite) beforehand.
    pub fn add_donation(&mut self, amount: f64) {
        self.add_donation_at(amount, Local::now());
    }

    /// Records a donation at an explicit time.
    pub fn add_donation_at(&mut self, amount: f64, received_at: DateTime<Local>) {
        self.donations.push(Donation {
            amount,
            received_at,
        });
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.donation_total = self.donations.iter().map(|donation| donation.amount).sum();
        self.donation_count = self.donations.len();
        if self.donation_count > 0 {
            self.donation_average = self.donation_total / self.donation_count as f64;
        }
    }

    /// Applies one identity field update.
    pub fn update(&mut self, update: DonorUpdate) {
        match update {
            DonorUpdate::Email(value) => self.email = value,
            DonorUpdate::FirstName(value) => self.first_name = value,
            DonorUpdate::LastName(value) => self.last_name = value,
        }
    }

    /// Marks the donor as deactivated. Repeated calls refresh the timestamp.
    pub fn deactivate(&mut self) {
        self.deactivated = DeactivationState {
            deactivated: true,
            changed_at: Local::now(),
        };
    }

    pub fn is_active(&self) -> bool {
        !self.deactivated.deactivated
    }

    /// Returns the deactivation time, or `None` for active donors.
    pub fn deactivated_at(&self) -> Option<DateTime<Local>> {
        self.deactivated
            .deactivated
            .then_some(self.deactivated.changed_at)
    }

    /// Fixed-width report row.
    ///
    /// Columns: email (30), first name (15), last name (15), total (15),
    /// count (6), average (15). Currency columns carry a `$` prefix outside
    /// the padded width.
    pub fn format_summary(&self) -> String {
        format!(
            "| {:<30} | {:<15} | {:<15} | ${:<15} | {:<6} | ${:<15} |",
            self.email,
            self.first_name,
            self.last_name,
            format_amount(self.donation_total),
            self.donation_count,
            format_amount(self.donation_average),
        )
    }

    /// Roster line: `email | first last`.
    pub fn format_list_entry(&self) -> String {
        format!("{:<30} | {} {}", self.email, self.first_name, self.last_name)
    }

    /// Letter fields for the most recent donation.
    pub fn thank_you_fields(&self) -> Option<ThankYouFields> {
        self.thank_you_fields_at(self.donations.len().checked_sub(1)?)
    }

    /// Letter fields for the donation at `index`; `None` when out of range.
    pub fn thank_you_fields_at(&self, index: usize) -> Option<ThankYouFields> {
        let donation = self.donations.get(index)?;
        Some(ThankYouFields {
            date: human_date(&donation.received_at),
            first: self.first_name.clone(),
            last: self.last_name.clone(),
            amount: donation.amount,
            created: None,
        })
    }

    /// Cumulative letter fields anchored on the most recent donation.
    pub fn thank_you_fields_cumulative(&self) -> Option<ThankYouFields> {
        self.thank_you_fields_cumulative_at(self.donations.len().checked_sub(1)?)
    }

    /// Cumulative letter fields: lifetime total plus the donor creation date.
    pub fn thank_you_fields_cumulative_at(&self, index: usize) -> Option<ThankYouFields> {
        let mut fields = self.thank_you_fields_at(index)?;
        fields.amount = self.donation_total;
        fields.created = Some(human_date(&self.created_at));
        Some(fields)
    }
}

impl Display for Donor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_summary())
    }
}
