//! Core domain logic for the donation mailroom.
//! This crate is the single source of truth for donor invariants.

pub mod letters;
pub mod logging;
pub mod menu;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod validation;

pub use letters::{
    render_letter, FsLetterWriter, LetterError, LetterWriter, THANK_YOU_TEMPLATE,
    THANK_YOU_TEMPLATE_CUMULATIVE,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use menu::{MenuCommand, MenuManager, MenuSelection, MAIN_MENU};
pub use model::display::{format_amount, format_currency, human_date};
pub use model::donor::{
    DeactivationState, Donation, Donor, DonorAttributes, DonorFieldError, DonorId, DonorUpdate,
    ThankYouFields,
};
pub use repo::donor_repo::{
    DonorCollection, DonorQuery, DonorRepository, RepoError, RepoResult, DEFAULT_CAPACITY_HINT,
};
pub use seed::load_demo_donors;
pub use service::donor_service::{DonorService, LetterOutcome, ServiceError, ServiceResult};
pub use validation::{
    parse_donation_amount, title_case, validate_donation_amount, validate_donation_total,
    validate_email, validate_value_exists, ValidationError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
