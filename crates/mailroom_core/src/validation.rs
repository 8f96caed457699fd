//! Input validators for interactive donor entry.
//!
//! # Responsibility
//! - Check email syntax (no deliverability lookups).
//! - Parse donation amounts and enforce `amount > 0`.
//! - Normalize entered names.
//!
//! # Invariants
//! - Validators are pure; they never touch the donor collection.
//! - A donation amount is accepted only when finite and strictly positive.
//! - A donation is refused when it would push the donor total past `f64::MAX`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}.!#$%&'*+/=?^_`{|}~-]+@[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?)+$",
    )
    .expect("valid email regex")
});

/// Rejection reason for user-supplied values.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text was empty or whitespace.
    EmptyValue,
    /// Email does not match address syntax.
    InvalidEmail(String),
    /// Amount text is not a number.
    UnparsableAmount(String),
    /// Amount is zero, negative, NaN or infinite.
    NonPositiveAmount(f64),
    /// Adding the amount would overflow the donor's running total.
    TotalOverflow(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue => write!(f, "value cannot be empty"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::UnparsableAmount(value) => write!(f, "donation amount is not a number: `{value}`"),
            Self::NonPositiveAmount(value) => {
                write!(f, "donation amount must be greater than zero, got {value}")
            }
            Self::TotalOverflow(value) => {
                write!(f, "donation amount {value} would overflow the donor total")
            }
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty or whitespace-only text.
pub fn validate_value_exists(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyValue);
    }
    Ok(())
}

/// Checks email syntax: local part, `@`, and a dotted domain.
///
/// Letters and digits from any script are accepted, so internationalized
/// addresses such as `jörg@exämple.com` pass.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

/// Checks an already-parsed donation amount.
pub fn validate_donation_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveAmount(amount))
    }
}

/// Checks that `amount` can be added to `current_total` without overflow.
pub fn validate_donation_total(current_total: f64, amount: f64) -> Result<(), ValidationError> {
    if (current_total + amount).is_finite() {
        Ok(())
    } else {
        Err(ValidationError::TotalOverflow(amount))
    }
}

/// Parses raw amount text and enforces `amount > 0`.
pub fn parse_donation_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let amount = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::UnparsableAmount(trimmed.to_string()))?;
    validate_donation_amount(amount)?;
    Ok(amount)
}

/// Capitalizes the first letter of each alphabetic run and lowercases the rest.
///
/// `o'BRIEN smith` becomes `O'Brien Smith`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_alphabetic = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(ch);
            previous_alphabetic = false;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{
        parse_donation_amount, title_case, validate_donation_amount, validate_donation_total,
        validate_email, validate_value_exists, ValidationError,
    };

    #[test]
    fn validate_value_exists_rejects_blank_text() {
        assert!(validate_value_exists("a").is_ok());
        assert_eq!(validate_value_exists(""), Err(ValidationError::EmptyValue));
        assert_eq!(validate_value_exists("   "), Err(ValidationError::EmptyValue));
    }

    #[test]
    fn validate_email_accepts_common_addresses() {
        assert!(validate_email("test@test.com").is_ok());
        assert!(validate_email("test@test.co.uk").is_ok());
        assert!(validate_email("first.last+tag@mail-host.org").is_ok());
    }

    #[test]
    fn validate_email_accepts_internationalized_addresses() {
        assert!(validate_email("jörg@exämple.com").is_ok());
        assert!(validate_email("用户@例子.中国").is_ok());
        assert!(validate_email("jörg@exämple").is_err());
    }

    #[test]
    fn validate_email_rejects_malformed_addresses() {
        for value in [
            "",
            "test@test",
            "@test.com",
            "test.com",
            "bill@bailey@com",
            "a@.com",
            "a@b..com",
            "a b@c.com",
        ] {
            assert!(
                validate_email(value).is_err(),
                "`{value}` should be rejected"
            );
        }
    }

    #[test]
    fn parse_donation_amount_accepts_positive_numbers() {
        assert_eq!(parse_donation_amount("100").expect("integer text"), 100.0);
        assert_eq!(parse_donation_amount(" 12.50 ").expect("decimal text"), 12.5);
    }

    #[test]
    fn parse_donation_amount_rejects_non_numeric_text() {
        assert_eq!(
            parse_donation_amount("a"),
            Err(ValidationError::UnparsableAmount("a".to_string()))
        );
        assert!(matches!(
            parse_donation_amount(""),
            Err(ValidationError::UnparsableAmount(_))
        ));
    }

    #[test]
    fn parse_donation_amount_rejects_zero_negative_and_non_finite() {
        for raw in ["0", "-1", "-0.01", "inf", "NaN"] {
            assert!(
                matches!(
                    parse_donation_amount(raw),
                    Err(ValidationError::NonPositiveAmount(_))
                ),
                "`{raw}` should be rejected as non-positive"
            );
        }
        assert!(validate_donation_amount(f64::NAN).is_err());
    }

    #[test]
    fn validate_donation_total_rejects_overflowing_sum() {
        assert!(validate_donation_total(150.0, 50.0).is_ok());
        assert!(validate_donation_total(0.0, 1e308).is_ok());
        assert_eq!(
            validate_donation_total(1e308, 1e308),
            Err(ValidationError::TotalOverflow(1e308))
        );
    }

    #[test]
    fn title_case_normalizes_each_word() {
        assert_eq!(title_case("jane"), "Jane");
        assert_eq!(title_case("mary ann"), "Mary Ann");
        assert_eq!(title_case("o'BRIEN"), "O'Brien");
        assert_eq!(title_case(""), "");
    }
}
