//! Text formatting helpers shared by reports and letters.

use chrono::{DateTime, Local};

const HUMAN_DATE_FORMAT: &str = "%d %B %Y";

/// Formats an amount with thousands separators and two decimals.
///
/// `1234.5` renders as `1,234.50`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + fraction.len() + 2);
    if value < 0.0 {
        grouped.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('.');
    grouped.push_str(fraction);
    grouped
}

/// Formats an amount as dollars, e.g. `$1,234.50`.
pub fn format_currency(value: f64) -> String {
    format!("${}", format_amount(value))
}

/// Renders a timestamp as `day month-name year`, e.g. `05 March 2024`.
pub fn human_date(at: &DateTime<Local>) -> String {
    at.format(HUMAN_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_amount, format_currency, human_date};
    use chrono::{Local, TimeZone};

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn format_amount_keeps_sign_for_negative_values() {
        assert_eq!(format_amount(-2500.0), "-2,500.00");
    }

    #[test]
    fn format_currency_prefixes_dollar_sign() {
        assert_eq!(format_currency(150.0), "$150.00");
    }

    #[test]
    fn human_date_uses_day_month_name_year() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 5, 10, 30, 0)
            .single()
            .expect("unambiguous local time");
        assert_eq!(human_date(&at), "05 March 2024");
    }
}
