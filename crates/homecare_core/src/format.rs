//! Brazilian-locale display formatters.
//!
//! # Responsibility
//! - Convert raw values (money, dates, CPF, phone) into pt-BR display strings.
//! - Provide the small numeric helpers used by list and detail views.
//!
//! # Invariants
//! - Every function is pure; "today" is always an explicit argument.
//! - Fixed-width document/phone formatting rejects wrong digit counts instead
//!   of emitting partially formatted output.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NON_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("valid non-digit regex"));
static CPF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3})(\d{3})(\d{3})(\d{2})$").expect("valid cpf regex"));
static MOBILE_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{5})(\d{4})$").expect("valid mobile phone regex"));
static LANDLINE_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{4})(\d{4})$").expect("valid landline phone regex"));

const CURRENCY_PREFIX: &str = "R$";
const CPF_DIGITS: &[usize] = &[11];
const PHONE_DIGITS: &[usize] = &[10, 11];

/// Formatter input errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Digit count does not match any accepted fixed-width layout.
    InvalidLength {
        kind: &'static str,
        expected: &'static [usize],
        actual: usize,
    },
    /// Date text is not ISO-8601 / RFC 3339.
    InvalidDate(String),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength {
                kind,
                expected,
                actual,
            } => {
                let expected = expected
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ");
                write!(f, "{kind} must have {expected} digits, got {actual}")
            }
            Self::InvalidDate(value) => write!(f, "invalid date: `{value}`"),
        }
    }
}

impl Error for FormatError {}

/// Formats a value in Brazilian Real, e.g. `1500.5` -> `R$ 1.500,50`.
///
/// Rounds the shortest decimal form of `value` half away from zero to whole
/// centavos, so `1.005` renders `R$ 1,01`. Non-finite input renders the way
/// browser locale formatting does (`R$ NaN`, `R$ ∞`).
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return format!("{CURRENCY_PREFIX} NaN");
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{CURRENCY_PREFIX} ∞");
    }

    let rounded = round_to_centavos(value);
    let sign = if rounded.negative { "-" } else { "" };
    format!(
        "{sign}{CURRENCY_PREFIX} {},{:02}",
        group_digits(&rounded.reais),
        rounded.cents
    )
}

/// Formats an integer amount of centavos in Brazilian Real.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let reais = group_digits(&(abs / 100).to_string());
    format!("{sign}{CURRENCY_PREFIX} {reais},{:02}", abs % 100)
}

/// Formats a calendar date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formats a timestamp as `DD/MM/YYYY HH:mm`.
pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

/// Parses ISO date text (`YYYY-MM-DD`, naive datetime or RFC 3339) and formats
/// its date part as `DD/MM/YYYY`.
pub fn format_iso_date(value: &str) -> Result<String, FormatError> {
    parse_iso_date(value).map(format_date)
}

/// Formats an 11-digit CPF as `000.000.000-00`.
///
/// Non-digit characters are ignored, so already formatted input is accepted.
pub fn format_cpf(value: &str) -> Result<String, FormatError> {
    let digits = digits_only(value);
    if !CPF_DIGITS.contains(&digits.len()) {
        return Err(FormatError::InvalidLength {
            kind: "cpf",
            expected: CPF_DIGITS,
            actual: digits.len(),
        });
    }

    Ok(CPF_RE.replace(&digits, "$1.$2.$3-$4").into_owned())
}

/// Formats a Brazilian phone number.
///
/// - 11 digits (mobile) -> `(00) 00000-0000`
/// - 10 digits (landline) -> `(00) 0000-0000`
pub fn format_phone(value: &str) -> Result<String, FormatError> {
    let digits = digits_only(value);
    let pattern = match digits.len() {
        11 => &MOBILE_PHONE_RE,
        10 => &LANDLINE_PHONE_RE,
        actual => {
            return Err(FormatError::InvalidLength {
                kind: "phone",
                expected: PHONE_DIGITS,
                actual,
            })
        }
    };

    Ok(pattern.replace(&digits, "($1) $2-$3").into_owned())
}

/// Returns full years elapsed between `birth_date` and `today`.
pub fn get_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Parses a `YYYY-MM-DD` birth date and returns the age on `today`.
pub fn age_from_iso(birth_date: &str, today: NaiveDate) -> Result<i32, FormatError> {
    parse_iso_date(birth_date).map(|birth| get_age(birth, today))
}

/// Gross margin percentage of `sell_price` over `cost`.
///
/// Returns `0.0` when `sell_price` is zero.
pub fn calculate_margin(cost: f64, sell_price: f64) -> f64 {
    if sell_price == 0.0 {
        return 0.0;
    }
    (sell_price - cost) / sell_price * 100.0
}

fn parse_iso_date(value: &str) -> Result<NaiveDate, FormatError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(value.date());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|value| value.date_naive())
        .map_err(|_| FormatError::InvalidDate(trimmed.to_string()))
}

fn digits_only(value: &str) -> String {
    NON_DIGIT_RE.replace_all(value, "").into_owned()
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// A finite amount rounded to whole centavos.
struct Centavos {
    negative: bool,
    /// Integer reais as plain decimal digits, without grouping.
    reais: String,
    cents: u8,
}

/// Rounds the shortest decimal representation of a finite `value` half away
/// from zero to two fraction digits.
///
/// Working on the decimal text avoids the binary error of `value * 100.0`
/// (`1.005 * 100.0 == 100.49999999999999`).
fn round_to_centavos(value: f64) -> Centavos {
    let text = value.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.as_bytes();
    let digit = |index: usize| fraction.get(index).map_or(0, |byte| byte - b'0');

    let mut reais = integer.to_string();
    let mut cents = digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        cents += 1;
        if cents == 100 {
            cents = 0;
            reais = increment_digits(&reais);
        }
    }

    let is_zero = cents == 0 && reais.bytes().all(|byte| byte == b'0');
    Centavos {
        negative: value.is_sign_negative() && !is_zero,
        reais,
        cents,
    }
}

fn increment_digits(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    for ch in chars.iter_mut().rev() {
        if *ch == '9' {
            *ch = '0';
        } else {
            *ch = char::from(*ch as u8 + 1);
            return chars.into_iter().collect();
        }
    }
    std::iter::once('1').chain(chars).collect()
}

/// Converts a reais amount to centavos with the same rounding as
/// [`format_currency`]. `None` for non-finite values or amounts outside `i64`
/// centavos.
pub(crate) fn reais_to_cents(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let rounded = round_to_centavos(value);
    let cents = rounded
        .reais
        .parse::<i64>()
        .ok()?
        .checked_mul(100)?
        .checked_add(i64::from(rounded.cents))?;
    Some(if rounded.negative { -cents } else { cents })
}

#[cfg(test)]
mod tests {
    use super::{format_cents, group_digits, increment_digits, reais_to_cents};

    #[test]
    fn group_digits_inserts_dots_from_the_right() {
        assert_eq!(group_digits("0"), "0");
        assert_eq!(group_digits("999"), "999");
        assert_eq!(group_digits("1000"), "1.000");
        assert_eq!(group_digits("1234567"), "1.234.567");
    }

    #[test]
    fn format_cents_pads_fraction_and_keeps_sign() {
        assert_eq!(format_cents(5), "R$ 0,05");
        assert_eq!(format_cents(-1_000), "-R$ 10,00");
    }

    #[test]
    fn increment_digits_carries() {
        assert_eq!(increment_digits("0"), "1");
        assert_eq!(increment_digits("129"), "130");
        assert_eq!(increment_digits("999"), "1000");
    }

    #[test]
    fn reais_to_cents_rounds_decimal_text_and_checks_range() {
        assert_eq!(reais_to_cents(1.005), Some(101));
        assert_eq!(reais_to_cents(-2.675), Some(-268));
        assert_eq!(reais_to_cents(-0.004), Some(0));
        assert_eq!(reais_to_cents(92_233_720_368_547_758.0), None);
        assert_eq!(reais_to_cents(1e17), None);
        assert_eq!(reais_to_cents(f64::NAN), None);
    }
}
