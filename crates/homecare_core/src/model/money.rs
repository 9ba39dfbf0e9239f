//! Currency amount stored as integer centavos.

use crate::format::{format_cents, reais_to_cents};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Amount in Brazilian Real, stored as whole centavos.
///
/// Serialized as a decimal number of reais (`1500.5`) to match the external
/// record shape. Arithmetic is checked; amounts never wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a decimal reais amount, rounding half away from zero.
    ///
    /// `None` for non-finite amounts or amounts outside the centavo range.
    pub fn try_from_reais(value: f64) -> Option<Self> {
        reais_to_cents(value).map(Self)
    }

    /// [`Self::try_from_reais`] for trusted literals; out-of-range amounts
    /// clamp to the representable bounds and `NaN` becomes zero.
    pub fn from_reais(value: f64) -> Self {
        Self::try_from_reais(value).unwrap_or(if value.is_nan() {
            Self::ZERO
        } else if value < 0.0 {
            Self(i64::MIN)
        } else {
            Self(i64::MAX)
        })
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn as_reais(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Unit price times a quantity.
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Self)
    }

    /// Sums amounts, `None` on overflow.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_cents(self.0))
    }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_reais())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::try_from_reais(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "money amount must be finite and within the centavo range, got {value}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Money;

    #[test]
    fn from_reais_rounds_to_centavos() {
        assert_eq!(Money::from_reais(1500.5).cents(), 150_050);
        assert_eq!(Money::from_reais(0.125).cents(), 13);
    }

    #[test]
    fn display_uses_brazilian_format() {
        assert_eq!(Money::from_cents(150_050).to_string(), "R$ 1.500,50");
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let total = Money::checked_sum([
            Money::from_cents(1_000).checked_mul(3).unwrap(),
            Money::from_cents(250),
        ]);
        assert_eq!(total, Some(Money::from_cents(3_250)));

        assert_eq!(Money::from_cents(i64::MAX / 2).checked_mul(3), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(
            Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]),
            None
        );
    }

    #[test]
    fn deserialize_rejects_out_of_range_amounts() {
        assert_eq!(
            serde_json::from_str::<Money>("12.345").unwrap(),
            Money::from_cents(1_235)
        );
        assert!(serde_json::from_str::<Money>("1e17").is_err());
        assert!(serde_json::from_str::<Money>("-1e300").is_err());
    }
}
