//! Release percentage
//!
//! Stored as basis points (hundredths of a percent) so that applying it to a
//! cent amount stays in integer arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::money::{div_round_half_up, Money};
use crate::error::{VaultError, VaultResult};

/// Share of the available funds to release, in (0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(u32);

impl Percentage {
    const FULL_BASIS_POINTS: u32 = 10_000;

    /// 100%
    pub const fn full() -> Self {
        Self(Self::FULL_BASIS_POINTS)
    }

    /// Create from a percent value such as `50.0` or `33.33`
    ///
    /// Values must be finite and within (0, 100] after rounding to two
    /// decimals; anything else is an `InvalidPercentage` error.
    pub fn from_f64(percent: f64) -> VaultResult<Self> {
        let invalid = || VaultError::InvalidPercentage(percent.to_string());

        if !percent.is_finite() || percent <= 0.0 || percent > 100.0 {
            return Err(invalid());
        }

        let basis_points = (percent * 100.0).round() as u32;
        if basis_points == 0 || basis_points > Self::FULL_BASIS_POINTS {
            return Err(invalid());
        }

        Ok(Self(basis_points))
    }

    /// Parse user input such as "50", "33.33" or "75%"
    pub fn parse(s: &str) -> VaultResult<Self> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let percent: f64 = number
            .parse()
            .map_err(|_| VaultError::InvalidPercentage(s.to_string()))?;
        Self::from_f64(percent)
    }

    pub const fn basis_points(&self) -> u32 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Apply to an amount, rounding the result to the cent
    pub fn of(&self, amount: Money) -> Money {
        // At most 100%, so the share never exceeds the amount and fits in i64
        let share = div_round_half_up(
            amount.cents() as i128 * self.0 as i128,
            Self::FULL_BASIS_POINTS as i128,
        );
        Money::from_cents(share as i64)
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::full()
    }
}

impl TryFrom<f64> for Percentage {
    type Error = VaultError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl From<Percentage> for f64 {
    fn from(p: Percentage) -> Self {
        p.as_f64()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Percentage::from_f64(0.0).is_err());
        assert!(Percentage::from_f64(-5.0).is_err());
        assert!(Percentage::from_f64(100.01).is_err());
        assert!(Percentage::from_f64(0.001).is_err());
        assert!(Percentage::from_f64(f64::NAN).is_err());
        assert_eq!(Percentage::from_f64(100.0).unwrap(), Percentage::full());
        assert_eq!(Percentage::from_f64(0.01).unwrap().basis_points(), 1);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Percentage::parse("50").unwrap().basis_points(), 5_000);
        assert_eq!(Percentage::parse("33.33").unwrap().basis_points(), 3_333);
        assert_eq!(Percentage::parse(" 75% ").unwrap().basis_points(), 7_500);
        assert!(matches!(
            Percentage::parse("lots"),
            Err(VaultError::InvalidPercentage(_))
        ));
    }

    #[test]
    fn test_of_rounds_half_up() {
        let fifty = Percentage::from_f64(50.0).unwrap();
        assert_eq!(fifty.of(Money::from_units(200)), Money::from_units(100));
        // 50% of 0.05 = 0.025 -> 0.03
        assert_eq!(fifty.of(Money::from_cents(5)), Money::from_cents(3));

        let third = Percentage::from_f64(33.33).unwrap();
        assert_eq!(third.of(Money::from_units(100)), Money::from_cents(3_333));
        assert_eq!(Percentage::full().of(Money::from_cents(777)), Money::from_cents(777));
    }

    #[test]
    fn test_of_large_amount() {
        let amount = Money::from_units(10_000_000_000_000);
        assert_eq!(Percentage::full().of(amount), amount);
        let half = Percentage::from_f64(50.0).unwrap();
        assert_eq!(half.of(amount), Money::from_units(5_000_000_000_000));
    }

    #[test]
    fn test_display() {
        assert_eq!(Percentage::full().to_string(), "100%");
        assert_eq!(Percentage::from_f64(12.5).unwrap().to_string(), "12.50%");
    }
}
