//! Locale-formatted monetary amount with 2 decimal places.
//!
//! French statements print amounts as `1 575,00`: comma decimal separator,
//! optional space-separated thousands group, exactly two fractional digits.
//! `Amount` wraps `rust_decimal::Decimal` with scale enforcement so balance
//! arithmetic is exact to the cent.

use crate::error::ExtractError;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount that maintains exactly 2 decimal places.
///
/// Parsing accepts the statement's locale format and rendering produces it
/// back, so a parse followed by a format with no arithmetic in between is an
/// exact round trip (modulo thousands-separator spacing, which is never
/// re-inserted).
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use releve_extract::Amount;
///
/// let amount = Amount::from_str("1 575,00").unwrap();
/// assert_eq!(amount.to_string(), "1575,00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates a new `Amount` from a `Decimal`, normalizing to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = ExtractError;

    /// Parses a locale-formatted amount such as `13,40` or `1 575,00`.
    ///
    /// Internal spaces (thousands separators) are stripped and the comma
    /// becomes a decimal point before the exact-decimal parse.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let cleaned = s.trim().replace(' ', "").replace(',', ".");
        let decimal = Decimal::from_str(&cleaned).map_err(|_| ExtractError::MalformedAmount {
            text: s.to_string(),
        })?;
        Ok(Amount::new(decimal))
    }
}

impl fmt::Display for Amount {
    /// Renders with a comma decimal separator and no thousands grouping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = self.0.to_string();
        write!(f, "{}", plain.replace('.', ","))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
