//! Type-safe price representation using decimal arithmetic.
//!
//! [`UnitPrice`] is what a line item stores; [`Money`] pairs an amount with a
//! [`CurrencyCode`] for display.

use core::fmt;
use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`UnitPrice`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid price: {0:?}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The amount is above [`UnitPrice::MAX_AMOUNT`].
    #[error("price cannot exceed {max}: {amount}")]
    TooLarge {
        /// The rejected amount.
        amount: Decimal,
        /// Largest accepted amount.
        max: i64,
    },
}

/// Price of a single unit of a product.
///
/// Always between zero and [`UnitPrice::MAX_AMOUNT`]. Serialized as a JSON
/// number; deserialized from a number or a numeric string. Every accepted
/// price survives a JSON number round trip exact to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UnitPrice(Decimal);

impl UnitPrice {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price, in the currency's standard unit.
    pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

    /// Create a unit price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero, or
    /// [`PriceError::TooLarge`] if it is above [`Self::MAX_AMOUNT`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        if amount > Decimal::from(Self::MAX_AMOUNT) {
            return Err(PriceError::TooLarge {
                amount,
                max: Self::MAX_AMOUNT,
            });
        }
        Ok(Self(amount))
    }

    /// Parse a unit price from user or markup input.
    ///
    /// Accepts `10`, `10.5`, `10.50` and, when no `.` is present, a single
    /// `,` as the decimal separator (`10,50`). Surrounding whitespace is
    /// ignored.
    ///
    /// ```
    /// use tabcart_core::UnitPrice;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(UnitPrice::parse("10.00").unwrap().amount(), Decimal::new(1000, 2));
    /// assert_eq!(UnitPrice::parse("10,5").unwrap().amount(), Decimal::new(105, 1));
    /// assert!(UnitPrice::parse("abc").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a number, or out of range.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let normalized: Cow<'_, str> =
            if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
                Cow::Owned(trimmed.replace(',', "."))
            } else {
                Cow::Borrowed(trimmed)
            };

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;

        Self::new(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UnitPrice {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for UnitPrice {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for UnitPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

/// ISO 4217 currency codes supported for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Brazilian real, formatted the `pt-BR` way.
    #[default]
    BRL,
    /// US dollar, formatted the `en-US` way.
    USD,
    /// Euro, formatted with a trailing symbol and comma decimals.
    EUR,
}

impl CurrencyCode {
    /// The ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }

    /// The display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// Thousands and decimal separators.
    const fn separators(self) -> (char, char) {
        match self {
            Self::BRL | Self::EUR => ('.', ','),
            Self::USD => (',', '.'),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::BRL),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

/// An amount with currency information, displayed the way the currency's
/// locale does.
///
/// ```
/// use rust_decimal::Decimal;
/// use tabcart_core::{CurrencyCode, Money};
///
/// let money = Money::new(Decimal::new(123_456, 2), CurrencyCode::BRL);
/// assert_eq!(money.to_string(), "R$\u{a0}1.234,56");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.2}", rounded.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let (group, decimal) = self.currency_code.separators();
        let number = format!("{}{decimal}{cents}", group_thousands(whole, group));
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let symbol = self.currency_code.symbol();

        match self.currency_code {
            CurrencyCode::BRL => write!(f, "{sign}{symbol}\u{a0}{number}"),
            CurrencyCode::USD => write!(f, "{sign}{symbol}{number}"),
            CurrencyCode::EUR => write!(f, "{sign}{number}\u{a0}{symbol}"),
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
