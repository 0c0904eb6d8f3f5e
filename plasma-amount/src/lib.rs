//! Exact, non-negative token amounts.
//!
//! Child-chain and root-chain amounts routinely exceed what a double can carry, so every
//! amount is held as an arbitrary-precision integer and every conversion into one is
//! checked: fractional values, values a double cannot represent exactly and values that do
//! not fit the root chain's `uint256` are rejected instead of being rounded.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use num::bigint::{BigInt, BigUint, Sign};
use num::{ToPrimitive, Zero};
use num_traits::CheckedSub;
use thiserror::Error;

/// Largest integer an IEEE-754 double represents exactly (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Amounts settle in `uint256` slots on the root chain.
pub const MAX_AMOUNT_BITS: u64 = 256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount has a fractional component: {0}")]
    Fractional(String),
    #[error("Amount cannot be represented exactly: {0}")]
    Unsafe(String),
    #[error("Amount is not a decimal integer: {0:?}")]
    Malformed(String),
    #[error("Amount must not be negative: {0}")]
    Negative(String),
    #[error("Amount does not fit in {MAX_AMOUNT_BITS} bits")]
    TooLarge,
    #[error("Subtraction underflowed")]
    SubtractionUnderflow,
    #[error("Division by zero")]
    DivisionByZero,
}

/// Every source form an amount may arrive in.
#[derive(Clone, Debug, PartialEq)]
pub enum AmountInput {
    Integer(i128),
    /// A JSON-style number; only accepted when it is integral and safe.
    Number(f64),
    /// Decimal digits with an optional leading sign.
    Text(String),
    Big(BigInt),
}

macro_rules! amount_input_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AmountInput {
                fn from(value: $ty) -> Self {
                    AmountInput::Integer(value as i128)
                }
            }
        )*
    };
}

amount_input_from_int!(u8, u16, u32, u64, i8, i16, i32, i64, i128);

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<BigInt> for AmountInput {
    fn from(value: BigInt) -> Self {
        AmountInput::Big(value)
    }
}

impl From<BigUint> for AmountInput {
    fn from(value: BigUint) -> Self {
        AmountInput::Big(BigInt::from(value))
    }
}

impl From<Amount> for AmountInput {
    fn from(value: Amount) -> Self {
        AmountInput::Big(BigInt::from(value.0))
    }
}

impl From<&Amount> for AmountInput {
    fn from(value: &Amount) -> Self {
        AmountInput::Big(BigInt::from(value.0.clone()))
    }
}

/// Parses `input` as a signed integer amount.
///
/// Negative values are allowed here so callers can tell a non-positive request apart from a
/// malformed one.
pub fn parse_signed_amount(input: impl Into<AmountInput>) -> Result<BigInt, AmountError> {
    let value = match input.into() {
        AmountInput::Integer(value) => BigInt::from(value),
        AmountInput::Number(value) => parse_number(value)?,
        AmountInput::Text(text) => parse_text(&text)?,
        AmountInput::Big(value) => value,
    };

    if value.magnitude().bits() > MAX_AMOUNT_BITS {
        return Err(AmountError::TooLarge);
    }

    Ok(value)
}

/// Parses `input` as a non-negative [`Amount`].
pub fn parse_amount(input: impl Into<AmountInput>) -> Result<Amount, AmountError> {
    Amount::try_from(parse_signed_amount(input)?)
}

/// Parses a requested payment amount. Zero and negative requests yield `None`.
pub fn parse_positive_amount(input: impl Into<AmountInput>) -> Result<Option<Amount>, AmountError> {
    let value = parse_signed_amount(input)?;
    if value.sign() != Sign::Plus {
        return Ok(None);
    }
    Amount::try_from(value).map(Some)
}

fn parse_number(value: f64) -> Result<BigInt, AmountError> {
    if !value.is_finite() {
        return Err(AmountError::Malformed(value.to_string()));
    }
    if value.fract() != 0.0 {
        return Err(AmountError::Fractional(value.to_string()));
    }
    if value.abs() > MAX_SAFE_INTEGER {
        return Err(AmountError::Unsafe(value.to_string()));
    }

    Ok(BigInt::from(value as i64))
}

fn parse_text(text: &str) -> Result<BigInt, AmountError> {
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (Sign::Minus, &text[1..]),
        Some(b'+') => (Sign::Plus, &text[1..]),
        _ => (Sign::Plus, text),
    };

    if digits.contains('.') {
        return Err(AmountError::Fractional(text.to_string()));
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Malformed(text.to_string()));
    }

    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| AmountError::Malformed(text.to_string()))?;

    Ok(BigInt::from_biguint(sign, magnitude))
}

/// A non-negative integer amount of some currency's smallest unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_sub(&other.0).map(Amount)
    }

    pub fn safe_sub(&self, other: &Amount) -> Result<Amount, AmountError> {
        self.checked_sub(other)
            .ok_or(AmountError::SubtractionUnderflow)
    }

    pub fn saturating_sub(&self, other: &Amount) -> Amount {
        self.checked_sub(other).unwrap_or_default()
    }

    /// Floor division by a small divisor.
    pub fn div_floor(&self, divisor: u32) -> Result<Amount, AmountError> {
        if divisor == 0 {
            return Err(AmountError::DivisionByZero);
        }
        Ok(Amount(&self.0 / BigUint::from(divisor)))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(BigUint::from(value))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount(BigUint::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(BigUint::from(value))
    }
}

impl TryFrom<BigInt> for Amount {
    type Error = AmountError;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        if value.sign() == Sign::Minus {
            return Err(AmountError::Negative(value.to_string()));
        }
        if value.magnitude().bits() > MAX_AMOUNT_BITS {
            return Err(AmountError::TooLarge);
        }
        let (_, magnitude) = value.into_parts();
        Ok(Amount(magnitude))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_amount(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        Amount(iter.map(|amount| amount.0).sum())
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        Amount(iter.map(|amount| &amount.0).sum())
    }
}
