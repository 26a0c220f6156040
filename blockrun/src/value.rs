//! Runtime integer values.
//!
//! Every value manipulated by a program is an arbitrary-precision signed
//! integer. [`Integer`] wraps [`BigInt`] and exposes the handful of
//! operations the evaluator needs, with the language's semantics baked in:
//! division and modulo floor toward negative infinity, bitwise operators use
//! two's complement, and comparisons produce `1` or `0`.

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Arbitrary-precision signed integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn one() -> Self {
        Self(BigInt::one())
    }

    /// `1` for true, `0` for false.
    pub fn from_bool(value: bool) -> Self {
        if value { Self::one() } else { Self::zero() }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Only the exact value `1` counts as a true condition.
    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// Floor division. Returns `None` when `rhs` is zero.
    pub fn checked_div_floor(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self(self.0.div_floor(&rhs.0)))
    }

    /// Modulo matching floor division: the result has the sign of `rhs`.
    /// Returns `None` when `rhs` is zero.
    pub fn checked_mod_floor(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self(self.0.mod_floor(&rhs.0)))
    }

    /// Raises `self` to `exp`.
    ///
    /// Returns `None` when the exponent is negative, or when it does not fit
    /// in a `u32` and the base is not one of `-1`, `0`, `1`.
    pub fn checked_pow(&self, exp: &Self) -> Option<Self> {
        if exp.0.is_negative() {
            return None;
        }
        if let Some(exp) = exp.0.to_u32() {
            return Some(Self(Pow::pow(&self.0, exp)));
        }
        // Huge exponents are only tractable for trivial bases.
        if self.0.is_zero() || self.0.is_one() {
            Some(self.clone())
        } else if self.0 == -BigInt::one() {
            Some(if exp.0.is_even() { Self::one() } else { self.clone() })
        } else {
            None
        }
    }
}

macro_rules! forward_binop {
    ($($trait:ident :: $method:ident),* $(,)?) => {
        $(
            impl std::ops::$trait for &Integer {
                type Output = Integer;

                fn $method(self, rhs: &Integer) -> Integer {
                    Integer(std::ops::$trait::$method(&self.0, &rhs.0))
                }
            }
        )*
    };
}

forward_binop!(Add::add, Sub::sub, Mul::mul, BitAnd::bitand, BitOr::bitor, BitXor::bitxor);

impl std::ops::Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        Integer(-&self.0)
    }
}

/// Bitwise complement, `-x - 1`.
impl std::ops::Not for &Integer {
    type Output = Integer;

    fn not(self) -> Integer {
        Integer(!&self.0)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl FromStr for Integer {
    type Err = num_bigint::ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Serialized as a decimal string so values are not limited to 64 bits.
impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(Integer::from(n)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Integer {
        Integer::from(v)
    }

    #[test]
    fn test_floor_division() {
        assert_eq!(int(7).checked_div_floor(&int(2)), Some(int(3)));
        assert_eq!(int(-7).checked_div_floor(&int(2)), Some(int(-4)));
        assert_eq!(int(7).checked_div_floor(&int(-2)), Some(int(-4)));
        assert_eq!(int(-7).checked_div_floor(&int(-2)), Some(int(3)));
    }

    #[test]
    fn test_floor_modulo() {
        assert_eq!(int(-7).checked_mod_floor(&int(2)), Some(int(1)));
        assert_eq!(int(7).checked_mod_floor(&int(-2)), Some(int(-1)));
        assert_eq!(int(7).checked_mod_floor(&int(2)), Some(int(1)));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(int(1).checked_div_floor(&int(0)), None);
        assert_eq!(int(1).checked_mod_floor(&int(0)), None);
    }

    #[test]
    fn test_pow() {
        assert_eq!(int(2).checked_pow(&int(10)), Some(int(1024)));
        assert_eq!(int(0).checked_pow(&int(0)), Some(int(1)));
        assert_eq!(int(2).checked_pow(&int(-1)), None);

        let huge: Integer = "100000000000".parse().unwrap();
        assert_eq!(int(1).checked_pow(&huge), Some(int(1)));
        assert_eq!(int(-1).checked_pow(&huge), Some(int(1)));
        assert_eq!(int(3).checked_pow(&huge), None);
    }

    #[test]
    fn test_no_overflow() {
        let big = &int(i64::MAX) * &int(i64::MAX);
        assert_eq!(big.to_string(), "85070591730234615847396907784232501249");
        assert_eq!(big.to_i64(), None);
    }

    #[test]
    fn test_bitwise_twos_complement() {
        assert_eq!(!&int(5), int(-6));
        assert_eq!(&int(-1) & &int(12), int(12));
        assert_eq!(&int(6) | &int(9), int(15));
        assert_eq!(&int(6) ^ &int(3), int(5));
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let from_number: Integer = serde_json::from_str("42").unwrap();
        let from_text: Integer = serde_json::from_str("\"-123456789012345678901234\"").unwrap();
        assert_eq!(from_number, int(42));
        assert_eq!(from_text.to_string(), "-123456789012345678901234");
        assert_eq!(serde_json::to_string(&int(-3)).unwrap(), "\"-3\"");
    }
}
