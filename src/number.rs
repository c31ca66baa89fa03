//! Arbitrary-precision decimal numbers as supplied by the host.
//!
//! Host configuration languages carry numbers with more precision than
//! `i64` or `f64` can hold. A [`Decimal`] keeps the exact value as a
//! [`BigInt`] mantissa scaled by a power of ten, and offers the exact
//! narrowing conversions the normalizer needs.
//!
//! ```rust
//! use helm_values::Decimal;
//!
//! let small: Decimal = "80".parse().unwrap();
//! assert_eq!(small.to_i64(), Some(80));
//!
//! let half: Decimal = "0.5".parse().unwrap();
//! assert_eq!(half.to_i64(), None);
//! assert_eq!(half.to_f64_exact(), Some(0.5));
//!
//! // 0.1 has no exact binary representation
//! let tenth: Decimal = "0.1".parse().unwrap();
//! assert_eq!(tenth.to_f64_exact(), None);
//! assert_eq!(tenth.to_string(), "0.1");
//! ```

use crate::{Error, Result};
use num_bigint::{BigInt, Sign};
use std::fmt;
use std::str::FromStr;

/// Largest number of zeros written out before switching to exponent notation.
const PLAIN_EXPONENT_LIMIT: i64 = 21;
const PLAIN_LEADING_ZEROS_LIMIT: i64 = 6;

/// An exact decimal number: `mantissa * 10^exponent`.
///
/// Values are kept normalized (no trailing zeros in the mantissa, zero has
/// exponent 0), so structural equality is numeric equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: BigInt,
    exponent: i64,
}

impl Decimal {
    #[must_use]
    pub fn new(mantissa: BigInt, exponent: i64) -> Self {
        if mantissa.sign() == Sign::NoSign {
            return Decimal {
                mantissa,
                exponent: 0,
            };
        }

        let ten = BigInt::from(10u8);
        let mut mantissa = mantissa;
        let mut exponent = exponent;
        while (&mantissa % &ten).sign() == Sign::NoSign {
            mantissa = &mantissa / &ten;
            exponent = exponent.saturating_add(1);
        }
        Decimal { mantissa, exponent }
    }

    #[must_use]
    pub fn zero() -> Self {
        Decimal {
            mantissa: BigInt::from(0u8),
            exponent: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    #[inline]
    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Returns `true` if the value has no fractional part.
    #[inline]
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.exponent >= 0
    }

    /// Converts to `i64` if the value is integral and in range.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        // a non-zero mantissa scaled by 10^19 is already out of range
        if self.exponent < 0 || self.exponent > 18 {
            return None;
        }
        let scaled = &self.mantissa * BigInt::from(10u8).pow(self.exponent as u32);
        i64::try_from(&scaled).ok()
    }

    /// Converts to `f64` only if the conversion is exact.
    ///
    /// A decimal is exactly representable when it is a dyadic rational whose
    /// significant bits fit the 53-bit mantissa and whose binary exponent is
    /// within the `f64` range (subnormals included).
    #[must_use]
    pub fn to_f64_exact(&self) -> Option<f64> {
        if self.mantissa.sign() == Sign::NoSign {
            return Some(0.0);
        }

        let (odd_part, binary_exponent) = if self.exponent >= 0 {
            if self.exponent > 309 {
                return None;
            }
            let scaled = &self.mantissa * BigInt::from(10u8).pow(self.exponent as u32);
            (scaled, 0i64)
        } else {
            let k = self.exponent.unsigned_abs();
            if k > 1100 {
                return None;
            }
            // mantissa / 10^k == (mantissa / 5^k) / 2^k, exact only if 5^k divides
            let five_k = BigInt::from(5u8).pow(k as u32);
            if (&self.mantissa % &five_k).sign() != Sign::NoSign {
                return None;
            }
            (&self.mantissa / &five_k, -(k as i64))
        };

        let magnitude = odd_part.magnitude();
        let bits = magnitude.bits();
        let trailing = magnitude.trailing_zeros().unwrap_or(0);
        if bits - trailing > 53 {
            return None;
        }
        let highest = bits as i64 - 1 + binary_exponent;
        let lowest = trailing as i64 + binary_exponent;
        if highest > 1023 || lowest < -1074 {
            return None;
        }

        format!("{}e{}", self.mantissa, self.exponent)
            .parse::<f64>()
            .ok()
    }

    /// Nearest `f64`, saturating to infinity. Used for ordering only.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        format!("{}e{}", self.mantissa, self.exponent)
            .parse::<f64>()
            .unwrap_or(f64::NAN)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Parses `[-+]digits[.digits][(e|E)[-+]digits]`; either side of the
    /// decimal point may be empty, but not both.
    fn from_str(s: &str) -> Result<Self> {
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (number, exponent_text) = match rest.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        let (integer_part, fraction_part) = match number.find('.') {
            Some(i) => (&number[..i], &number[i + 1..]),
            None => (number, ""),
        };

        if integer_part.is_empty() && fraction_part.is_empty() {
            return Err(Error::invalid_number(format!("no digits in {:?}", s)));
        }
        if !integer_part.bytes().all(|b| b.is_ascii_digit())
            || !fraction_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::invalid_number(format!("malformed number {:?}", s)));
        }

        let exponent = match exponent_text {
            Some(text) => text
                .parse::<i64>()
                .map_err(|_| Error::invalid_number(format!("malformed exponent in {:?}", s)))?,
            None => 0,
        };
        let exponent = exponent
            .checked_sub(fraction_part.len() as i64)
            .ok_or_else(|| Error::invalid_number(format!("exponent out of range in {:?}", s)))?;

        let digits = format!("{}{}", integer_part, fraction_part);
        let mut mantissa = digits
            .parse::<BigInt>()
            .map_err(Error::invalid_number)?;
        if negative {
            mantissa = -mantissa;
        }

        Ok(Decimal::new(mantissa, exponent))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mantissa.sign() == Sign::Minus {
            f.write_str("-")?;
        }
        let digits = self.mantissa.magnitude().to_string();
        let len = digits.len() as i128;
        let exponent = i128::from(self.exponent);

        if (0..=PLAIN_EXPONENT_LIMIT).contains(&self.exponent) {
            f.write_str(&digits)?;
            return f.write_str(&"0".repeat(self.exponent as usize));
        }

        if exponent < 0 {
            let scale = -exponent;
            if scale < len {
                let split = (len - scale) as usize;
                return write!(f, "{}.{}", &digits[..split], &digits[split..]);
            }
            if scale - len <= i128::from(PLAIN_LEADING_ZEROS_LIMIT) {
                let zeros = "0".repeat((scale - len) as usize);
                return write!(f, "0.{}{}", zeros, digits);
            }
        }

        let adjusted = exponent + len - 1;
        f.write_str(&digits[..1])?;
        if len > 1 {
            write!(f, ".{}", &digits[1..])?;
        }
        if adjusted < 0 {
            write!(f, "e-{}", adjusted.unsigned_abs())
        } else {
            write!(f, "e+{}", adjusted)
        }
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::new(value, 0)
    }
}

impl TryFrom<f64> for Decimal {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::invalid_number(format!("{} is not finite", value)));
        }
        // `{:e}` prints the shortest digits that round-trip
        format!("{:e}", value).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_normalizes_trailing_zeros() {
        let d = dec("1500");
        assert_eq!(d.mantissa(), &BigInt::from(15));
        assert_eq!(d.exponent(), 2);
        assert_eq!(dec("1.50"), dec("15e-1"));
        assert_eq!(dec("0.000"), Decimal::zero());
        assert_eq!(dec("-0"), Decimal::zero());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<Decimal>().is_err());
        assert!(".".parse::<Decimal>().is_err());
        assert!("1e".parse::<Decimal>().is_err());
        assert!("1.2.3".parse::<Decimal>().is_err());
        assert!("0x10".parse::<Decimal>().is_err());
        assert!(" 1".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_to_i64() {
        assert_eq!(dec("3").to_i64(), Some(3));
        assert_eq!(dec("-42").to_i64(), Some(-42));
        assert_eq!(dec("3.0").to_i64(), Some(3));
        assert_eq!(dec("1e3").to_i64(), Some(1000));
        assert_eq!(dec("9223372036854775807").to_i64(), Some(i64::MAX));
        assert_eq!(dec("-9223372036854775808").to_i64(), Some(i64::MIN));
        assert_eq!(dec("9223372036854775808").to_i64(), None);
        assert_eq!(dec("1e19").to_i64(), None);
        assert_eq!(dec("2.5").to_i64(), None);
    }

    #[test]
    fn test_to_f64_exact() {
        assert_eq!(dec("2.5").to_f64_exact(), Some(2.5));
        assert_eq!(dec("-0.125").to_f64_exact(), Some(-0.125));
        assert_eq!(dec("1180591620717411303424").to_f64_exact(), Some(2f64.powi(70)));
        assert_eq!(dec("0.1").to_f64_exact(), None);
        assert_eq!(dec("9007199254740993").to_f64_exact(), None);
        assert_eq!(dec("1e400").to_f64_exact(), None);
        assert_eq!(dec("1e-400").to_f64_exact(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(dec("0").to_string(), "0");
        assert_eq!(dec("1500").to_string(), "1500");
        assert_eq!(dec("-12.34").to_string(), "-12.34");
        assert_eq!(dec("0.001").to_string(), "0.001");
        assert_eq!(dec("1e30").to_string(), "1e+30");
        assert_eq!(dec("1.25e-20").to_string(), "1.25e-20");
        assert_eq!(
            dec("123456789012345678901234567890").to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Decimal::try_from(0.5).unwrap(), dec("0.5"));
        assert_eq!(Decimal::try_from(-3.0).unwrap(), dec("-3"));
        assert_eq!(Decimal::try_from(0.1).unwrap(), dec("0.1"));
        assert!(Decimal::try_from(f64::NAN).is_err());
        assert!(Decimal::try_from(f64::INFINITY).is_err());
    }
}
