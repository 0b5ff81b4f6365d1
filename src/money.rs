// src/money.rs

//! Fixed-point money handling for cart and checkout totals.
//!
//! The items API stores prices as decimals and returns them either as JSON
//! strings ("10.00") or bare numbers. Everything here is carried as integer
//! cents so that `price * quantity` sums never go through binary floats for
//! the string form.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// An amount of money in integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cents(pub i64);

impl Cents {
  pub const ZERO: Cents = Cents(0);

  /// Parses a decimal string such as "10", "10.5" or "10.00" into cents.
  ///
  /// At most two fractional digits are accepted; the items API stores
  /// prices as `decimal(10,2)`.
  pub fn from_decimal_str(s: &str) -> Result<Self, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
      return Err("empty amount".to_string());
    }
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, trimmed),
    };
    let (whole_part, frac_part) = match unsigned.split_once('.') {
      Some((w, f)) => (w, f),
      None => (unsigned, ""),
    };
    if whole_part.is_empty() && frac_part.is_empty() {
      return Err(format!("malformed amount '{}'", s));
    }
    if frac_part.len() > 2 {
      return Err(format!("too many fractional digits in '{}'", s));
    }
    let whole: i64 = if whole_part.is_empty() {
      0
    } else {
      whole_part
        .parse()
        .map_err(|_| format!("malformed amount '{}'", s))?
    };
    let frac: i64 = if frac_part.is_empty() {
      0
    } else {
      let padded = format!("{:0<2}", frac_part);
      padded
        .parse()
        .map_err(|_| format!("malformed amount '{}'", s))?
    };
    let cents = whole
      .checked_mul(100)
      .and_then(|w| w.checked_add(frac))
      .ok_or_else(|| format!("amount '{}' out of range", s))?;
    Ok(Cents(if negative { -cents } else { cents }))
  }

  /// Multiplies a unit price by a line quantity, saturating on overflow.
  pub fn times(self, quantity: i64) -> Cents {
    Cents(self.0.saturating_mul(quantity))
  }

  /// Renders the amount as a two-decimal string, e.g. "35.00".
  pub fn to_decimal_string(self) -> String {
    let sign = if self.0 < 0 { "-" } else { "" };
    let abs = self.0.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
  }
}

impl fmt::Display for Cents {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_decimal_string())
  }
}

impl Add for Cents {
  type Output = Cents;

  fn add(self, rhs: Cents) -> Cents {
    Cents(self.0.saturating_add(rhs.0))
  }
}

impl Sum for Cents {
  fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
    iter.fold(Cents::ZERO, Add::add)
  }
}

impl Serialize for Cents {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_decimal_string())
  }
}

// The items API is not consistent about decimal encoding, so accept both
// string and number forms when deserializing.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
  Text(String),
  Number(f64),
}

impl<'de> Deserialize<'de> for Cents {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    match RawAmount::deserialize(deserializer)? {
      RawAmount::Text(s) => Cents::from_decimal_str(&s).map_err(de::Error::custom),
      RawAmount::Number(n) => {
        if !n.is_finite() {
          return Err(de::Error::custom("non-finite amount"));
        }
        Ok(Cents((n * 100.0).round() as i64))
      }
    }
  }
}
