//! Scalar conversion between text and primitive values.
//!
//! [`ScalarKind::parse`] turns text into a [`ScalarValue`] of the requested
//! kind; `ScalarValue`'s `Display` impl is the inverse. Numbers are written
//! with Rust's default formatting (shortest representation that parses back
//! to the same value), durations with [`duration::format`].

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::complex::{is_infinity_literal, Complex32, Complex64};
use crate::duration;
use crate::error::{Error, Result};
use crate::kind::ScalarKind;

/// A parsed scalar, one variant per [`ScalarKind`].
///
/// `Display` renders every variant. [`ScalarValue::encode`] is the checked
/// form used when writing metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    Int(isize),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    Uint(usize),
    U64(u64),
    F32(f32),
    F64(f64),
    Complex32(Complex32),
    Complex64(Complex64),
    Duration(TimeDelta),
}

impl ScalarValue {
    /// The kind this value was parsed as.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Text(_) => ScalarKind::Text,
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::Int(_) => ScalarKind::Int,
            Self::I64(_) => ScalarKind::I64,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::Uint(_) => ScalarKind::Uint,
            Self::U64(_) => ScalarKind::U64,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::Complex32(_) => ScalarKind::Complex32,
            Self::Complex64(_) => ScalarKind::Complex64,
            Self::Duration(_) => ScalarKind::Duration,
        }
    }

    /// Format the value for storage.
    ///
    /// Durations must fit in a signed 64-bit count of nanoseconds, the range
    /// [`duration::parse`] accepts back. `TimeDelta` reaches further than
    /// that, and those values fail with [`Error::Conversion`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::TimeDelta;
    /// use objmeta::ScalarValue;
    ///
    /// let value = ScalarValue::Duration(TimeDelta::minutes(90));
    /// assert_eq!(value.encode().unwrap(), "1h30m0s");
    ///
    /// assert!(ScalarValue::Duration(TimeDelta::days(200_000)).encode().is_err());
    /// ```
    pub fn encode(&self) -> Result<String> {
        let text = self.to_string();
        match self {
            Self::Duration(delta) if delta.num_nanoseconds().is_none() => {
                Err(Error::Conversion {
                    kind: ScalarKind::Duration,
                    value: text,
                })
            },
            _ => Ok(text),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => f.write_str(v),
            Self::Bool(v) => v.fmt(f),
            Self::I8(v) => v.fmt(f),
            Self::I16(v) => v.fmt(f),
            Self::I32(v) => v.fmt(f),
            Self::Int(v) => v.fmt(f),
            Self::I64(v) => v.fmt(f),
            Self::U8(v) => v.fmt(f),
            Self::U16(v) => v.fmt(f),
            Self::U32(v) => v.fmt(f),
            Self::Uint(v) => v.fmt(f),
            Self::U64(v) => v.fmt(f),
            Self::F32(v) => v.fmt(f),
            Self::F64(v) => v.fmt(f),
            Self::Complex32(v) => v.fmt(f),
            Self::Complex64(v) => v.fmt(f),
            Self::Duration(v) => f.write_str(&duration::format(*v)),
        }
    }
}

impl ScalarKind {
    /// Parse `text` as a value of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use objmeta::{ScalarKind, ScalarValue};
    ///
    /// assert_eq!(ScalarKind::U8.parse("200").unwrap(), ScalarValue::U8(200));
    /// assert!(ScalarKind::U8.parse("300").is_err());
    /// assert_eq!(ScalarKind::Bool.parse("T").unwrap(), ScalarValue::Bool(true));
    /// ```
    pub fn parse(self, text: &str) -> Result<ScalarValue> {
        let fail = || Error::conversion(self, text);

        let value = match self {
            Self::Text => ScalarValue::Text(text.to_string()),
            Self::Bool => ScalarValue::Bool(parse_bool(text).ok_or_else(fail)?),
            Self::I8 => ScalarValue::I8(text.parse().map_err(|_| fail())?),
            Self::I16 => ScalarValue::I16(text.parse().map_err(|_| fail())?),
            Self::I32 => ScalarValue::I32(text.parse().map_err(|_| fail())?),
            Self::Int => {
                let value: i32 = text.parse().map_err(|_| fail())?;
                ScalarValue::Int(value as isize)
            },
            Self::I64 => ScalarValue::I64(text.parse().map_err(|_| fail())?),
            Self::U8 => ScalarValue::U8(parse_unsigned(text).ok_or_else(fail)?),
            Self::U16 => ScalarValue::U16(parse_unsigned(text).ok_or_else(fail)?),
            Self::U32 => ScalarValue::U32(parse_unsigned(text).ok_or_else(fail)?),
            Self::Uint => {
                let value: u32 = parse_unsigned(text).ok_or_else(fail)?;
                ScalarValue::Uint(value as usize)
            },
            Self::U64 => ScalarValue::U64(parse_unsigned(text).ok_or_else(fail)?),
            Self::F32 => ScalarValue::F32(parse_float(text).ok_or_else(fail)?),
            Self::F64 => ScalarValue::F64(parse_float(text).ok_or_else(fail)?),
            Self::Complex32 => ScalarValue::Complex32(text.parse().map_err(|_| fail())?),
            Self::Complex64 => ScalarValue::Complex64(text.parse().map_err(|_| fail())?),
            Self::Duration => ScalarValue::Duration(duration::parse(text).map_err(|_| fail())?),
        };

        Ok(value)
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Base-10 unsigned parse. Unlike `u64::from_str`, a leading `+` is rejected.
fn parse_unsigned<T: FromStr>(text: &str) -> Option<T> {
    if text.starts_with('+') {
        return None;
    }
    text.parse().ok()
}

/// Float parse that treats overflow to infinity as an error.
fn parse_float<T>(text: &str) -> Option<T>
where
    T: FromStr + crate::complex::Float,
{
    let value: T = text.parse().ok()?;
    if value.is_infinite() && !is_infinity_literal(text) {
        return None;
    }
    Some(value)
}

/// Rust types that convert through a single [`ScalarValue`] variant.
pub trait Scalar: Sized {
    const KIND: ScalarKind;

    /// Extract the value if `value` is of this type's variant.
    fn from_scalar(value: ScalarValue) -> Option<Self>;

    fn to_scalar(&self) -> ScalarValue;

    /// Parse text directly into this type.
    fn parse_scalar(text: &str) -> Result<Self> {
        Self::from_scalar(Self::KIND.parse(text)?).ok_or_else(|| Error::conversion(Self::KIND, text))
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::$variant;

                fn from_scalar(value: ScalarValue) -> Option<Self> {
                    match value {
                        ScalarValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn to_scalar(&self) -> ScalarValue {
                    ScalarValue::$variant(Clone::clone(self))
                }
            }
        )*
    };
}

impl_scalar! {
    String => Text,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    isize => Int,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    usize => Uint,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Complex32 => Complex32,
    Complex64 => Complex64,
    TimeDelta => Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(ScalarKind::Text, "hello, world", ScalarValue::Text("hello, world".to_string()))]
    #[case(ScalarKind::Text, "", ScalarValue::Text(String::new()))]
    #[case(ScalarKind::Bool, "true", ScalarValue::Bool(true))]
    #[case(ScalarKind::Bool, "1", ScalarValue::Bool(true))]
    #[case(ScalarKind::Bool, "False", ScalarValue::Bool(false))]
    #[case(ScalarKind::Bool, "f", ScalarValue::Bool(false))]
    #[case(ScalarKind::I8, "-128", ScalarValue::I8(-128))]
    #[case(ScalarKind::I16, "+32767", ScalarValue::I16(32767))]
    #[case(ScalarKind::I32, "-42", ScalarValue::I32(-42))]
    #[case(ScalarKind::Int, "2147483647", ScalarValue::Int(2_147_483_647))]
    #[case(ScalarKind::I64, "-9223372036854775808", ScalarValue::I64(i64::MIN))]
    #[case(ScalarKind::U8, "255", ScalarValue::U8(255))]
    #[case(ScalarKind::U16, "65535", ScalarValue::U16(65535))]
    #[case(ScalarKind::U32, "30", ScalarValue::U32(30))]
    #[case(ScalarKind::Uint, "4294967295", ScalarValue::Uint(4_294_967_295))]
    #[case(ScalarKind::U64, "18446744073709551615", ScalarValue::U64(u64::MAX))]
    #[case(ScalarKind::F32, "1.5", ScalarValue::F32(1.5))]
    #[case(ScalarKind::F64, "-2.5e-3", ScalarValue::F64(-0.0025))]
    #[case(ScalarKind::F64, "inf", ScalarValue::F64(f64::INFINITY))]
    #[case(ScalarKind::Complex64, "1+2i", ScalarValue::Complex64(Complex64::new(1.0, 2.0)))]
    #[case(ScalarKind::Complex32, "(0.5-1i)", ScalarValue::Complex32(Complex32::new(0.5, -1.0)))]
    #[case(ScalarKind::Duration, "1h30m", ScalarValue::Duration(TimeDelta::minutes(90)))]
    fn parses_each_kind(#[case] kind: ScalarKind, #[case] text: &str, #[case] expected: ScalarValue) {
        let value = kind.parse(text).unwrap();
        assert_eq!(value.kind(), kind);
        assert_eq!(value, expected);
    }

    #[rstest]
    #[case(ScalarKind::Bool, "yes")]
    #[case(ScalarKind::Bool, "")]
    #[case(ScalarKind::I8, "128")]
    #[case(ScalarKind::I16, "-32769")]
    #[case(ScalarKind::I32, "abc")]
    #[case(ScalarKind::I32, "1.0")]
    #[case(ScalarKind::Int, "2147483648")]
    #[case(ScalarKind::I64, "")]
    #[case(ScalarKind::U8, "256")]
    #[case(ScalarKind::U8, "-1")]
    #[case(ScalarKind::U16, "+1")]
    #[case(ScalarKind::Uint, "4294967296")]
    #[case(ScalarKind::U64, "18446744073709551616")]
    #[case(ScalarKind::F32, "1e39")]
    #[case(ScalarKind::F64, "1e400")]
    #[case(ScalarKind::F64, "1,5")]
    #[case(ScalarKind::Complex64, "1+2j")]
    #[case(ScalarKind::Duration, "90")]
    fn rejects_malformed(#[case] kind: ScalarKind, #[case] text: &str) {
        let err = kind.parse(text).unwrap_err();
        assert_eq!(err, Error::conversion(kind, text));
    }

    #[test]
    fn formats_with_default_representation() {
        assert_eq!(ScalarValue::I32(-7).to_string(), "-7");
        assert_eq!(ScalarValue::Bool(true).to_string(), "true");
        assert_eq!(ScalarValue::F64(0.1).to_string(), "0.1");
        assert_eq!(ScalarValue::F32(1.0).to_string(), "1");
        assert_eq!(ScalarValue::Duration(TimeDelta::seconds(90)).to_string(), "1m30s");
        assert_eq!(ScalarValue::Complex64(Complex64::new(1.0, -1.0)).to_string(), "1-1i");
    }

    #[test]
    fn formatted_floats_parse_back_exactly() {
        for value in [0.1f64, 1.0 / 3.0, 1e-300, 123_456_789.123, f64::MAX, -0.0] {
            let text = ScalarValue::F64(value).to_string();
            assert_eq!(ScalarKind::F64.parse(&text).unwrap(), ScalarValue::F64(value));
        }
        for value in [0.1f32, 1.0 / 3.0, f32::MIN_POSITIVE, f32::MAX] {
            let text = ScalarValue::F32(value).to_string();
            assert_eq!(ScalarKind::F32.parse(&text).unwrap(), ScalarValue::F32(value));
        }
    }

    #[test]
    fn encode_checks_duration_range() {
        let longest = TimeDelta::nanoseconds(i64::MAX);
        assert_eq!(
            ScalarValue::Duration(longest).encode().unwrap(),
            "2562047h47m16.854775807s"
        );
        let shortest = TimeDelta::nanoseconds(i64::MIN);
        assert_eq!(
            ScalarValue::Duration(shortest).encode().unwrap(),
            "-2562047h47m16.854775808s"
        );

        let err = ScalarValue::Duration(TimeDelta::days(200_000))
            .encode()
            .unwrap_err();
        assert_eq!(
            err,
            Error::Conversion {
                kind: ScalarKind::Duration,
                value: "4800000h0m0s".to_string(),
            }
        );
        assert!(ScalarValue::Duration(-TimeDelta::days(200_000))
            .encode()
            .is_err());
    }

    #[test]
    fn encode_matches_display_for_other_kinds() {
        for value in [
            ScalarValue::Text("a,b".to_string()),
            ScalarValue::U64(u64::MAX),
            ScalarValue::F64(-0.5),
        ] {
            assert_eq!(value.encode().unwrap(), value.to_string());
        }
    }

    #[test]
    fn typed_scalars() {
        assert_eq!(u16::parse_scalar("8080").unwrap(), 8080);
        assert_eq!(String::parse_scalar("x").unwrap(), "x");
        assert!(i8::parse_scalar("1000").is_err());
        assert_eq!(3i64.to_scalar(), ScalarValue::I64(3));
        assert_eq!(isize::KIND, ScalarKind::Int);
        assert_eq!(bool::from_scalar(ScalarValue::I8(1)), None);
    }
}
