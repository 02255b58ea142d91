//! Complex numbers stored as `a+bi` text.

use std::fmt;
use std::str::FromStr;

/// A complex number with `T` components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

/// Complex number with `f32` components.
pub type Complex32 = Complex<f32>;

/// Complex number with `f64` components.
pub type Complex64 = Complex<f64>;

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Error returned when text is not a complex literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseComplexError;

impl fmt::Display for ParseComplexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid complex literal")
    }
}

impl std::error::Error for ParseComplexError {}

impl<T> FromStr for Complex<T>
where
    T: FromStr + From<i8> + Float,
{
    type Err = ParseComplexError;

    /// Accepts `a`, `bi`, `a+bi`, `a-bi`, optionally wrapped in parentheses.
    /// A bare `i` (or `+i`, `-i`) is the unit imaginary.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
            .unwrap_or(text);

        let Some(body) = text.strip_suffix('i') else {
            let re = parse_component(text)?;
            return Ok(Self::new(re, T::from(0i8)));
        };

        // The imaginary part starts at the last sign that isn't an exponent sign.
        let split = body
            .char_indices()
            .rev()
            .find(|&(index, c)| {
                index > 0
                    && (c == '+' || c == '-')
                    && !body[..index].ends_with(['e', 'E'])
            })
            .map(|(index, _)| index);

        let (re, im) = match split {
            Some(index) => (parse_component(&body[..index])?, &body[index..]),
            None => (T::from(0i8), body),
        };

        let im = match im {
            "" | "+" => T::from(1i8),
            "-" => T::from(-1i8),
            im => parse_component(im)?,
        };

        Ok(Self::new(re, im))
    }
}

/// Float component parsing with range checking.
///
/// Rust's float parser saturates to infinity on overflow. A component is
/// only allowed to be infinite when it was written that way.
fn parse_component<T>(text: &str) -> Result<T, ParseComplexError>
where
    T: FromStr + Float,
{
    let value: T = text.parse().map_err(|_| ParseComplexError)?;
    if value.is_infinite() && !is_infinity_literal(text) {
        return Err(ParseComplexError);
    }
    Ok(value)
}

pub(crate) fn is_infinity_literal(text: &str) -> bool {
    text.trim_start_matches(['+', '-'])
        .get(..3)
        .is_some_and(|head| head.eq_ignore_ascii_case("inf"))
}

/// Minimal float capability needed by the parser.
pub trait Float: Copy + fmt::Display {
    fn is_infinite(self) -> bool;
    fn is_nan(self) -> bool;
    fn is_sign_negative(self) -> bool;
}

impl Float for f32 {
    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    fn is_sign_negative(self) -> bool {
        f32::is_sign_negative(self)
    }
}

impl Float for f64 {
    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    fn is_sign_negative(self) -> bool {
        f64::is_sign_negative(self)
    }
}

impl<T: Float> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // NaN displays without a sign even when its sign bit is set.
        let sign = if self.im.is_sign_negative() && !self.im.is_nan() {
            ""
        } else {
            "+"
        };
        write!(f, "{}{}{}i", self.re, sign, self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1+2i", 1.0, 2.0)]
    #[case("1-2i", 1.0, -2.0)]
    #[case("(1+2i)", 1.0, 2.0)]
    #[case("-1.5-0.25i", -1.5, -0.25)]
    #[case("3", 3.0, 0.0)]
    #[case("2i", 0.0, 2.0)]
    #[case("-2i", 0.0, -2.0)]
    #[case("i", 0.0, 1.0)]
    #[case("-i", 0.0, -1.0)]
    #[case("1+i", 1.0, 1.0)]
    #[case("1e3+1e-3i", 1000.0, 0.001)]
    #[case("1e+3-1e+3i", 1000.0, -1000.0)]
    #[case("2E-1+3E+1i", 0.2, 30.0)]
    fn parses_literals(#[case] text: &str, #[case] re: f64, #[case] im: f64) {
        let value: Complex64 = text.parse().unwrap();
        assert_eq!(value, Complex64::new(re, im));
    }

    #[test]
    fn parses_infinities() {
        let value: Complex64 = "inf-infi".parse().unwrap();
        assert_eq!(value.re, f64::INFINITY);
        assert_eq!(value.im, f64::NEG_INFINITY);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1+2")]
    #[case("1+2j")]
    #[case("1++2i")]
    #[case("(1+2i")]
    #[case("1e400")]
    fn rejects_malformed(#[case] text: &str) {
        assert!(text.parse::<Complex64>().is_err(), "{text:?} should not parse");
    }

    #[test]
    fn f32_range_is_checked() {
        assert!("1e39+0i".parse::<Complex32>().is_err());
        assert!("1e38+0i".parse::<Complex32>().is_ok());
    }

    #[test]
    fn display_round_trips() {
        for value in [
            Complex64::new(1.0, 2.0),
            Complex64::new(-0.5, -3.25),
            Complex64::new(0.0, 0.0),
            Complex64::new(1e-7, 1e21),
        ] {
            let text = value.to_string();
            assert_eq!(text.parse::<Complex64>().unwrap(), value, "{text}");
        }
        assert_eq!(Complex64::new(1.0, -2.0).to_string(), "1-2i");
        assert_eq!(Complex32::new(1.5, 2.0).to_string(), "1.5+2i");
    }

    #[test]
    fn nan_imaginary_part_keeps_its_sign() {
        for im in [f64::NAN, -f64::NAN] {
            let text = Complex64::new(1.0, im).to_string();
            assert_eq!(text, "1+NaNi");

            let parsed: Complex64 = text.parse().unwrap();
            assert_eq!(parsed.re, 1.0);
            assert!(parsed.im.is_nan());
        }

        let text = Complex32::new(f32::NAN, -f32::NAN).to_string();
        assert_eq!(text, "NaN+NaNi");
        assert!(text.parse::<Complex32>().is_ok());
    }
}
