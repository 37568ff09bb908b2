//! Type inference for raw value tokens.
//!
//! The classifier is a single-pass heuristic over the token's characters, not
//! a number grammar. It decides which namespace a token belongs in; whether
//! the text really is a number is only settled by [`convert`].

use thiserror::Error;

use crate::dict::{Kind, Value};

/// Why a token classified as numeric could not be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericFailure {
    #[error("not a valid number")]
    Invalid,
    #[error("out of range")]
    OutOfRange,
}

#[derive(Debug, Default)]
struct Flags {
    numeric: bool,
    fraction: bool,
    exponent: bool,
    string: bool,
}

/// Classifies `token` as integer, float or string.
///
/// Returns `None` when nothing in the token marks it as any kind, which
/// happens for an empty token or one made only of `+` signs and spaces.
///
/// - a digit or `-` marks the token numeric
/// - `.` marks it fractional; a `.` after the token is already fractional makes it a string
/// - the first `e`/`E` marks it fractional and exponential; a second makes it a string
/// - any other character except `+` makes it a string
pub fn classify(token: &str) -> Option<Kind> {
    let mut flags = Flags::default();

    for c in token.chars() {
        match c {
            ' ' | '+' => {}
            '0'..='9' | '-' => flags.numeric = true,
            '.' if flags.fraction => {
                flags.string = true;
                break;
            }
            '.' => flags.fraction = true,
            'e' | 'E' if flags.exponent => {
                flags.string = true;
                break;
            }
            'e' | 'E' => {
                flags.fraction = true;
                flags.exponent = true;
            }
            _ => {
                flags.string = true;
                break;
            }
        }
    }

    if flags.string {
        Some(Kind::Str)
    } else if flags.fraction {
        Some(Kind::Float)
    } else if flags.numeric {
        Some(Kind::Int)
    } else {
        None
    }
}

/// Parses `token` into a value of `kind`.
///
/// The whole token must parse. A numeric prefix followed by junk, as in
/// `1-2`, `5-` or `1.2e`, is [`NumericFailure::Invalid`]; the prefix (`1`,
/// `5`, `1.2`) is never stored on its own. Floats that overflow to infinity or underflow to zero are [`NumericFailure::OutOfRange`].
pub fn convert(token: &str, kind: Kind) -> Result<Value, NumericFailure> {
    match kind {
        Kind::Str => Ok(Value::Str(token.to_string())),
        Kind::Int => token.parse::<i64>().map(Value::Int).map_err(|e| {
            use std::num::IntErrorKind;
            match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumericFailure::OutOfRange,
                _ => NumericFailure::Invalid,
            }
        }),
        Kind::Float => {
            let value = token.parse::<f64>().map_err(|_| NumericFailure::Invalid)?;
            if !value.is_finite() || (value == 0.0 && has_nonzero_mantissa(token)) {
                Err(NumericFailure::OutOfRange)
            } else {
                Ok(Value::Float(value))
            }
        }
    }
}

/// True if any digit before the exponent marker is nonzero.
fn has_nonzero_mantissa(token: &str) -> bool {
    token
        .chars()
        .take_while(|c| !matches!(c, 'e' | 'E'))
        .any(|c| matches!(c, '1'..='9'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        for token in ["0", "42", "-17", "+5", "007"] {
            assert_eq!(classify(token), Some(Kind::Int), "{token}");
        }
    }

    #[test]
    fn test_floats() {
        for token in ["3.14", "-0.5", "200.", ".25", "1e5", "1.5E-3", "-2e+10"] {
            assert_eq!(classify(token), Some(Kind::Float), "{token}");
        }
    }

    #[test]
    fn test_strings() {
        for token in ["hello", "HLLE", "1.2.3", "1e5e5", "1.5e3.2", "v1", "inf", "0x10", "3,5"] {
            assert_eq!(classify(token), Some(Kind::Str), "{token}");
        }
    }

    #[test]
    fn test_degenerate_tokens_still_classify_numeric() {
        assert_eq!(classify("-"), Some(Kind::Int));
        assert_eq!(classify("."), Some(Kind::Float));
        assert_eq!(classify("e"), Some(Kind::Float));
    }

    #[test]
    fn test_nothing_to_classify() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("+"), None);
    }

    #[test]
    fn test_convert_values() {
        assert_eq!(convert("42", Kind::Int), Ok(Value::Int(42)));
        assert_eq!(convert("+5", Kind::Int), Ok(Value::Int(5)));
        assert_eq!(convert("200.", Kind::Float), Ok(Value::Float(200.0)));
        assert_eq!(convert("1e5", Kind::Float), Ok(Value::Float(1e5)));
        assert_eq!(convert("0.0e-400", Kind::Float), Ok(Value::Float(0.0)));
        assert_eq!(convert("-0.000", Kind::Float), Ok(Value::Float(0.0)));
        assert_eq!(convert("abc", Kind::Str), Ok(Value::Str("abc".into())));
    }

    #[test]
    fn test_convert_failures() {
        assert_eq!(convert("-", Kind::Int), Err(NumericFailure::Invalid));
        assert_eq!(convert("1-2", Kind::Int), Err(NumericFailure::Invalid));
        assert_eq!(convert(".", Kind::Float), Err(NumericFailure::Invalid));
        assert_eq!(
            convert("99999999999999999999", Kind::Int),
            Err(NumericFailure::OutOfRange)
        );
        assert_eq!(convert("1e400", Kind::Float), Err(NumericFailure::OutOfRange));
        assert_eq!(convert("1e-400", Kind::Float), Err(NumericFailure::OutOfRange));
        assert_eq!(convert("-2.5e-999", Kind::Float), Err(NumericFailure::OutOfRange));
        assert_eq!(convert("5-", Kind::Int), Err(NumericFailure::Invalid));
        assert_eq!(convert("1.2e", Kind::Float), Err(NumericFailure::Invalid));
    }
}
