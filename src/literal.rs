//! Literal grammar for default values.
//!
//! Numeric shapes are recognised with nom; calendar values are checked with
//! chrono so that `2024-02-30` is rejected, not just malformed text.

use crate::catalog::TypeCategory;
use crate::schema::DataType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, tuple},
};
use std::borrow::Cow;

/// Function-style defaults every dialect can express in some spelling.
pub const DEFAULT_FUNCTIONS: &[&str] = &[
    "CURRENT_TIMESTAMP",
    "CURRENT_TIMESTAMP()",
    "NOW()",
    "LOCALTIMESTAMP",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "UUID()",
    "GEN_RANDOM_UUID()",
];

fn sign(input: &str) -> IResult<&str, Option<char>> {
    opt(one_of("+-"))(input)
}

fn integer(input: &str) -> IResult<&str, &str> {
    recognize(pair(sign, digit1))(input)
}

fn exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((one_of("eE"), sign, digit1)))(input)
}

fn decimal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        sign,
        alt((
            recognize(pair(digit1, opt(pair(char('.'), opt(digit1))))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(exponent),
    )))(input)
}

/// `-12`, `+7`, `0`
pub fn is_integer(s: &str) -> bool {
    all_consuming(integer)(s).is_ok()
}

/// `3.14`, `-0.5`, `.5`, `10`, `1e6`
pub fn is_decimal(s: &str) -> bool {
    all_consuming(decimal)(s).is_ok()
}

/// `007`, `-01.5`: a zero-padded integer part, which reads as a code rather
/// than a number.
pub fn has_leading_zero(s: &str) -> bool {
    let digits = s.trim().trim_start_matches(['+', '-']);
    let mut chars = digits.chars();
    chars.next() == Some('0') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Accepted boolean spellings.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "t" | "yes" | "y" | "on" => Some(true),
        "false" | "0" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

pub fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

pub fn is_time(s: &str) -> bool {
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(s, fmt).is_ok())
}

pub fn is_datetime(s: &str) -> bool {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DateTime::parse_from_rfc3339(s).is_ok()
        || is_date(s)
}

/// Strip one level of single quotes, collapsing doubled quotes inside.
pub fn unquote(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        Some(inner) if inner.contains("''") => Cow::Owned(inner.replace("''", "'")),
        Some(inner) => Cow::Borrowed(inner),
        None => Cow::Borrowed(trimmed),
    }
}

/// Upper-cased function default, if `raw` is one.
pub fn default_function(raw: &str) -> Option<&'static str> {
    let upper = raw.trim().to_ascii_uppercase();
    DEFAULT_FUNCTIONS.iter().copied().find(|f| *f == upper)
}

/// Parenthesised expression defaults are passed through verbatim.
pub fn is_expression(raw: &str) -> bool {
    let raw = raw.trim();
    raw.len() > 2 && raw.starts_with('(') && raw.ends_with(')')
}

/// Whether `raw` is an acceptable default for a column of `data_type`.
pub fn is_valid_default(data_type: DataType, raw: &str) -> bool {
    if raw.trim().eq_ignore_ascii_case("null") || is_expression(raw) {
        return true;
    }
    let value = unquote(raw);
    let value = value.as_ref();
    match data_type.category() {
        TypeCategory::Numeric if data_type.is_integer() => is_integer(value),
        TypeCategory::Numeric => is_decimal(value),
        TypeCategory::Boolean => parse_bool(value).is_some(),
        TypeCategory::Temporal => {
            if default_function(raw).is_some() {
                return true;
            }
            match data_type {
                DataType::Date => is_date(value),
                DataType::Time => is_time(value),
                DataType::Year => value.len() == 4 && is_integer(value),
                DataType::Interval => !value.is_empty(),
                _ => is_datetime(value),
            }
        }
        TypeCategory::String | TypeCategory::Binary | TypeCategory::Other => true,
    }
}
