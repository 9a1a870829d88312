use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Machine-matchable kind of a field-level validation failure.
///
/// The textual form (see [`ValidationCode::as_str`]) is part of the wire
/// format and must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    RequiredMissing,
    OutOfRange,
    PatternMismatch,
    InvalidFormat,
    TooShort,
    TooLong,
    InvalidValue,
    Custom,
}

const VARIANTS: &[&str] = &[
    "required_missing",
    "out_of_range",
    "pattern_mismatch",
    "invalid_format",
    "too_short",
    "too_long",
    "invalid_value",
    "custom",
];

impl ValidationCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequiredMissing => "required_missing",
            Self::OutOfRange => "out_of_range",
            Self::PatternMismatch => "pattern_mismatch",
            Self::InvalidFormat => "invalid_format",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidValue => "invalid_value",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValidationCode(pub String);

impl fmt::Display for InvalidValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown validation code: {}", self.0)
    }
}

impl std::error::Error for InvalidValidationCode {}

impl FromStr for ValidationCode {
    type Err = InvalidValidationCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required_missing" => Ok(Self::RequiredMissing),
            "out_of_range" => Ok(Self::OutOfRange),
            "pattern_mismatch" => Ok(Self::PatternMismatch),
            "invalid_format" => Ok(Self::InvalidFormat),
            "too_short" => Ok(Self::TooShort),
            "too_long" => Ok(Self::TooLong),
            "invalid_value" => Ok(Self::InvalidValue),
            "custom" => Ok(Self::Custom),
            _ => Err(InvalidValidationCode(s.to_string())),
        }
    }
}

impl Serialize for ValidationCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValidationCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValidationCodeVisitor;

        impl Visitor<'_> for ValidationCodeVisitor {
            type Value = ValidationCode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid validation code string")
            }

            fn visit_str<E>(self, value: &str) -> Result<ValidationCode, E>
            where
                E: de::Error,
            {
                value
                    .parse()
                    .map_err(|_| de::Error::unknown_variant(value, VARIANTS))
            }
        }

        deserializer.deserialize_str(ValidationCodeVisitor)
    }
}
