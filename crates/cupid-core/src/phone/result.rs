use self::PhoneNumberError::*;
use serde::Serialize;
use std::fmt;

/// An error for the phone number validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The country code has no dialing rules.
    UnsupportedCountry,
    /// No digits are left after normalization.
    InvalidFormat,
    /// The national number does not satisfy the country pattern.
    PatternMismatch(String),
}

impl fmt::Display for PhoneNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedCountry => write!(f, "Unsupported country code"),
            InvalidFormat => write!(f, "Invalid phone number format"),
            PatternMismatch(country) => write!(f, "Invalid phone number for {country}"),
        }
    }
}

impl std::error::Error for PhoneNumberError {}

/// Outcome of validating a phone number.
///
/// Exactly one of `error` and `formatted_number` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the number is valid.
    is_valid: bool,
    /// Message shown next to the field.
    error: Option<String>,
    /// Number in the international form, e.g. `+254712345678`.
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted_number: Option<String>,
    /// Kind of the failure.
    #[serde(skip)]
    kind: Option<PhoneNumberError>,
}

impl ValidationResult {
    /// Creates a result for a valid number.
    #[inline]
    pub fn valid(formatted_number: String) -> Self {
        Self {
            is_valid: true,
            error: None,
            formatted_number: Some(formatted_number),
            kind: None,
        }
    }

    /// Creates a result for a rejected number.
    #[inline]
    pub fn invalid(err: PhoneNumberError) -> Self {
        Self {
            is_valid: false,
            error: Some(err.to_string()),
            formatted_number: None,
            kind: Some(err),
        }
    }

    /// Returns `true` if the number is valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns the error message.
    #[inline]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the kind of the failure.
    #[inline]
    pub fn kind(&self) -> Option<&PhoneNumberError> {
        self.kind.as_ref()
    }

    /// Returns the number in the international form.
    #[inline]
    pub fn formatted_number(&self) -> Option<&str> {
        self.formatted_number.as_deref()
    }

    /// Converts `self` into a `Result`.
    pub fn into_result(self) -> Result<String, PhoneNumberError> {
        match (self.formatted_number, self.kind) {
            (Some(number), None) => Ok(number),
            (_, Some(err)) => Err(err),
            (None, None) => Err(InvalidFormat),
        }
    }
}

impl From<Result<String, PhoneNumberError>> for ValidationResult {
    #[inline]
    fn from(result: Result<String, PhoneNumberError>) -> Self {
        match result {
            Ok(formatted_number) => Self::valid(formatted_number),
            Err(err) => Self::invalid(err),
        }
    }
}
