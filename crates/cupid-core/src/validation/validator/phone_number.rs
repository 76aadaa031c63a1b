use super::Validator;
use crate::phone::{PhoneNumberError, PhoneValidator};

/// A validator for a phone number of the specific country.
#[derive(Debug, Clone, Copy)]
pub struct PhoneNumberValidator<'a> {
    /// ISO country code.
    country_code: &'a str,
    /// Dialing rules.
    rules: &'a PhoneValidator,
}

impl<'a> PhoneNumberValidator<'a> {
    /// Creates a new instance with the built-in rules.
    #[inline]
    pub fn new(country_code: &'a str) -> Self {
        Self {
            country_code,
            rules: PhoneValidator::shared(),
        }
    }

    /// Creates a new instance with the supplied rules.
    #[inline]
    pub fn with_rules(country_code: &'a str, rules: &'a PhoneValidator) -> Self {
        Self {
            country_code,
            rules,
        }
    }

    /// Validates the data and returns the number in the international form.
    #[inline]
    pub fn format(&self, data: &str) -> Result<String, PhoneNumberError> {
        self.rules.check(data, self.country_code)
    }
}

impl Validator<str> for PhoneNumberValidator<'_> {
    type Error = PhoneNumberError;

    #[inline]
    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        self.format(data).map(|_| ())
    }
}
