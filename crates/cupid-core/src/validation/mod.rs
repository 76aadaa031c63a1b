//! Generic validator and the validation record of a form.
use crate::{Map, SharedString, error::Error, extension::JsonObjectExt, phone::PhoneValidator};
use smallvec::SmallVec;
use std::fmt;

mod validator;

pub use validator::{PhoneNumberValidator, RequiredValidator, Validator};

/// A record of validation results.
#[derive(Debug, Default)]
pub struct Validation {
    failed_entries: SmallVec<[(SharedString, Error); 4]>,
}

impl Validation {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            failed_entries: SmallVec::new(),
        }
    }

    /// Creates a new instance with the entry.
    #[inline]
    pub fn from_entry(key: impl Into<SharedString>, err: impl Into<Error>) -> Self {
        let mut entries = SmallVec::new();
        entries.push((key.into(), err.into()));
        Self {
            failed_entries: entries,
        }
    }

    /// Records an entry with the supplied message.
    #[inline]
    pub fn record(&mut self, key: impl Into<SharedString>, message: impl Into<SharedString>) {
        self.failed_entries.push((key.into(), Error::new(message)));
    }

    /// Records an entry for the error.
    #[inline]
    pub fn record_fail(&mut self, key: impl Into<SharedString>, err: impl Into<Error>) {
        self.failed_entries.push((key.into(), err.into()));
    }

    /// Validates the phone number with the built-in rules and returns it in the
    /// international form. The failure is recorded for the key.
    pub fn validate_phone_number(
        &mut self,
        key: impl Into<SharedString>,
        value: &str,
        country_code: &str,
    ) -> Option<String> {
        self.validate_phone_number_with(key, value, country_code, PhoneValidator::shared())
    }

    /// Validates the phone number with the supplied rules.
    pub fn validate_phone_number_with(
        &mut self,
        key: impl Into<SharedString>,
        value: &str,
        country_code: &str,
        rules: &PhoneValidator,
    ) -> Option<String> {
        PhoneNumberValidator::with_rules(country_code, rules)
            .format(value)
            .inspect_err(|err| tracing::debug!(country_code, "rejected phone number: {err}"))
            .map_err(|err| self.record_fail(key, err))
            .ok()
    }

    /// Validates that the value is not blank.
    pub fn validate_required(&mut self, key: impl Into<SharedString>, value: Option<&str>) {
        if let Err(err) = RequiredValidator.validate(value.unwrap_or_default()) {
            self.record_fail(key, err);
        }
    }

    /// Returns true if the validation contains a value for the specified key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.failed_entries.iter().any(|(field, _)| field == key)
    }

    /// Returns the first error message recorded for the key.
    #[inline]
    pub fn message(&self, key: &str) -> Option<&str> {
        self.failed_entries
            .iter()
            .find(|(field, _)| field == key)
            .map(|(_, err)| err.message())
    }

    /// Returns `true` if the validation is success.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failed_entries.is_empty()
    }

    /// Returns a list of invalid params.
    #[inline]
    pub fn invalid_params(&self) -> Vec<&str> {
        self.failed_entries
            .iter()
            .map(|entry| entry.0.as_ref())
            .collect()
    }

    /// Consumes the validation and returns as a json object.
    #[must_use]
    pub fn into_map(self) -> Map {
        let mut map = Map::new();
        for (key, err) in self.failed_entries {
            let message = err.message();
            tracing::warn!("invalid value for `{key}`: {message}");
            map.upsert(key, message);
        }
        map
    }
}

impl fmt::Display for Validation {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let failed_entries = &self.failed_entries;
        let mut errors = Vec::with_capacity(failed_entries.len());
        for (key, err) in failed_entries {
            let message = format!("invalid value for `{key}`: {}", err.message());
            errors.push(message);
        }
        write!(f, "{}", errors.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::{PhoneNumberValidator, RequiredValidator, Validation, Validator};
    use crate::{Map, extension::JsonObjectExt, phone::PhoneNumberError};

    #[test]
    fn it_validates_with_validators() {
        assert!(PhoneNumberValidator::new("KE").validate("0712345678").is_ok());
        assert_eq!(
            PhoneNumberValidator::new("ZZ").validate("0712345678"),
            Err(PhoneNumberError::UnsupportedCountry)
        );
        assert!(RequiredValidator.validate("Alice").is_ok());
        assert!(RequiredValidator.validate(" \t ").is_err());
    }

    #[test]
    fn it_records_failed_entries() {
        let mut validation = Validation::new();
        let phone_number = validation.validate_phone_number("phone_number", "0712 345 678", "KE");
        assert_eq!(phone_number.as_deref(), Some("+254712345678"));
        validation.validate_required("sender_name", Some("Bob"));
        assert!(validation.is_success());

        assert_eq!(
            validation.validate_phone_number("phone_number", "12345", "KE"),
            None
        );
        validation.validate_required("recipient_name", None);
        validation.record("relationship", "please pick a relationship");
        assert!(!validation.is_success());
        assert!(validation.contains_key("phone_number"));
        assert!(!validation.contains_key("sender_name"));
        assert_eq!(
            validation.message("phone_number"),
            Some("Invalid phone number for KE")
        );
        assert_eq!(
            validation.invalid_params(),
            ["phone_number", "recipient_name", "relationship"]
        );
        assert_eq!(
            validation.to_string(),
            "invalid value for `phone_number`: Invalid phone number for KE,\
             invalid value for `recipient_name`: the value should not be blank,\
             invalid value for `relationship`: please pick a relationship"
        );

        let map = validation.into_map();
        let mut expected = Map::from_entry("phone_number", "Invalid phone number for KE");
        expected.upsert("recipient_name", "the value should not be blank");
        expected.upsert("relationship", "please pick a relationship");
        assert_eq!(map, expected);
    }

    #[test]
    fn it_creates_from_entry() {
        let validation = Validation::from_entry("phone_country", PhoneNumberError::UnsupportedCountry);
        assert_eq!(validation.message("phone_country"), Some("Unsupported country code"));
    }
}
