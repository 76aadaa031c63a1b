//! Phone number normalization and validation against per-country dialing rules.
//!
//! A raw number is reduced to its national number by dropping every non-digit,
//! a leading dialing code and one domestic trunk `0`. The national number is
//! then matched against the country pattern, which fixes both the digit count
//! and the allowed leading digits.
//!
//! Only one trunk zero is stripped, so `normalize` is not idempotent:
//!
//! ```rust
//! use cupid_core::phone;
//!
//! let once = phone::normalize("00712345678", "KE");
//! assert_eq!(once.as_deref(), Some("0712345678"));
//!
//! let twice = once.and_then(|number| phone::normalize(&number, "KE"));
//! assert_eq!(twice.as_deref(), Some("712345678"));
//! ```
//!
//! Additional countries can be registered in the config:
//!
//! ```toml
//! [[phone.countries]]
//! code = "RW"
//! dialing-code = "+250"
//! min-length = 9
//! max-length = 9
//! pattern = '^7[2389]\d{7}$'
//! ```

use crate::{LazyLock, error::Error, extension::TomlTableExt};
use toml::Table;

mod country;
mod result;

pub use country::CountryConfig;
pub use result::{PhoneNumberError, ValidationResult};

/// A validator holding the dialing rules of the supported countries.
#[derive(Debug, Clone)]
pub struct PhoneValidator {
    /// Countries in the display order.
    countries: Vec<CountryConfig>,
}

impl PhoneValidator {
    /// Creates a new instance with the built-in rules for
    /// `KE`, `UG`, `TZ`, `US` and `GB`.
    #[inline]
    pub fn new() -> Self {
        Self {
            countries: country::builtin_countries(),
        }
    }

    /// Returns a reference to the shared validator with the built-in rules.
    #[inline]
    pub fn shared() -> &'static Self {
        LazyLock::force(&SHARED_PHONE_VALIDATOR)
    }

    /// Creates a new instance with the built-in rules extended by the
    /// `[[phone.countries]]` entries of the config.
    ///
    /// An entry with the code of an existing country replaces its rules.
    pub fn with_config(config: &Table) -> Result<Self, Error> {
        let mut validator = Self::new();
        let Some(entries) = config
            .get_table("phone")
            .and_then(|phone| phone.get_array("countries"))
        else {
            return Ok(validator);
        };
        for (index, entry) in entries.iter().enumerate() {
            let Some(table) = entry.as_table() else {
                return Err(Error::new(format!(
                    "the phone country entry #{index} should be a table"
                )));
            };
            let country = CountryConfig::from_table(table)
                .map_err(|err| err.wrap(format!("invalid phone country entry #{index}")))?;
            tracing::info!(
                code = country.code(),
                dialing_code = country.dialing_code(),
                "registered phone number rules"
            );
            validator.register(country);
        }
        Ok(validator)
    }

    /// Adds the country rules, replacing any rules with the same code.
    pub fn register(&mut self, country: CountryConfig) {
        if let Some(existing) = self
            .countries
            .iter_mut()
            .find(|config| config.code() == country.code())
        {
            *existing = country;
        } else {
            self.countries.push(country);
        }
    }

    /// Returns the rules for the country code.
    #[inline]
    pub fn country(&self, code: &str) -> Option<&CountryConfig> {
        self.countries.iter().find(|config| config.code() == code)
    }

    /// Returns the rules of all supported countries.
    #[inline]
    pub fn countries(&self) -> &[CountryConfig] {
        &self.countries
    }

    /// Reduces the raw input to the national number,
    /// or returns `None` if the country is not supported.
    #[inline]
    pub fn normalize(&self, raw: &str, country_code: &str) -> Option<String> {
        self.country(country_code)
            .map(|config| config.normalize(raw))
    }

    /// Validates the raw input for the country.
    pub fn validate(&self, raw: &str, country_code: &str) -> ValidationResult {
        self.check(raw, country_code).into()
    }

    /// Validates the raw input and returns the number in the international form.
    pub fn check(&self, raw: &str, country_code: &str) -> Result<String, PhoneNumberError> {
        let config = self
            .country(country_code)
            .ok_or(PhoneNumberError::UnsupportedCountry)?;
        let national_number = config.normalize(raw);
        if national_number.is_empty() {
            return Err(PhoneNumberError::InvalidFormat);
        }
        if !config.is_match(&national_number) {
            return Err(PhoneNumberError::PatternMismatch(country_code.to_owned()));
        }
        Ok(config.format(&national_number))
    }
}

impl Default for PhoneValidator {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Reduces the raw input to the national number with the built-in rules.
#[inline]
pub fn normalize(raw: &str, country_code: &str) -> Option<String> {
    PhoneValidator::shared().normalize(raw, country_code)
}

/// Validates the raw input with the built-in rules.
#[inline]
pub fn validate(raw: &str, country_code: &str) -> ValidationResult {
    PhoneValidator::shared().validate(raw, country_code)
}

/// Shared validator with the built-in rules.
static SHARED_PHONE_VALIDATOR: LazyLock<PhoneValidator> = LazyLock::new(PhoneValidator::new);
