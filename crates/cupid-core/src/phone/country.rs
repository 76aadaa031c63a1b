use crate::{
    SharedString, bail,
    error::Error,
    extension::TomlTableExt,
};
use regex::Regex;
use toml::Table;

/// Dialing rules for a single country, keyed by its ISO 3166-1 alpha-2 code.
///
/// The pattern is matched against the national number, i.e. the digits left
/// after stripping the dialing code and one domestic trunk zero.
#[derive(Debug, Clone)]
pub struct CountryConfig {
    /// ISO country code, e.g. `KE`.
    code: SharedString,
    /// International dialing code with the leading `+`, e.g. `+254`.
    dialing_code: SharedString,
    /// Minimum length of the national number.
    min_length: usize,
    /// Maximum length of the national number.
    max_length: usize,
    /// Anchored pattern for the national number.
    pattern: Regex,
}

impl CountryConfig {
    /// Creates a new instance.
    ///
    /// The pattern is always wrapped as `^(?:…)$`, so alternations
    /// cannot escape the anchors.
    pub fn new(
        code: impl Into<SharedString>,
        dialing_code: impl Into<SharedString>,
        min_length: usize,
        max_length: usize,
        pattern: &str,
    ) -> Result<Self, Error> {
        let code = code.into();
        let dialing_code = dialing_code.into();
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            bail!("the country code `{code}` should consist of ASCII uppercase letters");
        }
        match dialing_code.strip_prefix('+') {
            Some(digits)
                if (1..=4).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) => {}
            _ => bail!("the dialing code `{dialing_code}` for `{code}` should be `+` and 1-4 digits"),
        }
        if min_length == 0 || min_length > max_length {
            bail!("invalid national number length range {min_length}..={max_length} for `{code}`");
        }

        let anchored_pattern = format!("^(?:{pattern})$");
        let pattern = Regex::new(&anchored_pattern)
            .map_err(|err| Error::with_source(format!("invalid pattern for `{code}`"), err))?;
        Ok(Self {
            code,
            dialing_code,
            min_length,
            max_length,
            pattern,
        })
    }

    /// Parses an entry of the `[[phone.countries]]` config array.
    pub fn from_table(table: &Table) -> Result<Self, Error> {
        let Some(code) = table.get_str("code") else {
            bail!("the `code` field is required");
        };
        let Some(dialing_code) = table.get_str("dialing-code") else {
            bail!("the `dialing-code` field is required for `{code}`");
        };
        let Some(min_length) = table.get_usize("min-length") else {
            bail!("the `min-length` field is required for `{code}`");
        };
        let max_length = table.get_usize("max-length").unwrap_or(min_length);
        let Some(pattern) = table.get_str("pattern") else {
            bail!("the `pattern` field is required for `{code}`");
        };
        if min_length != max_length {
            tracing::warn!(
                code,
                "variable-length national numbers are not covered by the built-in rules"
            );
        }
        Self::new(
            code.to_owned(),
            dialing_code.to_owned(),
            min_length,
            max_length,
            pattern,
        )
    }

    /// Returns the ISO country code.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the dialing code with the leading `+`.
    #[inline]
    pub fn dialing_code(&self) -> &str {
        &self.dialing_code
    }

    /// Returns the dialing code digits without the leading `+`.
    #[inline]
    pub fn dialing_digits(&self) -> &str {
        self.dialing_code
            .strip_prefix('+')
            .unwrap_or(&self.dialing_code)
    }

    /// Returns the minimum length of the national number.
    #[inline]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Returns the maximum length of the national number.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the national number pattern.
    #[inline]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Returns the input placeholder shown after selecting the country.
    #[inline]
    pub fn placeholder(&self) -> String {
        format!("Example: {}", self.dialing_code)
    }

    /// Reduces the raw input to the national number.
    ///
    /// Non-digits are dropped, then a leading dialing code, then exactly one
    /// leading `0`. The result may be empty.
    pub fn normalize(&self, raw: &str) -> String {
        let digits = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>();
        let digits = digits
            .strip_prefix(self.dialing_digits())
            .unwrap_or(&digits);
        digits.strip_prefix('0').unwrap_or(digits).to_owned()
    }

    /// Returns `true` if the national number satisfies the pattern.
    #[inline]
    pub fn is_match(&self, national_number: &str) -> bool {
        self.pattern.is_match(national_number)
    }

    /// Formats the national number in the international form without separators.
    #[inline]
    pub fn format(&self, national_number: &str) -> String {
        [&*self.dialing_code, national_number].concat()
    }
}

/// Built-in dialing rules: code, dialing code, length and pattern.
const BUILTIN_COUNTRIES: [(&str, &str, usize, &str); 5] = [
    ("KE", "+254", 9, r"^[17]\d{8}$"),
    ("UG", "+256", 9, r"^[7]\d{8}$"),
    ("TZ", "+255", 9, r"^[67]\d{8}$"),
    ("US", "+1", 10, r"^\d{10}$"),
    ("GB", "+44", 10, r"^[1-9]\d{9}$"),
];

/// Returns the built-in country rules.
pub(super) fn builtin_countries() -> Vec<CountryConfig> {
    BUILTIN_COUNTRIES
        .iter()
        .map(|&(code, dialing_code, length, pattern)| {
            CountryConfig::new(code, dialing_code, length, length, pattern)
                .expect("fail to create the built-in country rules")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CountryConfig, builtin_countries};
    use crate::error::Error;

    #[test]
    fn it_checks_builtin_invariants() {
        for config in builtin_countries() {
            let code = config.code();
            assert_eq!(config.min_length(), config.max_length(), "{code}");
            let pattern = config.pattern().as_str();
            assert!(pattern.starts_with('^') && pattern.ends_with('$'), "{code}");

            let too_long = "7".repeat(config.max_length() + 1);
            let too_short = "7".repeat(config.min_length() - 1);
            assert!(!config.is_match(&too_long), "{code}");
            assert!(!config.is_match(&too_short), "{code}");
        }
    }

    #[test]
    fn it_normalizes_national_numbers() -> Result<(), Error> {
        let kenya = CountryConfig::new("KE", "+254", 9, 9, r"^[17]\d{8}$")?;
        assert_eq!(kenya.dialing_digits(), "254");
        assert_eq!(kenya.normalize("0712 345-678"), "712345678");
        assert_eq!(kenya.normalize("+254 (712) 345 678"), "712345678");
        assert_eq!(kenya.normalize("+254 0712 345 678"), "712345678");
        assert_eq!(kenya.normalize("00712345678"), "0712345678");
        assert_eq!(kenya.normalize("call me"), "");
        assert_eq!(kenya.format("712345678"), "+254712345678");
        assert_eq!(kenya.placeholder(), "Example: +254");
        Ok(())
    }

    #[test]
    fn it_anchors_configured_patterns() -> Result<(), Error> {
        let config = CountryConfig::new("RW", "+250", 9, 9, r"7[2389]\d{7}")?;
        assert_eq!(config.pattern().as_str(), r"^(?:7[2389]\d{7})$");
        assert!(config.is_match("788123456"));
        assert!(!config.is_match("7881234567"));
        assert!(!config.is_match("0788123456"));

        let config = CountryConfig::new("KE", "+254", 9, 9, r"^7\d{8}$|^1\d{8}")?;
        assert!(config.is_match("712345678"));
        assert!(config.is_match("112345678"));
        assert!(!config.is_match("1123456789"));
        assert!(!config.is_match("11234567890"));
        Ok(())
    }

    #[test]
    fn it_rejects_malformed_rules() {
        assert!(CountryConfig::new("ke", "+254", 9, 9, r"^\d{9}$").is_err());
        assert!(CountryConfig::new("KE", "254", 9, 9, r"^\d{9}$").is_err());
        assert!(CountryConfig::new("KE", "+25400", 9, 9, r"^\d{9}$").is_err());
        assert!(CountryConfig::new("KE", "+254", 10, 9, r"^\d{9}$").is_err());
        assert!(CountryConfig::new("KE", "+254", 0, 0, r"^$").is_err());
        assert!(CountryConfig::new("KE", "+254", 9, 9, r"^[17\d{8}$").is_err());
    }

    #[test]
    fn it_parses_config_entries() -> Result<(), Error> {
        let table: toml::Table = toml::from_str(
            r#"
            code = "NG"
            dialing-code = "+234"
            min-length = 10
            pattern = '^[789]\d{9}$'
            "#,
        )?;
        let config = CountryConfig::from_table(&table)?;
        assert_eq!(config.code(), "NG");
        assert_eq!(config.max_length(), 10);
        assert!(config.is_match("8031234567"));

        let table: toml::Table = toml::from_str(r#"code = "NG""#)?;
        let err = CountryConfig::from_table(&table).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("the `dialing-code` field is required for `NG`".to_owned())
        );
        Ok(())
    }
}
