//! Random phone numbers for fixtures and tests.
use crate::phone::CountryConfig;
use rand::{Rng, seq::IndexedRandom};

/// Maximum number of candidates drawn before giving up.
const MAX_ATTEMPTS: usize = 1000;

/// Generates a random national number accepted by the country rules.
///
/// The number never starts with `0` or with the dialing code digits,
/// so it survives normalization unchanged.
pub fn gen_national_number(config: &CountryConfig) -> Option<String> {
    let mut rng = rand::rng();
    let dialing_digits = config.dialing_digits();
    (0..MAX_ATTEMPTS).find_map(|_| {
        let length = rng.random_range(config.min_length()..=config.max_length());
        let candidate = (0..length)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect::<String>();
        let usable = !candidate.starts_with('0')
            && !candidate.starts_with(dialing_digits)
            && config.is_match(&candidate);
        usable.then_some(candidate)
    })
}

/// Generates a random phone number in the international form.
pub fn gen_phone_number(config: &CountryConfig) -> Option<String> {
    gen_national_number(config).map(|national_number| config.format(&national_number))
}

/// Decorates the national number the way people type it:
/// with a trunk zero, a dialing code, spaces or dashes.
pub fn gen_raw_input(config: &CountryConfig, national_number: &str) -> String {
    let mut rng = rand::rng();
    let prefix = [
        String::new(),
        "0".to_owned(),
        config.dialing_code().to_owned(),
        format!("{} ", config.dialing_code()),
        format!("({})", config.dialing_digits()),
    ]
    .choose(&mut rng)
    .cloned()
    .unwrap_or_default();
    let separator = [" ", "-", ".", ""].choose(&mut rng).copied().unwrap_or("");
    let (head, tail) = national_number.split_at(national_number.len() / 2);
    format!("{prefix}{head}{separator}{tail}")
}
