use super::Validator;
use crate::{bail, error::Error};

/// A validator for values which should not be blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredValidator;

impl Validator<str> for RequiredValidator {
    type Error = Error;

    #[inline]
    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        if data.trim().is_empty() {
            bail!("the value should not be blank");
        }
        Ok(())
    }
}
