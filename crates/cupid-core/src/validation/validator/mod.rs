//! Common validation rules.

mod phone_number;
mod required;

pub use phone_number::PhoneNumberValidator;
pub use required::RequiredValidator;

/// A generic validator.
pub trait Validator<T: ?Sized> {
    /// The error type.
    type Error: Into<crate::error::Error>;

    /// Validates the data.
    fn validate(&self, data: &T) -> Result<(), Self::Error>;
}
