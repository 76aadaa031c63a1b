use crate::{
    client::Backend,
    field,
    message::{MessageContent, MessageSubmission, MessageType},
    notice::SuccessNotice,
    view::FormView,
};
use cupid_core::{
    error::Error,
    phone::{PhoneValidator, ValidationResult},
    validation::Validation,
};

/// Status shown when a required field is blank.
const MISSING_FIELDS: &str = "Please fill in all required fields";

/// Fields which must be filled before a submission.
const REQUIRED_FIELDS: [&str; 3] = [
    field::SENDER_NAME,
    field::RECIPIENT_NAME,
    field::RELATIONSHIP,
];

/// Controller of the message-scheduling form.
///
/// It validates the inputs of a [`FormView`] as the user edits them and
/// posts the message through a [`Backend`] on submission.
#[derive(Debug, Clone)]
pub struct MessageForm<V> {
    /// The form surface.
    view: V,
    /// Dialing rules for the phone number.
    rules: PhoneValidator,
}

impl<V: FormView> MessageForm<V> {
    /// Creates a new instance with the built-in phone rules.
    #[inline]
    pub fn new(view: V) -> Self {
        Self::with_rules(view, PhoneValidator::shared().clone())
    }

    /// Creates a new instance with the phone rules.
    #[inline]
    pub fn with_rules(view: V, rules: PhoneValidator) -> Self {
        Self { view, rules }
    }

    /// Returns a reference to the view.
    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns a mutable reference to the view.
    #[inline]
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consumes the controller and returns the view.
    #[inline]
    pub fn into_view(self) -> V {
        self.view
    }

    /// Returns the phone rules.
    #[inline]
    pub fn rules(&self) -> &PhoneValidator {
        &self.rules
    }

    /// Returns the message type selected in the view.
    pub fn message_type(&self) -> MessageType {
        self.view
            .field_value(field::MESSAGE_TYPE)
            .as_deref()
            .map(MessageType::from)
            .unwrap_or_default()
    }

    /// Shows the section for the message type and makes its field required.
    pub fn on_message_type_change(&mut self, message_type: MessageType) {
        for kind in [MessageType::Description, MessageType::Custom] {
            let selected = kind == message_type;
            self.view.toggle_section(kind.section(), selected);
            self.view.set_field_required(kind.content_field(), selected);
        }
    }

    /// Updates the phone number placeholder for the country.
    /// An unsupported country leaves it unchanged.
    pub fn on_country_change(&mut self, country_code: &str) {
        if let Some(config) = self.rules.country(country_code) {
            let placeholder = config.placeholder();
            self.view.set_placeholder(field::PHONE_NUMBER, &placeholder);
        } else {
            tracing::debug!(country_code, "no placeholder for an unsupported country");
        }
    }

    /// Validates the phone number as it is typed and shows or clears its error.
    pub fn on_phone_input(&mut self) -> ValidationResult {
        let raw = self.field(field::PHONE_NUMBER);
        let country_code = self.field(field::PHONE_COUNTRY);
        let result = self.rules.validate(&raw, &country_code);
        self.view.set_field_error(field::PHONE_NUMBER, result.error());
        result
    }

    /// Validates the form and schedules the message.
    ///
    /// On success the notice is shown and the form is reset. On failure the
    /// offending fields or the status line explain what went wrong.
    pub async fn submit<B: Backend>(&mut self, backend: &B) -> Result<SuccessNotice, Error> {
        let country_code = self.field(field::PHONE_COUNTRY);
        let mut validation = Validation::new();
        let phone_number = validation.validate_phone_number_with(
            field::PHONE_NUMBER,
            &self.field(field::PHONE_NUMBER),
            &country_code,
            &self.rules,
        );
        let Some(phone_number) = phone_number else {
            let message = validation
                .message(field::PHONE_NUMBER)
                .unwrap_or_default()
                .to_owned();
            self.view
                .set_field_error(field::PHONE_NUMBER, Some(&message));
            return Err(Error::new(message));
        };
        self.view.set_field_error(field::PHONE_NUMBER, None);

        let message_type = self.message_type();
        let content = self.field(message_type.content_field()).trim().to_owned();
        if content.is_empty() {
            let message = message_type.missing_content_message();
            self.view.set_status(Some(message));
            return Err(Error::new(message));
        }

        for name in REQUIRED_FIELDS {
            validation.validate_required(name, self.view.field_value(name).as_deref());
            self.view.set_field_error(name, validation.message(name));
        }
        if !validation.is_success() {
            tracing::warn!(
                invalid_params = ?validation.invalid_params(),
                "required fields are missing"
            );
            self.view.set_status(Some(MISSING_FIELDS));
            return Err(Error::new(MISSING_FIELDS));
        }

        let email = self.field(field::EMAIL);
        let submission = MessageSubmission {
            sender_name: self.field(field::SENDER_NAME),
            recipient_name: self.field(field::RECIPIENT_NAME),
            phone_country: country_code,
            phone_number,
            email: (!email.is_empty()).then_some(email),
            relationship: self.field(field::RELATIONSHIP),
            message_type,
            content: MessageContent::new(message_type, content),
        };
        match backend.submit_message(&submission).await {
            Ok(()) => {
                tracing::info!(
                    phone_country = submission.phone_country.as_str(),
                    message_type = message_type.as_str(),
                    "message scheduled"
                );
                let notice = SuccessNotice::new(&submission.recipient_name, message_type);
                self.view.show_success(&notice);
                self.view.reset();
                self.on_message_type_change(MessageType::Description);
                self.view.set_status(None);
                Ok(notice)
            }
            Err(err) => {
                tracing::error!("fail to schedule the message: {err}");
                self.view.set_status(Some(err.message()));
                Err(err)
            }
        }
    }

    /// Returns the value of the field or an empty string.
    fn field(&self, name: &str) -> String {
        self.view.field_value(name).unwrap_or_default()
    }
}
