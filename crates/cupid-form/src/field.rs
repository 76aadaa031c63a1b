//! Names of the form fields.

/// Name of the sender.
pub const SENDER_NAME: &str = "sender_name";

/// Name of the recipient.
pub const RECIPIENT_NAME: &str = "recipient_name";

/// ISO code of the selected country.
pub const PHONE_COUNTRY: &str = "phone_country";

/// Phone number of the recipient as typed.
pub const PHONE_NUMBER: &str = "phone_number";

/// Optional email of the sender.
pub const EMAIL: &str = "email";

/// Relationship between the sender and the recipient.
pub const RELATIONSHIP: &str = "relationship";

/// Selected message type: `description` or `custom`.
pub const MESSAGE_TYPE: &str = "message_type";

/// Description of the feelings, used to compose the message.
pub const DESCRIPTION: &str = "description";

/// Message written by the sender.
pub const CUSTOM_MESSAGE: &str = "custom_message";

/// Request text of the premium services form.
pub const PREMIUM_REQUEST: &str = "premium_request";

/// Contact number of the premium services form.
pub const PREMIUM_CONTACT: &str = "premium_contact";
