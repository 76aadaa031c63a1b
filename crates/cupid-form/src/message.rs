use crate::{field, view::Section};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of the scheduled message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// The message is composed from a description of the feelings.
    #[default]
    Description,
    /// The message is written by the sender.
    Custom,
}

impl MessageType {
    /// Returns `self` as `&'static str`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Custom => "custom",
        }
    }

    /// Returns the name of the field holding the message content.
    #[inline]
    pub fn content_field(&self) -> &'static str {
        match self {
            Self::Description => field::DESCRIPTION,
            Self::Custom => field::CUSTOM_MESSAGE,
        }
    }

    /// Returns the form section holding the message content.
    #[inline]
    pub fn section(&self) -> Section {
        match self {
            Self::Description => Section::Description,
            Self::Custom => Section::CustomMessage,
        }
    }

    /// Returns the status shown when the message content is blank.
    #[inline]
    pub fn missing_content_message(&self) -> &'static str {
        match self {
            Self::Description => "Please describe your feelings",
            Self::Custom => "Please write your custom message",
        }
    }
}

impl From<&str> for MessageType {
    /// Any value other than `custom` selects the description.
    #[inline]
    fn from(value: &str) -> Self {
        if value == "custom" {
            Self::Custom
        } else {
            Self::Description
        }
    }
}

impl fmt::Display for MessageType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of the message, keyed by its field name on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    /// Description of the feelings.
    #[serde(rename = "description")]
    Description(String),
    /// Message written by the sender.
    #[serde(rename = "custom_message")]
    Custom(String),
}

impl MessageContent {
    /// Creates a new instance for the message type.
    #[inline]
    pub fn new(message_type: MessageType, content: String) -> Self {
        match message_type {
            MessageType::Description => Self::Description(content),
            MessageType::Custom => Self::Custom(content),
        }
    }

    /// Returns the content text.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Description(content) | Self::Custom(content) => content,
        }
    }
}

/// Payload posted to `/api/messages/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSubmission {
    /// Name of the sender.
    pub sender_name: String,
    /// Name of the recipient.
    pub recipient_name: String,
    /// ISO code of the recipient country.
    pub phone_country: String,
    /// Phone number in the international form without separators.
    pub phone_number: String,
    /// Email of the sender, `null` when not given.
    pub email: Option<String>,
    /// Relationship between the sender and the recipient.
    pub relationship: String,
    /// Kind of the message.
    pub message_type: MessageType,
    /// Message content.
    #[serde(flatten)]
    pub content: MessageContent,
}

/// Payload posted to `/api/premium/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumRequest {
    /// Description of the requested service.
    pub request_description: String,
    /// Contact number of the requester.
    pub contact_number: String,
}
