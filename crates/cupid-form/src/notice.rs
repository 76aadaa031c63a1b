use crate::message::MessageType;
use serde::Serialize;

/// Notice shown after a message has been scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessNotice {
    /// Heading.
    title: &'static str,
    /// Message for the sender.
    message: String,
    /// Emoji line.
    emoji: &'static str,
}

impl SuccessNotice {
    /// Creates a new instance for the recipient and message type.
    pub fn new(recipient_name: &str, message_type: MessageType) -> Self {
        let (message, emoji) = match message_type {
            MessageType::Custom => (
                format!("Your heartfelt message to {recipient_name} has been scheduled! 💌"),
                "👉💝✨😉",
            ),
            MessageType::Description => (
                format!("Get ready to make {recipient_name}'s day special! 🌹"),
                "👉✨💘😉",
            ),
        };
        Self {
            title: "Message Scheduled!",
            message,
            emoji,
        }
    }

    /// Returns the title.
    #[inline]
    pub fn title(&self) -> &str {
        self.title
    }

    /// Returns the message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the emoji line.
    #[inline]
    pub fn emoji(&self) -> &str {
        self.emoji
    }
}

#[cfg(test)]
mod tests {
    use super::SuccessNotice;
    use crate::MessageType;

    #[test]
    fn it_composes_notices() {
        let notice = SuccessNotice::new("Bob", MessageType::Custom);
        assert_eq!(notice.title(), "Message Scheduled!");
        assert_eq!(
            notice.message(),
            "Your heartfelt message to Bob has been scheduled! 💌"
        );
        assert_eq!(notice.emoji(), "👉💝✨😉");

        let notice = SuccessNotice::new("Bob", MessageType::Description);
        assert_eq!(notice.message(), "Get ready to make Bob's day special! 🌹");
        assert_eq!(notice.emoji(), "👉✨💘😉");
    }
}
