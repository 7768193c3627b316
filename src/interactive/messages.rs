//! Message handling for the interactive UI

use std::time::{Duration, Instant};

/// Message type for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

/// A message to display to the user
#[derive(Debug, Clone)]
pub struct Message {
    pub message_type: MessageType,
    pub text: String,
    pub timestamp: Instant,
}

impl Message {
    /// Create a new message
    pub fn new(message_type: MessageType, text: impl Into<String>) -> Self {
        Self {
            message_type,
            text: text.into(),
            timestamp: Instant::now(),
        }
    }

    /// Whether the message is older than `max_age`; errors never expire
    pub fn is_expired(&self, max_age: Duration) -> bool {
        self.message_type != MessageType::Error && self.timestamp.elapsed() > max_age
    }

    /// Get the icon for this message type
    pub fn icon(&self) -> &str {
        match self.message_type {
            MessageType::Info => "ℹ",
            MessageType::Success => "✓",
            MessageType::Warning => "⚠",
            MessageType::Error => "✗",
        }
    }
}


// Made with Bob
