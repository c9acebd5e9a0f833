//! Editor configuration types
//!
//! This module defines the defaults used by the editing helpers on
//! [`Document`](crate::Document) and [`Message`](crate::Message) when they
//! create new messages and signals. The serializer and the decoder take no
//! configuration: the DBC output format is fixed.

use serde::{Deserialize, Serialize};

/// Defaults for newly created messages and signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorDefaults {
    /// Lowest frame ID handed out to a new message (default: 0x100)
    #[serde(default = "default_first_frame_id")]
    pub first_frame_id: u32,

    /// Name stem for new messages (default: "NewMessage")
    #[serde(default = "default_message_base_name")]
    pub message_base_name: String,

    /// Payload length in bytes for new messages (default: 8)
    #[serde(default = "default_message_length")]
    pub message_length: u64,

    /// Name stem for new signals (default: "Signal")
    #[serde(default = "default_signal_base_name")]
    pub signal_base_name: String,

    /// Bit width for new signals (default: 8)
    #[serde(default = "default_signal_length")]
    pub signal_length: u64,

    /// Maximum physical value for new signals (default: 255)
    #[serde(default = "default_signal_maximum")]
    pub signal_maximum: f64,
}

fn default_first_frame_id() -> u32 {
    0x100
}

fn default_message_base_name() -> String {
    "NewMessage".to_string()
}

fn default_message_length() -> u64 {
    8
}

fn default_signal_base_name() -> String {
    "Signal".to_string()
}

fn default_signal_length() -> u64 {
    8
}

fn default_signal_maximum() -> f64 {
    255.0
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            first_frame_id: default_first_frame_id(),
            message_base_name: default_message_base_name(),
            message_length: default_message_length(),
            signal_base_name: default_signal_base_name(),
            signal_length: default_signal_length(),
            signal_maximum: default_signal_maximum(),
        }
    }
}

impl EditorDefaults {
    /// Create the default editor configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the first frame ID to hand out
    pub fn with_first_frame_id(mut self, frame_id: u32) -> Self {
        self.first_frame_id = frame_id;
        self
    }

    /// Builder method: set the name stem for new messages
    pub fn with_message_base_name(mut self, name: impl Into<String>) -> Self {
        self.message_base_name = name.into();
        self
    }

    /// Builder method: set the payload length for new messages
    pub fn with_message_length(mut self, length: u64) -> Self {
        self.message_length = length;
        self
    }

    /// Builder method: set the name stem for new signals
    pub fn with_signal_base_name(mut self, name: impl Into<String>) -> Self {
        self.signal_base_name = name.into();
        self
    }

    /// Builder method: set the bit width for new signals
    pub fn with_signal_length(mut self, length: u64) -> Self {
        self.signal_length = length;
        self
    }

    /// Builder method: set the maximum physical value for new signals
    pub fn with_signal_maximum(mut self, maximum: f64) -> Self {
        self.signal_maximum = maximum;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_defaults_builder() {
        let defaults = EditorDefaults::new()
            .with_first_frame_id(0x700)
            .with_message_base_name("Diag")
            .with_message_length(64)
            .with_signal_base_name("Sig")
            .with_signal_length(16)
            .with_signal_maximum(65535.0);

        assert_eq!(defaults.first_frame_id, 0x700);
        assert_eq!(defaults.message_base_name, "Diag");
        assert_eq!(defaults.message_length, 64);
        assert_eq!(defaults.signal_base_name, "Sig");
        assert_eq!(defaults.signal_length, 16);
        assert_eq!(defaults.signal_maximum, 65535.0);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let defaults: EditorDefaults =
            serde_json::from_str(r#"{ "message_base_name": "Frame" }"#).unwrap();

        assert_eq!(defaults.message_base_name, "Frame");
        assert_eq!(defaults.first_frame_id, 0x100);
        assert_eq!(defaults.signal_base_name, "Signal");
        assert_eq!(defaults.signal_maximum, 255.0);
    }
}
