//! DBC document model
//!
//! Plain value types for the message and signal records of a DBC file. The
//! model never validates: name uniqueness, bit ranges and frame ID ranges are
//! the caller's business. Scale, offset and limits are carried as given and
//! never applied to raw values.

use crate::config::EditorDefaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Node name DBC uses for "no node"
pub const SENTINEL_NODE: &str = "Vector__XXX";

/// Byte order of a signal within the message payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Little-endian (Intel format), `@1` in DBC text
    #[default]
    LittleEndian,
    /// Big-endian (Motorola format), `@0` in DBC text
    BigEndian,
}

/// How frame IDs are shown to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameIdFormat {
    /// `0x123`
    #[default]
    Hex,
    /// `291`
    #[serde(rename = "dec")]
    Decimal,
}

/// A signal definition inside a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal name, unique within the owning message by convention
    pub name: String,
    /// Start bit as written in DBC text
    pub start: u64,
    /// Length in bits (1..=64 for well-formed signals)
    pub length: u64,
    pub byte_order: ByteOrder,
    pub is_signed: bool,
    /// physical = raw * scale + offset
    pub scale: f64,
    pub offset: f64,
    /// Lower physical bound; `None` means not specified
    pub minimum: Option<f64>,
    /// Upper physical bound; `None` means not specified
    pub maximum: Option<f64>,
    /// Engineering unit, possibly empty
    pub unit: String,
    /// Receiving nodes in declaration order
    pub receivers: Vec<String>,
}

impl Signal {
    /// Create an unsigned little-endian signal with unit scale and no limits
    pub fn new(name: impl Into<String>, start: u64, length: u64) -> Self {
        Self {
            name: name.into(),
            start,
            length,
            byte_order: ByteOrder::LittleEndian,
            is_signed: false,
            scale: 1.0,
            offset: 0.0,
            minimum: None,
            maximum: None,
            unit: String::new(),
            receivers: Vec::new(),
        }
    }
}

/// A CAN message definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// CAN identifier (29-bit range)
    pub frame_id: u32,
    /// Message name, unique within the document by convention
    pub name: String,
    /// Payload length in bytes
    pub length: u64,
    /// Transmitting nodes; the first one is written to the `BO_` line
    pub senders: Vec<String>,
    /// Signals in output order
    pub signals: Vec<Signal>,
}

impl Message {
    /// Create a message with no senders and no signals
    pub fn new(frame_id: u32, name: impl Into<String>, length: u64) -> Self {
        Self {
            frame_id,
            name: name.into(),
            length,
            senders: Vec::new(),
            signals: Vec::new(),
        }
    }

    /// The sender written to the `BO_` line, if any
    pub fn sender(&self) -> Option<&str> {
        self.senders.first().map(String::as_str)
    }

    /// First signal with the given name
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// First signal with the given name, mutable
    pub fn signal_mut(&mut self, name: &str) -> Option<&mut Signal> {
        self.signals.iter_mut().find(|s| s.name == name)
    }

    /// `base1`, `base2`, ... whichever is the first not used by a signal
    pub fn unique_signal_name(&self, base: &str) -> String {
        (1..)
            .map(|idx| format!("{}{}", base, idx))
            .find(|candidate| self.signal(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Append a signal built from the editor defaults and return it
    pub fn add_signal(&mut self, defaults: &EditorDefaults) -> &mut Signal {
        let mut signal = Signal::new(
            self.unique_signal_name(&defaults.signal_base_name),
            0,
            defaults.signal_length,
        );
        signal.minimum = Some(0.0);
        signal.maximum = Some(defaults.signal_maximum);

        log::debug!("Adding signal {} to message {}", signal.name, self.name);
        self.signals.push(signal);
        let last = self.signals.len() - 1;
        &mut self.signals[last]
    }

    /// Remove the signal at `index`; out-of-range is a no-op
    pub fn remove_signal(&mut self, index: usize) -> Option<Signal> {
        if index < self.signals.len() {
            Some(self.signals.remove(index))
        } else {
            None
        }
    }

    /// Frame ID rendered for display
    pub fn display_id(&self, format: FrameIdFormat) -> String {
        match format {
            FrameIdFormat::Hex => format!("0x{:X}", self.frame_id),
            FrameIdFormat::Decimal => self.frame_id.to_string(),
        }
    }
}

/// An in-memory DBC document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Backing file, if the document was loaded from or saved to one
    pub path: Option<PathBuf>,
    /// Content of the `VERSION` line
    pub version: Option<String>,
    /// Messages in output order
    pub messages: Vec<Message>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a version string
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Message names in document order
    pub fn message_names(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.name.as_str()).collect()
    }

    /// First message with the given name
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// First message with the given name, mutable
    pub fn message_mut(&mut self, name: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.name == name)
    }

    /// Smallest frame ID at or above `defaults.first_frame_id` not used yet
    pub fn next_frame_id(&self, defaults: &EditorDefaults) -> u32 {
        let mut frame_id = defaults.first_frame_id;
        while self.messages.iter().any(|m| m.frame_id == frame_id) {
            frame_id = frame_id.wrapping_add(1);
        }
        frame_id
    }

    /// `base` if unused, otherwise the first unused `base1`, `base2`, ...
    pub fn unique_message_name(&self, base: &str) -> String {
        if self.message(base).is_none() {
            return base.to_string();
        }
        (1..)
            .map(|idx| format!("{}{}", base, idx))
            .find(|candidate| self.message(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Append a message built from the editor defaults and return it
    pub fn add_message(&mut self, defaults: &EditorDefaults) -> &mut Message {
        let message = Message::new(
            self.next_frame_id(defaults),
            self.unique_message_name(&defaults.message_base_name),
            defaults.message_length,
        );

        log::debug!("Adding message {} (ID 0x{:X})", message.name, message.frame_id);
        self.messages.push(message);
        let last = self.messages.len() - 1;
        &mut self.messages[last]
    }

    /// Remove the message at `index`; out-of-range is a no-op
    pub fn remove_message(&mut self, index: usize) -> Option<Message> {
        if index < self.messages.len() {
            Some(self.messages.remove(index))
        } else {
            None
        }
    }

    /// Indices of messages whose name or frame ID matches `query`
    ///
    /// Matching is case-insensitive against the name, the lowercase hex ID
    /// (with or without `0x`) and the decimal ID. An empty query matches
    /// every message.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let query = query.trim().to_lowercase();
        self.messages
            .iter()
            .enumerate()
            .filter(|(_, m)| {
                query.is_empty()
                    || m.name.to_lowercase().contains(&query)
                    || format!("{:x}", m.frame_id).contains(&query)
                    || format!("0x{:x}", m.frame_id).contains(&query)
                    || m.frame_id.to_string().contains(&query)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Total number of signals across all messages
    pub fn signal_count(&self) -> usize {
        self.messages.iter().map(|m| m.signals.len()).sum()
    }
}
