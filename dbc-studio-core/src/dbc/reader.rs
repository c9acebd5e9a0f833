//! DBC file loading
//!
//! Loading goes through the [`DatabaseLoader`] trait so the parser behind it
//! can be swapped. [`CanDbcLoader`] is the stock implementation: it lets the
//! `can-dbc` crate parse the file and projects the result onto the document
//! model, keeping the order of messages, signals and nodes.

use crate::model::{ByteOrder, Document, Message, Signal, SENTINEL_NODE};
use crate::types::{DecodeError, DecodeResult};
use std::fmt::Debug;
use std::path::Path;

/// Mask for the 29-bit CAN identifier; DBC marks extended frames with bit 31
const FRAME_ID_MASK: u32 = 0x1FFF_FFFF;

/// Longest parser diagnostic kept in an error message
const MAX_CAUSE_LEN: usize = 160;

/// Anything that can turn a DBC file into a [`Document`]
pub trait DatabaseLoader {
    /// Load the file at `path`
    fn load(&self, path: &Path) -> DecodeResult<Document>;
}

/// Loader backed by the `can-dbc` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct CanDbcLoader;

impl DatabaseLoader for CanDbcLoader {
    fn load(&self, path: &Path) -> DecodeResult<Document> {
        log::info!("Parsing DBC file: {:?}", path);

        let bytes = std::fs::read(path).map_err(|e| DecodeError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Vector tools often save Windows-1252; Latin-1 covers the printable range
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("DBC file {:?} is not UTF-8, trying Latin-1 encoding", path);
                err.into_bytes().iter().map(|&b| b as char).collect()
            }
        };

        let dbc = can_dbc::DBC::from_slice(content.as_bytes()).map_err(|e| DecodeError::Syntax {
            path: path.to_path_buf(),
            cause: describe_parse_error(e),
        })?;

        let document = convert_dbc(&dbc, path);
        log::debug!(
            "Parsed {} messages with {} signals from {:?}",
            document.messages.len(),
            document.signal_count(),
            path
        );
        Ok(document)
    }
}

/// Load a DBC file with the default loader
pub fn decode(path: &Path) -> DecodeResult<Document> {
    CanDbcLoader.load(path)
}

fn describe_parse_error(err: can_dbc::Error<'_>) -> String {
    match err {
        can_dbc::Error::Incomplete(_, remaining) => {
            format!("unexpected input: {}", truncated(&remaining))
        }
        other => truncated(&other),
    }
}

fn truncated(value: &impl Debug) -> String {
    let text = format!("{:?}", value);
    if text.chars().count() > MAX_CAUSE_LEN {
        let mut short: String = text.chars().take(MAX_CAUSE_LEN).collect();
        short.push_str("...");
        short
    } else {
        text
    }
}

/// Project a parsed can-dbc database onto the document model
fn convert_dbc(dbc: &can_dbc::DBC, path: &Path) -> Document {
    let messages = dbc
        .messages()
        .iter()
        .map(|dbc_msg| convert_message(dbc, dbc_msg))
        .collect();

    Document {
        path: Some(path.to_path_buf()),
        version: Some(dbc.version().0.clone()),
        messages,
    }
}

/// Convert a can-dbc message, merging extra `BO_TX_BU_` transmitters
fn convert_message(dbc: &can_dbc::DBC, dbc_msg: &can_dbc::Message) -> Message {
    let message_id = dbc_msg.message_id();

    let mut senders: Vec<String> = Vec::new();
    if let can_dbc::Transmitter::NodeName(name) = dbc_msg.transmitter() {
        senders.push(name.clone());
    }
    for entry in dbc
        .message_transmitters()
        .iter()
        .filter(|entry| entry.message_id() == message_id)
    {
        for transmitter in entry.transmitter() {
            if let can_dbc::Transmitter::NodeName(name) = transmitter {
                if !senders.contains(name) {
                    senders.push(name.clone());
                }
            }
        }
    }

    Message {
        frame_id: message_id.0 & FRAME_ID_MASK,
        name: dbc_msg.message_name().to_string(),
        length: *dbc_msg.message_size(),
        senders: node_list(senders),
        signals: dbc_msg.signals().iter().map(convert_signal).collect(),
    }
}

/// Convert a can-dbc signal
fn convert_signal(dbc_sig: &can_dbc::Signal) -> Signal {
    let byte_order = match *dbc_sig.byte_order() {
        can_dbc::ByteOrder::LittleEndian => ByteOrder::LittleEndian,
        can_dbc::ByteOrder::BigEndian => ByteOrder::BigEndian,
    };

    Signal {
        name: dbc_sig.name().to_string(),
        start: *dbc_sig.start_bit(),
        length: *dbc_sig.signal_size(),
        byte_order,
        is_signed: matches!(*dbc_sig.value_type(), can_dbc::ValueType::Signed),
        scale: *dbc_sig.factor(),
        offset: *dbc_sig.offset(),
        // DBC text always carries both limits
        minimum: Some(*dbc_sig.min()),
        maximum: Some(*dbc_sig.max()),
        unit: dbc_sig.unit().to_string(),
        receivers: node_list(dbc_sig.receivers().iter().cloned()),
    }
}

/// Non-empty node names; a list holding only the placeholder means "no node"
fn node_list(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let nodes: Vec<String> = names.into_iter().filter(|name| !name.is_empty()).collect();
    if nodes.len() == 1 && nodes[0] == SENTINEL_NODE {
        Vec::new()
    } else {
        nodes
    }
}
