//! Subcommand handlers
//!
//! Every command that changes a file loads it, edits the document in memory
//! and writes the whole document back. Name clashes and value ranges are
//! checked here, before the document is touched.

use crate::config::AppConfig;
use crate::report;
use anyhow::{Context, Result};
use dbc_studio_core::{decode, write, ByteOrder, Document};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Highest 29-bit CAN identifier
pub const MAX_FRAME_ID: u32 = 0x1FFF_FFFF;

/// Errors in user-supplied edits
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("Signal {signal} not found in message {message}")]
    SignalNotFound { message: String, signal: String },

    #[error("A message named {0} already exists")]
    DuplicateMessage(String),

    #[error("Message {message} already has a signal named {signal}")]
    DuplicateSignal { message: String, signal: String },

    #[error("File already exists: {0:?} (use --force to overwrite)")]
    FileExists(PathBuf),
}

/// Parse a frame ID given as decimal or `0x` hex
pub fn parse_frame_id(text: &str) -> std::result::Result<u32, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse::<u32>(),
    };
    let frame_id = parsed.map_err(|e| format!("invalid frame ID {:?}: {}", text, e))?;
    if frame_id > MAX_FRAME_ID {
        return Err(format!(
            "frame ID 0x{:X} exceeds the 29-bit maximum 0x{:X}",
            frame_id, MAX_FRAME_ID
        ));
    }
    Ok(frame_id)
}

/// `show`: print a listing (or JSON) of a DBC file
pub fn show(config: &AppConfig, path: &Path, search: Option<&str>, json: bool) -> Result<()> {
    let doc = load(path)?;
    let indices = doc.search(search.unwrap_or(""));

    if json {
        let mut filtered = doc.clone();
        filtered.messages = indices
            .iter()
            .filter_map(|&idx| doc.messages.get(idx).cloned())
            .collect();
        println!("{}", serde_json::to_string_pretty(&filtered)?);
    } else {
        let listing = report::render_listing(&doc, &indices, config.display.frame_id_format)
            .context("Failed to render listing")?;
        print!("{}", listing);
    }
    Ok(())
}

/// `normalize`: rewrite each file in canonical form
pub fn normalize(config: &AppConfig, files: &[PathBuf], output_dir: Option<&Path>) -> Result<()> {
    let output_dir = output_dir.or(config.output.directory.as_deref());

    let results: Vec<(&PathBuf, Result<PathBuf>)> = files
        .par_iter()
        .map(|input| (input, normalize_one(input, output_dir)))
        .collect();

    let mut failures = 0;
    for (input, result) in results {
        match result {
            Ok(target) => println!("✓ {:?} -> {:?}", input, target),
            Err(e) => {
                eprintln!("✗ {:?}: {:#}", input, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed to normalize", failures, files.len());
    }
    Ok(())
}

fn normalize_one(input: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let doc = load(input)?;
    let target = match (output_dir, input.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => input.to_path_buf(),
    };
    save(&doc, &target)?;
    Ok(target)
}

/// `new`: write an empty document
pub fn new_file(path: &Path, version: Option<String>, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(EditError::FileExists(path.to_path_buf()).into());
    }
    let doc = Document {
        version,
        ..Document::new()
    };
    save(&doc, path)?;
    println!("✓ Created {:?}", path);
    Ok(())
}

/// Fields of a new message; `None` falls back to the editor defaults
#[derive(Debug, Default)]
pub struct NewMessage {
    pub name: Option<String>,
    pub frame_id: Option<u32>,
    pub length: Option<u64>,
    pub sender: Option<String>,
}

/// `add-message`
pub fn add_message(config: &AppConfig, path: &Path, fields: NewMessage) -> Result<()> {
    let mut doc = load(path)?;
    if let Some(name) = &fields.name {
        if doc.message_names().contains(&name.as_str()) {
            return Err(EditError::DuplicateMessage(name.clone()).into());
        }
    }

    let message = doc.add_message(&config.defaults);
    if let Some(name) = fields.name {
        message.name = name;
    }
    if let Some(frame_id) = fields.frame_id {
        message.frame_id = frame_id;
    }
    if let Some(length) = fields.length {
        message.length = length;
    }
    if let Some(sender) = fields.sender {
        message.senders = vec![sender];
    }
    let summary = format!(
        "{} {}",
        message.display_id(config.display.frame_id_format),
        message.name
    );

    save(&doc, path)?;
    println!("✓ Added message {}", summary);
    Ok(())
}

/// `remove-message`
pub fn remove_message(path: &Path, name: &str) -> Result<()> {
    let mut doc = load(path)?;
    let index = doc
        .messages
        .iter()
        .position(|m| m.name == name)
        .ok_or_else(|| EditError::MessageNotFound(name.to_string()))?;
    doc.remove_message(index);

    save(&doc, path)?;
    println!("✓ Removed message {}", name);
    Ok(())
}

/// Fields of a new signal; `None` falls back to the editor defaults
#[derive(Debug)]
pub struct NewSignal {
    pub name: Option<String>,
    pub start: u64,
    pub length: Option<u64>,
    pub big_endian: bool,
    pub signed: bool,
    pub scale: f64,
    pub offset: f64,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub unit: String,
    pub receivers: Vec<String>,
}

impl Default for NewSignal {
    fn default() -> Self {
        Self {
            name: None,
            start: 0,
            length: None,
            big_endian: false,
            signed: false,
            scale: 1.0,
            offset: 0.0,
            minimum: None,
            maximum: None,
            unit: String::new(),
            receivers: Vec::new(),
        }
    }
}

/// `add-signal`
pub fn add_signal(config: &AppConfig, path: &Path, message_name: &str, fields: NewSignal) -> Result<()> {
    let mut doc = load(path)?;
    let message = doc
        .message_mut(message_name)
        .ok_or_else(|| EditError::MessageNotFound(message_name.to_string()))?;
    if let Some(name) = &fields.name {
        if message.signal(name).is_some() {
            return Err(EditError::DuplicateSignal {
                message: message_name.to_string(),
                signal: name.clone(),
            }
            .into());
        }
    }

    let signal = message.add_signal(&config.defaults);
    if let Some(name) = fields.name {
        signal.name = name;
    }
    signal.start = fields.start;
    if let Some(length) = fields.length {
        signal.length = length;
    }
    signal.byte_order = if fields.big_endian {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
    signal.is_signed = fields.signed;
    signal.scale = fields.scale;
    signal.offset = fields.offset;
    if fields.minimum.is_some() {
        signal.minimum = fields.minimum;
    }
    if fields.maximum.is_some() {
        signal.maximum = fields.maximum;
    }
    signal.unit = fields.unit;
    signal.receivers = fields.receivers;
    let summary = report::signal_summary(signal);

    save(&doc, path)?;
    println!("✓ Added signal to {}: {}", message_name, summary);
    Ok(())
}

/// `remove-signal`
pub fn remove_signal(path: &Path, message_name: &str, signal_name: &str) -> Result<()> {
    let mut doc = load(path)?;
    let message = doc
        .message_mut(message_name)
        .ok_or_else(|| EditError::MessageNotFound(message_name.to_string()))?;
    let index = message
        .signals
        .iter()
        .position(|s| s.name == signal_name)
        .ok_or_else(|| EditError::SignalNotFound {
            message: message_name.to_string(),
            signal: signal_name.to_string(),
        })?;
    message.remove_signal(index);

    save(&doc, path)?;
    println!("✓ Removed signal {} from {}", signal_name, message_name);
    Ok(())
}

fn load(path: &Path) -> Result<Document> {
    decode(path).with_context(|| format!("Failed to load {:?}", path))
}

fn save(doc: &Document, path: &Path) -> Result<()> {
    write(doc, path).with_context(|| format!("Failed to save {:?}", path))
}
