//! Canonical DBC writer
//!
//! Turns a [`Document`] into DBC text. The output is deterministic: the same
//! document always produces the same bytes. Nothing is validated; whatever
//! the document holds is written out as is.

use crate::dbc::number::format_float;
use crate::model::{ByteOrder, Document, Message, Signal, SENTINEL_NODE};
use crate::types::{WriteError, WriteResult};
use std::collections::BTreeSet;
use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use tempfile::NamedTempFile;

/// Symbols listed under `NS_ :`, written verbatim in every file
pub static NEW_SYMBOLS: &[&str] = &[
    "NS_DESC_",
    "CM_",
    "BA_DEF_",
    "BA_",
    "VAL_",
    "CAT_DEF_",
    "CAT_",
    "FILTER",
    "BA_DEF_DEF_",
    "EV_DATA_",
    "ENVVAR_DATA_",
    "SGTYPE_",
    "SGTYPE_VAL_",
    "BA_DEF_SGTYPE_",
    "BA_SGTYPE_",
    "SIG_TYPE_REF_",
    "VAL_TABLE_",
    "SIG_GROUP_",
    "SIG_VALTYPE_",
    "SIGTYPE_VALTYPE_",
    "BO_TX_BU_",
    "BA_DEF_REL_",
    "BA_REL_",
    "BA_DEF_DEF_REL_",
    "BU_SG_REL_",
    "BU_EV_REL_",
    "BU_BO_REL_",
    "SG_MUL_VAL_",
];

/// Serialize a document to DBC text
///
/// Trailing whitespace is trimmed and the result ends with exactly one newline.
pub fn serialize(document: &Document) -> String {
    DbcText(document).to_string()
}

/// Serialize a document and write it to `path`
///
/// The text goes to a temporary file next to `path` first, which then
/// replaces `path`. On failure the destination is left as it was. An
/// existing destination keeps its permissions; a new one gets the usual
/// umask-filtered mode.
pub fn write(document: &Document, path: &Path) -> WriteResult<()> {
    log::info!("Writing DBC file: {:?}", path);

    let text = serialize(document);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = create_temp_file(dir).map_err(|e| WriteError::io(path, e))?;
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| WriteError::io(path, e))?;
    }
    temp.write_all(text.as_bytes())
        .and_then(|_| temp.flush())
        .map_err(|e| WriteError::io(path, e))?;
    temp.persist(path).map_err(|e| WriteError::io(path, e.error))?;

    log::debug!(
        "Wrote {} messages ({} bytes) to {:?}",
        document.messages.len(),
        text.len(),
        path
    );
    Ok(())
}

/// Scratch file in `dir`, created with the mode a plain `File::create` would get
#[cfg(unix)]
fn create_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .prefix(".dbc-")
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn create_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    tempfile::Builder::new().prefix(".dbc-").tempfile_in(dir)
}

/// Node names for the `BU_` line: every sender and receiver, sorted, once each
pub fn node_names(document: &Document) -> Vec<&str> {
    let mut nodes = BTreeSet::new();
    for message in &document.messages {
        nodes.extend(message.senders.iter().map(String::as_str));
        for signal in &message.signals {
            nodes.extend(signal.receivers.iter().map(String::as_str));
        }
    }
    nodes.into_iter().filter(|n| !n.is_empty()).collect()
}

/// Borrowing wrapper whose `Display` output is the DBC text of a document
///
/// Same text as [`serialize`]: trailing whitespace trimmed, one final newline.
#[derive(Debug, Clone, Copy)]
pub struct DbcText<'a>(pub &'a Document);

impl fmt::Display for DbcText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        write_document(&mut text, self.0)?;
        f.write_str(text.trim_end())?;
        f.write_char('\n')
    }
}

fn write_document(out: &mut String, document: &Document) -> fmt::Result {
    writeln!(
        out,
        "VERSION \"{}\"",
        document.version.as_deref().unwrap_or("")
    )?;
    writeln!(out)?;

    writeln!(out, "NS_ :")?;
    for symbol in NEW_SYMBOLS {
        writeln!(out, "\t{}", symbol)?;
    }
    writeln!(out)?;
    writeln!(out, "BS_:")?;
    writeln!(out)?;

    let nodes = node_names(document);
    if nodes.is_empty() {
        writeln!(out, "BU_: {}", SENTINEL_NODE)?;
    } else {
        writeln!(out, "BU_: {}", nodes.join(" "))?;
    }

    for message in &document.messages {
        writeln!(out)?;
        write_message(out, message)?;
    }

    Ok(())
}

fn write_message(out: &mut String, message: &Message) -> fmt::Result {
    writeln!(
        out,
        "BO_ {} {}: {} {}",
        message.frame_id,
        message.name,
        message.length,
        message.sender().unwrap_or(SENTINEL_NODE)
    )?;
    for signal in &message.signals {
        write_signal(out, signal)?;
    }
    Ok(())
}

fn write_signal(out: &mut String, signal: &Signal) -> fmt::Result {
    let endian = match signal.byte_order {
        ByteOrder::LittleEndian => '1',
        ByteOrder::BigEndian => '0',
    };
    let sign = if signal.is_signed { '-' } else { '+' };
    let receivers = if signal.receivers.is_empty() {
        SENTINEL_NODE.to_string()
    } else {
        signal.receivers.join(",")
    };

    writeln!(
        out,
        " SG_ {} : {}|{}@{}{} ({},{}) [{}|{}] \"{}\" {}",
        signal.name,
        signal.start,
        signal.length,
        endian,
        sign,
        format_float(signal.scale),
        format_float(signal.offset),
        format_float(signal.minimum.unwrap_or(0.0)),
        format_float(signal.maximum.unwrap_or(0.0)),
        signal.unit,
        receivers
    )
}
