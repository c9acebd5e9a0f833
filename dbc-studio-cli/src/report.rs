//! Text listing of a DBC document

use dbc_studio_core::{
    format_float, node_names, ByteOrder, Document, FrameIdFormat, Message, Signal,
};
use std::fmt::{self, Write};

/// Render the header plus the messages at `indices`
pub fn render_listing(
    doc: &Document,
    indices: &[usize],
    format: FrameIdFormat,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(
        out,
        "VERSION \"{}\"  ({} messages, {} signals)",
        doc.version.as_deref().unwrap_or(""),
        doc.messages.len(),
        doc.signal_count()
    )?;
    let nodes = node_names(doc);
    if nodes.is_empty() {
        writeln!(out, "Nodes: (none)")?;
    } else {
        writeln!(out, "Nodes: {}", nodes.join(" "))?;
    }

    for message in indices.iter().filter_map(|&idx| doc.messages.get(idx)) {
        writeln!(out)?;
        render_message(&mut out, message, format)?;
    }

    Ok(out)
}

fn render_message(out: &mut String, message: &Message, format: FrameIdFormat) -> fmt::Result {
    writeln!(
        out,
        "{}  {}  [{} bytes, sender {}]",
        message.display_id(format),
        message.name,
        message.length,
        message.sender().unwrap_or("-")
    )?;
    for signal in &message.signals {
        writeln!(out, "    {}", signal_summary(signal))?;
    }
    Ok(())
}

/// One-line description of a signal
pub fn signal_summary(signal: &Signal) -> String {
    let endian = match signal.byte_order {
        ByteOrder::LittleEndian => "LE",
        ByteOrder::BigEndian => "BE",
    };
    let sign = if signal.is_signed { "signed" } else { "unsigned" };
    let limit = |value: Option<f64>| value.map(format_float).unwrap_or_else(|| "-".to_string());
    let receivers = if signal.receivers.is_empty() {
        "-".to_string()
    } else {
        signal.receivers.join(",")
    };

    format!(
        "{}  {}|{} {} {}  ({},{}) [{}|{}] \"{}\" -> {}",
        signal.name,
        signal.start,
        signal.length,
        endian,
        sign,
        format_float(signal.scale),
        format_float(signal.offset),
        limit(signal.minimum),
        limit(signal.maximum),
        signal.unit,
        receivers
    )
}
