//! Build a DBC file from scratch and print it
//!
//! Usage:
//!   build_dbc [<output.dbc>]
//!
//! Without an output path the text is printed to stdout only.

use dbc_studio_core::{serialize, write, ByteOrder, Document, EditorDefaults, FrameIdFormat};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let output = env::args().nth(1).map(PathBuf::from);
    let defaults = EditorDefaults::new().with_message_base_name("Body");

    let mut doc = Document::with_version("1.0");

    let message = doc.add_message(&defaults);
    message.senders.push("BCM".to_string());
    {
        let signal = message.add_signal(&defaults);
        signal.name = "DoorOpen".to_string();
        signal.length = 1;
        signal.maximum = Some(1.0);
        signal.receivers.push("Cluster".to_string());
    }
    {
        let signal = message.add_signal(&defaults);
        signal.start = 15;
        signal.length = 16;
        signal.byte_order = ByteOrder::BigEndian;
        signal.scale = 0.01;
        signal.maximum = Some(655.35);
        signal.unit = "V".to_string();
    }

    doc.add_message(&defaults);

    println!("=== {} messages ===", doc.messages.len());
    for message in &doc.messages {
        println!(
            "{}  {} ({} signals)",
            message.display_id(FrameIdFormat::Hex),
            message.name,
            message.signals.len()
        );
    }
    println!();
    print!("{}", serialize(&doc));

    if let Some(path) = output {
        match write(&doc, &path) {
            Ok(()) => println!("\nWritten to {:?}", path),
            Err(e) => eprintln!("\nError: {}", e),
        }
    }
}
