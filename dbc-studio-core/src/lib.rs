//! DBC Studio Core Library
//!
//! The document model and the DBC text codec behind DBC Studio: message,
//! signal and node records of Vector DBC files, a deterministic writer, and
//! a loader that projects parsed DBC files onto the model.
//!
//! # Architecture
//!
//! The library is intentionally small:
//! - [`Document`], [`Message`] and [`Signal`] are plain values, edited in place
//! - [`serialize`] / [`write`] produce canonical DBC text
//! - [`decode`] loads a file through a [`DatabaseLoader`] (by default the
//!   `can-dbc` parser)
//!
//! The library does NOT:
//! - Validate names, bit layouts or frame ID ranges
//! - Encode or decode raw signal values
//! - Handle comments, attributes, value tables or multiplexing
//!
//! Presentation (listing, editing commands) lives in the application layer
//! (dbc-studio-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use dbc_studio_core::{decode, write, EditorDefaults};
//! use std::path::Path;
//!
//! let mut doc = decode(Path::new("powertrain.dbc")).unwrap();
//!
//! let defaults = EditorDefaults::new();
//! let message = doc.add_message(&defaults);
//! message.senders.push("Gateway".to_string());
//! message.add_signal(&defaults).unit = "km/h".to_string();
//!
//! write(&doc, Path::new("powertrain.dbc")).unwrap();
//! ```

// Public modules
pub mod config;
pub mod dbc;
pub mod model;
pub mod types;

// Re-export main types for convenience
pub use config::EditorDefaults;
pub use dbc::{
    decode, format_float, node_names, serialize, write, CanDbcLoader, DatabaseLoader, DbcText,
};
pub use model::{ByteOrder, Document, FrameIdFormat, Message, Signal, SENTINEL_NODE};
pub use types::{DecodeError, DecodeResult, WriteError, WriteResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
