//! DBC text reading and writing
//!
//! This module contains the canonical writer, the float formatter it relies
//! on, and the loader that maps parsed DBC files onto the document model.

pub mod number;
pub mod reader;
pub mod writer;

// Re-export key items for convenience
pub use number::format_float;
pub use reader::{decode, CanDbcLoader, DatabaseLoader};
pub use writer::{node_names, serialize, write, DbcText, NEW_SYMBOLS};
