//! Wire format detection and reader dispatch.
//!
//! [`FormatSniffer`] looks at no more than the first 128 bytes of a
//! document, [`SmartReader`] hands the document to the [`FormatReader`]
//! configured for the detected format.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod format;
mod reader;

// -----------------------------------------------------------------------------
// Exports

pub use error::{ReadError, SniffError};
pub use format::{FormatSniffer, WireFormat};
pub use reader::{FormatReader, SmartReader};
