use alloc::boxed::Box;
use std::io;

use thiserror::Error;

use crate::sniff::WireFormat;

/// The error a [`FormatReader`](super::FormatReader) reports.
pub type ReadError = Box<dyn core::error::Error + Send + Sync>;

/// An error detecting or dispatching a wire format.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SniffError {
    /// The prefix matches no wire format.
    #[error("unrecognized wire format")]
    Unrecognized,
    /// The format was recognized but no reader is configured for it.
    #[error("no reader configured for the {format} format")]
    NoReader { format: WireFormat },
    /// The stream failed while reading the prefix or skipping the BOM.
    #[error("cannot read the document prefix")]
    Io(#[from] io::Error),
    /// The stream cannot return to the start of the prefix.
    #[error("cannot rewind the stream after sniffing")]
    Rewind(#[source] io::Error),
    /// The format reader failed.
    #[error("cannot read the {format} document")]
    Read {
        format: WireFormat,
        #[source]
        source: ReadError,
    },
}
