//! Error types for Huffman compression.

use thiserror::Error;

/// Error variants for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// Compression was requested on a zero-length input; no tree can be built.
    #[error("empty input: cannot build a code tree from zero symbols")]
    EmptyInput,

    /// The tree header is inconsistent with the bytes that follow it.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The message section ends before the declared bits are available.
    #[error("truncated message: {0}")]
    TruncatedMessage(String),

    /// A byte has no entry in the codebook used to encode it.
    #[error("unknown symbol: byte 0x{0:02x} has no code")]
    UnknownSymbol(u8),

    /// An I/O error occurred while reading input or writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedHeader(reason.into())
    }

    pub(crate) fn truncated(reason: impl Into<String>) -> Self {
        Error::TruncatedMessage(reason.into())
    }
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
