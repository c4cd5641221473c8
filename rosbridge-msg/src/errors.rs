/// Error types for interface definition parsing
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for parsing `.msg`, `.srv`, and `.action` files
#[derive(Error, Debug)]
pub enum ParseError {
    /// A non-blank, non-comment, non-separator line did not match the field
    /// grammar. Parsing is strict: the whole file is rejected.
    #[error("malformed field declaration at line {line}: '{content}'")]
    MalformedField {
        /// 1-based line number in the input text
        line: usize,
        /// The offending line, without trailing whitespace
        content: String,
    },

    /// The number of `---`-separated groups does not match the interface kind
    #[error("expected {expected} field group(s) but parsed {actual}")]
    GroupCountMismatch {
        /// Group count required by the interface kind
        expected: usize,
        /// Group count actually present in the input
        actual: usize,
    },

    /// The file extension is not one of `.msg`, `.srv`, `.action`
    #[error("unsupported interface file extension: {extension}")]
    UnsupportedExtension {
        /// The unrecognized extension
        extension: String,
    },

    /// The file name has no usable stem or extension
    #[error("invalid interface file name: {path}")]
    InvalidFileName {
        /// The offending path
        path: PathBuf,
    },

    /// IO error while reading an interface file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
