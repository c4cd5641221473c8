/// Error types for type resolution and code generation
use std::path::PathBuf;

use thiserror::Error;

use rosbridge_msg::ParseError;

/// Errors raised while resolving types or building declarations
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A constant field's declared type is not a recognized primitive
    #[error("constant type must be a primitive, got: {type_name}")]
    InvalidConstantType {
        /// The non-primitive type that was declared
        type_name: String,
    },

    /// A constant field carried no value
    #[error("constant {name} has no value")]
    MissingConstantValue {
        /// Name of the constant field
        name: String,
    },

    /// A declaration could not be rendered to Rust source
    #[error("failed to render declaration: {0}")]
    Render(#[from] syn::Error),

    /// IO error while writing a declaration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for emitter operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Errors raised by the generation driver
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Interface parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Resolution or emission error
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// IO error while walking inputs or writing outputs
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No output directory configured
    #[error("output directory is required but not set")]
    OutputDirectoryRequired,

    /// Neither an input directory nor input files configured
    #[error("no input files provided to generator")]
    NoInputFiles,

    /// An explicitly included input file does not exist
    #[error("input file not found: {path}")]
    InputFileNotFound {
        /// The missing path
        path: PathBuf,
    },
}

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;
