#![deny(
    unsafe_code,
    unused_must_use,
    unreachable_pub,
    rust_2018_idioms,
    missing_docs,
    clippy::pedantic
)]

//! # rosbridge-codegen
//!
//! Generates Rust source for a rosbridge client from parsed ROS interface
//! definitions: serde-serializable data structs with constructors and
//! associated constants, a publish wrapper per message, and a call/response
//! wrapper per service.
//!
//! The pipeline is: [`rosbridge_msg`] parses a `.msg`/`.srv`/`.action` file
//! into a [`rosbridge_msg::RosType`]; [`Emitter`] resolves every field type
//! through [`TypeResolver`] and builds immutable [`Declaration`] trees; a
//! [`DeclarationSink`] serializes each declaration to a file. [`Generator`]
//! wires the three together over a directory of interface files.
//!
//! # Example
//!
//! ```no_run
//! use rosbridge_codegen::Generator;
//!
//! Generator::new()
//!     .input_dir("interfaces")
//!     .output_dir("src/generated")
//!     .emit_rerun_if_changed(true)
//!     .generate()
//!     .expect("generation failed");
//! ```

/// Generator configuration and naming tables
pub mod config;

/// Declaration trees and the writer boundary
pub mod declaration;

/// Declaration emission
pub mod emit;

/// Error types
pub mod errors;

/// The generation driver
pub mod generator;

/// Field type resolution
pub mod resolve;

mod tokens;

pub use config::{
    CodegenConfig, DEFAULT_CLIENT_CRATE, DEFAULT_MESSAGES_ROOT, FEEDBACK_SUFFIX, GOAL_SUFFIX,
    REQUEST_SUFFIX, RESPONSE_SUFFIX, RESULT_SUFFIX, TOPIC_SUFFIX, WELL_KNOWN_PACKAGES,
    sanitize_rust_identifier,
};
pub use declaration::{Declaration, DeclarationSink, FsSink};
pub use emit::Emitter;
pub use errors::{CodegenError, CodegenResult, GeneratorError, GeneratorResult};
pub use generator::Generator;
pub use resolve::TypeResolver;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_emit_through_reexports() {
        let config = CodegenConfig::new();
        let emitter = Emitter::new(&config);
        let msg = rosbridge_msg::parse_message(
            rosbridge_msg::TypeName::parse("my_msgs/Ping"),
            "uint32 seq",
        )
        .unwrap();
        let declarations = emitter.emit(&rosbridge_msg::RosType::Message(msg)).unwrap();
        assert_eq!(declarations.len(), 2);
    }
}
