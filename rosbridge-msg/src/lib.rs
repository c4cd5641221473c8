#![deny(
    unsafe_code,
    unused_must_use,
    unreachable_pub,
    rust_2018_idioms,
    missing_docs,
    clippy::pedantic
)]

//! # rosbridge-msg
//!
//! Parser for ROS interface definition files (`.msg`, `.srv`, `.action`)
//! producing the field model consumed by the rosbridge code generator.
//!
//! The grammar is the line-oriented robotics message format: one field per
//! line (`TYPE [ARRAY]? NAME (= VALUE)?`), `#` comments, `---` group
//! separators, and tab-indented nested sub-fields. Parsing is strict: a line
//! that does not match the grammar rejects the file.
//!
//! ## Quick start
//!
//! ```rust
//! use rosbridge_msg::{TypeName, parse_message, parse_service};
//!
//! let msg = parse_message(
//!     TypeName::parse("sensor_msgs/Temperature"),
//!     "float64 temperature\nfloat64 variance",
//! )?;
//! assert_eq!(msg.fields.len(), 2);
//!
//! let srv = parse_service(
//!     TypeName::parse("my_srvs/AddTwoInts"),
//!     "int64 a\nint64 b\n---\nint64 sum",
//! )?;
//! assert_eq!(srv.request.len(), 2);
//! assert_eq!(srv.response.len(), 1);
//! # Ok::<(), rosbridge_msg::ParseError>(())
//! ```

/// Error types for interface parsing
pub mod errors;

/// The interface field model
pub mod types;

/// The line-oriented grammar parser
pub mod parser;

pub use errors::{ParseError, ParseResult};
pub use parser::{
    COMMENT_DELIMITER, GROUP_SEPARATOR, parse_action, parse_groups, parse_interface_file,
    parse_message, parse_ros_type, parse_service,
};
pub use types::{
    Action, ArraySpec, Field, InterfaceKind, Message, PACKAGE_SEPARATOR, RosType, Service,
    TypeName,
};

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
    fn test_reexported_pipeline() {
        let action = parse_ros_type(
            InterfaceKind::Action,
            TypeName::parse("my_actions/Countdown"),
            "int32 start\n---\nbool done\n---\nint32 remaining",
        )
        .unwrap();
        assert_eq!(action.kind(), InterfaceKind::Action);
        assert_eq!(action.name().to_string(), "my_actions/Countdown");
    }
}
