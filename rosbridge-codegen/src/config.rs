//! Configuration for the code generator

/// Suffix of generated request data types
pub const REQUEST_SUFFIX: &str = "Request";

/// Suffix of generated response data types
pub const RESPONSE_SUFFIX: &str = "Response";

/// Suffix of generated topic wrapper types
pub const TOPIC_SUFFIX: &str = "Topic";

/// Suffix of generated action goal data types
pub const GOAL_SUFFIX: &str = "Goal";

/// Suffix of generated action result data types
pub const RESULT_SUFFIX: &str = "Result";

/// Suffix of generated action feedback data types
pub const FEEDBACK_SUFFIX: &str = "Feedback";

/// Client crate the generated wrappers are built against
pub const DEFAULT_CLIENT_CRATE: &str = "rosbridge";

/// Module inside the client crate that ships the well-known message packages
pub const DEFAULT_MESSAGES_ROOT: &str = "rosbridge::msgs";

/// Robotics message packages shipped with the client crate; field types from
/// these packages are re-rooted under [`CodegenConfig::messages_root`]
pub const WELL_KNOWN_PACKAGES: [&str; 12] = [
    "actionlib_msgs",
    "nav_msgs",
    "shape_msgs",
    "stereo_msgs",
    "diagnostic_msgs",
    "rosgraph_msgs",
    "std_msgs",
    "trajectory_msgs",
    "geometry_msgs",
    "sensor_msgs",
    "std_srvs",
    "visualization_msgs",
];

/// Explicit configuration for type resolution and emission
///
/// All namespace tables are carried here rather than in globals so the
/// resolver and emitter stay deterministic and unit-testable.
#[derive(Debug, Clone)]
pub struct CodegenConfig {
    /// `::`-separated module segments prepended to every output module;
    /// empty segments collapse rather than produce empty path components
    pub module_prefix: String,

    /// Path of the client crate referenced by generated wrappers
    pub client_crate: String,

    /// Absolute module path holding the well-known message packages
    pub messages_root: String,

    /// Packages re-rooted under `messages_root`
    pub well_known_packages: Vec<String>,
}

impl CodegenConfig {
    /// Create a configuration with the default client crate and package table
    #[must_use]
    pub fn new() -> Self {
        Self {
            module_prefix: String::new(),
            client_crate: DEFAULT_CLIENT_CRATE.to_string(),
            messages_root: DEFAULT_MESSAGES_ROOT.to_string(),
            well_known_packages: WELL_KNOWN_PACKAGES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether `package` is shipped with the client crate
    #[must_use]
    pub fn is_well_known(&self, package: &str) -> bool {
        self.well_known_packages.iter().any(|p| p == package)
    }

    /// Output module for a package: prefix plus package segments, with empty
    /// segments collapsed; `/` package separators become module separators
    #[must_use]
    pub fn module_of(&self, package: &str) -> String {
        let package = package.replace('/', "::");
        match (self.module_prefix.is_empty(), package.is_empty()) {
            (true, true) => String::new(),
            (true, false) => package,
            (false, true) => self.module_prefix.clone(),
            (false, false) => format!("{}::{package}", self.module_prefix),
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize an identifier to be valid Rust
///
/// Escapes Rust keywords with an `r#` prefix, converts invalid characters to
/// underscores, and guards against a leading digit.
#[must_use]
pub fn sanitize_rust_identifier(name: &str) -> String {
    if is_rust_keyword(name) {
        return format!("r#{name}");
    }

    let sanitized: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("_{sanitized}")
    } else {
        sanitized
    }
}

/// Check if a string is a Rust keyword
#[must_use]
fn is_rust_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break"
            | "const"
            | "continue"
            | "crate"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
            | "try"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_of_collapses_empty_segments() {
        let mut config = CodegenConfig::new();
        assert_eq!(config.module_of(""), "");
        assert_eq!(config.module_of("geometry_msgs"), "geometry_msgs");

        config.module_prefix = "msgs".to_string();
        assert_eq!(config.module_of(""), "msgs");
        assert_eq!(config.module_of("geometry_msgs"), "msgs::geometry_msgs");
    }

    #[test]
    fn test_module_of_converts_package_separators() {
        let config = CodegenConfig::new();
        assert_eq!(config.module_of("vendor/custom_msgs"), "vendor::custom_msgs");
    }

    #[test]
    fn test_well_known_lookup() {
        let config = CodegenConfig::new();
        assert!(config.is_well_known("std_msgs"));
        assert!(config.is_well_known("geometry_msgs"));
        assert!(!config.is_well_known("my_custom_msgs"));
    }

    #[test]
    fn test_sanitize_keywords() {
        assert_eq!(sanitize_rust_identifier("type"), "r#type");
        assert_eq!(sanitize_rust_identifier("match"), "r#match");
    }

    #[test]
    fn test_sanitize_valid_names() {
        assert_eq!(sanitize_rust_identifier("valid_name"), "valid_name");
        assert_eq!(sanitize_rust_identifier("ValidName"), "ValidName");
    }

    #[test]
    fn test_sanitize_invalid_chars_and_digits() {
        assert_eq!(sanitize_rust_identifier("invalid-name"), "invalid_name");
        assert_eq!(sanitize_rust_identifier("123name"), "_123name");
    }
}
