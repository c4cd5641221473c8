//! Mapping from interface field types to Rust type references
//!
//! Generated declarations live one module below their package module (one
//! file per declaration, re-exported by the package's `mod.rs`), so
//! references between generated types climb to the output root with
//! `super::` and descend the target module path from there. References into
//! the client crate are absolute.

use rosbridge_msg::{Field, TypeName};

use crate::config::CodegenConfig;
use crate::errors::{CodegenError, CodegenResult};

/// Resolves field types against a [`CodegenConfig`]
///
/// Total for field types: unknown compound types resolve to a reference in
/// the current (or declared) package. Only constant types can fail to
/// resolve.
pub struct TypeResolver<'a> {
    config: &'a CodegenConfig,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver over the given configuration
    #[must_use]
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self { config }
    }

    /// Look up the Rust primitive for an interface primitive type name
    ///
    /// Unsigned widths without a same-width target primitive are widened to
    /// the next larger signed type. The exact table is part of the wire
    /// contract with existing consumers and must not change.
    #[must_use]
    pub fn primitive(name: &str) -> Option<&'static str> {
        match name {
            "bool" => Some("bool"),
            "byte" => Some("i8"),
            "char" => Some("char"),
            "string" => Some("String"),
            "float32" => Some("f32"),
            "float64" => Some("f64"),
            "int8" => Some("i8"),
            "uint8" => Some("i16"),
            "int16" => Some("i16"),
            "uint16" => Some("i32"),
            "int32" => Some("i32"),
            "uint32" => Some("i64"),
            "int64" => Some("i64"),
            "uint64" => Some("i64"),
            _ => None,
        }
    }

    /// Resolve a field to a Rust type reference, wrapping arrays in `Vec`
    #[must_use]
    pub fn resolve_field(&self, field: &Field, current_package: Option<&str>) -> String {
        let base = self.resolve_base(&field.ty, current_package);
        if field.is_array() {
            format!("Vec<{base}>")
        } else {
            base
        }
    }

    /// Resolve a bare type name to a Rust type reference
    #[must_use]
    pub fn resolve_base(&self, ty: &TypeName, current_package: Option<&str>) -> String {
        let root = &self.config.messages_root;

        // Well-known non-primitive names override any declared package.
        match ty.name.as_str() {
            "Header" => return format!("{root}::std_msgs::Header"),
            "time" => return format!("{root}::std_msgs::primitive::Time"),
            "duration" => return format!("{root}::std_msgs::primitive::Duration"),
            _ => {}
        }

        if ty.package.is_none()
            && let Some(primitive) = Self::primitive(&ty.name)
        {
            return primitive.to_string();
        }

        self.resolve_compound(ty, current_package)
    }

    /// Resolve the type of a constant field
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::InvalidConstantType`] when the declared type
    /// is not in the primitive table.
    pub fn resolve_constant(&self, ty: &TypeName) -> CodegenResult<&'static str> {
        if ty.package.is_some() {
            return Err(CodegenError::InvalidConstantType {
                type_name: ty.to_string(),
            });
        }
        match Self::primitive(&ty.name) {
            // Constants live in an impl block; strings become &'static str.
            Some("String") => Ok("&'static str"),
            Some(primitive) => Ok(primitive),
            None => Err(CodegenError::InvalidConstantType {
                type_name: ty.to_string(),
            }),
        }
    }

    fn resolve_compound(&self, ty: &TypeName, current_package: Option<&str>) -> String {
        let package = ty
            .package
            .as_deref()
            .or(current_package)
            .unwrap_or_default();

        if self.config.is_well_known(package) {
            return format!(
                "{}::{package}::{}",
                self.config.messages_root, ty.name
            );
        }

        let target_module = self.config.module_of(package);
        let current_module = self.config.module_of(current_package.unwrap_or_default());
        Self::relative_reference(&current_module, &target_module, &ty.name)
    }

    /// Build a `super::`-based reference from the module of the declaration
    /// being emitted to a type in `target_module`
    fn relative_reference(current_module: &str, target_module: &str, name: &str) -> String {
        if current_module == target_module {
            // Sibling declaration, re-exported by the shared module.
            return format!("super::{name}");
        }

        let ups = "super::".repeat(module_depth(current_module) + 1);
        if target_module.is_empty() {
            format!("{ups}{name}")
        } else {
            format!("{ups}{target_module}::{name}")
        }
    }
}

fn module_depth(module: &str) -> usize {
    if module.is_empty() {
        0
    } else {
        module.split("::").count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosbridge_msg::ArraySpec;

    fn resolver_fixture() -> CodegenConfig {
        CodegenConfig::new()
    }

    #[test]
    fn test_widening_table_is_exact() {
        let cases = [
            ("bool", "bool"),
            ("byte", "i8"),
            ("char", "char"),
            ("string", "String"),
            ("float32", "f32"),
            ("float64", "f64"),
            ("int8", "i8"),
            ("uint8", "i16"),
            ("int16", "i16"),
            ("uint16", "i32"),
            ("int32", "i32"),
            ("uint32", "i64"),
            ("int64", "i64"),
            ("uint64", "i64"),
        ];
        for (ros, rust) in cases {
            assert_eq!(TypeResolver::primitive(ros), Some(rust), "for {ros}");
        }
        assert_eq!(TypeResolver::primitive("Header"), None);
    }

    #[test]
    fn test_well_known_names_override_package() {
        let config = resolver_fixture();
        let resolver = TypeResolver::new(&config);
        assert_eq!(
            resolver.resolve_base(&TypeName::local("Header"), Some("my_msgs")),
            "rosbridge::msgs::std_msgs::Header"
        );
        assert_eq!(
            resolver.resolve_base(&TypeName::parse("anything/Header"), Some("my_msgs")),
            "rosbridge::msgs::std_msgs::Header"
        );
        assert_eq!(
            resolver.resolve_base(&TypeName::local("time"), None),
            "rosbridge::msgs::std_msgs::primitive::Time"
        );
        assert_eq!(
            resolver.resolve_base(&TypeName::local("duration"), None),
            "rosbridge::msgs::std_msgs::primitive::Duration"
        );
    }

    #[test]
    fn test_local_compound_uses_current_package() {
        let config = resolver_fixture();
        let resolver = TypeResolver::new(&config);
        // Same package: the sibling re-export one level up.
        assert_eq!(
            resolver.resolve_base(&TypeName::local("Vector3"), Some("my_msgs")),
            "super::Vector3"
        );
    }

    #[test]
    fn test_cross_package_reference_climbs_to_output_root() {
        let config = resolver_fixture();
        let resolver = TypeResolver::new(&config);
        assert_eq!(
            resolver.resolve_base(&TypeName::parse("other_msgs/Imu"), Some("my_msgs")),
            "super::super::other_msgs::Imu"
        );
    }

    #[test]
    fn test_well_known_package_is_rerooted() {
        let config = resolver_fixture();
        let resolver = TypeResolver::new(&config);
        assert_eq!(
            resolver.resolve_base(&TypeName::parse("geometry_msgs/Pose"), Some("my_msgs")),
            "rosbridge::msgs::geometry_msgs::Pose"
        );
    }

    #[test]
    fn test_module_prefix_deepens_references() {
        let mut config = resolver_fixture();
        config.module_prefix = "msgs".to_string();
        let resolver = TypeResolver::new(&config);
        assert_eq!(
            resolver.resolve_base(&TypeName::parse("other_msgs/Imu"), Some("my_msgs")),
            "super::super::super::msgs::other_msgs::Imu"
        );
        assert_eq!(
            resolver.resolve_base(&TypeName::local("Vector3"), Some("my_msgs")),
            "super::Vector3"
        );
    }

    #[test]
    fn test_array_wraps_in_vec() {
        let config = resolver_fixture();
        let resolver = TypeResolver::new(&config);
        let field = Field::new(TypeName::local("float64"), "values")
            .with_array(ArraySpec::Unbounded);
        assert_eq!(resolver.resolve_field(&field, None), "Vec<f64>");

        let field =
            Field::new(TypeName::local("uint8"), "data").with_array(ArraySpec::Fixed(16));
        assert_eq!(resolver.resolve_field(&field, None), "Vec<i16>");
    }

    #[test]
    fn test_constant_types() {
        let config = resolver_fixture();
        let resolver = TypeResolver::new(&config);
        assert_eq!(
            resolver.resolve_constant(&TypeName::local("int32")).unwrap(),
            "i32"
        );
        assert_eq!(
            resolver.resolve_constant(&TypeName::local("string")).unwrap(),
            "&'static str"
        );
        assert!(matches!(
            resolver.resolve_constant(&TypeName::parse("geometry_msgs/Pose")),
            Err(CodegenError::InvalidConstantType { .. })
        ));
        assert!(matches!(
            resolver.resolve_constant(&TypeName::local("Pose")),
            Err(CodegenError::InvalidConstantType { .. })
        ));
    }
}
