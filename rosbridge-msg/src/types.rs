/// Core types of the interface field model
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Separator between a package name and a local type name
pub const PACKAGE_SEPARATOR: char = '/';

/// A possibly package-qualified type name such as `geometry_msgs/Vector3`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeName {
    /// Package the type belongs to, `None` for primitives and local references
    pub package: Option<String>,
    /// Local type name without the package part
    pub name: String,
}

impl TypeName {
    /// Create a type name with an explicit package
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeName {
            package: Some(package.into()),
            name: name.into(),
        }
    }

    /// Create a package-less type name
    pub fn local(name: impl Into<String>) -> Self {
        TypeName {
            package: None,
            name: name.into(),
        }
    }

    /// Split a raw token at its last `/` into package and local name
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.rsplit_once(PACKAGE_SEPARATOR) {
            Some((package, name)) => TypeName::qualified(package, name),
            None => TypeName::local(raw),
        }
    }

    /// Derive a new name with `suffix` appended to the local part only,
    /// keeping the package (builds `FooRequest` from `Foo`)
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        TypeName {
            package: self.package.clone(),
            name: format!("{}{suffix}", self.name),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref package) = self.package {
            write!(f, "{package}{PACKAGE_SEPARATOR}{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Array arity of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArraySpec {
    /// Not an array
    #[default]
    Scalar,
    /// Unbounded array, declared as `[]`
    Unbounded,
    /// Fixed-length array, declared as `[N]`
    Fixed(u32),
}

impl ArraySpec {
    /// Whether the field is an array at all
    #[must_use]
    pub fn is_array(self) -> bool {
        !matches!(self, ArraySpec::Scalar)
    }

    /// The fixed length, if one was declared
    #[must_use]
    pub fn length(self) -> Option<u32> {
        match self {
            ArraySpec::Fixed(len) => Some(len),
            _ => None,
        }
    }
}

impl fmt::Display for ArraySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArraySpec::Scalar => Ok(()),
            ArraySpec::Unbounded => write!(f, "[]"),
            ArraySpec::Fixed(len) => write!(f, "[{len}]"),
        }
    }
}

/// One declared member of an interface type
///
/// A field with a value is a named constant rather than an instance member.
/// `children` holds sub-fields declared one tab level deeper in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Declared type of the field
    pub ty: TypeName,
    /// Field name
    pub name: String,
    /// Literal value for constants, `None` for instance members
    pub value: Option<String>,
    /// Array arity
    pub array: ArraySpec,
    /// Nested sub-fields, in declaration order
    pub children: Vec<Field>,
}

impl Field {
    /// Create a scalar instance field
    pub fn new(ty: TypeName, name: impl Into<String>) -> Self {
        Field {
            ty,
            name: name.into(),
            value: None,
            array: ArraySpec::Scalar,
            children: Vec::new(),
        }
    }

    /// Attach a constant value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach an array arity
    #[must_use]
    pub fn with_array(mut self, array: ArraySpec) -> Self {
        self.array = array;
        self
    }

    /// Whether the field is an array
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.array.is_array()
    }

    /// Whether the field is a named constant
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.value.is_some()
    }

    /// Whether the field is an instance member
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.value.is_none()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.ty, self.array, self.name)?;
        if let Some(ref value) = self.value {
            write!(f, " = {value}")?;
        }
        Ok(())
    }
}

/// Parsed representation of a `.msg` file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Message {
    /// Qualified message name
    pub name: TypeName,
    /// Declared fields, in document order
    pub fields: Vec<Field>,
}

/// Parsed representation of a `.srv` file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Service {
    /// Qualified service name
    pub name: TypeName,
    /// Request fields (first group)
    pub request: Vec<Field>,
    /// Response fields (second group)
    pub response: Vec<Field>,
}

/// Parsed representation of an `.action` file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Action {
    /// Qualified action name
    pub name: TypeName,
    /// Goal fields (first group)
    pub goal: Vec<Field>,
    /// Result fields (second group)
    pub result: Vec<Field>,
    /// Feedback fields (third group)
    pub feedback: Vec<Field>,
}

/// A parsed interface file, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RosType {
    /// A message definition
    Message(Message),
    /// A service definition
    Service(Service),
    /// An action definition
    Action(Action),
}

impl RosType {
    /// Qualified name of the interface
    #[must_use]
    pub fn name(&self) -> &TypeName {
        match self {
            RosType::Message(m) => &m.name,
            RosType::Service(s) => &s.name,
            RosType::Action(a) => &a.name,
        }
    }

    /// Interface kind of this value
    #[must_use]
    pub fn kind(&self) -> InterfaceKind {
        match self {
            RosType::Message(_) => InterfaceKind::Message,
            RosType::Service(_) => InterfaceKind::Service,
            RosType::Action(_) => InterfaceKind::Action,
        }
    }
}

/// Kind of an interface file, selected by the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterfaceKind {
    /// Message file (.msg)
    Message,
    /// Service file (.srv)
    Service,
    /// Action file (.action)
    Action,
}

impl InterfaceKind {
    /// File extension for this kind
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            InterfaceKind::Message => "msg",
            InterfaceKind::Service => "srv",
            InterfaceKind::Action => "action",
        }
    }

    /// Parse the kind from a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "msg" => Some(InterfaceKind::Message),
            "srv" => Some(InterfaceKind::Service),
            "action" => Some(InterfaceKind::Action),
            _ => None,
        }
    }

    /// Number of `---`-separated groups the kind requires
    #[must_use]
    pub const fn expected_groups(self) -> usize {
        match self {
            InterfaceKind::Message => 1,
            InterfaceKind::Service => 2,
            InterfaceKind::Action => 3,
        }
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
