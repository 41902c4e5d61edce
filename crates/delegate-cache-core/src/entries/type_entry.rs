//! Declared type entry.

use crate::{TypeHash, TypeKind};

/// Symbol table entry for a declared type.
///
/// Nested types record their containing type; a nested type implicitly sees
/// every type parameter of its containing chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name (`.` between nesting levels).
    pub qualified_name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Kind of type.
    pub kind: TypeKind,
    /// Lexically containing type, for nested types.
    pub containing_type: Option<TypeHash>,
    /// Own type parameters, in declaration order.
    pub type_params: Vec<TypeHash>,
}

impl TypeEntry {
    /// Create a type entry from its qualified name.
    pub fn new(qualified_name: impl Into<String>, kind: TypeKind) -> Self {
        let qualified_name = qualified_name.into();
        let name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(qualified_name.as_str())
            .to_string();
        Self {
            name,
            type_hash: TypeHash::from_name(&qualified_name),
            qualified_name,
            kind,
            containing_type: None,
            type_params: Vec::new(),
        }
    }

    /// Reference type.
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, TypeKind::Class)
    }

    /// Value type.
    pub fn structure(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, TypeKind::Struct)
    }

    /// Delegate type.
    pub fn delegate(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, TypeKind::Delegate)
    }

    /// Primitive type.
    pub fn primitive(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, TypeKind::Primitive)
    }

    /// Nest this type inside `outer`.
    pub fn with_containing(mut self, outer: TypeHash) -> Self {
        self.containing_type = Some(outer);
        self
    }

    /// Whether this type declares type parameters of its own.
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}
