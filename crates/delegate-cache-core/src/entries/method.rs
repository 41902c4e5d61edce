//! Declared method entry.

use crate::{MethodKind, TypeHash};

/// Symbol table entry for a method, local function, or lambda body.
///
/// The hash is derived from the lexical owner (the enclosing method for nested
/// functions, otherwise the declaring type), the name and the parameter types.
/// Builders that change any of these recompute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    /// Method name.
    pub name: String,
    /// Method hash for identity.
    pub method_hash: TypeHash,
    /// Declaring type.
    pub owner_type: TypeHash,
    /// Lexically enclosing method, for local functions and lambdas.
    pub outer_method: Option<TypeHash>,
    /// Kind of method.
    pub kind: MethodKind,
    /// Whether the method is static.
    pub is_static: bool,
    /// Parameter type hashes, used to tell overloads apart.
    pub signature: Vec<TypeHash>,
    /// Own type parameters, in declaration order.
    pub type_params: Vec<TypeHash>,
}

impl MethodEntry {
    /// Create an instance method entry.
    pub fn new(owner_type: TypeHash, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            method_hash: TypeHash::from_method(owner_type, &name, &[]),
            name,
            owner_type,
            outer_method: None,
            kind: MethodKind::Ordinary,
            is_static: false,
            signature: Vec::new(),
            type_params: Vec::new(),
        }
    }

    /// Create a static method entry.
    pub fn static_method(owner_type: TypeHash, name: impl Into<String>) -> Self {
        Self::new(owner_type, name).with_static(true)
    }

    /// Set whether the method is static.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Set the method kind.
    pub fn with_kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    /// Nest this method inside `outer` (local function or lambda).
    pub fn nested_in(mut self, outer: TypeHash) -> Self {
        self.outer_method = Some(outer);
        self.rehash();
        self
    }

    /// Set the parameter types used for overload identity.
    pub fn with_signature(mut self, signature: Vec<TypeHash>) -> Self {
        self.signature = signature;
        self.rehash();
        self
    }

    /// Whether this method declares type parameters of its own.
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    fn rehash(&mut self) {
        let owner = self.outer_method.unwrap_or(self.owner_type);
        self.method_hash = TypeHash::from_method(owner, &self.name, &self.signature);
    }
}
