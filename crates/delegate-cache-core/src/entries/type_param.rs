//! Generic type parameter entry.
//!
//! This module provides `TypeParamEntry` for type parameters such as `T` in
//! `Box<T>` or `M` in `Test<M>()`, together with their constraints.

use crate::{TypeHash, TypeRef};

/// The declaration a type parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericOwner {
    /// Declared on a type.
    Type(TypeHash),
    /// Declared on a method (including local functions).
    Method(TypeHash),
}

impl GenericOwner {
    /// Hash of the owning declaration.
    pub fn hash(self) -> TypeHash {
        match self {
            GenericOwner::Type(hash) | GenericOwner::Method(hash) => hash,
        }
    }

    /// Whether the owner is a method.
    pub fn is_method(self) -> bool {
        matches!(self, GenericOwner::Method(_))
    }
}

/// A constraint on a type parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeConstraint {
    /// `class`
    ReferenceType,
    /// `struct`
    ValueType,
    /// `unmanaged`
    Unmanaged,
    /// `new()`
    DefaultConstructor,
    /// Must derive from or implement the given type. May mention other type
    /// parameters, e.g. `where M : T`.
    Type(TypeRef),
}

impl TypeConstraint {
    /// Call `f` for every type parameter the constraint mentions.
    pub fn visit_params(&self, f: &mut impl FnMut(TypeHash)) {
        if let TypeConstraint::Type(ty) = self {
            ty.visit_params(f);
        }
    }
}

/// Symbol table entry for a generic type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamEntry {
    /// Parameter name (e.g., "T", "K", "V").
    pub name: String,
    /// Position within the owner's own parameter list (0-based).
    pub index: usize,
    /// The declaration this parameter belongs to.
    pub owner: GenericOwner,
    /// Identity of this parameter.
    pub type_hash: TypeHash,
    /// Declared constraints, in source order.
    pub constraints: Vec<TypeConstraint>,
}

impl TypeParamEntry {
    /// Create a parameter; its hash is derived from owner and index.
    pub fn new(name: impl Into<String>, index: usize, owner: GenericOwner) -> Self {
        Self {
            name: name.into(),
            index,
            owner,
            type_hash: TypeHash::from_type_param(owner.hash(), index),
            constraints: Vec::new(),
        }
    }

    /// Add a constraint.
    pub fn with_constraint(mut self, constraint: TypeConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}
