//! Type model.
//!
//! - [`TypeRef`] / [`MethodRef`]: substituted references produced by the binder
//! - [`TypeKind`] / [`MethodKind`]: declaration kinds

mod type_ref;

pub use type_ref::{MethodRef, TupleElement, TypeRef};

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Reference type.
    Class,
    /// Value type.
    Struct,
    /// Interface.
    Interface,
    /// Delegate (callable) type.
    Delegate,
    /// Built-in primitive.
    Primitive,
}

impl TypeKind {
    /// Whether values of this kind are delegates.
    pub fn is_delegate(self) -> bool {
        matches!(self, TypeKind::Delegate)
    }
}

/// Kind of a declared method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Ordinary member method.
    Ordinary,
    /// Extension method (static, first parameter is the extended value).
    Extension,
    /// Local function nested in another method.
    LocalFunction,
    /// Lambda body nested in another method.
    Lambda,
    /// Static initializer of the owning type.
    StaticInitializer,
}

impl MethodKind {
    /// Whether this method is lexically nested inside another method.
    pub fn is_nested(self) -> bool {
        matches!(self, MethodKind::LocalFunction | MethodKind::Lambda)
    }
}
