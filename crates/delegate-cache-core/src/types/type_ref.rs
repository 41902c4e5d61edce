//! Resolved type and method references.
//!
//! [`TypeRef`] is the binder's fully substituted view of a type. It keeps
//! compile-time-only annotations (nullable references, tuple element names,
//! `dynamic`) so that the original conversion can be re-emitted verbatim, and
//! offers [`TypeRef::runtime_shape`] to strip them when comparing identity.

use crate::TypeHash;

/// A fully substituted type reference.
///
/// `Named::args` flattens the type arguments of the whole containing-type
/// chain, outermost first: `Outer<int>.Inner<string>` is
/// `Named { def: Outer.Inner, args: [int, string] }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeRef {
    /// A declared type, possibly generic.
    Named {
        /// The declared type.
        def: TypeHash,
        /// Type arguments for the whole containing chain.
        args: Vec<TypeRef>,
    },
    /// A reference to a type parameter.
    Param(TypeHash),
    /// Single-dimensional array.
    Array(Box<TypeRef>),
    /// Unmanaged pointer.
    Pointer(Box<TypeRef>),
    /// Tuple with optional element names.
    Tuple(Vec<TupleElement>),
    /// Nullable reference annotation (compile-time only).
    Nullable(Box<TypeRef>),
    /// Dynamically typed reference (`object` at runtime).
    Dynamic,
    /// The root object type.
    Object,
}

/// One element of a tuple type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TupleElement {
    /// Element type.
    pub ty: TypeRef,
    /// Optional element name (compile-time only).
    pub name: Option<String>,
}

impl TupleElement {
    /// Unnamed tuple element.
    pub fn new(ty: TypeRef) -> Self {
        Self { ty, name: None }
    }

    /// Named tuple element.
    pub fn named(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: Some(name.into()),
        }
    }
}

impl TypeRef {
    /// Non-generic named type.
    pub fn named(def: TypeHash) -> Self {
        TypeRef::Named {
            def,
            args: Vec::new(),
        }
    }

    /// Generic named type with arguments.
    pub fn generic(def: TypeHash, args: Vec<TypeRef>) -> Self {
        TypeRef::Named { def, args }
    }

    /// Type parameter reference.
    pub fn param(hash: TypeHash) -> Self {
        TypeRef::Param(hash)
    }

    /// Array of `element`.
    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    /// Pointer to `pointee`.
    pub fn pointer(pointee: TypeRef) -> Self {
        TypeRef::Pointer(Box::new(pointee))
    }

    /// Tuple of the given elements.
    pub fn tuple(elements: Vec<TupleElement>) -> Self {
        TypeRef::Tuple(elements)
    }

    /// Nullable annotation of `inner`.
    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    /// Whether no type parameter occurs anywhere in this type.
    pub fn is_closed(&self) -> bool {
        let mut closed = true;
        self.visit_params(&mut |_| closed = false);
        closed
    }

    /// Call `f` for every type parameter reference, in left-to-right order.
    pub fn visit_params(&self, f: &mut impl FnMut(TypeHash)) {
        match self {
            TypeRef::Named { args, .. } => args.iter().for_each(|a| a.visit_params(f)),
            TypeRef::Param(hash) => f(*hash),
            TypeRef::Array(inner) | TypeRef::Pointer(inner) | TypeRef::Nullable(inner) => {
                inner.visit_params(f)
            }
            TypeRef::Tuple(elements) => elements.iter().for_each(|e| e.ty.visit_params(f)),
            TypeRef::Dynamic | TypeRef::Object => {}
        }
    }

    /// Rebuild this type, replacing each parameter for which `f` returns `Some`.
    pub fn map_params(&self, f: &impl Fn(TypeHash) -> Option<TypeRef>) -> TypeRef {
        match self {
            TypeRef::Named { def, args } => TypeRef::Named {
                def: *def,
                args: args.iter().map(|a| a.map_params(f)).collect(),
            },
            TypeRef::Param(hash) => f(*hash).unwrap_or(TypeRef::Param(*hash)),
            TypeRef::Array(inner) => TypeRef::array(inner.map_params(f)),
            TypeRef::Pointer(inner) => TypeRef::pointer(inner.map_params(f)),
            TypeRef::Nullable(inner) => TypeRef::nullable(inner.map_params(f)),
            TypeRef::Tuple(elements) => TypeRef::Tuple(
                elements
                    .iter()
                    .map(|e| TupleElement {
                        ty: e.ty.map_params(f),
                        name: e.name.clone(),
                    })
                    .collect(),
            ),
            TypeRef::Dynamic | TypeRef::Object => self.clone(),
        }
    }

    /// The type as the runtime sees it.
    ///
    /// Nullable annotations and tuple element names are dropped and `dynamic`
    /// becomes `object`. Two conversions whose target types have the same
    /// runtime shape produce interchangeable delegates.
    pub fn runtime_shape(&self) -> TypeRef {
        match self {
            TypeRef::Named { def, args } => TypeRef::Named {
                def: *def,
                args: args.iter().map(TypeRef::runtime_shape).collect(),
            },
            TypeRef::Param(hash) => TypeRef::Param(*hash),
            TypeRef::Array(inner) => TypeRef::array(inner.runtime_shape()),
            TypeRef::Pointer(inner) => TypeRef::pointer(inner.runtime_shape()),
            TypeRef::Nullable(inner) => inner.runtime_shape(),
            TypeRef::Tuple(elements) => TypeRef::Tuple(
                elements
                    .iter()
                    .map(|e| TupleElement::new(e.ty.runtime_shape()))
                    .collect(),
            ),
            TypeRef::Dynamic | TypeRef::Object => TypeRef::Object,
        }
    }
}

/// A fully substituted reference to a method.
///
/// For local functions lifted out of generic methods, `type_args` starts with
/// the implicitly captured type parameters of the enclosing methods
/// (outermost first), followed by the function's own type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodRef {
    /// The method declaration.
    pub method: TypeHash,
    /// The (possibly constructed) type declaring the method.
    pub containing_type: TypeRef,
    /// Method type arguments.
    pub type_args: Vec<TypeRef>,
}

impl MethodRef {
    /// Reference to a non-generic method on a non-generic type.
    pub fn new(method: TypeHash, containing_type: TypeRef) -> Self {
        Self {
            method,
            containing_type,
            type_args: Vec::new(),
        }
    }

    /// Set the method type arguments.
    pub fn with_type_args(mut self, type_args: Vec<TypeRef>) -> Self {
        self.type_args = type_args;
        self
    }

    /// Call `f` for every type parameter reference in the containing type and
    /// the method type arguments.
    pub fn visit_params(&self, f: &mut impl FnMut(TypeHash)) {
        self.containing_type.visit_params(f);
        self.type_args.iter().for_each(|a| a.visit_params(f));
    }

    /// Rebuild with parameters replaced (see [`TypeRef::map_params`]).
    pub fn map_params(&self, f: &impl Fn(TypeHash) -> Option<TypeRef>) -> MethodRef {
        MethodRef {
            method: self.method,
            containing_type: self.containing_type.map_params(f),
            type_args: self.type_args.iter().map(|a| a.map_params(f)).collect(),
        }
    }

    /// The method reference as the runtime sees it.
    pub fn runtime_shape(&self) -> MethodRef {
        MethodRef {
            method: self.method,
            containing_type: self.containing_type.runtime_shape(),
            type_args: self.type_args.iter().map(TypeRef::runtime_shape).collect(),
        }
    }
}
