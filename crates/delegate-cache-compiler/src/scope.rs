//! Scope resolution.
//!
//! Maps a request's free type parameters to the broadest scope that can host
//! its cache cell:
//!
//! | Free parameters               | Scope                    |
//! |-------------------------------|--------------------------|
//! | none                          | `Module`                 |
//! | enclosing type chain only     | `Type(enclosing_type)`   |
//! | any on enclosing method chain | `Method(innermost user)` |
//!
//! A scope narrower than necessary re-materializes the delegate for every
//! extra instantiation; a broader one would name a type parameter where it is
//! not in scope.

use delegate_cache_core::{CacheError, ConversionRequest, TypeHash, TypeRef};
use delegate_cache_registry::SymbolTable;

use crate::FreeTypeParams;

/// Where a cache cell lives. Ordered by specificity: `Module < Type < Method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Shared by the whole compilation.
    Module,
    /// Instantiated once per closed enclosing type.
    Type(TypeHash),
    /// Instantiated once per closed enclosing type and closed method arguments.
    Method(TypeHash),
}

impl Scope {
    /// The declaration the scope belongs to.
    pub fn owner(self) -> Option<TypeHash> {
        match self {
            Scope::Module => None,
            Scope::Type(owner) | Scope::Method(owner) => Some(owner),
        }
    }

    /// Whether this is module scope.
    pub fn is_module(self) -> bool {
        matches!(self, Scope::Module)
    }
}

/// Resolve the scope for `request` from its free type parameters.
///
/// For method scope the owner is the innermost method of the enclosing chain
/// that declares a free parameter; inner generic methods whose parameters are
/// unused are skipped.
pub fn resolve_scope(
    free: &FreeTypeParams,
    request: &ConversionRequest,
    symbols: &SymbolTable,
) -> Result<Scope, CacheError> {
    if !free.method_level.is_empty() {
        let method = request.enclosing_method.ok_or_else(|| CacheError::Internal {
            message: "method-level type parameters without an enclosing method".to_string(),
        })?;
        let owner = symbols
            .method_chain(method)
            .into_iter()
            .rev()
            .find(|m| {
                symbols.get_method(*m).is_some_and(|entry| {
                    entry
                        .type_params
                        .iter()
                        .any(|p| free.method_level.contains(p))
                })
            })
            .ok_or_else(|| CacheError::Internal {
                message: format!(
                    "no method in the chain of '{}' declares the free parameters",
                    symbols.method_name(method)
                ),
            })?;
        return Ok(Scope::Method(owner));
    }
    if !free.type_level.is_empty() {
        return Ok(Scope::Type(request.enclosing_type));
    }
    Ok(Scope::Module)
}

/// A resolved scope plus what a container at that scope needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The scope.
    pub scope: Scope,
    /// Type the container is nested in; `None` at module scope.
    pub host: Option<TypeHash>,
    /// Method-level parameters the container must declare, in chain order.
    pub own_params: Vec<TypeHash>,
}

impl Placement {
    /// Build the placement for a resolved scope.
    pub fn new(scope: Scope, request: &ConversionRequest, free: &FreeTypeParams) -> Self {
        match scope {
            Scope::Module => Self {
                scope,
                host: None,
                own_params: Vec::new(),
            },
            Scope::Type(_) => Self {
                scope,
                host: Some(request.enclosing_type),
                own_params: Vec::new(),
            },
            Scope::Method(_) => Self {
                scope,
                host: Some(request.enclosing_type),
                own_params: free.method_level.clone(),
            },
        }
    }

    /// Type arguments that instantiate the host type from the use site.
    pub fn host_args(&self, symbols: &SymbolTable) -> Vec<TypeRef> {
        self.host
            .map(|host| {
                symbols
                    .type_params_in_scope(host)
                    .into_iter()
                    .map(TypeRef::param)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Type arguments for the container's own parameters from the use site.
    pub fn own_args(&self) -> Vec<TypeRef> {
        self.own_params.iter().copied().map(TypeRef::param).collect()
    }
}
