//! Free type parameter analysis.
//!
//! A type parameter is *free* at a conversion site when it is declared on the
//! enclosing type chain or the enclosing method chain and still appears in the
//! substituted target method or target type. Free parameters decide how far
//! a cache can be shared: a cell that mentions one must be instantiated once
//! per binding of it.

use rustc_hash::FxHashSet;

use delegate_cache_core::{CacheError, ConversionRequest, TypeHash};
use delegate_cache_registry::SymbolTable;

/// The free type parameters of one request, in declaration order
/// (outermost declaration first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeTypeParams {
    /// Declared on the enclosing type or one of its containing types.
    pub type_level: Vec<TypeHash>,
    /// Declared on the enclosing method or one of its enclosing methods.
    pub method_level: Vec<TypeHash>,
}

impl FreeTypeParams {
    /// No free parameters: the request can live at module scope.
    pub fn is_empty(&self) -> bool {
        self.type_level.is_empty() && self.method_level.is_empty()
    }

    /// Total number of free parameters.
    pub fn len(&self) -> usize {
        self.type_level.len() + self.method_level.len()
    }

    /// Whether `param` is free.
    pub fn contains(&self, param: TypeHash) -> bool {
        self.type_level.contains(&param) || self.method_level.contains(&param)
    }

    /// All free parameters, type level first.
    pub fn iter(&self) -> impl Iterator<Item = TypeHash> + '_ {
        self.type_level
            .iter()
            .chain(self.method_level.iter())
            .copied()
    }
}

/// Compute the free type parameters of `request`.
///
/// Method-level parameters are closed under constraints: if free `M` is
/// constrained by `N` and `N` is also declared on the enclosing method chain,
/// `N` is free too, so the constraint can be stated on the container.
///
/// # Errors
///
/// Fails when the enclosing declarations are unknown, or when the request
/// mentions a type parameter that is not in scope at the site.
pub fn free_type_params(
    request: &ConversionRequest,
    symbols: &SymbolTable,
) -> Result<FreeTypeParams, CacheError> {
    let span = request.span;

    if !symbols.contains_type(request.enclosing_type) {
        return Err(CacheError::UnknownType {
            hash: request.enclosing_type,
            span,
        });
    }

    let type_scope = symbols.type_params_in_scope(request.enclosing_type);
    let method_scope = match request.enclosing_method {
        Some(method) => {
            let entry = symbols
                .get_method(method)
                .ok_or(CacheError::UnknownMethod { hash: method, span })?;
            if entry.owner_type != request.enclosing_type {
                return Err(CacheError::Internal {
                    message: format!(
                        "method '{}' is not declared in '{}'",
                        entry.name,
                        symbols.type_name(request.enclosing_type)
                    ),
                });
            }
            symbols.method_params_in_scope(method)
        }
        None => Vec::new(),
    };

    let mut referenced = Vec::new();
    request
        .target_method
        .visit_params(&mut |p| referenced.push(p));
    request.target_type.visit_params(&mut |p| referenced.push(p));

    let mut free: FxHashSet<TypeHash> = FxHashSet::default();
    let mut pending = Vec::new();
    for param in referenced {
        if !type_scope.contains(&param) && !method_scope.contains(&param) {
            return Err(out_of_scope(param, request, symbols));
        }
        if free.insert(param) && method_scope.contains(&param) {
            pending.push(param);
        }
    }

    while let Some(param) = pending.pop() {
        let entry = symbols
            .get_type_param(param)
            .ok_or(CacheError::UnknownTypeParam { hash: param, span })?;
        for constraint in &entry.constraints {
            constraint.visit_params(&mut |p| {
                if method_scope.contains(&p) && free.insert(p) {
                    pending.push(p);
                }
            });
        }
    }

    Ok(FreeTypeParams {
        type_level: type_scope
            .into_iter()
            .filter(|p| free.contains(p))
            .collect(),
        method_level: method_scope
            .into_iter()
            .filter(|p| free.contains(p))
            .collect(),
    })
}

fn out_of_scope(param: TypeHash, request: &ConversionRequest, symbols: &SymbolTable) -> CacheError {
    match symbols.get_type_param(param) {
        Some(entry) => CacheError::OutOfScopeTypeParam {
            name: entry.name.clone(),
            span: request.span,
        },
        None => CacheError::UnknownTypeParam {
            hash: param,
            span: request.span,
        },
    }
}
