//! Type parameter substitution.
//!
//! Rewrites types from the use site's parameter space into a container's own
//! parameter space, and reproduces constraints there.

use rustc_hash::FxHashMap;

use delegate_cache_core::{CacheError, MethodRef, Span, TypeConstraint, TypeHash, TypeRef};

/// Map from type parameter hash to its replacement.
pub type SubstitutionMap = FxHashMap<TypeHash, TypeRef>;

/// Build a substitution map from parameters and their replacements.
///
/// # Errors
/// Returns an internal error if the counts differ.
pub fn build_substitution_map(
    params: &[TypeHash],
    args: &[TypeRef],
) -> Result<SubstitutionMap, CacheError> {
    if params.len() != args.len() {
        return Err(CacheError::Internal {
            message: format!(
                "substitution expects {} arguments, got {}",
                params.len(),
                args.len()
            ),
        });
    }

    Ok(params.iter().copied().zip(args.iter().cloned()).collect())
}

/// Substitute type parameters in a type. Unmapped parameters are kept.
pub fn substitute_type(ty: &TypeRef, subst_map: &SubstitutionMap) -> TypeRef {
    if subst_map.is_empty() {
        return ty.clone();
    }
    ty.map_params(&|p| subst_map.get(&p).cloned())
}

/// Substitute type parameters in a method reference.
pub fn substitute_method(method: &MethodRef, subst_map: &SubstitutionMap) -> MethodRef {
    if subst_map.is_empty() {
        return method.clone();
    }
    method.map_params(&|p| subst_map.get(&p).cloned())
}

/// Rewrite a parameter's constraints into container space.
///
/// Every type parameter a constraint mentions must either be mapped by
/// `subst_map` (it becomes a container parameter) or be `inherited` from the
/// host type. Anything else cannot be stated on the container.
///
/// # Errors
/// Returns [`CacheError::UnreproducibleConstraint`] naming `param_name`.
pub fn reproduce_constraints(
    constraints: &[TypeConstraint],
    subst_map: &SubstitutionMap,
    inherited: &[TypeHash],
    param_name: &str,
    span: Span,
) -> Result<Vec<TypeConstraint>, CacheError> {
    constraints
        .iter()
        .map(|constraint| {
            let mut reproducible = true;
            constraint.visit_params(&mut |p| {
                if !subst_map.contains_key(&p) && !inherited.contains(&p) {
                    reproducible = false;
                }
            });
            if !reproducible {
                return Err(CacheError::UnreproducibleConstraint {
                    param: param_name.to_string(),
                    span,
                });
            }
            Ok(match constraint {
                TypeConstraint::Type(ty) => TypeConstraint::Type(substitute_type(ty, subst_map)),
                other => other.clone(),
            })
        })
        .collect()
}
