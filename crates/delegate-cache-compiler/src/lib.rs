//! Delegate Conversion Cache Pass
//!
//! Converting a method group to a delegate normally allocates a new delegate
//! on every evaluation. When the conversion is implicit or a cast (not
//! `new D(M)`), this pass stores the delegate in a synthesized static field
//! the first time and reuses it afterwards.
//!
//! ## Modules
//!
//! - [`eligibility`]: which conversion sites may be cached
//! - [`free_vars`]: which enclosing type parameters a site depends on
//! - [`scope`]: the broadest scope able to host a site's cache
//! - [`cache`]: keys, containers, cells and their registry
//! - [`naming`]: synthetic name allocation
//! - [`rewrite`]: replacement expressions for use sites
//! - [`pass`]: orchestration and the resulting [`CachePlan`]
//! - [`display`]: rendering for logs and tests
//!
//! ## Example
//!
//! ```
//! use delegate_cache_compiler::{CacheOptions, DelegateCachePass, SequentialNames};
//! use delegate_cache_core::{
//!     ConversionRequest, MethodEntry, MethodRef, SiteId, TypeEntry, TypeRef,
//! };
//! use delegate_cache_registry::SymbolTable;
//!
//! let mut symbols = SymbolTable::new();
//! let c = symbols.register_type(TypeEntry::class("C")).unwrap();
//! let action = symbols.register_type(TypeEntry::delegate("Action")).unwrap();
//! let target = symbols.register_method(MethodEntry::static_method(c, "Target")).unwrap();
//!
//! let request = ConversionRequest::new(
//!     SiteId(0),
//!     MethodRef::new(target, TypeRef::named(c)),
//!     TypeRef::named(action),
//!     c,
//! );
//!
//! let mut names = SequentialNames::new();
//! let plan = DelegateCachePass::run(&symbols, CacheOptions::default(), &mut names, [&request]);
//! assert_eq!(plan.stats.cached, 1);
//! assert_eq!(plan.containers.len(), 1);
//! ```

pub mod cache;
pub mod display;
pub mod eligibility;
pub mod free_vars;
pub mod naming;
mod options;
pub mod pass;
pub mod rewrite;
pub mod scope;

#[cfg(test)]
mod test_support;

pub use cache::{
    CacheCell, CacheContainer, CacheKey, CacheRegistry, CellId, CellRef, ContainerId,
    ContainerTypeParam, ReceiverKey, SubstitutionMap, build_substitution_map,
    reproduce_constraints, substitute_method, substitute_type,
};
pub use display::{format_container, format_lowered, format_type_ref};
pub use eligibility::{Eligibility, IneligibleReason, classify, is_eligible};
pub use free_vars::{FreeTypeParams, free_type_params};
pub use naming::{
    CellNameRequest, ContainerNameRequest, NameAllocator, SequentialNames, SyntheticName,
};
pub use options::CacheOptions;
pub use pass::{CachePlan, CacheStats, DelegateCachePass, SiteDecision, SiteRewrite};
pub use rewrite::{ConversionExpr, LoweredExpr, rewrite_cached, rewrite_uncached};
pub use scope::{Placement, Scope, resolve_scope};
