//! Delegate-conversion caching for a statically typed compiler.
//!
//! This crate ties the workspace together:
//!
//! - [`core`]: symbol model and conversion requests
//! - [`registry`]: the symbol table
//! - [`compiler`]: the caching pass
//! - [`runtime`]: a reference evaluator for the pass's output
//!
//! The most used items are re-exported at the crate root.

pub mod runtime;

pub use delegate_cache_compiler as compiler;
pub use delegate_cache_core as core;
pub use delegate_cache_registry as registry;

pub use delegate_cache_compiler::{
    CacheOptions, CachePlan, CacheStats, DelegateCachePass, IneligibleReason, LoweredExpr,
    NameAllocator, Scope, SequentialNames, SiteDecision, SiteRewrite,
};
pub use delegate_cache_core::{
    CacheError, ContextFlags, ConversionRequest, ConversionSyntax, GenericOwner, MethodEntry,
    MethodKind, MethodRef, Receiver, RegistrationError, RuntimeError, SiteId, Span,
    TypeConstraint, TypeEntry, TypeHash, TypeRef,
};
pub use delegate_cache_registry::SymbolTable;
pub use runtime::{Evaluator, TypeEnv, Value};
