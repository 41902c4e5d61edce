//! Error types.
//!
//! - [`RegistrationError`]: symbol table population failures
//! - [`CacheError`]: a request whose cache placement cannot be established
//! - [`RuntimeError`]: failures of the reference evaluator
//!
//! A [`CacheError`] never aborts compilation. The pass downgrades the affected
//! request to uncached code generation and records the error as the reason.

use thiserror::Error;

use crate::{Span, TypeHash};

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while populating the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A type with the same hash is already registered.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A method with the same hash is already registered.
    #[error("duplicate method: {0}")]
    DuplicateMethod(String),

    /// A type parameter with the same hash is already registered.
    #[error("duplicate type parameter '{name}' on {owner}")]
    DuplicateTypeParam {
        /// Parameter name.
        name: String,
        /// Owning declaration.
        owner: TypeHash,
    },

    /// A type parameter was registered out of declaration order.
    #[error("type parameter '{name}' on {owner} has index {got}, expected {expected}")]
    TypeParamIndexMismatch {
        /// Parameter name.
        name: String,
        /// Owning declaration.
        owner: TypeHash,
        /// The owner's current parameter count.
        expected: usize,
        /// The entry's index.
        got: usize,
    },

    /// The owning declaration has not been registered yet.
    #[error("unknown owner {0} (register containing declarations first)")]
    UnknownOwner(TypeHash),
}

// ============================================================================
// Cache Errors
// ============================================================================

/// Reasons a request's cache placement could not be established.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The request references a type the symbol table does not know.
    #[error("at {span}: unknown type {hash}")]
    UnknownType {
        /// The missing type.
        hash: TypeHash,
        /// Conversion site.
        span: Span,
    },

    /// The request references a method the symbol table does not know.
    #[error("at {span}: unknown method {hash}")]
    UnknownMethod {
        /// The missing method.
        hash: TypeHash,
        /// Conversion site.
        span: Span,
    },

    /// The request references a type parameter the symbol table does not know.
    #[error("at {span}: unknown type parameter {hash}")]
    UnknownTypeParam {
        /// The missing parameter.
        hash: TypeHash,
        /// Conversion site.
        span: Span,
    },

    /// A type parameter is referenced outside the generic context that declares it.
    #[error("at {span}: type parameter '{name}' is not in scope at the conversion site")]
    OutOfScopeTypeParam {
        /// Parameter name.
        name: String,
        /// Conversion site.
        span: Span,
    },

    /// A constraint of a method-level parameter cannot be expressed on the
    /// synthesized container.
    #[error("at {span}: constraint on '{param}' cannot be reproduced on a cache container")]
    UnreproducibleConstraint {
        /// The constrained parameter.
        param: String,
        /// Conversion site.
        span: Span,
    },

    /// Internal inconsistency in the binder's input.
    #[error("internal error: {message}")]
    Internal {
        /// The error message.
        message: String,
    },
}

impl CacheError {
    /// The conversion site this error is attributed to, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            CacheError::UnknownType { span, .. }
            | CacheError::UnknownMethod { span, .. }
            | CacheError::UnknownTypeParam { span, .. }
            | CacheError::OutOfScopeTypeParam { span, .. }
            | CacheError::UnreproducibleConstraint { span, .. } => Some(*span),
            CacheError::Internal { .. } => None,
        }
    }
}

// ============================================================================
// Runtime Errors
// ============================================================================

/// Errors raised by the reference evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A type parameter has no binding in the evaluation environment.
    #[error("type parameter {0} is not bound")]
    UnboundTypeParam(TypeHash),

    /// A lowered expression refers to a cell the plan does not contain.
    #[error("unknown cache cell #{0}")]
    UnknownCell(u32),

    /// An object handle does not refer to a live object.
    #[error("stale or unknown object handle #{0}")]
    UnknownHandle(u32),
}
