//! Core symbol model for the delegate-conversion cache pass.
//!
//! This crate holds the binder's resolved view of a compilation that the
//! cache pass consumes:
//!
//! - [`TypeHash`]: deterministic identity for types, methods and type parameters
//! - [`TypeRef`] / [`MethodRef`]: fully substituted references
//! - [`entries`]: declared types, methods and type parameters
//! - [`ConversionRequest`]: one method-group conversion site
//! - [`error`]: registration, cache placement and runtime errors

pub mod conversion;
pub mod entries;
pub mod error;
mod span;
mod type_hash;
pub mod types;

pub use conversion::{ContextFlags, ConversionRequest, ConversionSyntax, Receiver, SiteId};
pub use entries::{GenericOwner, MethodEntry, TypeConstraint, TypeEntry, TypeParamEntry};
pub use error::{CacheError, RegistrationError, RuntimeError};
pub use span::Span;
pub use type_hash::{TypeHash, hash_constants};
pub use types::{MethodKind, MethodRef, TupleElement, TypeKind, TypeRef};
