//! Deterministic hash-based symbol identity.
//!
//! [`TypeHash`] is a 64-bit hash that identifies declared types, methods, type
//! parameters and synthesized declarations. Hashes are computed from names and
//! positions rather than handed out sequentially, so the binder and this pass
//! agree on identity without sharing any allocation state.
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that a type named
//! `Foo` and a method named `Foo` never collide.
//!
//! # Examples
//!
//! ```
//! use delegate_cache_core::TypeHash;
//!
//! let a = TypeHash::from_name("Box");
//! assert_eq!(a, TypeHash::from_name("Box"));
//!
//! let t = TypeHash::from_type_param(a, 0);
//! let u = TypeHash::from_type_param(a, 1);
//! assert_ne!(t, u);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant used when folding sequences.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for method hashes.
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for type parameter hashes.
    pub const TYPE_PARAM: u64 = 0x1a095090689d4647;

    /// Domain marker for compiler-synthesized declarations.
    pub const SYNTHETIC: u64 = 0x9a7f3d5e2b8c4601;

    /// Golden-ratio increment, mixed with the position of each folded element
    /// so that `(a, b)` and `(b, a)` hash differently.
    pub const POSITION: u64 = 0x9e3779b97f4a7c15;
}

/// A deterministic 64-bit hash identifying a type, method, or type parameter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a fully qualified type name.
    ///
    /// Nested types use `.` between segments, e.g. `"Outer.Inner"`.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a method hash from its lexical owner, name and parameter types.
    ///
    /// The owner is the declaring type for ordinary methods and the enclosing
    /// method for local functions and lambdas, so two local functions called
    /// `Helper` in different methods stay distinct.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::METHOD ^ owner.0 ^ xxh64(name.as_bytes(), 0);
        TypeHash(fold(seed, param_hashes))
    }

    /// Create the hash of the `index`-th type parameter declared by `owner`.
    #[inline]
    pub fn from_type_param(owner: TypeHash, index: usize) -> Self {
        let seed = hash_constants::TYPE_PARAM ^ owner.0;
        TypeHash(mix(seed, index, index as u64))
    }

    /// Create the hash of a compiler-synthesized declaration.
    ///
    /// `ordinal` only needs to be unique within one compilation.
    #[inline]
    pub fn from_synthetic(ordinal: u64) -> Self {
        TypeHash(mix(hash_constants::SYNTHETIC, 0, ordinal))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

#[inline]
fn mix(hash: u64, position: usize, value: u64) -> u64 {
    let marker = hash_constants::POSITION.wrapping_mul(position as u64 + 1);
    // wrapping_mul keeps the fold order-sensitive
    hash.wrapping_mul(hash_constants::SEP)
        .wrapping_add(marker ^ value)
}

#[inline]
fn fold(seed: u64, parts: &[TypeHash]) -> u64 {
    parts
        .iter()
        .enumerate()
        .fold(seed, |hash, (i, part)| mix(hash, i, part.0))
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
