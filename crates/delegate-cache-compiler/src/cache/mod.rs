//! Cache storage model.
//!
//! ## Components
//!
//! - [`CacheKey`]: structural identity of a cached delegate
//! - [`CacheContainer`] / [`CacheCell`]: synthesized declarations
//! - [`CacheRegistry`]: arena with deduplication and grouping
//! - [`SubstitutionMap`]: rewriting into a container's parameter space

mod container;
mod key;
mod registry;
mod substitution;

pub use container::{CacheCell, CacheContainer, CellId, CellRef, ContainerId, ContainerTypeParam};
pub use key::{CacheKey, ReceiverKey};
pub use registry::CacheRegistry;
pub use substitution::{
    SubstitutionMap, build_substitution_map, reproduce_constraints, substitute_method,
    substitute_type,
};
