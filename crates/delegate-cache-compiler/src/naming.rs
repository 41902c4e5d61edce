//! Synthetic name allocation.
//!
//! The pass asks a [`NameAllocator`] for every container and cell name and
//! treats the answers as opaque. [`SequentialNames`] produces unspeakable
//! names in the usual compiler-generated style:
//!
//! | Declaration                | Name                    |
//! |----------------------------|-------------------------|
//! | module or type container   | `<>O`, `<>O1`, ...      |
//! | method container           | `<Test>O__0`            |
//! | cell                       | `<0>__Target`           |

use std::fmt;

use rustc_hash::FxHashMap;

use delegate_cache_core::TypeHash;

use crate::{ContainerId, Scope};

/// A compiler-generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyntheticName(String);

impl SyntheticName {
    /// Wrap a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyntheticName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a container is for.
#[derive(Debug, Clone, Copy)]
pub struct ContainerNameRequest<'a> {
    /// Scope the container serves.
    pub scope: Scope,
    /// Type it is nested in, if any.
    pub host: Option<TypeHash>,
    /// Name of the owning method for method scope.
    pub method_name: Option<&'a str>,
    /// How many containers the same group already has.
    pub split_index: usize,
    /// Number of own type parameters.
    pub arity: usize,
}

/// What a cell is for.
#[derive(Debug, Clone, Copy)]
pub struct CellNameRequest<'a> {
    /// Owning container.
    pub container: ContainerId,
    /// Position of the cell within the container.
    pub index: usize,
    /// Name of the target method.
    pub target_name: &'a str,
}

/// Supplies unique, source-unspeakable names.
pub trait NameAllocator {
    /// Name a new container.
    fn container_name(&mut self, request: &ContainerNameRequest<'_>) -> SyntheticName;

    /// Name a new cell.
    fn cell_name(&mut self, request: &CellNameRequest<'_>) -> SyntheticName;
}

/// Default allocator: names are unique within their declaring scope.
#[derive(Debug, Default, Clone)]
pub struct SequentialNames {
    method_ordinals: FxHashMap<Option<TypeHash>, usize>,
}

impl SequentialNames {
    /// Create a new allocator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameAllocator for SequentialNames {
    fn container_name(&mut self, request: &ContainerNameRequest<'_>) -> SyntheticName {
        match (request.scope, request.method_name) {
            (Scope::Method(_), Some(method)) => {
                let ordinal = self.method_ordinals.entry(request.host).or_default();
                let name = format!("<{method}>O__{ordinal}");
                *ordinal += 1;
                SyntheticName(name)
            }
            _ if request.split_index == 0 => SyntheticName("<>O".to_string()),
            _ => SyntheticName(format!("<>O{}", request.split_index)),
        }
    }

    fn cell_name(&mut self, request: &CellNameRequest<'_>) -> SyntheticName {
        SyntheticName(format!("<{}>__{}", request.index, request.target_name))
    }
}
