//! Synthesized cache declarations.

use delegate_cache_core::{TypeConstraint, TypeHash, TypeRef};

use crate::naming::SyntheticName;
use crate::{CacheKey, Scope};

/// Index of a container in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u32);

/// Index of a cell in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

/// A type parameter declared by a container, mirroring a method-level
/// parameter of the enclosing generic context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerTypeParam {
    /// Name copied from the source parameter.
    pub name: String,
    /// Identity of this parameter in the container's parameter space.
    pub type_hash: TypeHash,
    /// The method-level parameter it mirrors.
    pub source: TypeHash,
    /// Position in the container's own parameter list.
    pub index: usize,
    /// Source constraints rewritten into container space.
    pub constraints: Vec<TypeConstraint>,
}

/// A synthesized static class hosting cache cells.
///
/// Type and method scoped containers are nested in `host` and see all of its
/// type parameters; only method-level parameters are declared here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheContainer {
    /// Plan index.
    pub id: ContainerId,
    /// Scope the container serves.
    pub scope: Scope,
    /// Name from the allocator.
    pub name: SyntheticName,
    /// Type the container is nested in; `None` at module scope.
    pub host: Option<TypeHash>,
    /// Own generic parameters.
    pub type_params: Vec<ContainerTypeParam>,
    /// Hosted cells, in allocation order.
    pub cells: Vec<CellId>,
}

impl CacheContainer {
    /// Number of own type parameters.
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    /// Whether the container declares type parameters.
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// The method-level parameters mirrored by this container, in order.
    pub fn sources(&self) -> Vec<TypeHash> {
        self.type_params.iter().map(|p| p.source).collect()
    }

    /// References to the container's own parameters, in order.
    pub fn param_refs(&self) -> Vec<TypeRef> {
        self.type_params
            .iter()
            .map(|p| TypeRef::param(p.type_hash))
            .collect()
    }

    /// Look up an own parameter by its container-space hash.
    pub fn type_param(&self, hash: TypeHash) -> Option<&ContainerTypeParam> {
        self.type_params.iter().find(|p| p.type_hash == hash)
    }
}

/// One static field holding a cached delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheCell {
    /// Plan index.
    pub id: CellId,
    /// Owning container.
    pub container: ContainerId,
    /// Name from the allocator.
    pub name: SyntheticName,
    /// The key this cell serves, in use-site parameter space.
    pub key: CacheKey,
    /// Field type in the container's parameter space.
    pub field_type: TypeRef,
}

/// A use-site reference to a cell through an instantiated container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// The cell.
    pub cell: CellId,
    /// Arguments for the host type's parameters (outermost first).
    pub host_args: Vec<TypeRef>,
    /// Arguments for the container's own parameters.
    pub own_args: Vec<TypeRef>,
}

impl CellRef {
    /// Reference to a cell of a non-generic container.
    pub fn closed(cell: CellId) -> Self {
        Self {
            cell,
            host_args: Vec::new(),
            own_args: Vec::new(),
        }
    }
}
