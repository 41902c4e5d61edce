//! Container and cell arena.
//!
//! Pass-local storage for every synthesized container and cell. Cells are
//! deduplicated by `(Scope, CacheKey)`; containers are grouped by
//! `(Scope, own parameter list)` and only created when a cell needs one.

use rustc_hash::FxHashMap;

use delegate_cache_core::{TypeHash, TypeRef};

use crate::naming::SyntheticName;
use crate::{CacheCell, CacheContainer, CacheKey, CellId, ContainerId, Scope};

/// Arena of containers and cells.
#[derive(Debug, Default, Clone)]
pub struct CacheRegistry {
    containers: Vec<CacheContainer>,
    cells: Vec<CacheCell>,
    /// (scope, own params) → containers, oldest first
    groups: FxHashMap<(Scope, Vec<TypeHash>), Vec<ContainerId>>,
    /// (scope, key) → cell
    cells_by_key: FxHashMap<(Scope, CacheKey), CellId>,
    max_cells_per_container: Option<usize>,
}

impl CacheRegistry {
    /// Create an empty registry.
    pub fn new(max_cells_per_container: Option<usize>) -> Self {
        Self {
            max_cells_per_container,
            ..Self::default()
        }
    }

    /// Look up the cell already serving `key` in `scope`.
    pub fn find_cell(&self, scope: Scope, key: &CacheKey) -> Option<CellId> {
        self.cells_by_key.get(&(scope, key.clone())).copied()
    }

    /// The container in this group that can take another cell, if any.
    ///
    /// Only the newest container of a group is ever open; older ones were
    /// sealed when they reached capacity.
    pub fn open_container(&self, scope: Scope, own_params: &[TypeHash]) -> Option<ContainerId> {
        let newest = *self.groups.get(&(scope, own_params.to_vec()))?.last()?;
        let container = &self.containers[newest.0 as usize];
        match self.max_cells_per_container {
            Some(max) if container.cells.len() >= max => None,
            _ => Some(newest),
        }
    }

    /// Number of containers already created for a group.
    pub fn group_len(&self, scope: Scope, own_params: &[TypeHash]) -> usize {
        self.groups
            .get(&(scope, own_params.to_vec()))
            .map_or(0, Vec::len)
    }

    /// The id the next container will receive.
    pub fn next_container_id(&self) -> ContainerId {
        ContainerId(self.containers.len() as u32)
    }

    /// Add a container. Its id must be [`next_container_id`](Self::next_container_id).
    pub fn insert_container(&mut self, container: CacheContainer) -> ContainerId {
        let id = container.id;
        debug_assert_eq!(id, self.next_container_id());
        self.groups
            .entry((container.scope, container.sources()))
            .or_default()
            .push(id);
        self.containers.push(container);
        id
    }

    /// Add a cell serving `key` to `container`.
    pub fn insert_cell(
        &mut self,
        container: ContainerId,
        key: CacheKey,
        field_type: TypeRef,
        name: SyntheticName,
    ) -> CellId {
        let id = CellId(self.cells.len() as u32);
        let owner = &mut self.containers[container.0 as usize];
        owner.cells.push(id);
        self.cells_by_key.insert((owner.scope, key.clone()), id);
        self.cells.push(CacheCell {
            id,
            container,
            name,
            key,
            field_type,
        });
        id
    }

    /// Get a container by id.
    pub fn container(&self, id: ContainerId) -> Option<&CacheContainer> {
        self.containers.get(id.0 as usize)
    }

    /// Get a cell by id.
    pub fn cell(&self, id: CellId) -> Option<&CacheCell> {
        self.cells.get(id.0 as usize)
    }

    /// Number of containers.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Consume the registry, returning containers and cells.
    pub fn into_parts(self) -> (Vec<CacheContainer>, Vec<CacheCell>) {
        (self.containers, self.cells)
    }
}
