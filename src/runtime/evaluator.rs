//! Reference evaluator for lowered conversion sites.
//!
//! Executes [`LoweredExpr`] trees the way the emitted code would run: cells
//! are static fields of a container *instantiation*, so a cell read under
//! `Box<int>` and one under `Box<string>` hit different storage.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use delegate_cache_compiler::{CachePlan, CellId, CellRef, LoweredExpr};
use delegate_cache_core::{MethodRef, Receiver, RuntimeError, TypeHash, TypeRef};

use super::{DelegateObject, ObjectHandle, ObjectHeap};

/// Binding of type parameters to closed types for one evaluation context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnv {
    bindings: FxHashMap<TypeHash, TypeRef>,
}

impl TypeEnv {
    /// An empty environment (non-generic code).
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `param` to `ty`.
    pub fn bind(mut self, param: TypeHash, ty: TypeRef) -> Self {
        self.bindings.insert(param, ty);
        self
    }

    /// The binding of `param`, if any.
    pub fn get(&self, param: TypeHash) -> Option<&TypeRef> {
        self.bindings.get(&param)
    }

    /// Close `ty` under this environment and reduce it to runtime shape.
    pub fn close(&self, ty: &TypeRef) -> Result<TypeRef, RuntimeError> {
        let closed = ty.map_params(&|p| self.bindings.get(&p).cloned());
        let mut unbound = None;
        closed.visit_params(&mut |p| {
            unbound.get_or_insert(p);
        });
        match unbound {
            Some(param) => Err(RuntimeError::UnboundTypeParam(param)),
            None => Ok(closed.runtime_shape()),
        }
    }

    fn close_all(&self, types: &[TypeRef]) -> Result<Vec<TypeRef>, RuntimeError> {
        types.iter().map(|ty| self.close(ty)).collect()
    }

    fn close_method(&self, method: &MethodRef) -> Result<MethodRef, RuntimeError> {
        Ok(MethodRef {
            method: method.method,
            containing_type: self.close(&method.containing_type)?,
            type_args: self.close_all(&method.type_args)?,
        })
    }
}

/// Result of evaluating a lowered expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// The unset sentinel of an empty cell.
    Null,
    /// A delegate on the heap.
    Delegate(ObjectHandle),
}

impl Value {
    /// Whether this is the unset sentinel.
    pub fn is_null(self) -> bool {
        matches!(self, Value::Null)
    }

    /// The delegate handle, if any.
    pub fn handle(self) -> Option<ObjectHandle> {
        match self {
            Value::Delegate(handle) => Some(handle),
            Value::Null => None,
        }
    }
}

/// Storage of one cell in one closed container instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticSlot {
    /// The cell.
    pub cell: CellId,
    /// Closed host type arguments.
    pub host_args: Vec<TypeRef>,
    /// Closed container arguments.
    pub own_args: Vec<TypeRef>,
}

/// Single-threaded evaluator with per-instantiation static storage.
#[derive(Debug, Default)]
pub struct Evaluator {
    heap: ObjectHeap,
    statics: FxHashMap<StaticSlot, ObjectHandle>,
    known_cells: Option<FxHashSet<CellId>>,
}

impl Evaluator {
    /// An evaluator that accepts any cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// An evaluator that rejects cells not declared by `plan`.
    pub fn for_plan(plan: &CachePlan) -> Self {
        Self {
            known_cells: Some(plan.cells.iter().map(|c| c.id).collect()),
            ..Self::default()
        }
    }

    /// Evaluate `expr` under `env`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn eval(&mut self, expr: &LoweredExpr, env: &TypeEnv) -> Result<Value, RuntimeError> {
        match expr {
            LoweredExpr::CreateDelegate {
                method,
                receiver,
                delegate_type,
            } => self.create(method, *receiver, delegate_type, env),
            LoweredExpr::Original(original) => self.create(
                &original.method,
                original.receiver,
                &original.delegate_type,
                env,
            ),
            LoweredExpr::LoadCell(cell) => {
                let slot = self.slot(cell, env)?;
                Ok(self
                    .statics
                    .get(&slot)
                    .map_or(Value::Null, |handle| Value::Delegate(*handle)))
            }
            LoweredExpr::StoreCell { cell, value } => {
                let slot = self.slot(cell, env)?;
                let value = self.eval(value, env)?;
                match value {
                    Value::Delegate(handle) => {
                        trace!(cell = slot.cell.0, "stored delegate in cache cell");
                        self.statics.insert(slot, handle);
                    }
                    Value::Null => {
                        self.statics.remove(&slot);
                    }
                }
                Ok(value)
            }
            LoweredExpr::Coalesce { value, fallback } => match self.eval(value, env)? {
                Value::Null => self.eval(fallback, env),
                value => Ok(value),
            },
        }
    }

    /// Get a delegate by handle.
    pub fn delegate(&self, handle: ObjectHandle) -> Result<&DelegateObject, RuntimeError> {
        self.heap.get(handle)
    }

    /// The object heap.
    pub fn heap(&self) -> &ObjectHeap {
        &self.heap
    }

    /// Number of populated static slots.
    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    fn create(
        &mut self,
        method: &MethodRef,
        receiver: Receiver,
        delegate_type: &TypeRef,
        env: &TypeEnv,
    ) -> Result<Value, RuntimeError> {
        let object = DelegateObject {
            method: env.close_method(method)?,
            receiver,
            delegate_type: env.close(delegate_type)?,
        };
        Ok(Value::Delegate(self.heap.allocate(object)))
    }

    fn slot(&self, cell: &CellRef, env: &TypeEnv) -> Result<StaticSlot, RuntimeError> {
        if let Some(known) = &self.known_cells
            && !known.contains(&cell.cell)
        {
            return Err(RuntimeError::UnknownCell(cell.cell.0));
        }
        Ok(StaticSlot {
            cell: cell.cell,
            host_args: env.close_all(&cell.host_args)?,
            own_args: env.close_all(&cell.own_args)?,
        })
    }
}
