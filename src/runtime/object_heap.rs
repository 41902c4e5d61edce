//! Append-only arena for delegate objects.
//!
//! Delegates live as long as the program: cells are never cleared and the
//! evaluator has no collector, so the heap only grows.

use std::fmt;

use delegate_cache_core::{MethodRef, Receiver, RuntimeError, TypeRef};

/// Handle to a heap-allocated delegate.
///
/// Two handles are equal exactly when they refer to the same allocation,
/// which makes handle equality the reference-identity test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u32);

/// A materialized delegate, with all types closed and in runtime shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateObject {
    /// The bound method.
    pub method: MethodRef,
    /// The bound receiver.
    pub receiver: Receiver,
    /// The delegate type.
    pub delegate_type: TypeRef,
}

/// Heap storage for delegates.
#[derive(Default)]
pub struct ObjectHeap {
    objects: Vec<DelegateObject>,
}

impl ObjectHeap {
    /// Create a new empty object heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new delegate. Equal values still get distinct handles.
    pub fn allocate(&mut self, value: DelegateObject) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len() as u32);
        self.objects.push(value);
        handle
    }

    /// Get a delegate.
    pub fn get(&self, handle: ObjectHandle) -> Result<&DelegateObject, RuntimeError> {
        self.objects
            .get(handle.0 as usize)
            .ok_or(RuntimeError::UnknownHandle(handle.0))
    }

    /// Total number of allocations ever made.
    pub fn allocation_count(&self) -> usize {
        self.objects.len()
    }
}

impl fmt::Debug for ObjectHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHeap")
            .field("allocations", &self.objects.len())
            .finish()
    }
}
