//! Reference runtime for lowered conversion sites.
//!
//! ## Key Types
//!
//! - [`ObjectHeap`]: append-only arena of delegate objects
//! - [`Evaluator`]: runs lowered expressions with per-instantiation statics
//! - [`TypeEnv`]: type parameter bindings of the running generic context

mod evaluator;
mod object_heap;

pub use evaluator::{Evaluator, StaticSlot, TypeEnv, Value};
pub use object_heap::{DelegateObject, ObjectHandle, ObjectHeap};
