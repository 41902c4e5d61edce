//! Symbol table entries.
//!
//! Each declaration the binder resolved is described by one entry; the
//! registry stores them by [`TypeHash`](crate::TypeHash).

mod method;
mod type_entry;
mod type_param;

pub use method::MethodEntry;
pub use type_entry::TypeEntry;
pub use type_param::{GenericOwner, TypeConstraint, TypeParamEntry};
