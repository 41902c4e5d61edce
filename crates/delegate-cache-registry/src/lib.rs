//! Symbol registry for the delegate-conversion cache pass.
//!
//! Provides [`SymbolTable`], the read-only view of resolved declarations that
//! the pass consults for generic-parameter scoping.

mod symbol_table;

pub use symbol_table::SymbolTable;
