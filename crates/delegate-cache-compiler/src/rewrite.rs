//! Use-site rewriting.
//!
//! A cached conversion becomes a check-then-fill sequence:
//!
//! ```text
//! Coalesce {
//!     value:    LoadCell(cell),
//!     fallback: StoreCell { cell, value: CreateDelegate(..) },
//! }
//! ```
//!
//! There is no lock: two threads that both observe the unset cell each create
//! a delegate and the last store wins.

use delegate_cache_core::{ConversionRequest, ConversionSyntax, MethodRef, Receiver, TypeRef};

use crate::CellRef;

/// An untouched method-group conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionExpr {
    /// Target method.
    pub method: MethodRef,
    /// Bound receiver.
    pub receiver: Receiver,
    /// Produced delegate type.
    pub delegate_type: TypeRef,
    /// Source syntax.
    pub syntax: ConversionSyntax,
}

impl ConversionExpr {
    /// The conversion as written at `request`.
    pub fn from_request(request: &ConversionRequest) -> Self {
        Self {
            method: request.target_method.clone(),
            receiver: request.receiver,
            delegate_type: request.target_type.clone(),
            syntax: request.syntax,
        }
    }
}

/// Replacement expression for a conversion site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoweredExpr {
    /// Materialize a new delegate.
    CreateDelegate {
        /// Target method.
        method: MethodRef,
        /// Bound receiver.
        receiver: Receiver,
        /// Produced delegate type.
        delegate_type: TypeRef,
    },
    /// Read a cell; yields the unset sentinel when it was never stored.
    LoadCell(CellRef),
    /// Store `value` into a cell, yielding the stored value.
    StoreCell {
        /// Destination.
        cell: CellRef,
        /// Stored value.
        value: Box<LoweredExpr>,
    },
    /// `value` unless it is unset, otherwise `fallback`.
    Coalesce {
        /// Evaluated first.
        value: Box<LoweredExpr>,
        /// Evaluated only when `value` is unset.
        fallback: Box<LoweredExpr>,
    },
    /// The original conversion, left as is.
    Original(ConversionExpr),
}

impl LoweredExpr {
    /// Whether the expression reads through a cache cell.
    pub fn is_cached(&self) -> bool {
        self.cell_ref().is_some()
    }

    /// The cell an expression reads, if any.
    pub fn cell_ref(&self) -> Option<&CellRef> {
        match self {
            LoweredExpr::LoadCell(cell) | LoweredExpr::StoreCell { cell, .. } => Some(cell),
            LoweredExpr::Coalesce { value, .. } => value.cell_ref(),
            LoweredExpr::CreateDelegate { .. } | LoweredExpr::Original(_) => None,
        }
    }
}

/// Rewrite a cached site to read through `cell`.
///
/// The fill branch reproduces the original conversion exactly.
pub fn rewrite_cached(request: &ConversionRequest, cell: CellRef) -> LoweredExpr {
    let create = LoweredExpr::CreateDelegate {
        method: request.target_method.clone(),
        receiver: request.receiver,
        delegate_type: request.target_type.clone(),
    };
    LoweredExpr::Coalesce {
        value: Box::new(LoweredExpr::LoadCell(cell.clone())),
        fallback: Box::new(LoweredExpr::StoreCell {
            cell,
            value: Box::new(create),
        }),
    }
}

/// Leave an ineligible site unchanged.
pub fn rewrite_uncached(request: &ConversionRequest) -> LoweredExpr {
    LoweredExpr::Original(ConversionExpr::from_request(request))
}
