//! Eligibility classification.
//!
//! Decides, per conversion site, whether caching the produced delegate is
//! legal. Only syntax and context matter here; placement failures discovered
//! later are reported as [`IneligibleReason::Fallback`].

use std::fmt;

use delegate_cache_core::{
    CacheError, ContextFlags, ConversionRequest, ConversionSyntax, Receiver,
};

use crate::CacheOptions;

/// Why a conversion is emitted uncached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    /// Caching is turned off.
    Disabled,
    /// `new D(M)` or `new(M)`: the caller asked for a fresh object.
    ExplicitConstruction,
    /// Inside a quoted expression; the conversion node must stay intact.
    QuotedExpression,
    /// Inside the static initializer of the type that would host the cache.
    OwnTypeStaticInitializer,
    /// Bound to a receiver whose identity varies between evaluations.
    VariableReceiver,
    /// Placement failed; the request falls back to uncached code.
    Fallback(CacheError),
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibleReason::Disabled => write!(f, "caching disabled"),
            IneligibleReason::ExplicitConstruction => write!(f, "explicit delegate construction"),
            IneligibleReason::QuotedExpression => write!(f, "inside quoted expression"),
            IneligibleReason::OwnTypeStaticInitializer => {
                write!(f, "inside static initializer of the hosting type")
            }
            IneligibleReason::VariableReceiver => write!(f, "variable receiver"),
            IneligibleReason::Fallback(err) => write!(f, "fallback: {err}"),
        }
    }
}

/// Result of classifying one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Caching is legal.
    Eligible,
    /// Caching is not legal.
    Ineligible(IneligibleReason),
}

impl Eligibility {
    /// Whether caching is legal.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Classify a conversion request.
///
/// Quoted expressions are checked first: they are never rewritten whatever
/// else holds.
pub fn classify(request: &ConversionRequest, options: &CacheOptions) -> Eligibility {
    if !options.enabled {
        return Eligibility::Ineligible(IneligibleReason::Disabled);
    }
    let context = request.context;
    if context.contains(ContextFlags::QUOTED_EXPRESSION) {
        return Eligibility::Ineligible(IneligibleReason::QuotedExpression);
    }
    if context.contains(ContextFlags::EXPLICIT_CONSTRUCTION)
        || request.syntax == ConversionSyntax::Construction
    {
        return Eligibility::Ineligible(IneligibleReason::ExplicitConstruction);
    }
    if context.contains(ContextFlags::OWN_TYPE_STATIC_INITIALIZER) {
        return Eligibility::Ineligible(IneligibleReason::OwnTypeStaticInitializer);
    }
    if request.receiver == Receiver::Variable {
        return Eligibility::Ineligible(IneligibleReason::VariableReceiver);
    }
    Eligibility::Eligible
}

/// Whether `request` may be cached under `options`.
pub fn is_eligible(request: &ConversionRequest, options: &CacheOptions) -> bool {
    classify(request, options).is_eligible()
}
