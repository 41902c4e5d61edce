//! Structural cache keys.

use delegate_cache_core::{ConversionRequest, MethodRef, Receiver, TypeHash, TypeRef};

/// Receiver component of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReceiverKey {
    /// Static method or statically invoked extension method.
    Static,
    /// An identity-stable receiver.
    Fixed(TypeHash),
}

/// Identity of a cached delegate within one scope.
///
/// Both components are stored in runtime shape, so conversions that differ
/// only in nullable annotations, tuple element names or `dynamic` versus
/// `object` share a cell. Type parameters compare by declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    /// The target method.
    pub method: MethodRef,
    /// The bound receiver.
    pub receiver: ReceiverKey,
    /// The delegate type produced.
    pub delegate_type: TypeRef,
}

impl CacheKey {
    /// Build a key, normalizing both types to runtime shape.
    pub fn new(method: &MethodRef, receiver: ReceiverKey, delegate_type: &TypeRef) -> Self {
        Self {
            method: method.runtime_shape(),
            receiver,
            delegate_type: delegate_type.runtime_shape(),
        }
    }

    /// The key of a request, or `None` when its receiver cannot be keyed.
    pub fn for_request(request: &ConversionRequest) -> Option<Self> {
        let receiver = match request.receiver {
            Receiver::None => ReceiverKey::Static,
            Receiver::Fixed(identity) => ReceiverKey::Fixed(identity),
            Receiver::Variable => return None,
        };
        Some(Self::new(
            &request.target_method,
            receiver,
            &request.target_type,
        ))
    }
}
