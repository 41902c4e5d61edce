//! Method-group conversion requests.
//!
//! The binder produces one [`ConversionRequest`] for every place where a method
//! group is turned into a delegate. Requests are immutable once built: the
//! cache pass reads them exactly once and never re-derives binding facts.

use bitflags::bitflags;

use crate::{MethodRef, Span, TypeHash, TypeRef};

/// Identity of a conversion site within one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub u32);

bitflags! {
    /// Lexical facts about a conversion site that affect cacheability.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextFlags: u8 {
        /// The delegate is created with explicit construction syntax
        /// (`new D(M)` or target-typed `new(M)`).
        const EXPLICIT_CONSTRUCTION = 1 << 0;
        /// The conversion appears inside a quoted (expression tree) lambda.
        const QUOTED_EXPRESSION = 1 << 1;
        /// The conversion runs while the type that would host its cache is
        /// being statically initialized.
        const OWN_TYPE_STATIC_INITIALIZER = 1 << 2;
    }
}

/// The syntax that produced the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionSyntax {
    /// `D d = M;`
    Implicit,
    /// `(D)M`
    Cast,
    /// `new D(M)` or `new(M)`
    Construction,
}

/// What the delegate will be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Receiver {
    /// No receiver: static methods and extension methods named through their
    /// declaring type.
    None,
    /// A receiver the binder proved side-effect free and identity-stable for
    /// the whole program, such as a readonly static field. The hash identifies
    /// that receiver. Receivers that differ per instance, `this` included,
    /// must be `Variable`.
    Fixed(TypeHash),
    /// Any other receiver, including closure state of non-static local functions.
    Variable,
}

/// One method-group-to-delegate conversion, as resolved by the binder.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Site identity.
    pub site: SiteId,
    /// Location of the method-group expression.
    pub span: Span,
    /// The resolved, fully substituted target method.
    pub target_method: MethodRef,
    /// Receiver the delegate binds to.
    pub receiver: Receiver,
    /// The delegate type being produced, fully substituted.
    pub target_type: TypeRef,
    /// Type whose body contains the conversion.
    pub enclosing_type: TypeHash,
    /// Method (or local function / lambda) whose body contains the conversion,
    /// absent for field initializers.
    pub enclosing_method: Option<TypeHash>,
    /// Cacheability-relevant context.
    pub context: ContextFlags,
    /// Syntax of the conversion.
    pub syntax: ConversionSyntax,
}

impl ConversionRequest {
    /// Create an implicit conversion of a static method group in a field
    /// initializer of `enclosing_type`.
    pub fn new(
        site: SiteId,
        target_method: MethodRef,
        target_type: TypeRef,
        enclosing_type: TypeHash,
    ) -> Self {
        Self {
            site,
            span: Span::default(),
            target_method,
            receiver: Receiver::None,
            target_type,
            enclosing_type,
            enclosing_method: None,
            context: ContextFlags::empty(),
            syntax: ConversionSyntax::Implicit,
        }
    }

    /// Place the conversion inside the body of `method`.
    pub fn in_method(mut self, method: TypeHash) -> Self {
        self.enclosing_method = Some(method);
        self
    }

    /// Set the source location.
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Set the receiver.
    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    /// Set the syntax. Construction syntax also sets
    /// [`ContextFlags::EXPLICIT_CONSTRUCTION`].
    pub fn with_syntax(mut self, syntax: ConversionSyntax) -> Self {
        self.syntax = syntax;
        if syntax == ConversionSyntax::Construction {
            self.context |= ContextFlags::EXPLICIT_CONSTRUCTION;
        }
        self
    }

    /// Add context flags.
    pub fn with_context(mut self, flags: ContextFlags) -> Self {
        self.context |= flags;
        self
    }
}
