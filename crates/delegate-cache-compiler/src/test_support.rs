//! Shared symbol fixtures for unit tests.

use delegate_cache_core::{
    ConversionRequest, GenericOwner, MethodEntry, MethodKind, MethodRef, SiteId, TypeConstraint,
    TypeEntry, TypeHash, TypeRef,
};
use delegate_cache_registry::SymbolTable;

/// A small compilation:
///
/// ```text
/// class C { static void Main(); static void Target(); static K Target<K>(int); }
/// class Box<T> { void Test(); }
/// class D<T> { void Test<M>() where M : T; }
/// class E { static void Test<T>() { static void Owner<G>() { static void LF1() {} } } }
/// class F { static void Test<A, B>() where A : B; }
/// class Outer<U> { class Inner { void Run(); } }
/// delegate void Action(); delegate R Func<R>();
/// ```
#[allow(dead_code)]
pub(crate) struct World {
    pub symbols: SymbolTable,
    pub int: TypeHash,
    pub string: TypeHash,
    pub action: TypeHash,
    pub func: TypeHash,
    pub c: TypeHash,
    pub c_main: TypeHash,
    pub c_target: TypeHash,
    pub c_target_g: TypeHash,
    pub boxed: TypeHash,
    pub box_t: TypeHash,
    pub box_test: TypeHash,
    pub d: TypeHash,
    pub d_t: TypeHash,
    pub d_test: TypeHash,
    pub d_m: TypeHash,
    pub e: TypeHash,
    pub e_test: TypeHash,
    pub e_t: TypeHash,
    pub e_owner: TypeHash,
    pub e_g: TypeHash,
    pub e_lf1: TypeHash,
    pub f: TypeHash,
    pub f_test: TypeHash,
    pub f_a: TypeHash,
    pub f_b: TypeHash,
    pub outer: TypeHash,
    pub outer_u: TypeHash,
    pub inner: TypeHash,
    pub inner_run: TypeHash,
}

impl World {
    pub fn new() -> Self {
        let mut s = SymbolTable::new();

        let int = s.register_type(TypeEntry::primitive("int")).unwrap();
        let string = s.register_type(TypeEntry::class("string")).unwrap();
        let action = s.register_type(TypeEntry::delegate("Action")).unwrap();
        let func = s.register_type(TypeEntry::delegate("Func")).unwrap();
        s.declare_type_param(GenericOwner::Type(func), "R").unwrap();

        let c = s.register_type(TypeEntry::class("C")).unwrap();
        let c_main = s.register_method(MethodEntry::static_method(c, "Main")).unwrap();
        let c_target = s.register_method(MethodEntry::static_method(c, "Target")).unwrap();
        let c_target_g = s
            .register_method(MethodEntry::static_method(c, "Target").with_signature(vec![int]))
            .unwrap();
        s.declare_type_param(GenericOwner::Method(c_target_g), "K").unwrap();

        let boxed = s.register_type(TypeEntry::class("Box")).unwrap();
        let box_t = s.declare_type_param(GenericOwner::Type(boxed), "T").unwrap();
        let box_test = s.register_method(MethodEntry::new(boxed, "Test")).unwrap();

        let d = s.register_type(TypeEntry::class("D")).unwrap();
        let d_t = s.declare_type_param(GenericOwner::Type(d), "T").unwrap();
        let d_test = s.register_method(MethodEntry::new(d, "Test")).unwrap();
        let d_m = s.declare_type_param(GenericOwner::Method(d_test), "M").unwrap();
        s.add_constraint(d_m, TypeConstraint::Type(TypeRef::param(d_t))).unwrap();

        let e = s.register_type(TypeEntry::class("E")).unwrap();
        let e_test = s.register_method(MethodEntry::static_method(e, "Test")).unwrap();
        let e_t = s.declare_type_param(GenericOwner::Method(e_test), "T").unwrap();
        let e_owner = s
            .register_method(
                MethodEntry::static_method(e, "Owner")
                    .with_kind(MethodKind::LocalFunction)
                    .nested_in(e_test),
            )
            .unwrap();
        let e_g = s.declare_type_param(GenericOwner::Method(e_owner), "G").unwrap();
        let e_lf1 = s
            .register_method(
                MethodEntry::static_method(e, "LF1")
                    .with_kind(MethodKind::LocalFunction)
                    .nested_in(e_owner),
            )
            .unwrap();

        let f = s.register_type(TypeEntry::class("F")).unwrap();
        let f_test = s.register_method(MethodEntry::static_method(f, "Test")).unwrap();
        let f_a = s.declare_type_param(GenericOwner::Method(f_test), "A").unwrap();
        let f_b = s.declare_type_param(GenericOwner::Method(f_test), "B").unwrap();
        s.add_constraint(f_a, TypeConstraint::Type(TypeRef::param(f_b))).unwrap();
        s.add_constraint(f_b, TypeConstraint::ReferenceType).unwrap();

        let outer = s.register_type(TypeEntry::class("Outer")).unwrap();
        let outer_u = s.declare_type_param(GenericOwner::Type(outer), "U").unwrap();
        let inner = s
            .register_type(TypeEntry::class("Outer.Inner").with_containing(outer))
            .unwrap();
        let inner_run = s.register_method(MethodEntry::new(inner, "Run")).unwrap();

        Self {
            symbols: s,
            int,
            string,
            action,
            func,
            c,
            c_main,
            c_target,
            c_target_g,
            boxed,
            box_t,
            box_test,
            d,
            d_t,
            d_test,
            d_m,
            e,
            e_test,
            e_t,
            e_owner,
            e_g,
            e_lf1,
            f,
            f_test,
            f_a,
            f_b,
            outer,
            outer_u,
            inner,
            inner_run,
        }
    }

    /// `C.Target<arg>`
    pub fn generic_target(&self, arg: TypeRef) -> MethodRef {
        MethodRef::new(self.c_target_g, TypeRef::named(self.c)).with_type_args(vec![arg])
    }

    /// `Func<arg>`
    pub fn func_of(&self, arg: TypeRef) -> TypeRef {
        TypeRef::generic(self.func, vec![arg])
    }

    /// `(Action)C.Target` inside `enclosing_type` / `enclosing_method`.
    pub fn static_target_in(
        &self,
        enclosing_type: TypeHash,
        enclosing_method: Option<TypeHash>,
    ) -> ConversionRequest {
        let request = ConversionRequest::new(
            SiteId(0),
            MethodRef::new(self.c_target, TypeRef::named(self.c)),
            TypeRef::named(self.action),
            enclosing_type,
        );
        match enclosing_method {
            Some(method) => request.in_method(method),
            None => request,
        }
    }
}
