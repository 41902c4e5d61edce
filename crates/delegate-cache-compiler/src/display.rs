//! Human-readable rendering of plans.
//!
//! Used in debug logs and assertions. Output is C#-flavoured:
//!
//! ```text
//! static class D<T>.<Test>O__0<M> where M : T
//! {
//!     static Func<M> <0>__Target;
//! }
//! ```

use std::fmt::Write;

use delegate_cache_core::{
    ConversionSyntax, MethodRef, Receiver, TypeConstraint, TypeHash, TypeRef,
};
use delegate_cache_registry::SymbolTable;

use crate::rewrite::LoweredExpr;
use crate::{CacheContainer, CachePlan, CellRef, ContainerId};

/// Render a type using declared names.
pub fn format_type_ref(ty: &TypeRef, symbols: &SymbolTable) -> String {
    let mut out = String::new();
    write_type(&mut out, ty, symbols, &|p| symbols.type_param_name(p));
    out
}

/// Render a container declaration and its cells.
pub fn format_container(plan: &CachePlan, id: ContainerId, symbols: &SymbolTable) -> String {
    let Some(container) = plan.container(id) else {
        return format!("<unknown container #{}>", id.0);
    };
    let param_name = |p: TypeHash| match container.type_param(p) {
        Some(param) => param.name.clone(),
        None => symbols.type_param_name(p),
    };

    let mut out = String::from("static class ");
    if let Some(host) = container.host {
        write_host(&mut out, host, symbols);
        out.push('.');
    }
    out.push_str(container.name.as_str());
    if container.is_generic() {
        out.push('<');
        let names: Vec<&str> = container.type_params.iter().map(|p| p.name.as_str()).collect();
        out.push_str(&names.join(", "));
        out.push('>');
    }
    for param in &container.type_params {
        if param.constraints.is_empty() {
            continue;
        }
        let _ = write!(out, " where {} : ", param.name);
        let rendered: Vec<String> = param
            .constraints
            .iter()
            .map(|c| format_constraint(c, symbols, &param_name))
            .collect();
        out.push_str(&rendered.join(", "));
    }

    out.push_str("\n{\n");
    for cell in plan.cells_of(id) {
        let mut field = String::new();
        write_type(&mut field, &cell.field_type, symbols, &param_name);
        let _ = writeln!(out, "    static {} {};", field, cell.name);
    }
    out.push('}');
    out
}

/// Render a lowered expression.
pub fn format_lowered(expr: &LoweredExpr, plan: &CachePlan, symbols: &SymbolTable) -> String {
    let mut out = String::new();
    write_lowered(&mut out, expr, plan, symbols);
    out
}

fn write_lowered(out: &mut String, expr: &LoweredExpr, plan: &CachePlan, symbols: &SymbolTable) {
    match expr {
        LoweredExpr::CreateDelegate {
            method,
            receiver,
            delegate_type,
        } => {
            out.push_str("new ");
            out.push_str(&format_type_ref(delegate_type, symbols));
            out.push('(');
            write_method(out, method, *receiver, symbols);
            out.push(')');
        }
        LoweredExpr::LoadCell(cell) => write_cell(out, cell, plan, symbols),
        LoweredExpr::StoreCell { cell, value } => {
            out.push('(');
            write_cell(out, cell, plan, symbols);
            out.push_str(" = ");
            write_lowered(out, value, plan, symbols);
            out.push(')');
        }
        LoweredExpr::Coalesce { value, fallback } => {
            write_lowered(out, value, plan, symbols);
            out.push_str(" ?? ");
            write_lowered(out, fallback, plan, symbols);
        }
        LoweredExpr::Original(original) => {
            let target = format_type_ref(&original.delegate_type, symbols);
            match original.syntax {
                ConversionSyntax::Implicit => {
                    write_method(out, &original.method, original.receiver, symbols)
                }
                ConversionSyntax::Cast => {
                    let _ = write!(out, "({target})");
                    write_method(out, &original.method, original.receiver, symbols);
                }
                ConversionSyntax::Construction => {
                    let _ = write!(out, "new {target}(");
                    write_method(out, &original.method, original.receiver, symbols);
                    out.push(')');
                }
            }
        }
    }
}

fn write_cell(out: &mut String, r: &CellRef, plan: &CachePlan, symbols: &SymbolTable) {
    let Some(cell) = plan.cell(r.cell) else {
        let _ = write!(out, "<cell #{}>", r.cell.0);
        return;
    };
    let Some(container) = plan.container(cell.container) else {
        let _ = write!(out, "<container #{}>", cell.container.0);
        return;
    };
    write_container_path(out, container, r, symbols);
    out.push('.');
    out.push_str(cell.name.as_str());
}

fn write_container_path(
    out: &mut String,
    container: &CacheContainer,
    r: &CellRef,
    symbols: &SymbolTable,
) {
    if let Some(host) = container.host {
        out.push_str(&symbols.type_name(host));
        write_args(out, &r.host_args, symbols);
        out.push('.');
    }
    out.push_str(container.name.as_str());
    write_args(out, &r.own_args, symbols);
}

fn write_host(out: &mut String, host: TypeHash, symbols: &SymbolTable) {
    out.push_str(&symbols.type_name(host));
    let params = symbols.type_params_in_scope(host);
    if !params.is_empty() {
        let names: Vec<String> = params.iter().map(|p| symbols.type_param_name(*p)).collect();
        let _ = write!(out, "<{}>", names.join(", "));
    }
}

fn write_method(out: &mut String, method: &MethodRef, receiver: Receiver, symbols: &SymbolTable) {
    match receiver {
        Receiver::None => out.push_str(&format_type_ref(&method.containing_type, symbols)),
        Receiver::Fixed(identity) => {
            let _ = write!(out, "{identity}");
        }
        Receiver::Variable => out.push_str("<receiver>"),
    }
    out.push('.');
    out.push_str(&symbols.method_name(method.method));
    write_args(out, &method.type_args, symbols);
}

fn write_args(out: &mut String, args: &[TypeRef], symbols: &SymbolTable) {
    if args.is_empty() {
        return;
    }
    out.push('<');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_type(out, arg, symbols, &|p| symbols.type_param_name(p));
    }
    out.push('>');
}

fn format_constraint(
    constraint: &TypeConstraint,
    symbols: &SymbolTable,
    param_name: &dyn Fn(TypeHash) -> String,
) -> String {
    match constraint {
        TypeConstraint::ReferenceType => "class".to_string(),
        TypeConstraint::ValueType => "struct".to_string(),
        TypeConstraint::Unmanaged => "unmanaged".to_string(),
        TypeConstraint::DefaultConstructor => "new()".to_string(),
        TypeConstraint::Type(ty) => {
            let mut out = String::new();
            write_type(&mut out, ty, symbols, param_name);
            out
        }
    }
}

fn write_type(
    out: &mut String,
    ty: &TypeRef,
    symbols: &SymbolTable,
    param_name: &dyn Fn(TypeHash) -> String,
) {
    match ty {
        TypeRef::Named { def, args } => {
            let name = symbols
                .get_type(*def)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| def.to_string());
            out.push_str(&name);
            if !args.is_empty() {
                out.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(out, arg, symbols, param_name);
                }
                out.push('>');
            }
        }
        TypeRef::Param(hash) => out.push_str(&param_name(*hash)),
        TypeRef::Array(inner) => {
            write_type(out, inner, symbols, param_name);
            out.push_str("[]");
        }
        TypeRef::Pointer(inner) => {
            write_type(out, inner, symbols, param_name);
            out.push('*');
        }
        TypeRef::Nullable(inner) => {
            write_type(out, inner, symbols, param_name);
            out.push('?');
        }
        TypeRef::Tuple(elements) => {
            out.push('(');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(out, &element.ty, symbols, param_name);
                if let Some(name) = &element.name {
                    out.push(' ');
                    out.push_str(name);
                }
            }
            out.push(')');
        }
        TypeRef::Dynamic => out.push_str("dynamic"),
        TypeRef::Object => out.push_str("object"),
    }
}
