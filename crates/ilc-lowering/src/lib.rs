//! The IL-AST-to-C-AST lowering pass.
//!
//! `transform()` is the single entry point: it drives a fresh
//! [`Transformer`] over one [`Program`] and returns the [`CFile`] it built
//! plus any [`Diagnostic`]s raised along the way. Most of the rest of this
//! crate (`TypeSystem`, `StructBuilder`, `IdiomLowerer`,
//! `StatementLowerer`, `NameMangler`) is an `impl Transformer` block in
//! its own module, mutating the one scratch struct that lives for exactly
//! the duration of this call. The length-companion tracking concern has
//! no single home: it is the producer's responsibility wherever a
//! pointer-typed binding is created (`statement_lowerer::array_length_initializer`
//! for declarators, `struct_builder` for fields, `idiom_lowerer::resolve_length_expr`/
//! `lower_call_arguments` for call sites), since each producer already
//! has the context (declarator, field, call) a standalone tracker would
//! have to reconstruct.

mod expr_type;
mod idiom_lowerer;
mod name_mangler;
mod statement_lowerer;
mod struct_builder;
mod transformer;
mod type_system;

pub use name_mangler::NameMangler;
pub use transformer::{FunctionSignature, Transformer};
pub use type_system::TypeSystem;

use ilc_ast::{Expr, Pattern, Program, Stmt, VarDecl, VarKind};
use ilc_common::{Diagnostic, LoweringOptions};
use ilc_ctype::{CDefine, CFile, CGlobal};

/// Lowers `program` into a typed C AST under `options`.
///
/// Diagnostics are additive, never fatal: even a program that raises one
/// or more [`Diagnostic::error`] entries still returns the best-effort
/// [`CFile`] produced so far, per the silent-degradation error model (the
/// lowering pass never panics on malformed or unrepresentable input).
pub fn transform(program: &Program, options: LoweringOptions) -> (CFile, Vec<Diagnostic>) {
    let mut t = Transformer::new(options);

    if t.options.add_headers {
        t.file.ensure_include("stdint.h");
        t.file.ensure_include("stddef.h");
        t.file.ensure_include("stdbool.h");
    }
    if t.options.add_comments {
        t.file.header_comment = Some(
            "Generated by the IL-AST-to-C-AST lowering pass. Do not edit by hand.".to_string(),
        );
    }

    // Forward-reference pre-scan: register every top-level class name and
    // function signature before lowering any body, mirroring the
    // per-class method pre-scan `StructBuilder::prescan_method_return_types`
    // already does within a single class (spec.md §3 scope state).
    for stmt in &program.body {
        match stmt {
            Stmt::ClassDecl { class, .. } => {
                t.class_names.insert(class.name.clone());
            }
            Stmt::FunctionDecl { function, .. } => {
                t.prescan_function_decl(function);
            }
            _ => {}
        }
    }

    for stmt in &program.body {
        lower_top_level_stmt(&mut t, stmt);
    }

    (t.file, t.diagnostics)
}

/// Dispatches one top-level statement. Only `ClassDecl`, `FunctionDecl`
/// and `VarDecl` have a module-scope meaning in the output contract;
/// a bare `return` at module scope is discarded (spec.md §4.5) and any
/// other top-level statement kind (an IIFE call, a bare expression) has
/// no place in a C translation unit and is silently dropped rather than
/// diagnosed, per the degrade-don't-panic error model.
fn lower_top_level_stmt(t: &mut Transformer, stmt: &Stmt) {
    match stmt {
        Stmt::ClassDecl { class, .. } => t.register_class(class),
        Stmt::FunctionDecl { function, .. } => {
            if let Some(func) = t.lower_function_decl(function) {
                t.file.functions.push(func);
            }
        }
        Stmt::VarDecl(decl) => lower_top_level_var_decl(t, decl),
        Stmt::Return { .. } | Stmt::Empty { .. } => {}
        _ => {}
    }
}

/// `const X = ...;` at module scope becomes a `CGlobal`. An
/// `Object.freeze([...])`-wrapped array literal additionally becomes a
/// `static const` global with a matching `#define X_length N` (spec.md §8
/// invariant 4: "every `Object.freeze([...])` at module scope: the array
/// becomes a `static const T[]` global with a matching `#define
/// <NAME>_length <n>`").
fn lower_top_level_var_decl(t: &mut Transformer, decl: &VarDecl) {
    for d in &decl.declarations {
        let Pattern::Identifier(name) = &d.id else {
            // Destructuring at module scope has no C equivalent; degrades
            // silently rather than producing a malformed global.
            continue;
        };

        let c_name = t.mangler.escape_identifier(name);
        if c_name != *name {
            t.renamed_variables.insert(name.clone(), c_name.clone());
        }

        let is_freeze = matches!(&d.init, Some(init) if is_freeze_call(init));
        let stripped = d.init.as_ref().map(|e| struct_builder::strip_freeze(e));

        let mut ty = if let Some(ann) = &d.type_annotation {
            TypeSystem::map_type(&ann.name)
        } else if let Some(e) = stripped {
            t.infer_type_from_value(e)
        } else {
            TypeSystem::infer_type_from_name(name)
        };
        if is_freeze {
            ty = ty.const_().static_();
        } else if decl.kind == VarKind::Const && !ty.is_pointer_like() {
            ty = ty.const_();
        }

        let init_expr = stripped.map(|e| t.lower_expr(e));

        if is_freeze {
            if let Some(Expr::Array { elements, .. }) = stripped {
                t.file.defines.push(CDefine {
                    name: format!("{c_name}_length"),
                    value: elements.len().to_string(),
                });
            }
        }

        t.declare_var(c_name.clone(), ty.clone());
        t.module_constant_types.insert(c_name.clone(), ty.clone());
        t.file.globals.push(CGlobal {
            name: c_name,
            ty,
            init: init_expr,
        });
    }
}

fn is_freeze_call(expr: &Expr) -> bool {
    if let Expr::Call { callee, .. } = expr {
        if let Expr::Member { object: _, property, .. } = callee.as_ref() {
            if let Expr::Identifier { name, .. } = property.as_ref() {
                return name == "freeze";
            }
        }
    }
    false
}
