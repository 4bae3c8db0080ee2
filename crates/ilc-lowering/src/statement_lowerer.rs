//! StatementLowerer (spec.md §4.5): for-of/for-in -> indexed for, try/catch
//! -> block-drop with throw -> typed return, and the remaining structural
//! statement mappings.

use ilc_ast::{Declarator, Expr, LogicalOp, Pattern, Stmt, VarKind};
use ilc_ctype::{CExpr, CFunction, CStmt, IntSuffix, Type};

use crate::idiom_lowerer::pack_spec;
use crate::transformer::{FunctionSignature, Transformer};
use crate::type_system::TypeSystem;

impl Transformer {
    pub fn lower_block(&mut self, body: &[Stmt]) -> Vec<CStmt> {
        body.iter().flat_map(|s| self.lower_stmt(s)).collect()
    }

    fn lower_stmt(&mut self, stmt: &Stmt) -> Vec<CStmt> {
        match stmt {
            Stmt::ExprStmt { expression, .. } => vec![CStmt::expr(self.lower_expr(expression))],
            Stmt::VarDecl(decl) => self.lower_var_decl(decl),
            Stmt::Return { argument, .. } => {
                let value = argument.as_ref().map(|e| self.lower_expr(e));
                vec![CStmt::Return { value }]
            }
            Stmt::If { test, consequent, alternate, .. } => {
                let cond = self.lower_expr(test);
                let then_branch = self.lower_stmt(consequent);
                let else_branch = alternate.as_ref().map(|a| self.lower_stmt(a));
                vec![CStmt::If { cond, then_branch, else_branch }]
            }
            Stmt::For { init, test, update, body, .. } => {
                self.push_scope();
                let c_init = init.as_ref().map(|s| {
                    let mut lowered = self.lower_stmt(s);
                    Box::new(lowered.pop().unwrap_or(CStmt::comment("empty for-init")))
                });
                let c_test = test.as_ref().map(|e| self.lower_expr(e));
                let c_update = update.as_ref().map(|e| self.lower_expr(e));
                let c_body = self.lower_stmt(body);
                self.pop_scope();
                vec![CStmt::For { init: c_init, cond: c_test, step: c_update, body: c_body }]
            }
            Stmt::ForOf { left, left_kind, right, body, is_for_in, .. } => {
                self.lower_for_of(left, *left_kind, right, body, *is_for_in)
            }
            Stmt::While { test, body, .. } => {
                let cond = self.lower_expr(test);
                let c_body = self.lower_stmt(body);
                vec![CStmt::While { cond, body: c_body }]
            }
            Stmt::DoWhile { body, test, .. } => {
                let c_body = self.lower_stmt(body);
                let cond = self.lower_expr(test);
                vec![CStmt::DoWhile { body: c_body, cond }]
            }
            Stmt::Switch { discriminant, cases, .. } => {
                let disc = self.lower_expr(discriminant);
                let c_cases = cases
                    .iter()
                    .map(|case| ilc_ctype::CSwitchCase {
                        test: case.test.as_ref().map(|e| self.lower_expr(e)),
                        body: case.consequent.iter().flat_map(|s| self.lower_stmt(s)).collect(),
                    })
                    .collect();
                vec![CStmt::Switch { discriminant: disc, cases: c_cases }]
            }
            Stmt::Try { block, catch_param, catch_body, finally_body, .. } => {
                self.lower_try(block, catch_param.as_ref(), catch_body.as_deref(), finally_body.as_deref())
            }
            Stmt::Throw { argument, .. } => vec![self.lower_throw(argument)],
            Stmt::Block { body, .. } => {
                self.push_scope();
                let lowered = self.lower_block(body);
                self.pop_scope();
                vec![CStmt::Block { body: lowered }]
            }
            Stmt::Break { .. } => vec![CStmt::Break],
            Stmt::Continue { .. } => vec![CStmt::Continue],
            Stmt::Labeled { label, body, .. } => {
                let mut out = vec![CStmt::Label { name: label.clone() }];
                out.extend(self.lower_stmt(body));
                out
            }
            Stmt::StaticBlock { body, .. } => self.lower_block(body),
            Stmt::Empty { .. } => vec![],
            Stmt::ClassDecl { class, .. } => {
                self.register_class(class);
                vec![]
            }
            Stmt::FunctionDecl { function, .. } => {
                if let Some(func) = self.lower_function_decl(function) {
                    self.file.functions.push(func);
                }
                vec![]
            }
        }
    }

    /// Lowers a (top-level, or hoisted-out-of-block) function declaration
    /// into a free C function. Mirrors `struct_builder::lower_methods`'
    /// per-function param/return handling, minus the `self` parameter.
    pub fn lower_function_decl(&mut self, fd: &ilc_ast::FunctionDecl) -> Option<CFunction> {
        let name = fd.name.as_ref()?;
        let c_name = self.mangler.escape_function_name(name);
        if c_name != *name {
            self.renamed_variables.insert(name.clone(), c_name.clone());
        }
        let return_type = fd
            .return_type
            .as_ref()
            .map(|ann| TypeSystem::map_type(&ann.name))
            .unwrap_or_else(|| self.infer_return_type_from_body(&fd.body));
        let mut func = CFunction::new(c_name, return_type.clone());

        self.push_scope();
        for param in &fd.params {
            if let Pattern::Identifier(pname) = &param.pattern {
                let ty = param
                    .type_annotation
                    .as_ref()
                    .map(|ann| TypeSystem::map_type(&ann.name))
                    .unwrap_or_else(|| TypeSystem::infer_type_from_name(pname));
                let p_c_name = self.mangler.escape_identifier(pname);
                if p_c_name != *pname {
                    self.renamed_variables.insert(pname.clone(), p_c_name.clone());
                }
                func.push_param(p_c_name.clone(), ty.clone());
                self.declare_var(p_c_name, ty);
            }
        }
        let prev_return_type = self.current_return_type.replace(return_type);
        self.prescan_empty_array_push_types(&fd.body);
        func.body = self.lower_block(&fd.body);
        self.current_return_type = prev_return_type;
        self.pop_scope();
        Some(func)
    }

    /// Registers a top-level function's signature ahead of lowering any
    /// bodies, so a function that calls another function declared later in
    /// the file still gets a correctly inferred return type and call-site
    /// length expansion (spec.md §3 "functions" scope state).
    pub fn prescan_function_decl(&mut self, fd: &ilc_ast::FunctionDecl) {
        let Some(name) = &fd.name else { return };
        let return_type = fd
            .return_type
            .as_ref()
            .map(|ann| TypeSystem::map_type(&ann.name))
            .unwrap_or_else(|| self.infer_return_type_from_body(&fd.body));
        let param_types = fd
            .params
            .iter()
            .map(|p| match &p.pattern {
                Pattern::Identifier(pname) => p
                    .type_annotation
                    .as_ref()
                    .map(|ann| TypeSystem::map_type(&ann.name))
                    .unwrap_or_else(|| TypeSystem::infer_type_from_name(pname)),
                _ => Type::uint(32),
            })
            .collect();
        self.functions.insert(
            name.clone(),
            FunctionSignature {
                return_type,
                param_types,
            },
        );
    }

    fn lower_var_decl(&mut self, decl: &ilc_ast::VarDecl) -> Vec<CStmt> {
        let mut out = Vec::new();
        for d in &decl.declarations {
            out.extend(self.lower_declarator(d, decl.kind));
        }
        out
    }

    fn lower_declarator(&mut self, decl: &Declarator, kind: VarKind) -> Vec<CStmt> {
        match &decl.id {
            Pattern::Identifier(name) => {
                let mut ty = self.declarator_type(decl);
                if kind == VarKind::Const && !ty.is_pointer_like() {
                    ty = ty.const_();
                }
                let c_name = self.resolve_declared_name(name, decl.init.as_ref());
                self.register_special_length_vars(name, &c_name, decl.init.as_ref());
                let init = decl.init.as_ref().map(|e| self.lower_expr(e));
                self.declare_var(c_name.clone(), ty.clone());
                let mut out = vec![CStmt::var_decl(ty.clone(), c_name.clone(), init)];
                if ty.is_pointer_like() {
                    match self.array_length_initializer(decl.init.as_ref()) {
                        Some(len_init) => {
                            tracing::trace!(var = %c_name, "array length companion created");
                            out.push(CStmt::var_decl(Type::size_t(), format!("{c_name}_length"), Some(len_init)));
                        }
                        // `filter`/`map`/`split` sources resolve their length
                        // through `special_length_vars` (registered above)
                        // rather than a plain companion; every other `None`
                        // is an unanticipated initializer shape, which still
                        // gets the `0U` fallback invariant 2 requires rather
                        // than silently having no companion at all.
                        None if self.special_length_vars.contains_key(name) => {
                            tracing::trace!(var = %c_name, "array length companion deferred to special_length_vars");
                        }
                        None => {
                            tracing::debug!(var = %c_name, "array length companion fell back to 0U (unmatched initializer)");
                            out.push(CStmt::var_decl(Type::size_t(), format!("{c_name}_length"), Some(CExpr::uint(0))));
                        }
                    }
                }
                out
            }
            Pattern::Array(elements) => self.lower_array_destructure(elements, decl.init.as_ref()),
            Pattern::Object(_) => {
                vec![CStmt::comment("object destructuring pattern not expanded")]
            }
            Pattern::Rest(_) => vec![CStmt::comment("rest pattern in declaration position")],
        }
    }

    fn lower_array_destructure(&mut self, elements: &[Option<Pattern>], init: Option<&Expr>) -> Vec<CStmt> {
        let Some(source) = init else {
            return vec![CStmt::comment("array destructuring without initializer")];
        };
        let source_c = self.lower_expr(source);
        let elem_ty = self.infer_type_from_value(source);
        let scalar_ty = if elem_ty.is_pointer_like() {
            elem_ty.element()
        } else {
            Type::uint(32)
        };
        let mut out = Vec::new();
        for (i, el) in elements.iter().enumerate() {
            let Some(Pattern::Identifier(name)) = el else {
                continue;
            };
            self.declare_var(name.clone(), scalar_ty.clone());
            out.push(CStmt::var_decl(
                scalar_ty.clone(),
                name.clone(),
                Some(CExpr::Index {
                    object: Box::new(source_c.clone()),
                    index: Box::new(CExpr::uint(i as u64)),
                }),
            ));
        }
        out
    }

    /// Reserved-word escaping and call-shadow renaming for a declared
    /// local (spec.md §4.6): `int` -> `int_`; `let encrypt = encrypt(x)`
    /// -> `encrypt_val = encrypt(x)` so the declaration doesn't shadow the
    /// function it calls. Registers the rename in `renamed_variables` so
    /// later `Identifier` lookups resolve to the same C name.
    fn resolve_declared_name(&mut self, name: &str, init: Option<&Expr>) -> String {
        let escaped = self.mangler.escape_identifier(name);
        let called = init.map(collect_call_target_names).unwrap_or_default();
        let c_name = self.mangler.shadow_safe_variable_name(&escaped, &called);
        if c_name != name {
            self.renamed_variables.insert(name.to_string(), c_name.clone());
        }
        c_name
    }

    /// Registers the helper-macro-backed length lookup for a declarator
    /// initialized from `.split(...)`/`.filter(...)`/`.map(...)` (spec.md
    /// §3 `split_result_vars`/`filter_result_vars`/`special_length_vars`):
    /// these results have no companion length variable, so a later read of
    /// `<name>`'s length must resolve through the corresponding runtime
    /// macro instead of an undeclared `<name>_length` identifier.
    fn register_special_length_vars(&mut self, source_name: &str, c_name: &str, init: Option<&Expr>) {
        let Some(Expr::Call { callee, .. }) = init else { return };
        let Expr::Member { property, computed: false, .. } = callee.as_ref() else { return };
        let Expr::Identifier { name: method, .. } = property.as_ref() else { return };
        match method.as_str() {
            "split" => {
                self.split_result_vars.insert(source_name.to_string());
                self.special_length_vars
                    .insert(source_name.to_string(), format!("STRING_SPLIT_LENGTH({c_name})"));
            }
            "filter" => {
                self.filter_result_vars.insert(source_name.to_string());
                self.special_length_vars
                    .insert(source_name.to_string(), format!("ARRAY_FILTER_LENGTH({c_name})"));
            }
            "map" => {
                self.special_length_vars
                    .insert(source_name.to_string(), format!("ARRAY_MAP_LENGTH({c_name})"));
            }
            _ => {}
        }
    }

    /// Forward scan of `<name>.push(arg)` calls against an empty-array
    /// initialized variable (spec.md §3 `empty_array_push_types`):
    /// collects the pushed element's type across the whole body before any
    /// declarator lowers, mirroring `prescan_method_return_types`'s
    /// whole-body pre-scan pattern.
    pub fn prescan_empty_array_push_types(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.prescan_empty_array_push_types_stmt(stmt);
        }
    }

    fn prescan_empty_array_push_types_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::ExprStmt { expression, .. } => self.prescan_push_call(expression),
            Stmt::Block { body, .. } => self.prescan_empty_array_push_types(body),
            Stmt::If { consequent, alternate, .. } => {
                self.prescan_empty_array_push_types_stmt(consequent);
                if let Some(alt) = alternate {
                    self.prescan_empty_array_push_types_stmt(alt);
                }
            }
            Stmt::For { body, .. }
            | Stmt::While { body, .. }
            | Stmt::DoWhile { body, .. }
            | Stmt::Labeled { body, .. } => self.prescan_empty_array_push_types_stmt(body),
            Stmt::ForOf { body, .. } => self.prescan_empty_array_push_types_stmt(body),
            Stmt::Switch { cases, .. } => {
                for case in cases {
                    for s in &case.consequent {
                        self.prescan_empty_array_push_types_stmt(s);
                    }
                }
            }
            Stmt::Try { block, catch_body, finally_body, .. } => {
                for s in block {
                    self.prescan_empty_array_push_types_stmt(s);
                }
                if let Some(b) = catch_body {
                    for s in b {
                        self.prescan_empty_array_push_types_stmt(s);
                    }
                }
                if let Some(b) = finally_body {
                    for s in b {
                        self.prescan_empty_array_push_types_stmt(s);
                    }
                }
            }
            _ => {}
        }
    }

    fn prescan_push_call(&mut self, expr: &Expr) {
        let Expr::Call { callee, arguments, .. } = expr else { return };
        let Expr::Member { object, property, computed: false, .. } = callee.as_ref() else { return };
        let Expr::Identifier { name: var, .. } = object.as_ref() else { return };
        let Expr::Identifier { name: method, .. } = property.as_ref() else { return };
        if method != "push" {
            return;
        }
        let Some(arg) = arguments.first() else { return };
        let elem_ty = self.infer_type_from_value(arg);
        match self.empty_array_push_types.get(var).cloned() {
            Some(existing) => {
                self.empty_array_push_types.insert(var.clone(), TypeSystem::upgrade(&existing, &elem_ty));
            }
            None => {
                self.empty_array_push_types.insert(var.clone(), elem_ty);
            }
        }
    }

    fn declarator_type(&mut self, decl: &Declarator) -> Type {
        if let Some(ann) = &decl.type_annotation {
            return TypeSystem::map_type(&ann.name);
        }
        let Pattern::Identifier(name) = &decl.id else {
            return Type::uint(32);
        };
        match &decl.init {
            Some(Expr::Array { elements, .. }) if elements.is_empty() => match self
                .empty_array_push_types
                .get(name)
                .cloned()
            {
                Some(elem_ty) => elem_ty.pointer_to_if_array_name(),
                None => TypeSystem::infer_type_from_name(name).pointer_to_if_array_name(),
            },
            Some(Expr::Literal { value: ilc_ast::Literal::Null, .. }) => {
                TypeSystem::infer_type_from_name(name)
            }
            Some(expr) => self.infer_type_from_value(expr),
            None => TypeSystem::infer_type_from_name(name),
        }
    }

    /// Creation-rules table (spec.md §4.3): maps a declarator's initializer
    /// shape to the expression that computes the companion `_length`.
    fn array_length_initializer(&mut self, init: Option<&Expr>) -> Option<CExpr> {
        let init = init?;
        match init {
            Expr::Array { elements, .. } if !elements.is_empty() => {
                Some(CExpr::uint(elements.len() as u64))
            }
            // `let buf = [];` pins the companion length to `0U`, not "no
            // companion" (spec.md §4.3 creation-rules table): the pointer
            // still needs a matching length in scope per invariant 2.
            Expr::Array { .. } => Some(CExpr::uint(0)),
            Expr::New { callee, arguments, .. } => {
                if let Expr::Identifier { name, .. } = callee.as_ref() {
                    if name.starts_with("Uint") || name.starts_with("Int") || name.starts_with("Float") || name == "Array" {
                        let Some(n) = arguments.first() else { return Some(CExpr::uint(0)) };
                        // `new T(n)`: `n` itself may be a pointer-typed
                        // identifier (a buffer passed in as a sizing hint),
                        // in which case the companion is that buffer's own
                        // length, not the pointer value (spec.md §4.3).
                        return Some(if self.infer_type_from_value(n).is_pointer_like() {
                            self.resolve_length_expr(n)
                        } else {
                            self.lower_expr(n)
                        });
                    }
                }
                None
            }
            Expr::Call { callee, arguments, .. } => {
                // `new T(arr).fill(v)` -> `arr_length` (spec.md §4.3): the
                // receiver is itself a `New` expression, not an
                // identifier, so it's checked ahead of every other
                // dispatch below.
                if let Expr::Member { object, property, computed: false, .. } = callee.as_ref() {
                    if let (Expr::New { arguments: new_args, .. }, Expr::Identifier { name: method, .. }) =
                        (object.as_ref(), property.as_ref())
                    {
                        if method == "fill" {
                            return Some(new_args.first().map(|a| self.resolve_length_expr(a)).unwrap_or(CExpr::uint(0)));
                        }
                    }
                }
                if let Expr::Identifier { name, .. } = callee.as_ref() {
                    if name == "CopyArray" {
                        return arguments.first().map(|e| self.resolve_length_expr(e));
                    }
                    if name == "AnsiToBytes" {
                        self.file.ensure_include("string.h");
                        let s = arguments.first().map(|e| self.lower_expr(e)).unwrap_or(CExpr::Null);
                        return Some(CExpr::call("strlen", vec![s]));
                    }
                    if let Some((width, _)) = pack_spec(name, "Unpack") {
                        return Some(CExpr::UInt { value: (width / 8) as u64, suffix: IntSuffix::U });
                    }
                }
                if let Expr::Member { object, property, .. } = callee.as_ref() {
                    if let Expr::Identifier { name: method, .. } = property.as_ref() {
                        // `String.fromCharCode(...x)` -> `x_length`; the
                        // single-argument (non-spread) form lowers to a
                        // scalar `char` cast, not a pointer, so it never
                        // reaches this pointer-only path.
                        if matches!(object.as_ref(), Expr::Identifier { name, .. } if name == "String")
                            && method == "fromCharCode"
                        {
                            return match arguments.first() {
                                Some(Expr::Spread { argument, .. }) => Some(self.resolve_length_expr(argument)),
                                _ => Some(CExpr::uint(0)),
                            };
                        }
                        match method.as_str() {
                            // `arr.slice(start, end)` -> `end - start`;
                            // `arr.slice(start)` -> `arr_length - start`
                            // (spec.md §8 Scenario 3).
                            "slice" => {
                                return match arguments.len() {
                                    0 => Some(self.resolve_length_expr(object)),
                                    1 => {
                                        let start = self.lower_expr(&arguments[0]);
                                        Some(CExpr::binary("-", self.resolve_length_expr(object), start))
                                    }
                                    _ => {
                                        let start = self.lower_expr(&arguments[0]);
                                        let end = self.lower_expr(&arguments[1]);
                                        Some(CExpr::binary("-", end, start))
                                    }
                                };
                            }
                            "concat" => {
                                let mut total = self.resolve_length_expr(object);
                                for a in arguments {
                                    total = CExpr::binary("+", total, self.resolve_length_expr(a));
                                }
                                return Some(total);
                            }
                            // `filter`/`map`/`split` can shrink or reshape
                            // the source (or have no natural element
                            // count at all) in a way not knowable without
                            // running the callback; their length resolves
                            // through the `special_length_vars` macro
                            // instead of a plain companion (spec.md §3
                            // `split_result_vars`/`filter_result_vars`/
                            // `special_length_vars`), so no companion is
                            // declared here.
                            "filter" | "map" | "split" => return None,
                            _ => {}
                        }
                    }
                }
                // Generic function call returning a pointer (spec.md §4.3):
                // the length of any pointer-typed argument that has a
                // known length, else the `0U` fallback.
                let fallback = arguments.iter().find_map(|a| {
                    self.infer_type_from_value(a)
                        .is_pointer_like()
                        .then(|| self.resolve_length_expr(a))
                });
                Some(fallback.unwrap_or(CExpr::uint(0)))
            }
            // `a || b`: length of `a`, or of `b` when `a` isn't
            // pointer-typed (spec.md §4.3).
            Expr::Logical { op: LogicalOp::Or, left, right, .. } => {
                Some(if self.infer_type_from_value(left).is_pointer_like() {
                    self.resolve_length_expr(left)
                } else {
                    self.resolve_length_expr(right)
                })
            }
            Expr::Logical { .. } => None,
            // `cond ? a : b`: recursively resolve against both branches
            // (spec.md §4.3).
            Expr::Conditional { test, consequent, alternate, .. } => {
                let cond = self.lower_expr(test);
                let then_len = self.array_length_initializer(Some(consequent.as_ref()))?;
                let else_len = self.array_length_initializer(Some(alternate.as_ref()))?;
                Some(CExpr::Ternary {
                    cond: Box::new(cond),
                    then_branch: Box::new(then_len),
                    else_branch: Box::new(else_len),
                })
            }
            Expr::Identifier { name, .. } => Some(CExpr::ident(format!("{name}_length"))),
            Expr::Member { .. } => Some(self.resolve_length_expr(init)),
            _ => None,
        }
    }

    fn lower_for_of(
        &mut self,
        left: &Pattern,
        left_kind: VarKind,
        right: &Expr,
        body: &Stmt,
        _is_for_in: bool,
    ) -> Vec<CStmt> {
        let Pattern::Identifier(var_name) = left else {
            return vec![CStmt::comment("destructuring for-of binding not supported")];
        };
        let idx = self.fresh_idx();
        let right_c = self.lower_expr(right);
        let len_c = self.resolve_length_expr(right);
        let elem_ty = {
            let arr_ty = self.infer_type_from_value(right);
            arr_ty.element()
        };

        self.push_scope();
        self.declare_var(var_name.clone(), elem_ty.clone());
        let _ = left_kind;

        let mut inner_body = vec![CStmt::var_decl(
            elem_ty,
            var_name.clone(),
            Some(CExpr::Index {
                object: Box::new(right_c),
                index: Box::new(CExpr::ident(idx.clone())),
            }),
        )];
        inner_body.extend(self.lower_stmt(body));
        self.pop_scope();

        vec![CStmt::For {
            init: Some(Box::new(CStmt::var_decl(Type::size_t(), idx.clone(), Some(CExpr::uint(0))))),
            cond: Some(CExpr::binary("<", CExpr::ident(idx.clone()), len_c)),
            step: Some(CExpr::Unary { op: "++".to_string(), expr: Box::new(CExpr::ident(idx)), prefix: false }),
            body: inner_body,
        }]
    }

    /// spec.md §4.5 "try/catch": the `try` block's statements lower
    /// in-place (no C try construct); `catch`/`finally` bodies are dropped
    /// unless `finally` contains statements that must still run, in which
    /// case they're appended after the block.
    fn lower_try(
        &mut self,
        block: &[Stmt],
        catch_param: Option<&Pattern>,
        catch_body: Option<&[Stmt]>,
        finally_body: Option<&[Stmt]>,
    ) -> Vec<CStmt> {
        let _ = catch_param;
        let _ = catch_body;
        let mut out = self.lower_block(block);
        if let Some(fin) = finally_body {
            out.extend(self.lower_block(fin));
        }
        out
    }

    /// `throw` has no C equivalent; it lowers to a typed "failure return"
    /// per the enclosing function's return-type cascade (spec.md §4.4):
    /// `return NULL` for pointer-returning functions, a bare `return` for
    /// `void`, `return -1` otherwise.
    fn lower_throw(&mut self, argument: &Expr) -> CStmt {
        let _ = self.lower_expr(argument);
        CStmt::Return { value: self.failure_sentinel() }
    }

    /// The nine-method return-pointer-detection cascade (spec.md §4.4):
    /// picks the sentinel a `throw` inside the current function should
    /// return, based on the function's inferred return type. `None` means
    /// a bare `return;` - a `void` function cannot return any value.
    fn failure_sentinel(&mut self) -> Option<CExpr> {
        match &self.current_return_type {
            Some(t) if t.base_name == "void" && !t.is_pointer_like() => None,
            Some(t) if t.is_pointer_like() => Some(CExpr::Null),
            Some(t) if t.base_name == "bool" => Some(CExpr::Bool { value: false }),
            _ => Some(CExpr::Int { value: -1, suffix: ilc_ctype::IntSuffix::None }),
        }
    }
}

/// Collects the names of every identifier called as a function within
/// `expr` (shallow-ish recursion), for `resolve_declared_name`'s
/// shadow-avoidance check.
fn collect_call_target_names(expr: &Expr) -> rustc_hash::FxHashSet<String> {
    let mut out = rustc_hash::FxHashSet::default();
    collect_call_target_names_into(expr, &mut out);
    out
}

fn collect_call_target_names_into(expr: &Expr, out: &mut rustc_hash::FxHashSet<String>) {
    match expr {
        Expr::Call { callee, arguments, .. } => {
            if let Expr::Identifier { name, .. } = callee.as_ref() {
                out.insert(name.clone());
            }
            collect_call_target_names_into(callee, out);
            for a in arguments {
                collect_call_target_names_into(a, out);
            }
        }
        Expr::New { callee, arguments, .. } => {
            collect_call_target_names_into(callee, out);
            for a in arguments {
                collect_call_target_names_into(a, out);
            }
        }
        Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
            collect_call_target_names_into(left, out);
            collect_call_target_names_into(right, out);
        }
        Expr::Unary { argument, .. } | Expr::Spread { argument, .. } | Expr::Chain { expression: argument, .. } => {
            collect_call_target_names_into(argument, out);
        }
        Expr::Conditional { test, consequent, alternate, .. } => {
            collect_call_target_names_into(test, out);
            collect_call_target_names_into(consequent, out);
            collect_call_target_names_into(alternate, out);
        }
        Expr::Member { object, .. } => collect_call_target_names_into(object, out),
        _ => {}
    }
}

trait PointerIfArrayName {
    fn pointer_to_if_array_name(self) -> Type;
}

impl PointerIfArrayName for Type {
    fn pointer_to_if_array_name(self) -> Type {
        if self.is_pointer_like() {
            self
        } else {
            self.pointer_to()
        }
    }
}
