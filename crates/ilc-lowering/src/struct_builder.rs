//! StructBuilder (spec.md §4.2): class-to-struct promotion, the five
//! ordered field-discovery passes, constructor synthesis, method naming,
//! static-field globalization, and anonymous-struct generation for
//! object literals.

use ilc_ast::{ClassDecl, ClassMember, Expr, MethodKind, ObjectProp, Pattern, Stmt};
use ilc_common::Diagnostic;
use ilc_ctype::{CExpr, CFunction, CStmt, CStruct, Type};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::transformer::{FunctionSignature, Transformer};
use crate::type_system::TypeSystem;

impl Transformer {
    /// Entry point for a class declaration encountered by the driver.
    pub fn register_class(&mut self, class: &ClassDecl) {
        tracing::debug!(class = %class.name, "register_class: entering five-pass struct promotion");
        self.class_names.insert(class.name.clone());

        // A flat C struct has no base-struct embedding: an `extends`
        // clause means some members genuinely cannot be represented, so
        // this is a structural defect worth surfacing rather than a
        // silently-degraded idiom (spec.md §3 "Diagnostic model").
        if let Some(base) = &class.super_class {
            self.diagnostics.push(Diagnostic::warning(
                class.span,
                format!(
                    "class `{}` extends `{base}`; inherited members are not lowered",
                    class.name
                ),
            ));
        }

        let mut strukt = CStruct::new(class.name.clone());
        let mut field_param_alias: IndexMap<String, String> = IndexMap::new();
        let mut ctor_params: Vec<ilc_ast::Param> = Vec::new();

        let mut ctor_literal_field_inits: Vec<(String, Expr)> = Vec::new();
        tracing::trace!(class = %class.name, pass = "prescan_method_return_types", "entering pass");
        self.prescan_method_return_types(class);
        tracing::trace!(class = %class.name, pass = "extract_constructor_fields", "entering pass");
        self.extract_constructor_fields(
            class,
            &mut strukt,
            &mut field_param_alias,
            &mut ctor_params,
            &mut ctor_literal_field_inits,
        );
        tracing::trace!(class = %class.name, pass = "discover_dynamic_fields", "entering pass");
        self.discover_dynamic_fields(class, &mut strukt);
        tracing::trace!(class = %class.name, pass = "promote_2d_array_fields", "entering pass");
        self.promote_2d_array_fields(class, &mut strukt);
        tracing::trace!(class = %class.name, pass = "refine_fields_from_member_access", "entering pass");
        self.refine_fields_from_member_access(class, &mut strukt);

        for (name, ty) in strukt.fields.iter() {
            self.struct_field_types.insert(name.clone(), ty.clone());
        }

        self.file.structs.push(strukt);

        self.synthesize_constructor(class, &field_param_alias, &ctor_params, &ctor_literal_field_inits);
        self.lower_methods(class);
        self.lower_static_fields(class);
        tracing::debug!(class = %class.name, "register_class: exiting five-pass struct promotion");
    }

    fn prescan_method_return_types(&mut self, class: &ClassDecl) {
        for member in &class.body {
            if let ClassMember::Method {
                name, function, ..
            } = member
            {
                let ret = self.infer_return_type_from_body(&function.body);
                let qualified = self.mangler.method_name(&class.name, name, None);
                self.functions.insert(
                    qualified,
                    FunctionSignature {
                        return_type: ret.clone(),
                        param_types: function
                            .params
                            .iter()
                            .map(|p| self.param_type_hint(p))
                            .collect(),
                    },
                );
                self.functions.insert(
                    name.clone(),
                    FunctionSignature {
                        return_type: ret,
                        param_types: Vec::new(),
                    },
                );
            }
        }
    }

    fn param_type_hint(&self, param: &ilc_ast::Param) -> Type {
        if let Some(ann) = &param.type_annotation {
            return TypeSystem::map_type(&ann.name);
        }
        if let Pattern::Identifier(name) = &param.pattern {
            return TypeSystem::infer_type_from_name(name);
        }
        Type::uint(32)
    }

    fn extract_constructor_fields(
        &mut self,
        class: &ClassDecl,
        strukt: &mut CStruct,
        field_param_alias: &mut IndexMap<String, String>,
        ctor_params: &mut Vec<ilc_ast::Param>,
        ctor_literal_field_inits: &mut Vec<(String, Expr)>,
    ) {
        let Some(ClassMember::Constructor { function }) = class
            .body
            .iter()
            .find(|m| matches!(m, ClassMember::Constructor { .. }))
        else {
            return;
        };
        ctor_params.extend(function.params.iter().cloned());

        let param_types: FxHashMap<String, Type> = function
            .params
            .iter()
            .filter_map(|p| match &p.pattern {
                Pattern::Identifier(name) => Some((name.clone(), self.param_type_hint(p))),
                _ => None,
            })
            .collect();

        for stmt in &function.body {
            let Stmt::ExprStmt { expression, .. } = stmt else {
                continue;
            };
            let Some((field, value)) = this_assignment(expression) else {
                continue;
            };
            if let Expr::Identifier { name: param, .. } = value {
                field_param_alias.insert(field.clone(), param.clone());
            } else if matches!(value, Expr::Literal { .. }) {
                // A constructor field assigned a fixed literal (e.g.
                // `this.rounds = 16`) has no parameter to copy from, so the
                // synthesized `_new` must hardcode the assignment itself
                // (spec.md §8 Scenario 2).
                ctor_literal_field_inits.push((field.clone(), value.clone()));
            }
            if !strukt.has_field(&field) {
                let ty = self.resolve_field_type(&field, value, &param_types);
                strukt.push_field(field, ty);
            }
        }
    }

    fn resolve_field_type(&mut self, field: &str, value: &Expr, param_types: &FxHashMap<String, Type>) -> Type {
        if let Some(ident) = as_identifier(value) {
            if let Some(t) = param_types.get(ident) {
                return t.clone();
            }
        }
        if matches!(
            value,
            Expr::Literal {
                value: ilc_ast::Literal::Null,
                ..
            }
        ) {
            return TypeSystem::infer_type_from_name(field);
        }
        self.infer_type_from_value(value)
    }

    fn discover_dynamic_fields(&mut self, class: &ClassDecl, strukt: &mut CStruct) {
        for member in &class.body {
            let body: &[Stmt] = match member {
                ClassMember::Method { function, .. } => &function.body,
                ClassMember::StaticBlock { body } => body,
                _ => continue,
            };
            for stmt in body {
                self.collect_dynamic_field_assignments(stmt, strukt);
            }
        }
    }

    fn collect_dynamic_field_assignments(&mut self, stmt: &Stmt, strukt: &mut CStruct) {
        match stmt {
            Stmt::ExprStmt { expression, .. } => {
                if let Expr::Assignment { op, .. } = expression {
                    if op == "=" {
                        if let Some((field, value)) = this_assignment(expression) {
                            let new_ty = self.infer_type_from_value(value);
                            if strukt.has_field(&field) {
                                let existing = strukt.field_type(&field).unwrap().clone();
                                let upgraded = TypeSystem::upgrade(&existing, &new_ty);
                                strukt.upgrade_field(&field, upgraded);
                            } else {
                                strukt.push_field(field, new_ty);
                            }
                        }
                    }
                }
            }
            Stmt::Block { body, .. } => {
                for s in body {
                    self.collect_dynamic_field_assignments(s, strukt);
                }
            }
            Stmt::If {
                consequent,
                alternate,
                ..
            } => {
                self.collect_dynamic_field_assignments(consequent, strukt);
                if let Some(alt) = alternate {
                    self.collect_dynamic_field_assignments(alt, strukt);
                }
            }
            Stmt::For { body, .. }
            | Stmt::While { body, .. }
            | Stmt::DoWhile { body, .. }
            | Stmt::Labeled { body, .. } => self.collect_dynamic_field_assignments(body, strukt),
            Stmt::ForOf { body, .. } => self.collect_dynamic_field_assignments(body, strukt),
            Stmt::Switch { cases, .. } => {
                for case in cases {
                    for s in &case.consequent {
                        self.collect_dynamic_field_assignments(s, strukt);
                    }
                }
            }
            Stmt::Try { block, catch_body, .. } => {
                for s in block {
                    self.collect_dynamic_field_assignments(s, strukt);
                }
                if let Some(b) = catch_body {
                    for s in b {
                        self.collect_dynamic_field_assignments(s, strukt);
                    }
                }
            }
            _ => {}
        }
    }

    /// Pass 4 (spec.md §4.2): `this.f[i][j]`, `this.f[i] = new Array(...)`,
    /// `this.f[i] = [...]` upgrade `f` to a pointer-to-pointer.
    fn promote_2d_array_fields(&mut self, class: &ClassDecl, strukt: &mut CStruct) {
        for member in &class.body {
            let ClassMember::Method { function, .. } = member else {
                continue;
            };
            for stmt in &function.body {
                self.find_2d_promotions(stmt, strukt);
            }
        }
    }

    fn find_2d_promotions(&mut self, stmt: &Stmt, strukt: &mut CStruct) {
        if let Stmt::ExprStmt { expression, .. } = stmt {
            if let Expr::Assignment { target, value, .. } = expression {
                if let Expr::Member {
                    object,
                    computed: true,
                    ..
                } = target.as_ref()
                {
                    if let Expr::Member {
                        object: base,
                        property,
                        computed: false,
                        ..
                    } = object.as_ref()
                    {
                        if matches!(base.as_ref(), Expr::This { .. }) {
                            if let Expr::Identifier { name: field, .. } = property.as_ref() {
                                let looks_array_valued = matches!(value.as_ref(), Expr::Array { .. })
                                    || matches!(value.as_ref(), Expr::New { .. });
                                if looks_array_valued && strukt.has_field(field) {
                                    let existing = strukt.field_type(field).unwrap().clone();
                                    let deeper = existing.clone().pointer_to();
                                    strukt.upgrade_field(field, deeper);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Pass 5 (spec.md §4.2): for every `this.f.g` access, locate the
    /// smallest sibling struct (already emitted) whose fields contain
    /// `g`, and retype `f` as a pointer to it.
    fn refine_fields_from_member_access(&mut self, class: &ClassDecl, strukt: &mut CStruct) {
        let mut accessed: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for member in &class.body {
            let ClassMember::Method { function, .. } = member else {
                continue;
            };
            for stmt in &function.body {
                collect_nested_member_access(stmt, &mut accessed);
            }
        }

        for (field, subfields) in accessed {
            if !strukt.has_field(&field) {
                continue;
            }
            if let Some(target) = self.find_struct_with_fields(&subfields) {
                strukt.upgrade_field(&field, Type::struct_(target).pointer_to());
            }
        }

        if class.name.ends_with("Instance") {
            if strukt.has_field("algorithm") {
                let base = class.name.trim_end_matches("Instance");
                let candidate = [format!("{base}Algorithm"), format!("{base}Cipher"), base.to_string()]
                    .into_iter()
                    .find(|name| self.file.find_struct(name).is_some())
                    .unwrap_or_else(|| format!("{base}Algorithm"));
                strukt.upgrade_field("algorithm", Type::struct_(candidate).pointer_to());
            }
        }
    }

    fn find_struct_with_fields(&self, subfields: &[String]) -> Option<String> {
        use ilc_common::limits::STRUCT_FIELD_MATCH_MAX;
        let mut best: Option<(usize, String)> = None;
        for s in &self.file.structs {
            if s.fields.len() > STRUCT_FIELD_MATCH_MAX {
                continue;
            }
            if subfields.iter().all(|f| s.fields.contains_key(f)) {
                let replace = match &best {
                    Some((n, _)) => s.fields.len() < *n,
                    None => true,
                };
                if replace {
                    best = Some((s.fields.len(), s.name.clone()));
                }
            }
        }
        best.map(|(_, name)| name)
    }

    fn synthesize_constructor(
        &mut self,
        class: &ClassDecl,
        field_param_alias: &IndexMap<String, String>,
        ctor_params: &[ilc_ast::Param],
        ctor_literal_field_inits: &[(String, Expr)],
    ) {
        let struct_name = class.name.clone();
        let mut func = CFunction::new(
            self.mangler.constructor_name(&struct_name),
            Type::struct_(struct_name.clone()).pointer_to(),
        );

        let param_field: IndexMap<String, String> = field_param_alias
            .iter()
            .map(|(field, param)| (param.clone(), field.clone()))
            .collect();

        // Positional default-value list (spec.md §3 `constructor_defaults`):
        // an omitted trailing `new Foo(...)` argument is padded from the
        // constructor's own `= default` expression, falling back to the
        // field's zero value, since C has no default-argument syntax.
        let mut defaults: Vec<CExpr> = Vec::new();

        for param in ctor_params {
            let Pattern::Identifier(pname) = &param.pattern else {
                continue;
            };
            let ty = if let Some(field) = param_field.get(pname) {
                self.struct_field_types
                    .get(field)
                    .cloned()
                    .unwrap_or_else(|| self.param_type_hint(param))
            } else {
                self.param_type_hint(param)
            };
            defaults.push(match &param.default {
                Some(expr) => self.lower_expr(expr),
                None => zero_value_for(&ty),
            });
            func.push_param(pname.clone(), ty);
        }
        self.constructor_defaults.insert(struct_name.clone(), defaults);

        self.file.ensure_include("stdlib.h");
        let self_var = "self";
        func.body.push(CStmt::var_decl(
            Type::struct_(struct_name.clone()).pointer_to(),
            self_var.to_string(),
            Some(CExpr::Cast {
                to: Type::struct_(struct_name.clone()).pointer_to(),
                expr: Box::new(CExpr::Call {
                    callee: "malloc".to_string(),
                    args: vec![CExpr::Sizeof {
                        ty: Type::struct_(struct_name.clone()),
                    }],
                }),
            }),
        ));

        for (field, param) in field_param_alias {
            func.body.push(CStmt::expr(CExpr::Assign {
                op: "=".to_string(),
                target: Box::new(CExpr::member(CExpr::ident(self_var), field.clone(), true)),
                value: Box::new(CExpr::ident(param.clone())),
            }));
            if self
                .struct_field_types
                .get(field)
                .map(|t| t.is_pointer_like())
                .unwrap_or(false)
            {
                func.body.push(CStmt::expr(CExpr::Assign {
                    op: "=".to_string(),
                    target: Box::new(CExpr::member(CExpr::ident(self_var), format!("{field}_length"), true)),
                    value: Box::new(CExpr::ident(format!("{param}_length"))),
                }));
            }
        }

        for (field, literal) in ctor_literal_field_inits {
            let value = self.lower_expr(literal);
            func.body.push(CStmt::expr(CExpr::Assign {
                op: "=".to_string(),
                target: Box::new(CExpr::member(CExpr::ident(self_var), field.clone(), true)),
                value: Box::new(value),
            }));
        }

        func.body.push(CStmt::Return {
            value: Some(CExpr::ident(self_var)),
        });

        self.file.functions.push(func);
    }

    fn lower_methods(&mut self, class: &ClassDecl) {
        for member in &class.body {
            let ClassMember::Method {
                name,
                is_static,
                method_kind,
                function,
            } = member
            else {
                continue;
            };
            let suffix = match method_kind {
                MethodKind::Get => Some("_get"),
                MethodKind::Set => Some("_set"),
                MethodKind::Method => None,
            };
            let c_name = self.mangler.method_name(&class.name, name, suffix);
            let return_type = self.infer_return_type_from_body(&function.body);
            let mut func = CFunction::new(c_name, return_type.clone());

            if !is_static {
                func.push_self_param(&class.name);
            }

            self.push_scope();
            if !is_static {
                self.declare_var("self", Type::struct_(class.name.clone()).pointer_to());
            }
            for param in &function.params {
                if let Pattern::Identifier(pname) = &param.pattern {
                    let ty = self.param_type_hint(param);
                    let c_name = self.mangler.escape_identifier(pname);
                    if c_name != *pname {
                        self.renamed_variables.insert(pname.clone(), c_name.clone());
                    }
                    func.push_param(c_name.clone(), ty.clone());
                    self.declare_var(c_name, ty);
                }
            }

            let prev_return_type = self.current_return_type.replace(return_type);
            let prev_class_name = self.current_class_name.replace(class.name.clone());
            self.prescan_empty_array_push_types(&function.body);
            func.body = self.lower_block(&function.body);
            self.current_return_type = prev_return_type;
            self.current_class_name = prev_class_name;
            self.pop_scope();

            self.file.functions.push(func);
        }
    }

    fn lower_static_fields(&mut self, class: &ClassDecl) {
        for member in &class.body {
            let ClassMember::Field {
                name,
                is_static: true,
                init,
                type_annotation,
            } = member
            else {
                continue;
            };
            let c_name = self.mangler.static_field_name(&class.name, name);
            let ty = if let Some(ann) = type_annotation {
                TypeSystem::map_type(&ann.name)
            } else if let Some(expr) = init {
                self.infer_type_from_value(strip_freeze(expr))
            } else {
                Type::uint(32)
            };
            let ty = ty.const_().static_();
            let init_expr = init.as_ref().map(|e| self.lower_expr(strip_freeze(e)));

            self.static_class_fields
                .insert(format!("{}.{}", class.name, name), c_name.clone());
            self.module_constant_types.insert(c_name.clone(), ty.clone());

            self.file.globals.push(ilc_ctype::CGlobal {
                name: c_name,
                ty,
                init: init_expr,
            });
        }
    }

    /// Anonymous object-literal struct, deduplicated by field signature
    /// (spec.md §4.2 "Anonymous object literals").
    pub fn get_or_create_anon_struct(&mut self, properties: &[ObjectProp], hint: Option<&str>) -> String {
        let mut fields: Vec<(String, Type)> = Vec::new();
        for prop in properties {
            if let ObjectProp::KeyValue { key, value } = prop {
                let ty = self.infer_type_from_value(value);
                fields.push((key.clone(), ty));
            }
        }
        let mut signature: Vec<(String, String)> =
            fields.iter().map(|(n, t)| (n.clone(), t.base_name.clone())).collect();
        signature.sort();

        for existing in &self.file.structs {
            let mut existing_sig: Vec<(String, String)> = existing
                .fields
                .iter()
                .filter(|(n, _)| !n.ends_with("_length"))
                .map(|(n, t)| (n.clone(), t.base_name.clone()))
                .collect();
            existing_sig.sort();
            if existing_sig == signature {
                return existing.name.clone();
            }
        }

        let name = self.fresh_anon_struct_name(hint);
        let mut strukt = CStruct::new(name.clone());
        for (field_name, ty) in fields {
            strukt.push_field(field_name, ty);
        }
        self.file.structs.push(strukt);
        name
    }
}

/// The zero value of `ty`, for a constructor parameter with no source
/// `= default` to synthesize a `new` call-site argument from.
fn zero_value_for(ty: &Type) -> CExpr {
    if ty.is_pointer_like() {
        CExpr::Null
    } else if ty.base_name == "bool" {
        CExpr::Bool { value: false }
    } else {
        CExpr::uint(0)
    }
}

fn as_identifier(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Identifier { name, .. } => Some(name),
        _ => None,
    }
}

/// Matches `this.X = V`, returning `(snake(X without leading underscore), V)`.
fn this_assignment(expr: &Expr) -> Option<(String, &Expr)> {
    let Expr::Assignment {
        op, target, value, ..
    } = expr
    else {
        return None;
    };
    if op != "=" {
        return None;
    }
    let Expr::Member {
        object,
        property,
        computed: false,
        ..
    } = target.as_ref()
    else {
        return None;
    };
    if !matches!(object.as_ref(), Expr::This { .. }) {
        return None;
    }
    let Expr::Identifier { name, .. } = property.as_ref() else {
        return None;
    };
    let trimmed = name.trim_start_matches('_');
    Some((crate::name_mangler::NameMangler::new().snake_case(trimmed), value))
}

fn collect_nested_member_access(stmt: &Stmt, out: &mut FxHashMap<String, Vec<String>>) {
    match stmt {
        Stmt::ExprStmt { expression, .. } => collect_nested_member_access_expr(expression, out),
        Stmt::VarDecl(decl) => {
            for d in &decl.declarations {
                if let Some(e) = &d.init {
                    collect_nested_member_access_expr(e, out);
                }
            }
        }
        Stmt::Return { argument: Some(e), .. } => collect_nested_member_access_expr(e, out),
        Stmt::If { test, consequent, alternate, .. } => {
            collect_nested_member_access_expr(test, out);
            collect_nested_member_access(consequent, out);
            if let Some(a) = alternate {
                collect_nested_member_access(a, out);
            }
        }
        Stmt::Block { body, .. } => {
            for s in body {
                collect_nested_member_access(s, out);
            }
        }
        Stmt::For { body, .. } | Stmt::While { body, .. } | Stmt::DoWhile { body, .. } | Stmt::Labeled { body, .. } => {
            collect_nested_member_access(body, out)
        }
        Stmt::ForOf { body, right, .. } => {
            collect_nested_member_access_expr(right, out);
            collect_nested_member_access(body, out);
        }
        _ => {}
    }
}

fn collect_nested_member_access_expr(expr: &Expr, out: &mut FxHashMap<String, Vec<String>>) {
    if let Expr::Member {
        object,
        property,
        computed: false,
        ..
    } = expr
    {
        if let Expr::Member {
            object: base,
            property: f_prop,
            computed: false,
            ..
        } = object.as_ref()
        {
            if matches!(base.as_ref(), Expr::This { .. }) {
                if let (Expr::Identifier { name: f, .. }, Expr::Identifier { name: g, .. }) =
                    (f_prop.as_ref(), property.as_ref())
                {
                    out.entry(f.clone()).or_default().push(g.clone());
                }
            }
        }
        collect_nested_member_access_expr(object, out);
        collect_nested_member_access_expr(property, out);
    }
}

/// Strips an `Object.freeze(...)` wrapper (spec.md §4.2 "Static fields").
pub(crate) fn strip_freeze(expr: &Expr) -> &Expr {
    if let Expr::Call { callee, arguments, .. } = expr {
        if let Expr::Member { property, .. } = callee.as_ref() {
            if let Expr::Identifier { name, .. } = property.as_ref() {
                if name == "freeze" {
                    if let Some(first) = arguments.first() {
                        return first;
                    }
                }
            }
        }
    }
    expr
}
