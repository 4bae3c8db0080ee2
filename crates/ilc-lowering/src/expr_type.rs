//! `infer_type_from_value` and `infer_return_type_from_body` (spec.md
//! §4.1): the structural (value-based) half of type inference, which
//! needs the surrounding scope/struct/function tables and therefore
//! lives on `Transformer` rather than on the stateless `TypeSystem`.

use ilc_ast::{BinaryOp, Expr, Literal, LogicalOp, ObjectProp, Pattern, Stmt, VarKind};
use ilc_ctype::Type;

use crate::idiom_lowerer::is_byte_range_number;
use crate::transformer::Transformer;
use crate::type_system::TypeSystem;

impl Transformer {
    /// Structural recursion over IL expressions (spec.md §4.1).
    pub fn infer_type_from_value(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Literal { value, .. } => self.infer_literal_type(value),
            Expr::Identifier { name, .. } => self
                .lookup_var(name)
                .unwrap_or_else(|| TypeSystem::infer_type_from_name(name)),
            Expr::This { .. } => Type::void().pointer_to(),
            Expr::Array { elements, .. } => self.infer_array_literal_type(elements),
            Expr::Object { properties, .. } => {
                let struct_name = self.get_or_create_anon_struct(properties, None);
                Type::struct_(struct_name).pointer_to()
            }
            Expr::New { callee, arguments, .. } => self.infer_new_expression_type(callee, arguments),
            Expr::Call { callee, arguments, .. } => self.infer_call_type(callee, arguments),
            Expr::Member { .. } => self.infer_member_type(expr),
            Expr::Conditional {
                consequent,
                alternate,
                ..
            } => {
                let a = self.infer_type_from_value(consequent);
                let b = self.infer_type_from_value(alternate);
                TypeSystem::upgrade(&a, &b)
            }
            Expr::Logical { op, left, right, .. } => {
                let a = self.infer_type_from_value(left);
                match op {
                    LogicalOp::And => a,
                    LogicalOp::Or | LogicalOp::NullishCoalesce => {
                        let b = self.infer_type_from_value(right);
                        TypeSystem::upgrade(&a, &b)
                    }
                }
            }
            Expr::Binary { op, left, .. } => self.infer_binary_type(*op, left),
            Expr::Unary { op, .. } => self.infer_unary_type(*op),
            Expr::TemplateLiteral { .. } => Type::char_().pointer_to(),
            Expr::Sequence { expressions, .. } => expressions
                .last()
                .map(|e| self.infer_type_from_value(e))
                .unwrap_or_else(Type::void),
            Expr::Assignment { value, .. } => self.infer_type_from_value(value),
            Expr::Chain { expression, .. } => self.infer_type_from_value(expression),
            Expr::Spread { argument, .. } => self.infer_type_from_value(argument),
            _ => Type::uint(32),
        }
    }

    fn infer_literal_type(&self, lit: &Literal) -> Type {
        match lit {
            Literal::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    Type::uint(32)
                } else {
                    Type::double_()
                }
            }
            Literal::BigInt(digits) => {
                if digits.starts_with('-') {
                    Type::int(64)
                } else {
                    Type::uint(64)
                }
            }
            Literal::String(_) => Type::char_().pointer_to().const_(),
            Literal::Boolean(_) => Type::bool_(),
            Literal::Null => Type::void().pointer_to(),
            Literal::Undefined => Type::void(),
            Literal::RegExp { .. } => Type::char_().pointer_to().const_(),
        }
    }

    fn infer_array_literal_type(&mut self, elements: &[Option<Expr>]) -> Type {
        let present: Vec<&Expr> = elements.iter().filter_map(|e| e.as_ref()).collect();
        let Some(first) = present.first() else {
            return Type::void().pointer_to();
        };
        // A literal of literal-number rows (a 2D static table, spec.md §8
        // Scenario 5) is a lookup table, not a byte buffer: its rows get
        // `uint32_t`, independent of whether the row's values happen to
        // fit in a byte, and the outer dimension is left incomplete
        // (`T[][n]`) since the initializer supplies it.
        if let Some(row_len) = uniform_number_row_length(&present) {
            return Type::array_of(Type::array_of(Type::uint(32), Some(row_len)), None);
        }
        let all_byte_range = present.iter().all(|e| match e {
            Expr::Literal {
                value: Literal::Number(n),
                ..
            } => (0.0..=255.0).contains(n) && n.fract() == 0.0,
            _ => false,
        });
        if all_byte_range {
            return Type::array_of(Type::uint(8), Some(present.len() as u32));
        }
        let elem_ty = self.infer_type_from_value(first);
        elem_ty.pointer_to()
    }

    fn infer_new_expression_type(&mut self, callee: &Expr, arguments: &[Expr]) -> Type {
        if let Expr::Identifier { name, .. } = callee {
            if name == "CreateInstance" {
                if let Some(Expr::Identifier { name: base, .. }) = arguments.first() {
                    return Type::struct_(format!("{base}Instance")).pointer_to();
                }
            }
            if self.class_names.contains(name) {
                return Type::struct_(name.clone()).pointer_to();
            }
            if name.starts_with("Uint8") || name == "Array" {
                return Type::uint(8).pointer_to();
            }
            if name.starts_with("Uint16") {
                return Type::uint(16).pointer_to();
            }
            if name.starts_with("Uint32") {
                return Type::uint(32).pointer_to();
            }
            if name.starts_with("Uint64") || name.starts_with("BigUint64") {
                return Type::uint(64).pointer_to();
            }
            if name == "Map" {
                return Type::struct_("Map").pointer_to();
            }
            if name == "Set" {
                return Type::struct_("Set").pointer_to();
            }
        }
        Type::uint(8).pointer_to()
    }

    fn infer_call_type(&mut self, callee: &Expr, arguments: &[Expr]) -> Type {
        if let Expr::Identifier { name, .. } = callee {
            if name == "CopyArray" {
                if let Some(first) = arguments.first() {
                    return self.infer_type_from_value(first);
                }
            }
            if let Some(width) = pack_width(name) {
                return Type::uint(width);
            }
            if unpack_width(name).is_some() {
                return Type::uint(8).pointer_to();
            }
            if let Some(sig) = self.functions.get(name) {
                return sig.return_type.clone();
            }
        }
        if let Expr::Member { object, property, .. } = callee {
            if let Expr::Identifier { name: method, .. } = property.as_ref() {
                if method == "fill" {
                    if let Expr::New { callee: new_callee, .. } = object.as_ref() {
                        if matches!(new_callee.as_ref(), Expr::Identifier { name, .. } if name == "Array") {
                            let is_byte_range = arguments.first().map(is_byte_range_number).unwrap_or(true);
                            return if is_byte_range {
                                Type::uint(8).pointer_to()
                            } else {
                                Type::uint(32).pointer_to()
                            };
                        }
                    }
                }
                match method.as_str() {
                    "slice" | "filter" | "map" | "reverse" | "concat" | "splice" => {
                        return Type::uint(8).pointer_to();
                    }
                    "split" => return Type::char_().pointer_to().pointer_to(),
                    "join" | "trim" | "toLowerCase" | "toUpperCase" | "substring" | "replace"
                    | "repeat" => return Type::char_().pointer_to(),
                    "indexOf" | "findIndex" | "length" => return Type::size_t(),
                    "some" | "every" | "includes" | "has" => return Type::bool_(),
                    _ => {}
                }
            }
        }
        Type::uint(32)
    }

    fn infer_member_type(&self, expr: &Expr) -> Type {
        if let Expr::Member {
            object,
            computed: true,
            ..
        } = expr
        {
            // `table[i]`: the element type of whatever `table` infers as,
            // decaying a row-array result to a pointer the way C decays
            // `T[4]` to `T*` (spec.md §8 Scenario 5: `Aria.C[i]` ->
            // `const uint32_t*`).
            let table_ty = self.infer_member_type_or_value(object);
            let elem = table_ty.element();
            return if elem.is_array {
                let row_elem = elem.element_type.map(|b| *b).unwrap_or_else(|| Type::uint(32));
                let mut ptr = row_elem.pointer_to();
                ptr.is_const = table_ty.is_const;
                ptr
            } else {
                elem
            };
        }
        if let Expr::Member {
            object, property, ..
        } = expr
        {
            if let (Expr::Identifier { name: obj_name, .. }, Expr::Identifier { name: prop_name, .. }) =
                (object.as_ref(), property.as_ref())
            {
                let key = format!("{obj_name}.{prop_name}");
                if let Some(c_name) = self.static_class_fields.get(&key) {
                    if let Some(ty) = self.module_constant_types.get(c_name) {
                        return ty.clone();
                    }
                }
                if let Expr::This { .. } = object.as_ref() {
                    // unreachable branch kept for completeness; handled below
                }
            }
            if matches!(object.as_ref(), Expr::This { .. }) {
                if let Expr::Identifier { name: field, .. } = property.as_ref() {
                    if let Some(ty) = self.struct_field_types.get(field) {
                        return ty.clone();
                    }
                    return TypeSystem::infer_type_from_name(field);
                }
            }
            if let Expr::Identifier { name: field, .. } = property.as_ref() {
                if let Some(ty) = self.struct_field_types.get(field) {
                    return ty.clone();
                }
            }
        }
        Type::uint(32)
    }

    /// Resolves the type of a sub-expression reachable without recursing
    /// through the full `&mut self` structural inferer, for use inside
    /// `infer_member_type`'s `computed: true` (indexing) case.
    fn infer_member_type_or_value(&self, expr: &Expr) -> Type {
        match expr {
            Expr::Identifier { name, .. } => self
                .lookup_var(name)
                .unwrap_or_else(|| TypeSystem::infer_type_from_name(name)),
            Expr::Member { .. } => self.infer_member_type(expr),
            Expr::This { .. } => Type::void().pointer_to(),
            _ => Type::uint(32).pointer_to(),
        }
    }

    fn infer_binary_type(&mut self, op: BinaryOp, left: &Expr) -> Type {
        match op {
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::StrictEq
            | BinaryOp::StrictNotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::In
            | BinaryOp::InstanceOf => Type::bool_(),
            BinaryOp::Add => {
                let lhs_ty = self.infer_type_from_value(left);
                if lhs_ty.is_pointer && lhs_ty.base_name == "char" {
                    Type::char_().pointer_to()
                } else {
                    lhs_ty
                }
            }
            _ => self.infer_type_from_value(left),
        }
    }

    fn infer_unary_type(&self, op: ilc_ast::UnaryOp) -> Type {
        use ilc_ast::UnaryOp;
        match op {
            UnaryOp::Not => Type::bool_(),
            UnaryOp::TypeOf => Type::char_().pointer_to().const_(),
            UnaryOp::Void => Type::void(),
            _ => Type::uint(32),
        }
    }

    /// Scans returns recursively; builds a local-variable type map from
    /// `let`/`const` declarations (spec.md §4.1). Resolution priority:
    /// array-valued > pointer-valued > non-`uint32_t` scalar > first
    /// return.
    pub fn infer_return_type_from_body(&mut self, body: &[Stmt]) -> Type {
        self.push_scope();
        let candidates = self.collect_return_types(body);
        self.pop_scope();

        if candidates.is_empty() {
            return Type::void();
        }
        if let Some(t) = candidates.iter().find(|t| t.is_array) {
            return t.clone();
        }
        if let Some(t) = candidates.iter().find(|t| t.is_pointer_like()) {
            return t.clone();
        }
        if let Some(t) = candidates
            .iter()
            .find(|t| !t.is_pointer_like() && t.base_name != "uint32_t")
        {
            return t.clone();
        }
        candidates[0].clone()
    }

    fn collect_return_types(&mut self, body: &[Stmt]) -> Vec<Type> {
        let mut out = Vec::new();
        for stmt in body {
            self.collect_return_types_stmt(stmt, &mut out);
        }
        out
    }

    fn collect_return_types_stmt(&mut self, stmt: &Stmt, out: &mut Vec<Type>) {
        match stmt {
            Stmt::Return { argument, .. } => {
                let ty = match argument {
                    Some(expr) => self.infer_type_from_value(expr),
                    None => Type::void(),
                };
                out.push(ty);
            }
            Stmt::VarDecl(decl) => {
                for d in &decl.declarations {
                    self.bind_declarator_type(d, decl.kind);
                }
            }
            Stmt::Block { body, .. } => {
                for s in body {
                    self.collect_return_types_stmt(s, out);
                }
            }
            Stmt::If {
                consequent,
                alternate,
                ..
            } => {
                self.collect_return_types_stmt(consequent, out);
                if let Some(alt) = alternate {
                    self.collect_return_types_stmt(alt, out);
                }
            }
            Stmt::For { body, .. }
            | Stmt::While { body, .. }
            | Stmt::DoWhile { body, .. }
            | Stmt::Labeled { body, .. } => {
                self.collect_return_types_stmt(body, out);
            }
            Stmt::ForOf { body, .. } => self.collect_return_types_stmt(body, out),
            Stmt::Switch { cases, .. } => {
                for case in cases {
                    for s in &case.consequent {
                        self.collect_return_types_stmt(s, out);
                    }
                }
            }
            Stmt::Try {
                block,
                catch_body,
                finally_body,
                ..
            } => {
                for s in block {
                    self.collect_return_types_stmt(s, out);
                }
                if let Some(b) = catch_body {
                    for s in b {
                        self.collect_return_types_stmt(s, out);
                    }
                }
                if let Some(b) = finally_body {
                    for s in b {
                        self.collect_return_types_stmt(s, out);
                    }
                }
            }
            _ => {}
        }
    }

    fn bind_declarator_type(&mut self, decl: &ilc_ast::Declarator, _kind: VarKind) {
        let Pattern::Identifier(name) = &decl.id else {
            return;
        };
        let ty = if let Some(ann) = &decl.type_annotation {
            TypeSystem::map_type(&ann.name)
        } else {
            match &decl.init {
                Some(Expr::Array { elements, .. }) if elements.is_empty() => {
                    TypeSystem::infer_type_from_name(name).pointer_to_if_not_already()
                }
                Some(Expr::Literal {
                    value: Literal::Null,
                    ..
                }) => TypeSystem::infer_type_from_name(name),
                Some(Expr::Conditional {
                    consequent,
                    alternate,
                    ..
                }) => {
                    if matches!(
                        alternate.as_ref(),
                        Expr::Literal {
                            value: Literal::Null,
                            ..
                        }
                    ) {
                        self.infer_type_from_value(consequent)
                    } else {
                        self.infer_type_from_value(alternate)
                    }
                }
                Some(expr) => self.infer_type_from_value(expr),
                None => TypeSystem::infer_type_from_name(name),
            }
        };
        self.declare_var(name.clone(), ty);
    }
}

/// `UnpackNBE/LE` width lookup, e.g. `"Pack32LE"` -> 32.
fn pack_width(name: &str) -> Option<u8> {
    for width in [16u8, 32, 64] {
        if name.eq_ignore_ascii_case(&format!("Pack{width}BE"))
            || name.eq_ignore_ascii_case(&format!("Pack{width}LE"))
        {
            return Some(width);
        }
    }
    None
}

fn unpack_width(name: &str) -> Option<u8> {
    for width in [16u8, 32, 64] {
        if name.eq_ignore_ascii_case(&format!("Unpack{width}BE"))
            || name.eq_ignore_ascii_case(&format!("Unpack{width}LE"))
        {
            return Some(width);
        }
    }
    None
}

/// If every element is itself an array literal of plain number literals,
/// and every row has the same length, returns that common row length.
fn uniform_number_row_length(present: &[&Expr]) -> Option<u32> {
    let mut row_len = None;
    for e in present {
        let Expr::Array { elements: row, .. } = e else {
            return None;
        };
        let row: Vec<&Expr> = row.iter().filter_map(|e| e.as_ref()).collect();
        if row.is_empty() || !row.iter().all(|e| matches!(e, Expr::Literal { value: Literal::Number(_), .. })) {
            return None;
        }
        match row_len {
            None => row_len = Some(row.len() as u32),
            Some(n) if n != row.len() as u32 => return None,
            _ => {}
        }
    }
    row_len
}

trait PointerIfScalar {
    fn pointer_to_if_not_already(self) -> Type;
}

impl PointerIfScalar for Type {
    fn pointer_to_if_not_already(self) -> Type {
        if self.is_pointer_like() {
            self
        } else {
            self.pointer_to()
        }
    }
}
