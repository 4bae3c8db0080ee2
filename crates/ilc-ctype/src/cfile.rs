//! The output C AST shell: `File { includes, defines, structs, globals,
//! functions }` (spec.md §3/§6). `ilc-lowering` is the only crate that
//! constructs these; this crate only owns the data shape and the
//! length-companion invariant helpers that make it hard to build an
//! invalid one by accident.

use crate::cnode::CStmt;
use crate::types::Type;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct CField {
    pub name: String,
    pub ty: Type,
}

/// `typedef struct Name { ... } Name;`
#[derive(Clone, Debug, Serialize)]
pub struct CStruct {
    pub name: String,
    /// Insertion-ordered, unique by name (spec.md §3 invariant: "Field
    /// names are unique within a struct" and "companion field inserted
    /// immediately after").
    pub fields: IndexMap<String, Type>,
    pub is_typedef: bool,
    pub static_init_statements: Vec<CStmt>,
}

impl CStruct {
    pub fn new(name: impl Into<String>) -> Self {
        CStruct {
            name: name.into(),
            fields: IndexMap::new(),
            is_typedef: true,
            static_init_statements: Vec::new(),
        }
    }

    /// Insert a field, and - if it is pointer/array-typed - immediately
    /// follow it with its `<field>_length: size_t` companion (spec.md §3
    /// invariant 2, §8 property 2). A no-op re-insertion (same name,
    /// same type) is idempotent; a genuine re-type goes through
    /// `upgrade_field` instead so callers can't silently downgrade.
    pub fn push_field(&mut self, name: impl Into<String>, ty: Type) {
        let name = name.into();
        let needs_length = ty.is_pointer_like();
        self.fields.insert(name.clone(), ty);
        if needs_length {
            let length_name = format!("{name}_length");
            self.fields
                .entry(length_name)
                .or_insert_with(Type::size_t);
        }
    }

    /// Replace a field's type in place, preserving its position and its
    /// length companion. Callers (`StructBuilder`'s type-upgrade step)
    /// are responsible for only ever calling this with a type that is
    /// `>=` the existing one on the lattice (spec.md §3 invariant 4).
    pub fn upgrade_field(&mut self, name: &str, ty: Type) {
        let needs_length = ty.is_pointer_like();
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = ty;
        } else {
            self.fields.insert(name.to_string(), ty);
        }
        if needs_length {
            let length_name = format!("{name}_length");
            if !self.fields.contains_key(&length_name) {
                // A field upgrading from scalar to pointer-like mid-map
                // has no companion yet; `entry().or_insert_with()` would
                // append it at the end of the map instead of immediately
                // after `name` (spec.md §3: "companion field ... inserted
                // immediately after"), so the companion is shifted into
                // place by index instead of appended.
                let index = self.fields.get_index_of(name).expect("field just inserted or updated above");
                self.fields.shift_insert(index + 1, length_name, Type::size_t());
            }
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_type(&self, name: &str) -> Option<&Type> {
        self.fields.get(name)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CParam {
    pub name: String,
    pub ty: Type,
}

#[derive(Clone, Debug, Serialize)]
pub struct CFunction {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<CParam>,
    pub body: Vec<CStmt>,
}

impl CFunction {
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        CFunction {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Push a parameter, and - if pointer/array-typed - its immediately
    /// following `<param>_length: size_t` companion (spec.md §3
    /// invariant 2, §8 property 1).
    pub fn push_param(&mut self, name: impl Into<String>, ty: Type) {
        let name = name.into();
        let needs_length = ty.is_pointer_like();
        self.parameters.push(CParam {
            name: name.clone(),
            ty,
        });
        if needs_length
            && !self
                .parameters
                .iter()
                .any(|p| p.name == format!("{name}_length"))
        {
            self.parameters.push(CParam {
                name: format!("{name}_length"),
                ty: Type::size_t(),
            });
        }
    }

    /// Implicit `self: Struct*` first parameter for non-static methods
    /// (spec.md §3: "Non-static methods receive an implicit first
    /// parameter `self: StructName*`").
    pub fn push_self_param(&mut self, struct_name: &str) {
        self.parameters.insert(
            0,
            CParam {
                name: "self".to_string(),
                ty: Type::struct_(struct_name).pointer_to(),
            },
        );
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CGlobal {
    pub name: String,
    pub ty: Type,
    pub init: Option<crate::cnode::CExpr>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CDefine {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CFile {
    /// A generated-code banner emitted as a leading block comment, when
    /// comments are enabled (spec.md [AMBIENT] "comment emission").
    pub header_comment: Option<String>,
    pub includes: Vec<String>,
    pub defines: Vec<CDefine>,
    /// Emission order is declaration order: a struct referencing another
    /// struct's pointer type must come after it (spec.md §3: "A struct
    /// declaration must precede any use"; §8 property 7).
    pub structs: Vec<CStruct>,
    pub globals: Vec<CGlobal>,
    pub functions: Vec<CFunction>,
    pub standard: crate::CStandard,
}

impl CFile {
    pub fn new(standard: crate::CStandard) -> Self {
        CFile {
            header_comment: None,
            includes: Vec::new(),
            defines: Vec::new(),
            structs: Vec::new(),
            globals: Vec::new(),
            functions: Vec::new(),
            standard,
        }
    }

    /// Lazily add a header (spec.md §3: "Includes are appended lazily
    /// when a lowered construct requires a header").
    pub fn ensure_include(&mut self, header: &str) {
        if !self.includes.iter().any(|h| h == header) {
            self.includes.push(header.to_string());
        }
    }

    pub fn find_struct(&self, name: &str) -> Option<&CStruct> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn find_struct_mut(&mut self, name: &str) -> Option<&mut CStruct> {
        self.structs.iter_mut().find(|s| s.name == name)
    }

    pub fn find_function(&self, name: &str) -> Option<&CFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}
