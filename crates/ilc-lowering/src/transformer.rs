//! The `Transformer`: the scratch state that lives for exactly one
//! `transform()` call (spec.md §3 "Scope state", §5 "Transformer-instance
//! lifetime equals one file").

use ilc_common::{Diagnostic, LoweringOptions};
use ilc_ctype::{CExpr, CFile, Type};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::name_mangler::NameMangler;

/// A declared function's signature, used for call-site return-type
/// inference (spec.md §3: "`functions`: function-name → declared
/// function").
#[derive(Clone, Debug)]
pub struct FunctionSignature {
    pub return_type: Type,
    pub param_types: Vec<Type>,
}

pub struct Transformer {
    pub file: CFile,
    pub options: LoweringOptions,
    pub mangler: NameMangler,

    /// `variable_types`: name -> type, as a stack of scopes. Pushed on
    /// function/method entry, popped on exit.
    scopes: Vec<FxHashMap<String, Type>>,

    /// Global field-name -> type, used for `this.x` type lookup before a
    /// struct is fully populated (spec.md §3).
    pub struct_field_types: FxHashMap<String, Type>,

    pub functions: FxHashMap<String, FunctionSignature>,
    pub class_names: FxHashSet<String>,

    /// `"Class.Field"` -> the module-constant name it lowers to.
    pub static_class_fields: FxHashMap<String, String>,
    pub module_constant_types: FxHashMap<String, Type>,

    /// source name -> C name, for reserved-word escaping, macro-collision
    /// and shadow-avoidance renames.
    pub renamed_variables: FxHashMap<String, String>,

    /// variable name -> inferred element type, from a forward scan of
    /// `push` calls against an empty-array-initialized variable.
    pub empty_array_push_types: FxHashMap<String, Type>,

    /// class -> positional default-value list, for synthesizing `new`
    /// call arguments.
    pub constructor_defaults: FxHashMap<String, Vec<CExpr>>,

    /// Variables whose length comes from a helper-specific global macro
    /// instead of a companion variable (`String.split`, `Array.filter`,
    /// ...).
    pub split_result_vars: FxHashSet<String>,
    pub filter_result_vars: FxHashSet<String>,
    pub special_length_vars: FxHashMap<String, String>,

    pub diagnostics: Vec<Diagnostic>,

    /// Return type of the function/method currently being lowered, used to
    /// pick the failure sentinel a `throw` turns into (spec.md §4.4).
    pub current_return_type: Option<Type>,

    /// Struct name of the class whose method is currently being lowered,
    /// used to resolve `this.method(args)` to `<Struct>_method(self, args)`.
    pub current_class_name: Option<String>,

    idx_counter: u32,
    anon_struct_counter: u32,
}

impl Transformer {
    pub fn new(options: LoweringOptions) -> Self {
        let standard = options.standard;
        Transformer {
            file: CFile::new(standard),
            options,
            mangler: NameMangler::new(),
            scopes: vec![FxHashMap::default()],
            struct_field_types: FxHashMap::default(),
            functions: FxHashMap::default(),
            class_names: FxHashSet::default(),
            static_class_fields: FxHashMap::default(),
            module_constant_types: FxHashMap::default(),
            renamed_variables: FxHashMap::default(),
            empty_array_push_types: FxHashMap::default(),
            constructor_defaults: FxHashMap::default(),
            split_result_vars: FxHashSet::default(),
            filter_result_vars: FxHashSet::default(),
            special_length_vars: FxHashMap::default(),
            diagnostics: Vec::new(),
            current_return_type: None,
            current_class_name: None,
            idx_counter: 0,
            anon_struct_counter: 0,
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "popped the root scope");
    }

    pub fn declare_var(&mut self, name: impl Into<String>, ty: Type) {
        let name = name.into();
        tracing::trace!(%name, ty = ?ty.base_name, "declare_var");
        self.scopes
            .last_mut()
            .expect("root scope always present")
            .insert(name, ty);
    }

    /// Look up a variable's type, searching from the innermost scope out.
    pub fn lookup_var(&self, name: &str) -> Option<Type> {
        self.scopes.iter().rev().find_map(|s| s.get(name).cloned())
    }

    /// A fresh `_idx_<n>` loop counter, unique per transform() call (and
    /// thus per function, since no two functions run lowering
    /// concurrently) - spec.md §4.5.
    pub fn fresh_idx(&mut self) -> String {
        let n = self.idx_counter;
        self.idx_counter += 1;
        format!("_idx_{n}")
    }

    pub fn fresh_anon_struct_name(&mut self, hint: Option<&str>) -> String {
        let n = self.anon_struct_counter;
        self.anon_struct_counter += 1;
        match hint {
            Some(h) => format!("{}T", self.mangler.pascal_case(h)),
            None => format!("Anon{n}T"),
        }
    }
}
