//! NameMangler (spec.md §4.6): snake_case/PascalCase/SCREAMING_SNAKE
//! conversion, reserved-word escaping, macro-collision renaming, and
//! shadow-avoidance renames.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// C keywords plus the stdint type names and stdio globals that would be
/// shadowed by an identically-named local/parameter/field.
static RESERVED_WORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        // C keywords
        "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
        "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
        "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch",
        "typedef", "union", "unsigned", "void", "volatile", "while", "_Bool", "_Complex",
        "_Imaginary", "_Alignas", "_Alignof", "_Atomic", "_Generic", "_Noreturn",
        "_Static_assert", "_Thread_local",
        // stdint type names
        "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
        "size_t", "ssize_t", "ptrdiff_t", "intptr_t", "uintptr_t",
        // stdio globals
        "stdin", "stdout", "stderr", "errno", "NULL", "EOF",
    ]
    .into_iter()
    .collect()
});

/// Helper-macro names from the runtime ABI (spec.md §6) that a mangled
/// function name must not collide with.
static MACRO_NAMES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "to_byte",
        "xor_n",
        "rotl32",
        "rotr32",
        "rotl8",
        "rotl16",
        "rotl64",
        "rotr8",
        "rotr16",
        "rotr64",
        "get_bit",
        "set_bit",
        "set_bit_value",
        "clear_bit",
        "array_push",
        "ARRAY_PUSH",
    ]
    .into_iter()
    .collect()
});

#[derive(Default)]
pub struct NameMangler;

impl NameMangler {
    pub fn new() -> Self {
        NameMangler
    }

    /// Insert `_` before any uppercase that follows a lowercase or
    /// precedes a lowercase; lowercase the result; already-uppercase
    /// identifiers stay uppercase; dashes become underscores.
    pub fn snake_case(&self, s: &str) -> String {
        if s.is_empty() {
            return String::new();
        }
        if s.chars().all(|c| !c.is_lowercase()) {
            return s.replace('-', "_");
        }
        let chars: Vec<char> = s.chars().collect();
        let mut out = String::with_capacity(s.len() + 4);
        for (i, &c) in chars.iter().enumerate() {
            if c == '-' {
                out.push('_');
                continue;
            }
            if c.is_uppercase() {
                let prev_lower = i > 0 && chars[i - 1].is_lowercase();
                let next_lower = i + 1 < chars.len() && chars[i + 1].is_lowercase();
                if i > 0 && (prev_lower || next_lower) && !out.ends_with('_') {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    pub fn pascal_case(&self, s: &str) -> String {
        s.split(|c: char| c == '_' || c == '-')
            .filter(|seg| !seg.is_empty())
            .map(|seg| {
                let mut chars = seg.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn screaming_snake_case(&self, s: &str) -> String {
        self.snake_case(s).to_uppercase()
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        RESERVED_WORDS.contains(name)
    }

    pub fn is_macro_name(&self, name: &str) -> bool {
        MACRO_NAMES.contains(name)
    }

    /// Escape a plain identifier: reserved words get a trailing `_`.
    pub fn escape_identifier(&self, name: &str) -> String {
        if self.is_reserved(name) {
            format!("{name}_")
        } else {
            name.to_string()
        }
    }

    /// A function name after mangling: reserved-word escaped, then
    /// `_fn`-suffixed if it would collide with a runtime helper macro.
    pub fn escape_function_name(&self, name: &str) -> String {
        let escaped = self.escape_identifier(name);
        if self.is_macro_name(&escaped) {
            format!("{escaped}_fn")
        } else {
            escaped
        }
    }

    /// Method name mangling: `snake(StructName + "_" + methodName)`, with
    /// `_get`/`_set` suffixes for accessors (spec.md §4.2). Escaped against
    /// the runtime-helper macro table (spec.md §8 property 6) since a
    /// method named e.g. `rotl32` on a one-method struct would otherwise
    /// mangle straight into a macro collision.
    pub fn method_name(&self, struct_name: &str, method_name: &str, suffix: Option<&str>) -> String {
        let base = self.snake_case(&format!("{struct_name}_{method_name}"));
        let named = match suffix {
            Some(s) => format!("{base}{s}"),
            None => base,
        };
        self.escape_function_name(&named)
    }

    /// `<Struct>_new` constructor name.
    pub fn constructor_name(&self, struct_name: &str) -> String {
        self.escape_function_name(&format!("{}_new", self.snake_case(struct_name)))
    }

    /// A local variable whose name matches the name of a function being
    /// called in its own initializer gets a `_val` suffix to avoid
    /// shadowing the call (spec.md §4.6).
    pub fn shadow_safe_variable_name(&self, var_name: &str, called_function_names: &FxHashSet<String>) -> String {
        if called_function_names.contains(var_name) {
            format!("{var_name}_val")
        } else {
            var_name.to_string()
        }
    }

    /// `"Class.Field"` -> `SCREAMING(Class)_SCREAMING(Field)` for static
    /// class fields (spec.md §4.2).
    pub fn static_field_name(&self, class_name: &str, field_name: &str) -> String {
        format!(
            "{}_{}",
            self.screaming_snake_case(class_name),
            self.screaming_snake_case(field_name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_handles_camel_and_pascal() {
        let m = NameMangler::new();
        assert_eq!(m.snake_case("roundKeys"), "round_keys");
        assert_eq!(m.snake_case("RotateLeft32"), "rotate_left32");
        assert_eq!(m.snake_case("AES256"), "aes256");
    }

    #[test]
    fn snake_case_preserves_all_uppercase() {
        let m = NameMangler::new();
        assert_eq!(m.snake_case("RK"), "RK");
        assert_eq!(m.snake_case("S-BOX"), "S_BOX");
    }

    #[test]
    fn pascal_case_round_trips_through_snake_case() {
        let m = NameMangler::new();
        for s in ["roundKeys", "sub_bytes", "process_block", "key_schedule"] {
            let snaked = m.snake_case(s);
            let round_tripped = m.snake_case(&m.pascal_case(&snaked));
            assert_eq!(round_tripped, snaked, "idempotence failed for {s}");
        }
    }

    #[test]
    fn reserved_words_get_escaped() {
        let m = NameMangler::new();
        assert_eq!(m.escape_identifier("int"), "int_");
        assert_eq!(m.escape_identifier("data"), "data");
    }

    #[test]
    fn macro_colliding_function_names_get_fn_suffix() {
        let m = NameMangler::new();
        assert_eq!(m.escape_function_name("rotl32"), "rotl32_fn");
        assert_eq!(m.escape_function_name("encrypt"), "encrypt");
    }

    #[test]
    fn method_name_mangles_and_suffixes_accessors() {
        let m = NameMangler::new();
        assert_eq!(m.method_name("Foo", "process", None), "foo_process");
        assert_eq!(m.method_name("Foo", "length", Some("_get")), "foo_length_get");
    }

    #[test]
    fn static_field_name_screams() {
        let m = NameMangler::new();
        assert_eq!(m.static_field_name("Aria", "C"), "ARIA_C");
    }
}
