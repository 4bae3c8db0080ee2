//! TypeSystem (spec.md §4.1): name- and value-based type inference, and
//! the type-upgrade lattice. `map_type`/`infer_type_from_name`/`upgrade`
//! are pure functions of their input; `infer_type_from_value` and
//! `infer_return_type_from_body` need the surrounding scope/struct/
//! function tables and live on `Transformer` (see `expr_type.rs`).

use ilc_ctype::Type;

pub struct TypeSystem;

impl TypeSystem {
    /// Closed table from source type names to C types (spec.md §4.1).
    /// A trailing `[]` recurses and yields a pointer to the element type.
    pub fn map_type(source_type_name: &str) -> Type {
        if let Some(elem_name) = source_type_name.strip_suffix("[]") {
            return Self::map_type(elem_name).pointer_to();
        }
        match source_type_name {
            "uint8" => Type::uint(8),
            "uint16" => Type::uint(16),
            "uint32" => Type::uint(32),
            "uint64" => Type::uint(64),
            "int8" => Type::int(8),
            "int16" => Type::int(16),
            "int32" => Type::int(32),
            "int64" => Type::int(64),
            "byte" => Type::uint(8),
            "word" => Type::uint(16),
            "dword" => Type::uint(32),
            "qword" => Type::uint(64),
            "boolean" | "bool" => Type::bool_(),
            "string" => Type::char_().pointer_to().const_(),
            "size_t" => Type::size_t(),
            "float" => Type::float_(),
            "double" => Type::double_(),
            "number" => Type::uint(32),
            "any" | "object" | "unknown" | "void" => Type::void(),
            other => Type::struct_(other),
        }
    }

    /// Ordered rule list over an identifier string; first match wins
    /// (spec.md §4.1). Rule ordering is load-bearing: see the comments
    /// inline for which orderings are required and why.
    pub fn infer_type_from_name(name: &str) -> Type {
        let lower = name.to_ascii_lowercase();

        // Rule 1: string-like names -> const char*. `str`/`ascii` match
        // only exactly; `string`/`text`/`message`/`msg` also match as a
        // suffix (`*string`, `*text`, ...), per spec.md's `*name` wildcard.
        if lower == "str"
            || lower == "ascii"
            || lower == "string"
            || lower == "text"
            || lower == "message"
            || lower == "msg"
            || lower.ends_with("string")
            || lower.ends_with("text")
            || lower.ends_with("message")
            || lower.ends_with("msg")
        {
            tracing::trace!(name, rule = 1, "infer_type_from_name: string-like name");
            return Type::char_().pointer_to().const_();
        }

        // Rule 2: size/length/count/... suffixes -> size_t. Must precede
        // array-pattern rules (e.g. `keySize` must not become `uint8_t*`).
        const SIZE_SUFFIXES: &[&str] = &[
            "size", "length", "count", "num", "index", "offset", "rounds", "bits",
        ];
        if SIZE_SUFFIXES.iter().any(|suf| lower.ends_with(suf)) {
            tracing::trace!(name, rule = 2, "infer_type_from_name: size/length suffix");
            return Type::size_t();
        }

        // Rule 3: round_keys/sub_keys/rk/ks -> uint32_t**. Must precede
        // the generic `key` containment rule (rule 6).
        const ROUND_KEY_NAMES: &[&str] = &["round_keys", "roundkeys", "sub_keys", "subkeys", "rk", "ks"];
        if ROUND_KEY_NAMES.iter().any(|s| &lower == s) {
            tracing::trace!(name, rule = 3, "infer_type_from_name: round-key name");
            return Type::pointer_n("uint32_t", 2);
        }

        // Rule 4: singular `*bit` -> scalar uint32_t. Must precede rule 6
        // (`key` containment) so e.g. `parityBit` doesn't fall through to
        // a byte-buffer guess by accident; it is its own terminal rule.
        if lower.ends_with("bit") && !lower.ends_with("bits") {
            tracing::trace!(name, rule = 4, "infer_type_from_name: singular bit name");
            return Type::uint(32);
        }

        // Rule 5: state/table/sbox/pbox/lookup (any position) -> uint32_t*
        // (const-qualified for input-like names).
        const TABLE_NAMES: &[&str] = &["state", "table", "sbox", "pbox", "lookup"];
        if TABLE_NAMES.iter().any(|t| lower.contains(t)) {
            tracing::trace!(name, rule = 5, "infer_type_from_name: table name");
            let ty = Type::uint(32).pointer_to();
            return if is_input_like(&lower) { ty.const_() } else { ty };
        }

        // Rule 6: key/data/input/... -> uint8_t*, const-qualified when
        // the name also looks input-like and not buffer-like, and has no
        // numeric suffix (e.g. `key0` stays non-const since it is more
        // likely an indexed scalar slot than a readonly input, and in
        // any case the numeric suffix marks it as a distinguished name
        // the value-based path should be trusted over).
        const BUFFER_NAMES: &[&str] = &[
            "key",
            "data",
            "input",
            "output",
            "block",
            "bytes",
            "buffer",
            "encoded",
            "decoded",
            "encrypted",
            "decrypted",
            "hash",
            "digest",
            "plaintext",
            "ciphertext",
            "seed",
            "nonce",
            "iv",
            "salt",
            "tag",
            "mac",
            "vector",
            "result",
            "register",
            "lfsr",
            "nlfsr",
            "permutation",
            "substitution",
            "frequencies",
            "percentages",
            "aad",
        ];
        if BUFFER_NAMES.iter().any(|b| lower.contains(b)) {
            tracing::trace!(name, rule = 6, "infer_type_from_name: buffer name");
            let has_numeric_suffix = lower
                .chars()
                .last()
                .map(|c| c.is_ascii_digit())
                .unwrap_or(false);
            let ty = Type::uint(8).pointer_to();
            if is_input_like(&lower) && !lower.contains("buffer") && !has_numeric_suffix {
                return ty.const_();
            }
            return ty;
        }

        // Fallback: scalar uint32_t.
        tracing::trace!(name, rule = "fallback", "infer_type_from_name: scalar default");
        Type::uint(32)
    }

    /// Monotonic refinement along `scalar ≺ primitive-pointer ≺
    /// struct-pointer` (spec.md §3 invariant 4, §4.1). Never downgrades:
    /// if `new` is less specific than `existing`, `existing` wins.
    pub fn upgrade(existing: &Type, new: &Type) -> Type {
        if rank(new) > rank(existing) {
            new.clone()
        } else {
            existing.clone()
        }
    }
}

/// Heuristic used by rules 5/6: an "input-like" name looks like it is
/// read, not written (`input`, `plaintext`, `key`, ... without also
/// looking like a mutable `buffer`/`output`).
fn is_input_like(lower: &str) -> bool {
    const INPUT_HINTS: &[&str] = &[
        "input",
        "key",
        "plaintext",
        "seed",
        "iv",
        "nonce",
        "salt",
        "aad",
        "message",
        "msg",
    ];
    const OUTPUT_HINTS: &[&str] = &["output", "result", "dest", "target"];
    INPUT_HINTS.iter().any(|h| lower.contains(h)) && !OUTPUT_HINTS.iter().any(|h| lower.contains(h))
}

/// Lattice rank: higher is more specific. `scalar < primitive-pointer <
/// struct-pointer`.
fn rank(ty: &Type) -> u8 {
    if ty.is_pointer && ty.is_struct_pointer() {
        2
    } else if ty.is_pointer_like() {
        1
    } else {
        0
    }
}
