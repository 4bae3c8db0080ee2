//! The typed C AST this crate's lowering pass produces (spec.md §3, §6).
//!
//! This is purely a data model: `Type`, `File`/`Struct`/`Function` and the
//! `CExpr`/`CStmt` node shapes that `ilc-lowering` builds. Serializing this
//! to C11 source text is the downstream emitter's job and is out of scope
//! here (spec.md §1) - `ilc-cli` only serializes it to JSON, to prove the
//! in-scope output contract is stable.

pub mod cfile;
pub mod cnode;
pub mod types;

pub use cfile::{CDefine, CField, CFile, CFunction, CGlobal, CParam, CStruct};
pub use cnode::{CExpr, CStmt, CSwitchCase, IntSuffix};
pub use ilc_common::options::CStandard;
pub use types::{is_known_primitive, Type};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_field_inserts_length_companion_immediately_after() {
        let mut s = CStruct::new("Foo");
        s.push_field("key", Type::uint(8).pointer_to().const_());
        s.push_field("rounds", Type::size_t());
        let names: Vec<&str> = s.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["key", "key_length", "rounds"]);
    }

    #[test]
    fn push_param_inserts_length_companion_immediately_after() {
        let mut f = CFunction::new("foo_process", Type::uint(8).pointer_to());
        f.push_self_param("Foo");
        f.push_param("data", Type::uint(8).pointer_to());
        let names: Vec<&str> = f.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["self", "data", "data_length"]);
    }

    #[test]
    fn scalar_field_gets_no_length_companion() {
        let mut s = CStruct::new("Foo");
        s.push_field("rounds", Type::uint(32));
        assert_eq!(s.fields.len(), 1);
    }

    #[test]
    fn upgrade_field_preserves_position() {
        let mut s = CStruct::new("Foo");
        s.push_field("a", Type::uint(32));
        s.push_field("b", Type::uint(32));
        s.upgrade_field("a", Type::uint(8).pointer_to());
        let names: Vec<&str> = s.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "a_length", "b"]);
    }

    #[test]
    fn cfile_serializes_to_json() {
        let mut file = CFile::new(CStandard::C11);
        file.ensure_include("stdint.h");
        file.ensure_include("stdint.h");
        assert_eq!(file.includes, vec!["stdint.h".to_string()]);
        let json = serde_json::to_string(&file).expect("serialize");
        assert!(json.contains("stdint.h"));
    }
}
