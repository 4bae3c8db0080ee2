//! NameMangler (spec.md §4.6), exercised end-to-end through the public
//! `ilc_lowering::NameMangler` surface for cases the colocated unit tests
//! in `name_mangler.rs` don't already cover: constructor naming, shadow
//! avoidance, and escaping composed with PascalCase/SCREAMING_SNAKE.

use ilc_lowering::NameMangler;
use rustc_hash::FxHashSet;

#[test]
fn constructor_name_is_new_suffixed_and_snake_cased() {
    let m = NameMangler::new();
    assert_eq!(m.constructor_name("AesCipher"), "aes_cipher_new");
}

#[test]
fn constructor_name_lowercases_before_suffixing() {
    let m = NameMangler::new();
    assert_eq!(m.constructor_name("rotl32"), "rotl32_new");
}

#[test]
fn shadow_safe_variable_name_only_renames_on_actual_collision() {
    let m = NameMangler::new();
    let mut called = FxHashSet::default();
    called.insert("encrypt".to_string());
    assert_eq!(m.shadow_safe_variable_name("encrypt", &called), "encrypt_val");
    assert_eq!(m.shadow_safe_variable_name("block", &called), "block");
}

#[test]
fn pascal_case_from_snake_round_trips_distinct_words() {
    let m = NameMangler::new();
    assert_eq!(m.pascal_case("key_schedule"), "KeySchedule");
    assert_eq!(m.pascal_case("s_box"), "SBox");
}

#[test]
fn screaming_snake_case_normalizes_mixed_case_and_dashes() {
    let m = NameMangler::new();
    assert_eq!(m.screaming_snake_case("roundKeys"), "ROUND_KEYS");
    assert_eq!(m.screaming_snake_case("s-box"), "S_BOX");
}

#[test]
fn escape_identifier_is_idempotent_once_escaped() {
    let m = NameMangler::new();
    let once = m.escape_identifier("for");
    let twice = m.escape_identifier(&once);
    // `for_` is not itself a reserved word, so a second pass is a no-op;
    // escaping never compounds.
    assert_eq!(once, "for_");
    assert_eq!(twice, "for_");
}

#[test]
fn method_name_lowercases_a_struct_name_that_is_itself_a_c_keyword() {
    let m = NameMangler::new();
    assert_eq!(m.method_name("Int", "process", None), "int_process");
}

#[test]
fn method_name_escapes_when_mangling_collides_with_a_runtime_macro() {
    let m = NameMangler::new();
    assert_eq!(m.method_name("Array", "push", None), "array_push_fn");
}
