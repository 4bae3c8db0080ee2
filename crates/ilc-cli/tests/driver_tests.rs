//! End-to-end coverage of `ilc lower`: reads an IL AST JSON fixture,
//! drives it through `run_lower`, and checks the written C AST JSON,
//! mirroring `tsz-cli`'s own `driver_tests.rs` style of exercising the
//! driver directly rather than shelling out to the binary.

use std::path::PathBuf;

use ilc_cli::args::{LowerArgs, Standard};
use ilc_cli::driver::run_lower;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn base_args(input: PathBuf, out: Option<PathBuf>) -> LowerArgs {
    LowerArgs {
        input,
        standard: Standard::C11,
        no_headers: false,
        no_comments: false,
        strict_types: false,
        const_correctness: false,
        out,
        log_level: "warn".to_string(),
        pretty: false,
    }
}

#[test]
fn lowers_the_rotation_fixture_and_writes_c_ast_json() {
    let out_file = NamedTempFile::new().expect("temp file should be created");
    let out_path = out_file.path().to_path_buf();

    let args = base_args(fixture("rotation.ilast.json"), Some(out_path.clone()));
    run_lower(&args).expect("lowering the rotation fixture should succeed");

    let written = std::fs::read_to_string(&out_path).expect("output file should be written");
    let file: serde_json::Value = serde_json::from_str(&written).expect("output should be valid JSON");

    let functions = file["functions"].as_array().expect("functions array");
    let func = functions
        .iter()
        .find(|f| f["name"] == "rotate_left7")
        .expect("rotateLeft7 should lower to a named function");
    assert_eq!(func["parameters"][0]["name"], "x");
    assert_eq!(func["parameters"][0]["ty"]["base_name"], "uint32_t");
}

#[test]
fn missing_input_file_surfaces_as_an_error() {
    let args = base_args(PathBuf::from("/nonexistent/path/does-not-exist.json"), None);
    let result = run_lower(&args);
    assert!(result.is_err(), "a missing input file should be a driver error, not a panic");
}

#[test]
fn malformed_json_surfaces_as_an_error() {
    let mut malformed = NamedTempFile::new().expect("temp file should be created");
    use std::io::Write;
    malformed.write_all(b"{ not valid IL AST json").unwrap();
    malformed.flush().unwrap();

    let args = base_args(malformed.path().to_path_buf(), None);
    let result = run_lower(&args);
    assert!(result.is_err(), "malformed JSON should surface as a decoding error");
}

#[test]
fn no_headers_flag_is_honored_in_the_lowered_output() {
    let out_file = NamedTempFile::new().expect("temp file should be created");
    let out_path = out_file.path().to_path_buf();

    let mut args = base_args(fixture("rotation.ilast.json"), Some(out_path.clone()));
    args.no_headers = true;
    run_lower(&args).expect("lowering should succeed with headers disabled");

    let written = std::fs::read_to_string(&out_path).unwrap();
    let file: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(
        file["includes"].as_array().unwrap().is_empty(),
        "--no-headers should suppress the auto-included headers"
    );
}
