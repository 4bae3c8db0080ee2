//! Library surface behind the `ilc` binary: argument parsing and the
//! `lower` driver, split out of `main.rs` so integration tests can drive
//! them directly rather than shelling out, mirroring `tsz-cli`'s own
//! bin-plus-lib split.

pub mod args;
pub mod driver;
