#[path = "../common/mod.rs"]
mod common;

mod comparison_fields;
mod diagnostics;
mod errors;
mod fixtures;
mod identity;
