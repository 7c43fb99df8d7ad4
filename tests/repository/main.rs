#[path = "../common/mod.rs"]
mod common;

mod save_load;
