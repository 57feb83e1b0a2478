//! Report rendering in table, CSV, and JSON formats.

pub mod generator;
pub mod json;

pub use generator::{render_csv, render_table};
pub use json::render_json;
