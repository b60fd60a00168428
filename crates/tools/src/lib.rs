//! Catalog collaborators
//!
//! JSON rendering, collision-free output naming, and token counting around
//! the `catalog_dom` core, plus the `dom-catalog` command-line entry point.

pub mod cli;
pub mod error;
pub mod output;
pub mod tokens;

pub use cli::{run, CatalogReport, CliArgs};
pub use error::{CatalogError, Result};
pub use output::{render_json, unique_output_path, write_catalog};
pub use tokens::{count_tokens, count_tokens_in_file};
