//! Command-line surface of `dom-catalog`

use crate::error::{CatalogError, Result};
use crate::output::write_catalog;
use crate::tokens::count_tokens_in_file;
use catalog_dom::{DomError, DomService, DomServiceConfig};
use clap::Parser;
use std::path::PathBuf;

/// Extracts a catalog of scrape-relevant elements from a rendered DOM dump
/// and writes it as JSON next to the input.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the HTML or DOM text dump to catalog.
    #[clap(default_value = "dom1.txt")]
    pub input: PathBuf,
    /// Extension of the output file.
    #[clap(short, long, default_value = "json")]
    pub extension: String,
    /// Deepest nesting level kept as a tree; deeper elements become leaves.
    #[clap(long)]
    pub max_depth: Option<usize>,
    /// Characters of element text kept before truncating.
    #[clap(long)]
    pub max_text_length: Option<usize>,
}

impl CliArgs {
    pub fn service_config(&self) -> DomServiceConfig {
        let mut config = DomServiceConfig::default();
        if let Some(max_depth) = self.max_depth {
            config.parser.max_depth = max_depth;
        }
        if let Some(max_text_length) = self.max_text_length {
            config.projector.max_text_length = max_text_length;
        }
        config
    }
}

/// Outcome of one catalog run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    pub output_path: PathBuf,
    pub element_count: usize,
    pub token_count: usize,
}

/// Read the input, extract its records, write the catalog and count its tokens
pub fn run(args: &CliArgs) -> Result<CatalogReport> {
    let mut service = DomService::with_config(args.service_config());
    service.parse_file(&args.input).map_err(|e| match e {
        DomError::Io(source) => CatalogError::io(&args.input, source),
        other => other.into(),
    })?;
    let records = service.extract_elements()?;

    let output_path = write_catalog(&records, &args.input, &args.extension)?;
    let token_count = count_tokens_in_file(&output_path)?;

    Ok(CatalogReport {
        output_path,
        element_count: records.len(),
        token_count,
    })
}
