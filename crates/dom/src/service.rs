//! DOM Service - Main entry point for catalog extraction
//!
//! This handles:
//! - Parsing raw markup into the arena
//! - Walking the parsed tree with positional paths
//! - Projecting relevant elements into records

use crate::arena::DomArena;
use crate::error::Result;
use crate::navigator::traverse;
use crate::parser::{parse_with_config, ParserConfig};
use crate::projector::{ElementProjector, ProjectorConfig};
use crate::types::ElementRecord;
use std::path::Path;

/// Configuration for DOM service
#[derive(Debug, Clone, Default)]
pub struct DomServiceConfig {
    pub parser: ParserConfig,
    pub projector: ProjectorConfig,
}

/// Main DOM service
pub struct DomService {
    config: DomServiceConfig,
    arena: DomArena,
    projector: ElementProjector,
}

impl DomService {
    /// Create new DOM service with default config
    pub fn new() -> Self {
        Self::with_config(DomServiceConfig::default())
    }

    /// Create DOM service with custom config
    pub fn with_config(config: DomServiceConfig) -> Self {
        let projector = ElementProjector::with_config(config.projector.clone());
        Self {
            config,
            arena: DomArena::new(),
            projector,
        }
    }

    /// Get reference to internal arena
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Parse markup and replace the current tree
    ///
    /// Never fails: malformed markup is recovered, empty input yields a
    /// lone empty root.
    pub fn parse_html(&mut self, html: &str) -> &DomArena {
        self.arena = parse_with_config(html, self.config.parser.clone());
        tracing::info!(
            "[DomService] Parsed {} bytes into {} nodes",
            html.len(),
            self.arena.len()
        );
        &self.arena
    }

    /// Read a file and parse it. Invalid UTF-8 is replaced, not rejected.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<&DomArena> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        tracing::debug!("[DomService] Read {} bytes from {}", bytes.len(), path.display());
        let html = String::from_utf8_lossy(&bytes);
        Ok(self.parse_html(&html))
    }

    /// Records for the relevant elements of the current tree, in document order
    pub fn extract_elements(&self) -> Result<Vec<ElementRecord>> {
        let records = self.projector.project(&self.arena, traverse(&self.arena))?;
        tracing::info!("[DomService] Extracted {} elements", records.len());
        Ok(records)
    }

    /// Parse and extract in one step
    pub fn catalog_html(&mut self, html: &str) -> Result<Vec<ElementRecord>> {
        self.parse_html(html);
        self.extract_elements()
    }
}

impl Default for DomService {
    fn default() -> Self {
        Self::new()
    }
}
