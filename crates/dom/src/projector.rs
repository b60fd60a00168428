//! Element Projector - turn traversal output into catalog records
//!
//! This module handles:
//! - Filtering to the tags a scraper would target
//! - Collecting and capping each element's text content
//! - Copying the allow-listed attributes

use crate::arena::DomArena;
use crate::error::Result;
use crate::path::ElementPath;
use crate::types::*;
use crate::utils::{cap_text_length, contains_name};

/// Projector configuration
#[derive(Debug, Clone)]
pub struct ProjectorConfig {
    pub relevant_tags: Vec<String>,
    pub include_attributes: Vec<String>,
    pub max_text_length: usize,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            relevant_tags: DEFAULT_RELEVANT_TAGS.iter().map(|s| s.to_string()).collect(),
            include_attributes: DEFAULT_INCLUDE_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_text_length: 100,
        }
    }
}

pub struct ElementProjector {
    config: ProjectorConfig,
}

impl ElementProjector {
    pub fn new() -> Self {
        Self::with_config(ProjectorConfig::default())
    }

    pub fn with_config(config: ProjectorConfig) -> Self {
        Self { config }
    }

    /// Elements with an allow-listed tag. Comments and text never qualify.
    pub fn is_relevant(&self, node: &DomNode) -> bool {
        node.tag_name()
            .is_some_and(|tag| contains_name(&self.config.relevant_tags, tag))
    }

    /// Map `(node, path)` pairs from a traversal of `arena` into records,
    /// keeping traversal order
    pub fn project<'a, I>(&self, arena: &'a DomArena, visits: I) -> Result<Vec<ElementRecord>>
    where
        I: IntoIterator<Item = (&'a DomNode, ElementPath)>,
    {
        let mut records = Vec::new();
        let mut seen = 0usize;

        for (node, path) in visits {
            seen += 1;
            if !self.is_relevant(node) {
                continue;
            }
            records.push(self.project_node(arena, node, path)?);
        }

        tracing::debug!(
            "[Projector] Kept {} of {} visited nodes",
            records.len(),
            seen
        );
        Ok(records)
    }

    /// Build the record for one element, without checking relevance
    pub fn project_node(
        &self,
        arena: &DomArena,
        node: &DomNode,
        path: ElementPath,
    ) -> Result<ElementRecord> {
        let text = arena.text_content(node.node_id)?;
        let content = cap_text_length(text.trim(), self.config.max_text_length);

        let mut attributes = RecordAttributes::new();
        for attribute in node.attributes() {
            if contains_name(&self.config.include_attributes, &attribute.name) {
                attributes.push(attribute.name.as_str(), attribute.value.as_str());
            }
        }

        Ok(ElementRecord {
            content,
            id: node.attr("id").map(String::from),
            class: node.attr("class").map(String::from),
            attributes,
            path,
        })
    }
}

impl Default for ElementProjector {
    fn default() -> Self {
        Self::new()
    }
}
