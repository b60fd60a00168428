//! Element Catalog DOM Library
//!
//! Tolerant HTML parsing into an arena tree, depth-first traversal with
//! positional paths, and projection of scrape-relevant elements into records.
//!
//! ## Core Design
//!
//! ```text
//! &str → Tokenizer → Parser → DomArena → Traversal → ElementProjector → Vec<ElementRecord>
//!                                ↓            ↓
//!                        NodeId (u32)   ElementPath (/div[1]/span[2])
//! ```
//!
//! Malformed markup is never an error. Unclosed tags are closed, stray end
//! tags are dropped, and the tree always has exactly one root element.

pub mod arena;
pub mod entities;
pub mod error;
pub mod navigator;
pub mod parser;
pub mod path;
pub mod projector;
pub mod service;
pub mod tokenizer;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use navigator::{traverse, Traversal};
pub use parser::{parse, parse_with_config, ParserConfig};
pub use path::{ElementPath, PathStep, COMMENT_STEP};
pub use projector::{ElementProjector, ProjectorConfig};
pub use service::{DomService, DomServiceConfig};
pub use types::*;
