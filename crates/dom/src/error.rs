//! Error types for DOM operations
//!
//! Malformed markup is never an error here. Only lookups and I/O can fail.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Node {0} is a text node and has no path")]
    NotAddressable(u32),

    #[error("No root node set")]
    MissingRoot,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
