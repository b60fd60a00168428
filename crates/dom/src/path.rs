//! Positional element paths
//!
//! A path is the list of `(tag, index)` steps from the root down to a node,
//! where `index` is the 1-based position of the node among siblings sharing
//! its tag. Rendered as an absolute XPath, e.g. `/html[1]/body[1]/div[2]`.

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Step tag used for comment nodes
pub const COMMENT_STEP: &str = "comment()";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub tag: String,
    pub index: u32,
}

impl PathStep {
    pub fn new(tag: impl Into<String>, index: u32) -> Self {
        debug_assert!(index >= 1, "path indices are 1-based");
        Self {
            tag: tag.into(),
            index,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.tag, self.index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementPath {
    steps: SmallVec<[PathStep; 8]>,
}

impl ElementPath {
    /// Path of a root element: a single step with index 1
    pub fn root(tag: impl Into<String>) -> Self {
        let mut steps = SmallVec::new();
        steps.push(PathStep::new(tag, 1));
        Self { steps }
    }

    /// This path extended by one step
    pub fn child(&self, tag: impl Into<String>, index: u32) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::new(tag, index));
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}

impl FromIterator<PathStep> for ElementPath {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

impl Serialize for ElementPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
