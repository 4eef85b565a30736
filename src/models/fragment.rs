//! Parsed template fragment, the artifact held by the process-wide cache.

use serde::{Deserialize, Serialize};

/// Ordered parsed nodes of a rendered template fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fragment {
    pub nodes: Vec<String>,
}

impl Fragment {
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }
}

impl From<Vec<String>> for Fragment {
    fn from(nodes: Vec<String>) -> Self {
        Self::new(nodes)
    }
}
