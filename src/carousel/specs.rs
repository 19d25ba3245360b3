//! Per-slide spec lines shown in the panel next to the carousel.

use serde::{Deserialize, Serialize};

/// Ordered spec lines, one set per slide index.
///
/// Authored separately from the slides (see `[[equipment]]` in the config),
/// so the two can drift apart. A table shorter than the slide sequence is
/// tolerated: [`SpecTable::lines_for`] falls back to the first set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecTable(Vec<Vec<String>>);

impl SpecTable {
    pub fn new(sets: Vec<Vec<String>>) -> Self {
        Self(sets)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Spec lines for slide `index`.
    ///
    /// Out-of-range indices get set 0. Only an empty table yields nothing.
    pub fn lines_for(&self, index: usize) -> &[String] {
        self.0
            .get(index)
            .or_else(|| self.0.first())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether every one of `slide_count` slides has its own set.
    pub fn covers(&self, slide_count: usize) -> bool {
        self.0.len() >= slide_count
    }
}

impl From<Vec<Vec<String>>> for SpecTable {
    fn from(sets: Vec<Vec<String>>) -> Self {
        Self(sets)
    }
}
