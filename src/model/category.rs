use serde::{Deserialize, Serialize};

/// Label used wherever a transaction's `category_id` does not resolve to a known
/// category. Unresolved references are displayed, never treated as an error.
pub(crate) const UNKNOWN_CATEGORY: &str = "Unknown";

/// A category record from the remote store, e.g. "Food" or "Salary".
///
/// The set of categories is immutable once loaded and is replaced wholesale on each
/// fetch. The wire format carries additional audit fields (`created_by` etc.) which
/// are ignored here.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Category {
    pub(crate) id: u64,
    pub(crate) name: String,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Resolves a category id to its name, or `None` when the id is unknown.
pub(crate) fn category_name(categories: &[Category], id: u64) -> Option<&str> {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
}

/// Resolves a category name to its id. Matching is exact, as in the original
/// category select control.
pub(crate) fn category_id(categories: &[Category], name: &str) -> Option<u64> {
    categories.iter().find(|c| c.name == name).map(|c| c.id)
}
