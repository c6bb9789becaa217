//! Copier configuration.

use serde::{Deserialize, Serialize};

/// What to do with a property whose type is enumerable but is neither an
/// array nor an ordered sequence (sets, maps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionPolicy {
    #[default]
    /// Leave the property out of the plan; the target keeps its default.
    Skip,
    /// Fail the plan build with `CopyError::UnsupportedCollection`.
    Reject,
}

/// Settings held by a [`Copier`](crate::Copier).
///
/// Plans are cached per copier, so a copier's config applies to every plan
/// it builds for its whole lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopierConfig {
    pub collections: CollectionPolicy,
}

impl CopierConfig {
    /// Config that refuses to build plans containing unsupported collections.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            collections: CollectionPolicy::Reject,
        }
    }
}
