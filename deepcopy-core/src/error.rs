//! Error types for plan building and copying.

use deepcopy_reflect::ReflectError;
use thiserror::Error;

/// Result type for copy operations.
pub type CopyResult<T> = Result<T, CopyError>;

/// Errors that can occur while building or executing a copy plan.
///
/// Missing or mismatched properties are not errors: they are left out of the
/// plan and the target keeps its default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("reflection error: {0}")]
    Reflect(#[from] ReflectError),

    #[error("type `{type_name}` has no constructor; copy into an existing instance instead")]
    NotConstructible { type_name: &'static str },

    #[error("cannot copy `{source_type}` into non-object type `{target_type}`")]
    Incompatible {
        source_type: &'static str,
        target_type: &'static str,
    },

    #[error("type `{type_name}` has an unsupported shape for copying")]
    UnsupportedShape { type_name: &'static str },

    #[error("property `{owner}.{property}` has unsupported collection type `{type_name}`")]
    UnsupportedCollection {
        owner: &'static str,
        property: &'static str,
        type_name: &'static str,
    },
}

impl CopyError {
    /// Returns true if the error was raised while building a plan rather
    /// than while copying values.
    pub fn is_plan_error(&self) -> bool {
        matches!(
            self,
            CopyError::Incompatible { .. }
                | CopyError::UnsupportedShape { .. }
                | CopyError::UnsupportedCollection { .. }
        )
    }
}
