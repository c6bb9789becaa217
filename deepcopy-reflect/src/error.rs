//! Error types for type-erased property and element access.

use thiserror::Error;

/// Errors raised while reading, writing or rebuilding type-erased values.
///
/// These only surface when a hand-written descriptor disagrees with the
/// type it describes; descriptors produced by this crate never trigger them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    #[error("type mismatch: expected a value of type `{expected}`")]
    TypeMismatch { expected: &'static str },

    #[error("property `{property}` is not readable")]
    NotReadable { property: &'static str },

    #[error("property `{property}` is not writable")]
    NotWritable { property: &'static str },

    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
