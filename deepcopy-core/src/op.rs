//! Per-value copy operations.
//!
//! A [`CopyOp`] is decided once from a declared type when a plan is built and
//! then executed for every copy. Element types of arrays and sequences are
//! bound here too, so execution never inspects types again.

use crate::copier::Copier;
use crate::error::CopyResult;
use crate::recursor;
use deepcopy_reflect::{ListInfo, OptionInfo, PointerInfo, ScalarInfo, TypeInfo, TypeKind};
use std::any::Any;
use std::fmt;

/// How a property (or element) value is duplicated.
#[derive(Clone)]
pub enum CopyOp {
    /// Values and text: clone the value as is.
    Assign(ScalarInfo),
    /// Nested object: same-type copy through the copier's plan cache.
    Object(TypeInfo),
    /// Fixed-size array: copy every element with `element`.
    Array { list: ListInfo, element: Box<CopyOp> },
    /// Ordered sequence: copy every element with `element`, in order.
    Sequence { list: ListInfo, element: Box<CopyOp> },
    /// `Option`: `None` stays `None`, `Some` is copied with `inner`.
    Nullable { option: OptionInfo, inner: Box<CopyOp> },
    /// `Box`/`Arc`: a new pointer around a copy of the pointee.
    Pointer { pointer: PointerInfo, inner: Box<CopyOp> },
}

/// Which recursion a property match performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionKind {
    /// Direct assignment.
    None,
    /// Nested object copy.
    Object,
    /// Element-wise array copy.
    ArrayElement,
    /// Element-wise sequence copy.
    SequenceElement,
}

/// A declared type that no copy operation can handle.
#[derive(Debug)]
pub(crate) struct Unsupported {
    pub type_name: &'static str,
}

impl CopyOp {
    /// Binds the copy operation for a declared type.
    pub(crate) fn classify(ty: &TypeInfo) -> Result<CopyOp, Unsupported> {
        let op = match ty.kind() {
            TypeKind::Value(scalar) | TypeKind::Text(scalar) => CopyOp::Assign(*scalar),
            TypeKind::Object(_) => CopyOp::Object(ty.clone()),
            TypeKind::Array(list) => CopyOp::Array {
                list: *list,
                element: Box::new(Self::classify(&list.element())?),
            },
            TypeKind::Sequence(list) => CopyOp::Sequence {
                list: *list,
                element: Box::new(Self::classify(&list.element())?),
            },
            TypeKind::Optional(option) => CopyOp::Nullable {
                option: *option,
                inner: Box::new(Self::classify(&option.inner())?),
            },
            TypeKind::Pointer(pointer) => CopyOp::Pointer {
                pointer: *pointer,
                inner: Box::new(Self::classify(&pointer.inner())?),
            },
            TypeKind::Collection(_) => {
                return Err(Unsupported {
                    type_name: ty.name(),
                });
            }
        };
        Ok(op)
    }

    /// The recursion this op performs; wrappers report what they wrap.
    #[must_use]
    pub fn recursion(&self) -> RecursionKind {
        match self {
            CopyOp::Assign(_) => RecursionKind::None,
            CopyOp::Object(_) => RecursionKind::Object,
            CopyOp::Array { .. } => RecursionKind::ArrayElement,
            CopyOp::Sequence { .. } => RecursionKind::SequenceElement,
            CopyOp::Nullable { inner, .. } | CopyOp::Pointer { inner, .. } => inner.recursion(),
        }
    }

    /// Produces an independent copy of `value`.
    pub(crate) fn apply(&self, copier: &Copier, value: &dyn Any) -> CopyResult<Box<dyn Any>> {
        match self {
            CopyOp::Assign(scalar) => Ok(scalar.clone_value(value)?),
            CopyOp::Object(ty) => copier.copy_erased(ty, ty, value),
            CopyOp::Array { list, element } => recursor::copy_array(copier, list, element, value),
            CopyOp::Sequence { list, element } => {
                recursor::copy_sequence(copier, list, element, value)
            }
            CopyOp::Nullable { option, inner } => {
                let copied = match option.get(value)? {
                    Some(present) => Some(inner.apply(copier, present)?),
                    None => None,
                };
                Ok(option.wrap(copied)?)
            }
            CopyOp::Pointer { pointer, inner } => {
                let copied = inner.apply(copier, pointer.get(value)?)?;
                Ok(pointer.wrap(copied)?)
            }
        }
    }
}

impl fmt::Debug for CopyOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyOp::Assign(_) => f.write_str("Assign"),
            CopyOp::Object(ty) => f.debug_tuple("Object").field(&ty.name()).finish(),
            CopyOp::Array { element, .. } => f.debug_tuple("Array").field(element).finish(),
            CopyOp::Sequence { element, .. } => f.debug_tuple("Sequence").field(element).finish(),
            CopyOp::Nullable { inner, .. } => f.debug_tuple("Nullable").field(inner).finish(),
            CopyOp::Pointer { inner, .. } => f.debug_tuple("Pointer").field(inner).finish(),
        }
    }
}
