//! Element-wise copying for arrays and ordered sequences.
//!
//! The element op was bound when the plan was built: value and text elements
//! are cloned, object elements go through a same-type object copy. Either
//! way the returned container is a new allocation and keeps source order.

use crate::copier::Copier;
use crate::error::CopyResult;
use crate::op::CopyOp;
use deepcopy_reflect::ListInfo;
use std::any::Any;

/// Copies a fixed-size array into a new array of the same length.
pub(crate) fn copy_array(
    copier: &Copier,
    list: &ListInfo,
    element: &CopyOp,
    source: &dyn Any,
) -> CopyResult<Box<dyn Any>> {
    let items = list.items(source)?;
    let mut copied = Vec::with_capacity(items.len());
    for item in items {
        copied.push(element.apply(copier, item)?);
    }
    Ok(list.collect(copied)?)
}

/// Copies an ordered sequence by appending copied elements in source order.
pub(crate) fn copy_sequence(
    copier: &Copier,
    list: &ListInfo,
    element: &CopyOp,
    source: &dyn Any,
) -> CopyResult<Box<dyn Any>> {
    let copied = list
        .items(source)?
        .into_iter()
        .map(|item| element.apply(copier, item))
        .collect::<CopyResult<Vec<_>>>()?;
    Ok(list.collect(copied)?)
}
