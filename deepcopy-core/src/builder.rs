//! Plan construction for a (source, target) type pair.
//!
//! A target property is bound only when the source has a property with the
//! same name and the same declared type, the source side is readable and the
//! target side is writable. Everything else is left out of the plan and keeps
//! its default value in copies.

use crate::config::{CollectionPolicy, CopierConfig};
use crate::error::{CopyError, CopyResult};
use crate::op::CopyOp;
use crate::plan::{CopyPlan, PropertyMatch};
use deepcopy_reflect::{PropertyInfo, TypeInfo, TypeKind};
use tracing::{debug, trace};

/// Builds the copy plan for `source -> target`.
///
/// Building never recurses into nested objects: those are bound as
/// [`CopyOp::Object`] and resolved through the cache on first execution.
pub(crate) fn build_plan(
    source: &TypeInfo,
    target: &TypeInfo,
    config: &CopierConfig,
) -> CopyResult<CopyPlan> {
    let TypeKind::Object(object) = target.kind() else {
        return build_whole(source, target);
    };

    let mut matches = Vec::with_capacity(object.properties().len());
    for property in object.properties() {
        if let Some(bound) = match_property(source, target, property, config)? {
            matches.push(bound);
        }
    }

    debug!(
        source_type = source.name(),
        target_type = target.name(),
        matched = matches.len(),
        skipped = object.properties().len() - matches.len(),
        "Built copy plan"
    );
    Ok(CopyPlan::object(
        source.clone(),
        target.clone(),
        object.clone(),
        matches,
    ))
}

fn match_property(
    source: &TypeInfo,
    target: &TypeInfo,
    property: &PropertyInfo,
    config: &CopierConfig,
) -> CopyResult<Option<PropertyMatch>> {
    let name = property.name();
    let Some(counterpart) = source.property(name) else {
        trace!(target_type = target.name(), property = name, "No source property, skipping");
        return Ok(None);
    };
    if counterpart.declared_type_id() != property.declared_type_id() {
        trace!(target_type = target.name(), property = name, "Declared types differ, skipping");
        return Ok(None);
    }
    if !counterpart.can_read() || !property.can_write() {
        trace!(target_type = target.name(), property = name, "Not readable/writable, skipping");
        return Ok(None);
    }

    let declared = property.type_info();
    match CopyOp::classify(&declared) {
        Ok(op) => Ok(Some(PropertyMatch::new(
            property.clone(),
            counterpart.clone(),
            op,
        ))),
        Err(unsupported) => match config.collections {
            CollectionPolicy::Skip => {
                trace!(
                    target_type = target.name(),
                    property = name,
                    collection = unsupported.type_name,
                    "Unsupported collection shape, skipping"
                );
                Ok(None)
            }
            CollectionPolicy::Reject => Err(CopyError::UnsupportedCollection {
                owner: target.name(),
                property: name,
                type_name: declared.name(),
            }),
        },
    }
}

/// Plans a copy of a non-object root such as `[[i32; 3]; 3]` or `Vec<String>`.
fn build_whole(source: &TypeInfo, target: &TypeInfo) -> CopyResult<CopyPlan> {
    if source != target {
        return Err(CopyError::Incompatible {
            source_type: source.name(),
            target_type: target.name(),
        });
    }
    let op = CopyOp::classify(target).map_err(|_| CopyError::UnsupportedShape {
        type_name: target.name(),
    })?;

    debug!(
        target_type = target.name(),
        kind = target.kind().label(),
        "Built whole-value copy plan"
    );
    Ok(CopyPlan::whole(source.clone(), target.clone(), op))
}
