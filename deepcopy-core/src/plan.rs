//! Compiled copy plans.

use crate::copier::Copier;
use crate::error::{CopyError, CopyResult};
use crate::op::{CopyOp, RecursionKind};
use deepcopy_reflect::{ObjectInfo, PropertyInfo, TypeInfo};
use std::any::Any;
use std::fmt;
use tracing::warn;

/// One target property bound to its same-named, same-typed source property.
#[derive(Debug, Clone)]
pub struct PropertyMatch {
    target: PropertyInfo,
    source: PropertyInfo,
    op: CopyOp,
}

impl PropertyMatch {
    pub(crate) fn new(target: PropertyInfo, source: PropertyInfo, op: CopyOp) -> Self {
        Self { target, source, op }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.target.name()
    }

    #[must_use]
    pub fn target(&self) -> &PropertyInfo {
        &self.target
    }

    #[must_use]
    pub fn source(&self) -> &PropertyInfo {
        &self.source
    }

    #[must_use]
    pub fn op(&self) -> &CopyOp {
        &self.op
    }

    #[must_use]
    pub fn recursion(&self) -> RecursionKind {
        self.op.recursion()
    }
}

enum PlanBody {
    /// Target is an object: allocate (or reuse) it and assign matched properties.
    Object {
        object: ObjectInfo,
        matches: Vec<PropertyMatch>,
    },
    /// Target is not an object: copy the whole value with one op.
    Whole(CopyOp),
}

/// Outcome of applying a plan to an existing target.
pub(crate) enum Assignment {
    /// Properties were written onto the target.
    InPlace,
    /// The target must be replaced by this value.
    Replace(Box<dyn Any>),
}

/// Immutable, reusable description of how to copy one type pair.
///
/// Plans hold only type metadata; they never own source or target values and
/// can be executed concurrently from any number of threads.
pub struct CopyPlan {
    source: TypeInfo,
    target: TypeInfo,
    body: PlanBody,
}

impl CopyPlan {
    pub(crate) fn object(
        source: TypeInfo,
        target: TypeInfo,
        object: ObjectInfo,
        matches: Vec<PropertyMatch>,
    ) -> Self {
        Self {
            source,
            target,
            body: PlanBody::Object { object, matches },
        }
    }

    pub(crate) fn whole(source: TypeInfo, target: TypeInfo, op: CopyOp) -> Self {
        Self {
            source,
            target,
            body: PlanBody::Whole(op),
        }
    }

    #[must_use]
    pub fn source(&self) -> &TypeInfo {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &TypeInfo {
        &self.target
    }

    /// Property bindings, in target declaration order. Empty for whole-value plans.
    #[must_use]
    pub fn matches(&self) -> &[PropertyMatch] {
        match &self.body {
            PlanBody::Object { matches, .. } => matches,
            PlanBody::Whole(_) => &[],
        }
    }

    /// Looks up the binding for a target property.
    pub fn find(&self, name: &str) -> Option<&PropertyMatch> {
        self.matches().iter().find(|m| m.name() == name)
    }

    /// True when the target is an object populated property by property.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.body, PlanBody::Object { .. })
    }

    /// Builds a new target from `source`.
    ///
    /// All property values are copied before the target is allocated, so a
    /// failure never yields a half-populated instance.
    pub(crate) fn construct(&self, copier: &Copier, source: &dyn Any) -> CopyResult<Box<dyn Any>> {
        match &self.body {
            PlanBody::Whole(op) => op.apply(copier, source),
            PlanBody::Object { object, matches } => {
                let not_constructible = || CopyError::NotConstructible {
                    type_name: self.target.name(),
                };
                if !object.is_constructible() {
                    return Err(not_constructible());
                }
                let values = read_all(copier, matches, source)?;
                let mut target = object.construct().ok_or_else(not_constructible)?;
                write_all(matches, &mut *target, values).map_err(|(_, err)| err)?;
                Ok(target)
            }
        }
    }

    /// Copies `source` onto an existing `target`.
    ///
    /// Values are copied and every write is checked before the first one
    /// happens. If a setter still fails midway, the properties already
    /// written are restored from a copy of their previous values. Only a
    /// property that is written but not readable cannot be restored.
    pub(crate) fn assign(
        &self,
        copier: &Copier,
        source: &dyn Any,
        target: &mut dyn Any,
    ) -> CopyResult<Assignment> {
        match &self.body {
            PlanBody::Whole(op) => Ok(Assignment::Replace(op.apply(copier, source)?)),
            PlanBody::Object { matches, .. } => {
                let values = read_all(copier, matches, source)?;
                check_all(matches, target, &values)?;
                let previous = backup_all(copier, matches, target)?;
                if let Err((written, err)) = write_all(matches, target, values) {
                    restore(&matches[..written], target, previous);
                    return Err(err);
                }
                Ok(Assignment::InPlace)
            }
        }
    }
}

fn read_all(
    copier: &Copier,
    matches: &[PropertyMatch],
    source: &dyn Any,
) -> CopyResult<Vec<Box<dyn Any>>> {
    matches
        .iter()
        .map(|m| m.op.apply(copier, m.source.get(source)?))
        .collect()
}

fn check_all(
    matches: &[PropertyMatch],
    target: &dyn Any,
    values: &[Box<dyn Any>],
) -> CopyResult<()> {
    for (m, value) in matches.iter().zip(values) {
        m.target.check_set(target, &**value)?;
    }
    Ok(())
}

/// Copies the current value of every readable target property.
fn backup_all(
    copier: &Copier,
    matches: &[PropertyMatch],
    target: &dyn Any,
) -> CopyResult<Vec<Option<Box<dyn Any>>>> {
    matches
        .iter()
        .map(|m| {
            if !m.target.can_read() {
                return Ok(None);
            }
            Ok(Some(m.op.apply(copier, m.target.get(target)?)?))
        })
        .collect()
}

/// Writes every value; on failure reports how many were written before it.
fn write_all(
    matches: &[PropertyMatch],
    target: &mut dyn Any,
    values: Vec<Box<dyn Any>>,
) -> Result<(), (usize, CopyError)> {
    for (index, (m, value)) in matches.iter().zip(values).enumerate() {
        m.target
            .set(target, value)
            .map_err(|err| (index, CopyError::from(err)))?;
    }
    Ok(())
}

fn restore(written: &[PropertyMatch], target: &mut dyn Any, previous: Vec<Option<Box<dyn Any>>>) {
    for (m, value) in written.iter().zip(previous) {
        let Some(value) = value else {
            warn!(property = m.name(), "Write-only property cannot be restored");
            continue;
        };
        if let Err(err) = m.target.set(target, value) {
            warn!(property = m.name(), error = %err, "Failed to restore property");
        }
    }
}

impl fmt::Debug for CopyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("CopyPlan");
        out.field("source", &self.source.name())
            .field("target", &self.target.name());
        match &self.body {
            PlanBody::Object { matches, .. } => out.field("matches", matches),
            PlanBody::Whole(op) => out.field("whole", op),
        };
        out.finish()
    }
}
