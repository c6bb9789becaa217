//! Plan-driven deep copying between reflected types.
//!
//! For each (source type, target type) pair a [`CopyPlan`] is built once and
//! cached in the [`Copier`]'s [`PlanCache`]:
//! - target properties are matched to source properties by exact name and
//!   exact declared type; unmatched ones keep their default value
//! - nested objects are copied through the same cache (same type to same type)
//! - arrays and ordered sequences get a new container with copied elements
//! - sets and maps are skipped, or rejected under [`CollectionPolicy::Reject`]
//!
//! The free functions [`copy`], [`copy_into`] and [`duplicate`] use the
//! process-wide [`Copier::global`]; construct your own `Copier` for an
//! isolated cache or a different [`CopierConfig`].
//!
//! Copying never follows cycles: the supported owning kinds (`Box`, `Arc`,
//! `Option`, containers) cannot form a cyclic instance graph, and plan
//! building binds nested objects lazily so self-referential types are fine.

mod builder;
mod cache;
mod config;
mod copier;
mod error;
mod op;
mod plan;
mod recursor;

pub use cache::{PlanCache, TypePair};
pub use config::{CollectionPolicy, CopierConfig};
pub use copier::Copier;
pub use error::{CopyError, CopyResult};
pub use op::{CopyOp, RecursionKind};
pub use plan::{CopyPlan, PropertyMatch};

pub use deepcopy_reflect::{reflect_object, Reflect, TypeInfo};

/// Builds a new `T` from `source` using the process-wide copier.
pub fn copy<S: Reflect, T: Reflect>(source: &S) -> CopyResult<T> {
    Copier::global().copy(source)
}

/// Copies `source` onto `target` using the process-wide copier.
pub fn copy_into<S: Reflect, T: Reflect>(source: &S, target: &mut T) -> CopyResult<()> {
    Copier::global().copy_into(source, target)
}

/// Deep-copies `value` using the process-wide copier.
pub fn duplicate<T: Reflect>(value: &T) -> CopyResult<T> {
    Copier::global().duplicate(value)
}
