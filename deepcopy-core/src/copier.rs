//! Copy entry points.

use crate::builder::build_plan;
use crate::cache::{PlanCache, TypePair};
use crate::config::CopierConfig;
use crate::error::CopyResult;
use crate::plan::{Assignment, CopyPlan};
use deepcopy_reflect::{downcast, Reflect, TypeInfo};
use std::any::Any;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Copier> = OnceLock::new();

/// Owns a plan cache and copies values through it.
///
/// A `Copier` is `Send + Sync`; share one across threads (or use
/// [`Copier::global`]) so plans are built once per type pair.
#[derive(Debug, Default)]
pub struct Copier {
    config: CopierConfig,
    cache: PlanCache,
}

impl Copier {
    /// Creates a copier with default configuration and an empty cache.
    pub fn new() -> Self {
        Self::with_config(CopierConfig::default())
    }

    pub fn with_config(config: CopierConfig) -> Self {
        Self {
            config,
            cache: PlanCache::new(),
        }
    }

    /// Returns the process-wide copier, creating it on first access.
    pub fn global() -> &'static Copier {
        GLOBAL.get_or_init(Copier::new)
    }

    pub fn config(&self) -> &CopierConfig {
        &self.config
    }

    pub fn cache(&self) -> &PlanCache {
        &self.cache
    }

    /// Returns the plan for `S -> T`, building it on first use.
    pub fn plan<S: Reflect, T: Reflect>(&self) -> CopyResult<Arc<CopyPlan>> {
        self.resolve(TypePair::of::<S, T>(), S::type_info, T::type_info)
    }

    /// Builds a new `T` from the same-named, same-typed properties of `source`.
    pub fn copy<S: Reflect, T: Reflect>(&self, source: &S) -> CopyResult<T> {
        let plan = self.plan::<S, T>()?;
        let copied = plan.construct(self, source)?;
        Ok(downcast::<T>(copied)?)
    }

    /// Copies `source` onto an existing `target`, keeping the target instance.
    ///
    /// Properties without a counterpart in `source` keep their current value.
    pub fn copy_into<S: Reflect, T: Reflect>(&self, source: &S, target: &mut T) -> CopyResult<()> {
        let plan = self.plan::<S, T>()?;
        match plan.assign(self, source, target)? {
            Assignment::InPlace => {}
            Assignment::Replace(value) => *target = downcast::<T>(value)?,
        }
        Ok(())
    }

    /// Deep-copies a value into a new instance of the same type.
    pub fn duplicate<T: Reflect>(&self, value: &T) -> CopyResult<T> {
        self.copy::<T, T>(value)
    }

    /// Copies an erased value; used for nested objects.
    pub(crate) fn copy_erased(
        &self,
        source: &TypeInfo,
        target: &TypeInfo,
        value: &dyn Any,
    ) -> CopyResult<Box<dyn Any>> {
        let key = TypePair::new(source.id(), target.id());
        let plan = self.resolve(key, || source.clone(), || target.clone())?;
        plan.construct(self, value)
    }

    fn resolve(
        &self,
        key: TypePair,
        source: impl FnOnce() -> TypeInfo,
        target: impl FnOnce() -> TypeInfo,
    ) -> CopyResult<Arc<CopyPlan>> {
        self.cache
            .get_or_build(key, || build_plan(&source(), &target(), &self.config))
    }
}
