//! Concurrent plan cache keyed by (source type, target type).

use crate::error::{CopyError, CopyResult};
use crate::plan::CopyPlan;
use dashmap::DashMap;
use std::any::TypeId;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Ordered (source, target) type identity. `(A, B)` and `(B, A)` are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypePair {
    source: TypeId,
    target: TypeId,
}

impl TypePair {
    #[must_use]
    pub const fn new(source: TypeId, target: TypeId) -> Self {
        Self { source, target }
    }

    #[must_use]
    pub fn of<S: 'static, T: 'static>() -> Self {
        Self::new(TypeId::of::<S>(), TypeId::of::<T>())
    }

    #[must_use]
    pub const fn source(&self) -> TypeId {
        self.source
    }

    #[must_use]
    pub const fn target(&self) -> TypeId {
        self.target
    }
}

/// Build-once, reuse-forever store of copy plans.
///
/// Builds run without any lock held. Concurrent callers missing on the same
/// pair may each build a plan; the first one published wins and the others
/// are dropped. A build that fails with a plan error is remembered too, so a
/// pair that can never be planned is not rebuilt on every copy. Entries are
/// never evicted.
pub struct PlanCache {
    plans: DashMap<TypePair, Arc<CopyPlan>>,
    failures: DashMap<TypePair, CopyError>,
    builds: AtomicUsize,
}

impl PlanCache {
    pub fn new() -> Self {
        Self {
            plans: DashMap::new(),
            failures: DashMap::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// Returns the cached plan for `key`, if any.
    pub fn get(&self, key: &TypePair) -> Option<Arc<CopyPlan>> {
        self.plans.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the remembered plan error for `key`, if its build failed.
    pub fn failure(&self, key: &TypePair) -> Option<CopyError> {
        self.failures.get(key).map(|entry| entry.value().clone())
    }

    /// Returns the cached plan for `key`, building and publishing it on a miss.
    ///
    /// Plan errors are deterministic for a pair and are returned from the
    /// cache on later calls; any other build error is not remembered.
    pub fn get_or_build<F>(&self, key: TypePair, build: F) -> CopyResult<Arc<CopyPlan>>
    where
        F: FnOnce() -> CopyResult<CopyPlan>,
    {
        if let Some(plan) = self.get(&key) {
            return Ok(plan);
        }
        if let Some(err) = self.failure(&key) {
            return Err(err);
        }

        self.builds.fetch_add(1, Ordering::Relaxed);
        let built = match build() {
            Ok(plan) => Arc::new(plan),
            Err(err) => {
                if err.is_plan_error() {
                    debug!(error = %err, "Remembering failed plan build");
                    self.failures.entry(key).or_insert_with(|| err.clone());
                }
                return Err(err);
            }
        };

        let published = Arc::clone(
            self.plans
                .entry(key)
                .or_insert_with(|| Arc::clone(&built))
                .value(),
        );
        if !Arc::ptr_eq(&published, &built) {
            debug!(
                source_type = built.source().name(),
                target_type = built.target().name(),
                "Discarding plan built concurrently"
            );
        }
        Ok(published)
    }

    /// Number of cached plans.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Number of failed pairs remembered.
    pub fn failed_len(&self) -> usize {
        self.failures.len()
    }

    /// Number of plan builds attempted, including failed and discarded
    /// concurrent ones.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanCache")
            .field("plans", &self.len())
            .field("failures", &self.failed_len())
            .field("builds", &self.builds())
            .finish()
    }
}
