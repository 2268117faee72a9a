//! Report memoization
//!
//! Reports are pure functions of a data snapshot and a filter set, so a
//! generated report can be shared until the source's snapshot version moves.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{LedgerError, LedgerResult};
use crate::storage::ExpenseSource;

use super::expense_report::ExpenseReport;
use super::filters::ReportFilters;

type CacheKey = (u64, ReportFilters);

/// Thread-safe cache of generated reports
#[derive(Debug, Default)]
pub struct ReportCache {
    entries: RwLock<HashMap<CacheKey, Arc<ExpenseReport>>>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached report for `filters` or generate and store it
    ///
    /// Entries from older snapshot versions are dropped when a new report is
    /// stored. Generation errors are returned and nothing is cached.
    pub fn get_or_generate<S: ExpenseSource + ?Sized>(
        &self,
        source: &S,
        filters: &ReportFilters,
    ) -> LedgerResult<Arc<ExpenseReport>> {
        let version = source.snapshot_version();
        let key = (version, filters.clone());

        {
            let entries = self.entries.read().map_err(|e| {
                LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;
            if let Some(report) = entries.get(&key) {
                tracing::debug!(version, "report cache hit");
                return Ok(Arc::clone(report));
            }
        }

        let report = Arc::new(ExpenseReport::generate(source, filters)?);

        let mut entries = self.entries.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        entries.retain(|(cached_version, _), _| *cached_version == version);
        let report = Arc::clone(entries.entry(key).or_insert(report));
        tracing::debug!(version, cached = entries.len(), "report cache miss");
        Ok(report)
    }

    /// Number of cached reports
    pub fn len(&self) -> LedgerResult<usize> {
        let entries = self.entries.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Drop every cached report
    pub fn clear(&self) -> LedgerResult<()> {
        let mut entries = self.entries.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense, Project};
    use crate::reports::test_support::{date, Fixture};
    use crate::storage::Snapshot;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    /// Snapshot wrapper that counts reads and allows bumping the version
    struct CountingSource {
        inner: Snapshot,
        reads: AtomicUsize,
        version: AtomicU64,
    }

    impl CountingSource {
        fn new(inner: Snapshot) -> Self {
            Self {
                inner,
                reads: AtomicUsize::new(0),
                version: AtomicU64::new(1),
            }
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        fn bump(&self) {
            self.version.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl ExpenseSource for CountingSource {
        fn expenses(&self) -> LedgerResult<Vec<Expense>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.expenses()
        }
        fn categories(&self) -> LedgerResult<Vec<Category>> {
            self.inner.categories()
        }
        fn projects(&self) -> LedgerResult<Vec<Project>> {
            self.inner.projects()
        }
        fn snapshot_version(&self) -> u64 {
            self.version.load(Ordering::SeqCst)
        }
    }

    fn source(fx: &Fixture) -> CountingSource {
        CountingSource::new(Snapshot::new(
            vec![
                fx.expense(&fx.tower, &fx.materials, 4500, date(2024, 1, 15)),
                fx.expense(&fx.depot, &fx.labour, 2500, date(2024, 1, 13)),
            ],
            vec![fx.materials.clone(), fx.labour.clone()],
            vec![fx.tower.clone(), fx.depot.clone()],
        ))
    }

    #[test]
    fn test_same_filters_hit_cache() {
        let fx = Fixture::new();
        let source = source(&fx);
        let cache = ReportCache::new();
        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31));

        let first = cache.get_or_generate(&source, &filters).unwrap();
        let second = cache.get_or_generate(&source, &filters).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.reads(), 1);
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_different_filters_generate_separately() {
        let fx = Fixture::new();
        let source = source(&fx);
        let cache = ReportCache::new();
        let all = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31));
        let tower = all.clone().with_projects([fx.tower.id]);

        let a = cache.get_or_generate(&source, &all).unwrap();
        let b = cache.get_or_generate(&source, &tower).unwrap();

        assert_eq!(a.entry_count, 2);
        assert_eq!(b.entry_count, 1);
        assert_eq!(source.reads(), 2);
        assert_eq!(cache.len().unwrap(), 2);
    }

    #[test]
    fn test_new_snapshot_version_invalidates() {
        let fx = Fixture::new();
        let source = source(&fx);
        let cache = ReportCache::new();
        let all = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31));
        let tower = all.clone().with_projects([fx.tower.id]);

        cache.get_or_generate(&source, &all).unwrap();
        cache.get_or_generate(&source, &tower).unwrap();
        source.bump();
        cache.get_or_generate(&source, &all).unwrap();

        assert_eq!(source.reads(), 3);
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let fx = Fixture::new();
        let source = source(&fx);
        let cache = ReportCache::new();
        let inverted = ReportFilters::new(date(2024, 2, 1), date(2024, 1, 1));

        assert!(cache.get_or_generate(&source, &inverted).is_err());
        assert!(cache.is_empty().unwrap());

        cache
            .get_or_generate(&source, &ReportFilters::new(date(2024, 1, 1), date(2024, 1, 2)))
            .unwrap();
        cache.clear().unwrap();
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn test_cache_is_shareable_across_threads() {
        let fx = Fixture::new();
        let source = Arc::new(source(&fx));
        let cache = Arc::new(ReportCache::new());
        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let source = Arc::clone(&source);
                let cache = Arc::clone(&cache);
                let filters = filters.clone();
                std::thread::spawn(move || cache.get_or_generate(&*source, &filters).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().entry_count, 2);
        }
        assert_eq!(cache.len().unwrap(), 1);
    }
}
