//! Memoization of pipeline runs.
//!
//! The table re-derives its rows on every keystroke of the search box, often
//! with inputs it has already seen. Runs are cached by a structural
//! fingerprint of the rows and filter state, bucketed by date, since the
//! sort order only changes when the day does.
//!
//! Each entry keeps the rows and filter state it was computed from, and a hit
//! is only served when they match. A miss computes exactly what
//! [`Pipeline::run`] computes; the cache never changes a result.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::sync::Cache as MokaCache;
use tracing::{debug, warn};

use crate::domain::{FilterState, Row};
use crate::pipeline::{Pipeline, PipelineOutput};
use crate::schedule::Clock;

/// Cache key: (fingerprint of rows and filters, classification date).
type RunKey = (u64, NaiveDate);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 256,
        }
    }
}

/// A cached run together with the inputs that produced it.
///
/// The key is only a hash, so a hit is confirmed against these.
struct CachedRun {
    rows: Vec<Row>,
    state: FilterState,
    output: Arc<PipelineOutput>,
}

impl CachedRun {
    fn matches(&self, rows: &[Row], state: &FilterState) -> bool {
        self.rows == rows && self.state == *state
    }
}

/// Pipeline with memoized runs.
pub struct MemoizedPipeline {
    pipeline: Pipeline,
    runs: MokaCache<RunKey, Arc<CachedRun>>,
}

impl MemoizedPipeline {
    /// Wrap `pipeline` with a cache built from `config`.
    pub fn new(pipeline: Pipeline, config: &CacheConfig) -> Self {
        let runs = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { pipeline, runs }
    }

    /// Run the pipeline for `today`, reusing a cached result if available.
    pub fn run(&self, rows: &[Row], state: &FilterState, today: NaiveDate) -> Arc<PipelineOutput> {
        self.run_keyed((fingerprint(rows, state), today), rows, state, today)
    }

    /// Run the pipeline for the clock's current date.
    pub fn run_at<C: Clock + ?Sized>(
        &self,
        rows: &[Row],
        state: &FilterState,
        clock: &C,
    ) -> Arc<PipelineOutput> {
        self.run(rows, state, clock.today())
    }

    fn run_keyed(
        &self,
        key: RunKey,
        rows: &[Row],
        state: &FilterState,
        today: NaiveDate,
    ) -> Arc<PipelineOutput> {
        match self.runs.get(&key) {
            Some(cached) if cached.matches(rows, state) => {
                debug!(fingerprint = key.0, %today, "pipeline cache hit");
                return Arc::clone(&cached.output);
            }
            Some(_) => warn!(fingerprint = key.0, %today, "pipeline cache collision"),
            None => debug!(fingerprint = key.0, %today, "pipeline cache miss"),
        }

        let output = Arc::new(self.pipeline.run(rows, state, today));
        let entry = CachedRun {
            rows: rows.to_vec(),
            state: state.clone(),
            output: Arc::clone(&output),
        };
        self.runs.insert(key, Arc::new(entry));
        output
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.runs.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.runs.invalidate_all();
    }
}

/// Structural hash of every row field and the filter state.
fn fingerprint(rows: &[Row], state: &FilterState) -> u64 {
    let mut hasher = DefaultHasher::new();

    rows.len().hash(&mut hasher);
    for row in rows {
        row.id.hash(&mut hasher);
        row.location.hash(&mut hasher);
        row.route.hash(&mut hasher);
        row.delivery.hash(&mut hasher);
        row.delivery_alt.hash(&mut hasher);
        row.latitude.hash(&mut hasher);
        row.longitude.hash(&mut hasher);
        row.extra.len().hash(&mut hasher);
        for (key, value) in &row.extra {
            key.hash(&mut hasher);
            value.to_string().hash(&mut hasher);
        }
    }
    state.hash(&mut hasher);

    hasher.finish()
}
