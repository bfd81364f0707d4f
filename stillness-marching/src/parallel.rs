//! Parallel processing utilities for batches of independent cells
//!
//! Cells are polygonised independently of each other, so a batch can be
//! spread over a rayon thread pool. Results keep the input order and no
//! geometry is shared or welded between cells.

use crate::polygonizer::polygonise;
use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::{Mutex, OnceLock};
use stillness_core::{Error, GridCell, Result, Triangle};

/// Dedicated thread pool, when one has been configured
static GLOBAL_THREAD_POOL: OnceLock<ThreadPool> = OnceLock::new();
static THREAD_POOL_CONFIG: Mutex<ThreadPoolConfig> = Mutex::new(ThreadPoolConfig::new());

/// Thread pool configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ThreadPoolConfig {
    /// Number of threads to use (None = rayon default)
    pub num_threads: Option<usize>,
    /// Thread name prefix
    pub thread_name_prefix: String,
    /// Enable parallel processing (can be disabled for debugging)
    pub enabled: bool,
    /// Batches smaller than this run sequentially
    pub min_batch_size: usize,
}

impl ThreadPoolConfig {
    const fn new() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: String::new(),
            enabled: true,
            min_batch_size: 64,
        }
    }

    /// Set number of threads
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Set the thread name prefix
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Enable or disable parallel processing
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the smallest batch worth running in parallel
    pub fn with_min_batch_size(mut self, min_batch_size: usize) -> Self {
        self.min_batch_size = min_batch_size;
        self
    }
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "stillness".to_string(),
            ..Self::new()
        }
    }
}

/// Initialize the dedicated thread pool
///
/// Only the first successful call builds a pool; later calls are no-ops.
pub fn init_thread_pool(config: ThreadPoolConfig) -> Result<()> {
    if GLOBAL_THREAD_POOL.get().is_some() {
        return Ok(());
    }

    if config.num_threads == Some(0) {
        return Err(Error::InvalidConfig(
            "Thread pool needs at least one thread".to_string(),
        ));
    }

    let mut builder = ThreadPoolBuilder::new();

    if let Some(num_threads) = config.num_threads {
        builder = builder.num_threads(num_threads);
    }

    if !config.thread_name_prefix.is_empty() {
        let prefix = config.thread_name_prefix.clone();
        builder = builder.thread_name(move |index| format!("{}-{}", prefix, index));
    }

    let pool = builder
        .build()
        .map_err(|e| Error::Algorithm(format!("Failed to create thread pool: {}", e)))?;

    debug!(
        "initialized thread pool with {} threads",
        pool.current_num_threads()
    );

    // Only the initializer whose pool was stored records its config
    if GLOBAL_THREAD_POOL.set(pool).is_ok() {
        if let Ok(mut global_config) = THREAD_POOL_CONFIG.lock() {
            *global_config = config;
        }
    }

    Ok(())
}

/// Get current thread pool configuration
pub fn get_config() -> ThreadPoolConfig {
    THREAD_POOL_CONFIG
        .lock()
        .map(|config| config.clone())
        .unwrap_or_else(|_| ThreadPoolConfig::default())
}

/// Check if parallel processing is enabled
pub fn is_parallel_enabled() -> bool {
    get_config().enabled
}

/// Execute an operation on the dedicated pool, or rayon's global pool if none is set
pub fn execute_parallel<F, R>(op: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    match GLOBAL_THREAD_POOL.get() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Parallel map preserving input order
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    let config = get_config();
    if !config.enabled || data.len() < config.min_batch_size {
        return data.iter().map(f).collect();
    }

    execute_parallel(|| data.par_iter().map(f).collect())
}

/// Polygonise every cell of a batch; entry `i` belongs to `cells[i]`
///
/// ```rust
/// use stillness_marching::parallel::{init_thread_pool, polygonise_cells, ThreadPoolConfig};
/// use stillness_core::GridCell;
///
/// let config = ThreadPoolConfig::default()
///     .with_threads(2)
///     .with_min_batch_size(16);
///
/// init_thread_pool(config).expect("Failed to initialize thread pool");
///
/// let cells = vec![GridCell::cube(1.0).with_density(0, 0.0); 100];
/// let results = polygonise_cells(&cells, 0.5);
/// assert_eq!(results.len(), 100);
/// assert!(results.iter().all(|triangles| triangles.len() == 1));
/// ```
pub fn polygonise_cells(cells: &[GridCell], iso_level: f32) -> Vec<Vec<Triangle>> {
    debug!("polygonising {} cells at iso level {}", cells.len(), iso_level);
    parallel_map(cells, |cell| polygonise(cell, iso_level))
}

/// Polygonise every cell of a batch and concatenate the triangles in cell order
pub fn polygonise_cells_flat(cells: &[GridCell], iso_level: f32) -> Vec<Triangle> {
    polygonise_cells(cells, iso_level).into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_pool_config() {
        let config = ThreadPoolConfig::default()
            .with_threads(4)
            .with_thread_name_prefix("cells")
            .with_min_batch_size(8)
            .with_enabled(true);

        assert_eq!(config.num_threads, Some(4));
        assert_eq!(config.thread_name_prefix, "cells");
        assert_eq!(config.min_batch_size, 8);
        assert!(config.enabled);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = ThreadPoolConfig::default().with_threads(0);
        if GLOBAL_THREAD_POOL.get().is_none() {
            assert!(init_thread_pool(config).is_err());
        }
    }

    #[test]
    fn test_parallel_map_preserves_order() {
        let data: Vec<usize> = (0..1000).collect();
        let result = parallel_map(&data, |x| x * 2);
        assert_eq!(result, data.iter().map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_polygonise_cells_matches_sequential() {
        let cells: Vec<GridCell> = (0..200)
            .map(|i| {
                let t = i as f32 / 200.0;
                GridCell::cube(1.0).with_densities([t, 1.0 - t, 0.5, t * t, 0.2, 0.8, 1.0, 0.0])
            })
            .collect();

        let batch = polygonise_cells(&cells, 0.45);
        assert_eq!(batch.len(), cells.len());
        for (cell, triangles) in cells.iter().zip(&batch) {
            assert_eq!(*triangles, polygonise(cell, 0.45));
        }

        let flat = polygonise_cells_flat(&cells, 0.45);
        assert_eq!(flat.len(), batch.iter().map(Vec::len).sum::<usize>());
    }
}
