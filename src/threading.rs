use std::env;
use std::sync::OnceLock;

use log::warn;

/// Environment variable which overrides the size of the shared thread pool.
pub const NUM_THREADS_VAR: &str = "BLOBHULL_NUM_THREADS";

/// A wrapper around the Rayon thread pool used to build hulls.
///
/// If the pool could not be created, operations run directly on the calling
/// thread instead.
pub struct ThreadPool {
    /// The wrapped thread pool, or None if we failed to construct one.
    pool: Option<rayon::ThreadPool>,
}

impl ThreadPool {
    /// Run a function in the thread pool.
    ///
    /// This corresponds to [`rayon::ThreadPool::install`], so parallel
    /// iterators used by `op` execute in this pool.
    pub fn run<R: Send, Op: FnOnce() -> R + Send>(&self, op: Op) -> R {
        if let Some(pool) = self.pool.as_ref() {
            pool.install(op)
        } else {
            op()
        }
    }

    /// Create a thread pool with a given number of threads.
    pub fn with_num_threads(num_threads: usize) -> ThreadPool {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|index| format!("blobhull-{}", index))
            .build();

        let pool = match pool {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!("failed to create thread pool, running on caller's thread: {}", err);
                None
            }
        };

        ThreadPool { pool }
    }

    /// Return the number of threads in the pool.
    ///
    /// This is 1 if the pool could not be created.
    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map(|pool| pool.current_num_threads())
            .unwrap_or(1)
    }
}

/// Return the number of threads to use when the thread count is not
/// configured.
///
/// Labeling and hull construction are CPU-bound, so this is the physical rather
/// than logical core count.
fn optimal_core_count() -> usize {
    num_cpus::get_physical().max(1)
}

/// Parse a thread count override, clamping it to between 1 and the logical
/// core count.
fn parse_num_threads(value: &str) -> Option<usize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .map(|n| n.clamp(1, num_cpus::get().max(1)))
}

/// Return the [Rayon][rayon] thread pool which is used for parallel hull
/// construction.
///
/// The thread count defaults to the number of physical cores. It can be
/// overridden at the process level by setting the `BLOBHULL_NUM_THREADS`
/// environment variable, whose value must be a number between 1 and the
/// logical core count.
///
/// A different pool can be used for individual calls via
/// [`HullOptions::thread_pool`](crate::HullOptions::thread_pool).
///
/// [rayon]: https://github.com/rayon-rs/rayon
pub fn thread_pool() -> &'static ThreadPool {
    static THREAD_POOL: OnceLock<ThreadPool> = OnceLock::new();
    THREAD_POOL.get_or_init(|| {
        let physical_cpus = optimal_core_count();

        let num_threads = match env::var_os(NUM_THREADS_VAR) {
            Some(threads_var) => {
                let threads_var = threads_var.to_string_lossy();
                parse_num_threads(&threads_var).unwrap_or_else(|| {
                    warn!(
                        "ignoring invalid {} value \"{}\"",
                        NUM_THREADS_VAR, threads_var
                    );
                    physical_cpus
                })
            }
            None => physical_cpus,
        };

        ThreadPool::with_num_threads(num_threads)
    })
}
