use blobhull_imageproc::{convex_hull, convex_hull_with, is_more_extreme, Point};
use log::{debug, trace};
use rayon::prelude::*;

use crate::grid::LabeledGrid;
use crate::threading::{thread_pool, ThreadPool};

/// The convex hull of one component, as a list of vertices in
/// counter-clockwise order.
///
/// The edge from the last vertex back to the first is implicit.
pub type Hull = Vec<Point>;

/// Default value of [`HullOptions::par_scan_threshold`].
pub const DEFAULT_PAR_SCAN_THRESHOLD: usize = 1000;

/// Options which control how hulls are built in parallel.
#[derive(Clone, Copy)]
pub struct HullOptions<'a> {
    /// Components with more points than this have their search for each hull
    /// vertex split across threads. Smaller components are processed by a
    /// single thread.
    ///
    /// This affects only performance, not the result.
    pub par_scan_threshold: usize,

    /// Thread pool to run in. If `None`, the pool returned by
    /// [`thread_pool`] is used.
    pub thread_pool: Option<&'a ThreadPool>,
}

impl Default for HullOptions<'_> {
    fn default() -> Self {
        HullOptions {
            par_scan_threshold: DEFAULT_PAR_SCAN_THRESHOLD,
            thread_pool: None,
        }
    }
}

/// Parallel version of [`find_next_vertex`](blobhull_imageproc::find_next_vertex).
///
/// Each Rayon job folds its share of the points starting from the same
/// initial candidate, then partial results are merged using the same
/// comparison. Since the comparison is a strict total order when `curr` is a
/// hull vertex, the merged result is the same for any split.
fn par_find_next_vertex(points: &[Point], curr: usize) -> usize {
    let initial = (curr + 1) % points.len();
    let pick = |next: usize, i: usize| {
        if is_more_extreme(points, curr, next, i) {
            i
        } else {
            next
        }
    };

    (0..points.len())
        .into_par_iter()
        .fold(|| initial, pick)
        .reduce(|| initial, pick)
}

/// Compute the hull of one component, scanning in parallel if it has more
/// than `par_scan_threshold` points.
fn component_hull(points: &[Point], par_scan_threshold: usize) -> Hull {
    if points.len() > par_scan_threshold {
        trace!("using parallel scan for component with {} points", points.len());
        convex_hull_with(points, par_find_next_vertex)
    } else {
        convex_hull(points)
    }
}

/// Compute the convex hull of each component in `labels`, on the current
/// thread.
///
/// Entry `i` of the result is the hull of the component labeled `i + 2`. See
/// [`convex_hull`] for the ordering of hull vertices. Components with fewer
/// than three pixels are returned as-is.
pub fn build_hulls(labels: &LabeledGrid) -> Vec<Hull> {
    let hulls: Vec<Hull> = labels
        .components()
        .iter()
        .map(|points| convex_hull(points))
        .collect();
    debug!("built {} hulls", hulls.len());
    hulls
}

/// Parallel version of [`build_hulls`] using default [`HullOptions`].
///
/// This returns the same result as [`build_hulls`].
pub fn build_hulls_parallel(labels: &LabeledGrid) -> Vec<Hull> {
    build_hulls_with_options(labels, &HullOptions::default())
}

/// Compute the convex hull of each component in `labels` in parallel.
///
/// Components are distributed across threads, each writing to its own slot in
/// the output. Large components also parallelize the search for each hull
/// vertex, according to `options`.
pub fn build_hulls_with_options(labels: &LabeledGrid, options: &HullOptions) -> Vec<Hull> {
    let components = labels.components();
    let mut hulls: Vec<Hull> = vec![Vec::new(); components.len()];

    let pool = options.thread_pool.unwrap_or_else(|| thread_pool());
    let par_scan_threshold = options.par_scan_threshold;
    pool.run(|| {
        hulls
            .par_iter_mut()
            .zip(components.par_iter())
            .for_each(|(hull, points)| {
                *hull = component_hull(points, par_scan_threshold);
            });
    });

    debug!(
        "built {} hulls in parallel using {} threads",
        hulls.len(),
        pool.num_threads()
    );
    hulls
}
