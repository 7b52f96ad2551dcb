//! blobhull finds the convex hull of every connected foreground component in
//! a binary image.
//!
//! Processing happens in two stages:
//!
//! 1. [`label`] assigns each 4-connected component of foreground pixels a
//!    distinct label, producing a [`LabeledGrid`].
//! 2. [`build_hulls`] or [`build_hulls_parallel`] compute the convex hull of
//!    each component using gift wrapping (the Jarvis march).
//!
//! Images are row-major buffers of `i32` values, where 0 is foreground and 1
//! is background. Loading and thresholding images to produce this format is
//! left to the caller.
//!
//! ```
//! use blobhull::{build_hulls_parallel, label, Point};
//!
//! #[rustfmt::skip]
//! let image = [
//!     1, 1, 1, 1, 1,
//!     1, 0, 0, 0, 1,
//!     1, 0, 0, 0, 1,
//!     1, 0, 0, 0, 1,
//!     1, 1, 1, 1, 1,
//! ];
//! let labels = label(&image, 5, 5).unwrap();
//! let hulls = build_hulls_parallel(&labels);
//!
//! let corners = [[1, 1], [1, 3], [3, 3], [3, 1]].map(|[x, y]| Point::from_xy(x, y));
//! assert_eq!(hulls, [corners.to_vec()]);
//! ```
//!
//! ## Parallelism
//!
//! The parallel builder runs in a [Rayon][rayon] thread pool. See
//! [`thread_pool`] for how the default pool is sized, and [`HullOptions`] for
//! per-call settings.
//!
//! [rayon]: https://github.com/rayon-rs/rayon

mod errors;
mod grid;
mod hulls;
mod threading;

pub use blobhull_imageproc::{convex_hull, orientation, Orientation, Point};
pub use errors::GridError;
pub use grid::{label, LabeledGrid};
pub use hulls::{
    build_hulls, build_hulls_parallel, build_hulls_with_options, Hull, HullOptions,
    DEFAULT_PAR_SCAN_THRESHOLD,
};
pub use threading::{thread_pool, ThreadPool, NUM_THREADS_VAR};
