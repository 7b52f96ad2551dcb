//! Provides pixel-grid segmentation and convex hull geometry.
//!
//! This includes:
//!
//! - Integer pixel coordinates: [Point]
//! - The turn direction of three points: [orientation]
//! - Labeling the 4-connected components of a binary image with a flood fill
//!   ([label_components]) and grouping their pixels ([collect_components])
//! - Convex hulls of point sets using gift wrapping: [convex_hull],
//!   [convex_hull_with]

mod gift_wrap;
mod labels;
mod orientation;
mod shapes;

pub use gift_wrap::{convex_hull, convex_hull_with, find_next_vertex, is_more_extreme};
pub use labels::{collect_components, label_components, BACKGROUND, FIRST_LABEL, UNLABELED};
pub use orientation::{orientation, Orientation};
pub use shapes::Point;
