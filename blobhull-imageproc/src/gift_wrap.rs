use crate::{orientation, Orientation, Point};

/// Return true if `points[b]` is a better choice than `points[a]` for the hull
/// vertex following `points[curr]`.
///
/// `b` is better if it lies to the left of the line `curr -> a`. If the three
/// points are collinear, `b` is better if it is further from `curr`, so that
/// points in the middle of a hull edge are skipped.
///
/// When `curr` is a vertex of the convex hull of `points`, this is a strict
/// total order over the other points. Hence the best candidate can be found by
/// a reduction over any partitioning of `points`.
pub fn is_more_extreme(points: &[Point], curr: usize, a: usize, b: usize) -> bool {
    let (c, pa, pb) = (points[curr], points[a], points[b]);
    match orientation(c, pa, pb) {
        Orientation::Left => true,
        Orientation::Collinear => c.manhattan_distance(pb) > c.manhattan_distance(pa),
        Orientation::Right => false,
    }
}

/// Return the index of the hull vertex which follows `points[curr]`.
///
/// This scans every point, starting with `(curr + 1) % points.len()` as the
/// candidate and replacing it whenever a more extreme point is found.
pub fn find_next_vertex(points: &[Point], curr: usize) -> usize {
    let initial = (curr + 1) % points.len();
    (0..points.len()).fold(initial, |next, i| {
        if is_more_extreme(points, curr, next, i) {
            i
        } else {
            next
        }
    })
}

/// Return the index of the point where the hull traversal starts.
///
/// This is the point with the smallest X coordinate. Ties are resolved in
/// favor of the smallest Y coordinate, which is the first of them in row-major
/// order. The result is always a corner of the hull, whatever the order of
/// `points`.
fn start_index(points: &[Point]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p.x, p.y))
        .map(|(i, _)| i)
}

/// Return the convex hull of `points` using gift wrapping (the Jarvis march).
///
/// `points` are expected to be distinct. The hull starts with the point that
/// has the smallest X coordinate (and the smallest Y among those) and proceeds
/// counter-clockwise, assuming a coordinate system where Y increases going
/// down. Points which lie on a hull edge without being a corner are not
/// included.
///
/// Sets of fewer than three points are returned unchanged.
///
/// The running time is `O(nh)` where `n` is the number of points and `h` the
/// number of hull vertices.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    convex_hull_with(points, find_next_vertex)
}

/// Variant of [`convex_hull`] which uses `find_next` to select each hull
/// vertex after the first.
///
/// `find_next(points, curr)` must return the same index as
/// [`find_next_vertex`], but may use a different strategy to find it, such as
/// a parallel scan.
pub fn convex_hull_with<F: Fn(&[Point], usize) -> usize>(
    points: &[Point],
    find_next: F,
) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let Some(start) = start_index(points) else {
        return Vec::new();
    };

    let mut hull = Vec::new();
    let mut curr = start;
    loop {
        hull.push(points[curr]);
        curr = find_next(points, curr);

        // Compare by position rather than index, so that duplicate input
        // points cannot prevent the hull from closing.
        if points[curr] == points[start] {
            break;
        }
        debug_assert!(hull.len() < points.len(), "hull did not close");
    }

    hull
}
