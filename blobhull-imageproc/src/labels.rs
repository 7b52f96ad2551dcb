use rten_tensor::{MatrixLayout, NdTensorView, NdTensorViewMut};

use crate::Point;

/// Value of a foreground pixel which has not yet been assigned to a component.
pub const UNLABELED: i32 = 0;

/// Value of a background pixel.
pub const BACKGROUND: i32 = 1;

/// Label assigned to the first component in a grid that contains only
/// [`UNLABELED`] and [`BACKGROUND`] values.
pub const FIRST_LABEL: i32 = 2;

/// Return the in-bounds 4-connected neighbors of `[y, x]` in a grid with
/// `rows` rows and `cols` columns.
fn neighbors_4(
    [y, x]: [usize; 2],
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = [usize; 2]> {
    [
        (y > 0).then(|| [y - 1, x]),        // N
        (y + 1 < rows).then(|| [y + 1, x]), // S
        (x > 0).then(|| [y, x - 1]),        // W
        (x + 1 < cols).then(|| [y, x + 1]), // E
    ]
    .into_iter()
    .flatten()
}

/// Label the 4-connected components of [`UNLABELED`] pixels in `grid`.
///
/// The grid is scanned in row-major order. Each unlabeled pixel found starts a
/// new component, which receives the next label counting up from
/// `first_label`, and is flood-filled before the scan continues. Labels are
/// therefore assigned in the order in which the top-left-most pixel of each
/// component appears.
///
/// Pixels with any value other than [`UNLABELED`] are left untouched and act
/// as barriers between components.
///
/// Returns the number of components that were labeled.
pub fn label_components(mut grid: NdTensorViewMut<i32, 2>, first_label: i32) -> usize {
    let rows = grid.rows();
    let cols = grid.cols();

    // Pixels that have been labeled but whose neighbors are not yet visited.
    // An explicit stack is used because components can be far larger than
    // the call stack would allow with recursion.
    let mut stack: Vec<[usize; 2]> = Vec::new();
    let mut label = first_label;
    let mut n_components = 0;

    for y in 0..rows {
        for x in 0..cols {
            if grid[[y, x]] != UNLABELED {
                continue;
            }

            // Pixels are labeled when pushed, so each is pushed at most once.
            grid[[y, x]] = label;
            stack.push([y, x]);

            while let Some(pos) = stack.pop() {
                for neighbor in neighbors_4(pos, rows, cols) {
                    if grid[neighbor] == UNLABELED {
                        grid[neighbor] = label;
                        stack.push(neighbor);
                    }
                }
            }

            n_components += 1;
            label += 1;
        }
    }

    n_components
}

/// Group the pixels of a labeled grid by component.
///
/// Entry `i` of the result holds the points with label `i + FIRST_LABEL`, in
/// row-major order. The result has `n_components` entries. Background pixels
/// and labels outside `FIRST_LABEL..FIRST_LABEL + n_components` are ignored.
pub fn collect_components(labels: NdTensorView<i32, 2>, n_components: usize) -> Vec<Vec<Point>> {
    let mut components = vec![Vec::new(); n_components];

    for y in 0..labels.rows() {
        for x in 0..labels.cols() {
            let label = labels[[y, x]];
            if label < FIRST_LABEL {
                continue;
            }
            if let Some(component) = components.get_mut((label - FIRST_LABEL) as usize) {
                component.push(Point::from_yx(y as i32, x as i32));
            }
        }
    }

    components
}
