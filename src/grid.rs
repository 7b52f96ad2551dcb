use blobhull_imageproc::{collect_components, label_components, Point};
use blobhull_imageproc::{BACKGROUND, FIRST_LABEL, UNLABELED};
use log::debug;
use rten_tensor::prelude::*;
use rten_tensor::{MatrixLayout, NdTensor, NdTensorView};

use crate::errors::GridError;

/// A pixel grid in which every foreground pixel carries the label of its
/// connected component.
///
/// Background pixels have the value 1. Component `i` has the label `i + 2`.
#[derive(Clone, Debug)]
pub struct LabeledGrid {
    labels: NdTensor<i32, 2>,

    /// Number of component slots, ie. the largest label minus one.
    n_components: usize,
}

/// Check that a `width` x `height` grid matches a buffer of length `len` and
/// that its coordinates fit in a [`Point`].
fn check_dimensions(len: usize, width: usize, height: usize) -> Result<(), GridError> {
    let err = GridError::InvalidDimension { width, height, len };
    let max_coord = i32::MAX as usize;
    if width > max_coord || height > max_coord {
        return Err(err);
    }
    match width.checked_mul(height) {
        Some(size) if size == len => Ok(()),
        _ => Err(err),
    }
}

/// Check that the value at index `i` of a grid with the given `width` is in
/// `min..=len + 1`, where `len` is the number of pixels.
///
/// A grid of `len` pixels has at most `len` components, so no valid label
/// exceeds `len + 1`.
fn check_value(
    i: usize,
    value: i32,
    min: i32,
    width: usize,
    len: usize,
) -> Result<(), GridError> {
    if value < min || value as usize > len + 1 {
        return Err(GridError::InvalidPixelValue {
            x: i % width,
            y: i / width,
            value,
        });
    }
    Ok(())
}

/// Return the number of component slots needed for labels up to `max_label`.
fn component_slots(max_label: i32) -> usize {
    if max_label < FIRST_LABEL {
        0
    } else {
        (max_label - FIRST_LABEL) as usize + 1
    }
}

impl LabeledGrid {
    /// Wrap labels which were produced elsewhere, eg. by an earlier call to
    /// [`label`].
    ///
    /// `data` is a row-major grid of `height` rows and `width` columns. Every
    /// value must be either [`BACKGROUND`] or a label in `2..=data.len() + 1`.
    /// The number of components is taken from the largest label, so labels
    /// which do not appear in the grid produce empty components.
    pub fn from_data(
        data: Vec<i32>,
        width: usize,
        height: usize,
    ) -> Result<LabeledGrid, GridError> {
        check_dimensions(data.len(), width, height)?;

        let mut max_label = BACKGROUND;
        for (i, &value) in data.iter().enumerate() {
            check_value(i, value, BACKGROUND, width, data.len())?;
            max_label = max_label.max(value);
        }

        let labels = NdTensor::try_from_data([height, width], data)
            .map_err(|_| GridError::InvalidDimension {
                width,
                height,
                len: width * height,
            })?;

        Ok(LabeledGrid {
            labels,
            n_components: component_slots(max_label),
        })
    }

    /// Return the number of pixels in each row.
    pub fn width(&self) -> usize {
        self.labels.cols()
    }

    /// Return the number of rows.
    pub fn height(&self) -> usize {
        self.labels.rows()
    }

    /// Return the number of component slots.
    ///
    /// For grids produced by [`label`] from an unlabeled image, this is the
    /// number of connected components.
    pub fn num_components(&self) -> usize {
        self.n_components
    }

    /// Return a view of the labels, indexed by `[y, x]`.
    pub fn view(&self) -> NdTensorView<'_, i32, 2> {
        self.labels.view()
    }

    /// Consume the grid and return the labels in row-major order.
    pub fn into_data(self) -> Vec<i32> {
        self.labels.into_data()
    }

    /// Return the pixels of each component.
    ///
    /// Entry `i` holds the pixels with label `i + 2`, in row-major order.
    pub fn components(&self) -> Vec<Vec<Point>> {
        collect_components(self.labels.view(), self.n_components)
    }
}

/// Label the 4-connected foreground components of a binary image.
///
/// `data` is a row-major grid of `height` rows and `width` columns, where 0
/// marks foreground and 1 marks background. Components are labeled 2, 3, ...
/// in the order their first pixel is reached by a row-major scan.
///
/// Values greater than 1 are treated as existing labels and are left as they
/// are. New labels start after the largest existing label, so labeling a grid
/// that is already labeled returns it unchanged.
///
/// Returns an error if the grid size does not match `data`, if any value is
/// negative or if an existing label is larger than `data.len() + 1`.
pub fn label(data: &[i32], width: usize, height: usize) -> Result<LabeledGrid, GridError> {
    check_dimensions(data.len(), width, height)?;

    let mut max_label = BACKGROUND;
    let mut n_unlabeled = 0usize;
    for (i, &value) in data.iter().enumerate() {
        check_value(i, value, UNLABELED, width, data.len())?;
        if value == UNLABELED {
            n_unlabeled += 1;
        }
        max_label = max_label.max(value);
    }

    // Each unlabeled pixel can start at most one component.
    let first_label = max_label.checked_add(1).ok_or(GridError::LabelOverflow)?;
    if (first_label as i64) + (n_unlabeled as i64) - 1 > i32::MAX as i64 {
        return Err(GridError::LabelOverflow);
    }

    let mut labels = NdTensor::from_data([height, width], data.to_vec());
    let n_new = label_components(labels.view_mut(), first_label);
    if n_new > 0 {
        max_label = first_label + n_new as i32 - 1;
    }

    debug!(
        "labeled {}x{} grid: {} new components, {} total",
        width,
        height,
        n_new,
        component_slots(max_label)
    );

    Ok(LabeledGrid {
        labels,
        n_components: component_slots(max_label),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use blobhull_imageproc::Point;
    use rten_tensor::rng::XorShiftRng;

    use super::{label, LabeledGrid};
    use crate::errors::GridError;
    use crate::tests::{grid_from_rows, random_grid};

    #[test]
    fn test_label() {
        struct Case {
            rows: &'static [&'static str],
            expected: &'static [i32],
            n_components: usize,
        }

        let cases = [
            Case {
                rows: &[],
                expected: &[],
                n_components: 0,
            },
            Case {
                rows: &["....", "...."],
                expected: &[1, 1, 1, 1, 1, 1, 1, 1],
                n_components: 0,
            },
            Case {
                rows: &[".....", ".###.", ".###.", ".###.", "....."],
                expected: &[
                    1, 1, 1, 1, 1, //
                    1, 2, 2, 2, 1, //
                    1, 2, 2, 2, 1, //
                    1, 2, 2, 2, 1, //
                    1, 1, 1, 1, 1, //
                ],
                n_components: 1,
            },
            Case {
                rows: &["#....", ".....", ".....", ".....", "....#"],
                expected: &[
                    2, 1, 1, 1, 1, //
                    1, 1, 1, 1, 1, //
                    1, 1, 1, 1, 1, //
                    1, 1, 1, 1, 1, //
                    1, 1, 1, 1, 3, //
                ],
                n_components: 2,
            },
            Case {
                rows: &["##.#", "...#", "#..#"],
                expected: &[2, 2, 1, 3, 1, 1, 1, 3, 4, 1, 1, 3],
                n_components: 3,
            },
        ];

        for case in cases {
            let (data, width, height) = grid_from_rows(case.rows);
            let labeled = label(&data, width, height).unwrap();
            assert_eq!(labeled.width(), width);
            assert_eq!(labeled.height(), height);
            assert_eq!(labeled.num_components(), case.n_components);
            assert_eq!(labeled.into_data(), case.expected, "{:?}", case.rows);
        }
    }

    #[test]
    fn test_label_invalid_input() {
        struct Case {
            data: Vec<i32>,
            width: usize,
            height: usize,
            expected: GridError,
        }

        let cases = [
            Case {
                data: vec![0; 5],
                width: 2,
                height: 3,
                expected: GridError::InvalidDimension {
                    width: 2,
                    height: 3,
                    len: 5,
                },
            },
            Case {
                data: vec![],
                width: usize::MAX,
                height: 2,
                expected: GridError::InvalidDimension {
                    width: usize::MAX,
                    height: 2,
                    len: 0,
                },
            },
            Case {
                data: vec![0, 1, 1, 0, -1, 1],
                width: 3,
                height: 2,
                expected: GridError::InvalidPixelValue {
                    x: 1,
                    y: 1,
                    value: -1,
                },
            },
            // Existing labels cannot exceed the number of pixels plus one.
            Case {
                data: vec![i32::MAX, 0],
                width: 2,
                height: 1,
                expected: GridError::InvalidPixelValue {
                    x: 0,
                    y: 0,
                    value: i32::MAX,
                },
            },
            Case {
                data: vec![1, 2_000_000_000],
                width: 2,
                height: 1,
                expected: GridError::InvalidPixelValue {
                    x: 1,
                    y: 0,
                    value: 2_000_000_000,
                },
            },
            Case {
                data: vec![1, 5, 0],
                width: 3,
                height: 1,
                expected: GridError::InvalidPixelValue {
                    x: 1,
                    y: 0,
                    value: 5,
                },
            },
        ];

        for case in cases {
            let result = label(&case.data, case.width, case.height);
            assert_eq!(result.err(), Some(case.expected));
        }
    }

    #[test]
    fn test_label_is_idempotent() {
        let mut rng = XorShiftRng::new(1234);
        for _ in 0..20 {
            let (data, width, height) = random_grid(&mut rng, 17, 13, 0.6);
            let labeled = label(&data, width, height).unwrap();
            let n_components = labeled.num_components();
            let labels = labeled.into_data();

            let relabeled = label(&labels, width, height).unwrap();
            assert_eq!(relabeled.num_components(), n_components);
            assert_eq!(relabeled.into_data(), labels);
        }
    }

    #[test]
    fn test_label_keeps_existing_labels_distinct() {
        // Label 2 already exists, so the new component must not reuse it.
        let data = [2, 1, 0, 0];
        let labeled = label(&data, 4, 1).unwrap();
        assert_eq!(labeled.num_components(), 2);
        assert_eq!(labeled.into_data(), [2, 1, 3, 3]);

        // The largest existing label a 3-pixel grid accepts is 4.
        let labeled = label(&[1, 4, 0], 3, 1).unwrap();
        assert_eq!(labeled.num_components(), 4);
        assert_eq!(labeled.into_data(), [1, 4, 5]);
    }

    /// Check that labels partition the foreground into maximal 4-connected
    /// sets.
    #[test]
    fn test_label_partitions_foreground() {
        let mut rng = XorShiftRng::new(5678);
        for _ in 0..20 {
            let (data, width, height) = random_grid(&mut rng, 23, 19, 0.55);
            let labels = label(&data, width, height).unwrap().into_data();
            let at = |x: usize, y: usize| labels[y * width + x];

            for y in 0..height {
                for x in 0..width {
                    let input = data[y * width + x];
                    if input == 1 {
                        assert_eq!(at(x, y), 1);
                        continue;
                    }
                    assert!(at(x, y) >= 2);

                    // Foreground neighbors share a label.
                    if x + 1 < width && data[y * width + x + 1] == 0 {
                        assert_eq!(at(x, y), at(x + 1, y));
                    }
                    if y + 1 < height && data[(y + 1) * width + x] == 0 {
                        assert_eq!(at(x, y), at(x, y + 1));
                    }
                }
            }

            // Each label's pixels are connected, found by a breadth-first
            // search from its first pixel.
            let max_label = labels.iter().copied().max().unwrap_or(1);
            for target in 2..=max_label {
                let Some(first) = labels.iter().position(|&l| l == target) else {
                    continue;
                };
                let expected_count = labels.iter().filter(|&&l| l == target).count();

                let mut seen = vec![false; labels.len()];
                let mut queue = VecDeque::from([first]);
                seen[first] = true;
                let mut count = 0;
                while let Some(idx) = queue.pop_front() {
                    count += 1;
                    let (x, y) = (idx % width, idx / width);
                    let mut neighbors = Vec::new();
                    if x > 0 {
                        neighbors.push(idx - 1);
                    }
                    if x + 1 < width {
                        neighbors.push(idx + 1);
                    }
                    if y > 0 {
                        neighbors.push(idx - width);
                    }
                    if y + 1 < height {
                        neighbors.push(idx + width);
                    }
                    for n in neighbors {
                        if !seen[n] && labels[n] == target {
                            seen[n] = true;
                            queue.push_back(n);
                        }
                    }
                }
                assert_eq!(count, expected_count, "label {} is not connected", target);
            }
        }
    }

    #[test]
    fn test_labeled_grid_from_data() {
        let grid = LabeledGrid::from_data(vec![2, 1, 4, 2], 2, 2).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.num_components(), 3);
        assert_eq!(grid.view()[[1, 0]], 4);
        assert_eq!(
            grid.components(),
            [
                vec![Point::from_xy(0, 0), Point::from_xy(1, 1)],
                vec![],
                vec![Point::from_xy(0, 1)],
            ]
        );
    }

    #[test]
    fn test_labeled_grid_from_data_invalid() {
        // The largest label a 2x2 grid can hold is 5.
        assert!(LabeledGrid::from_data(vec![5, 1, 1, 1], 2, 2).is_ok());
        assert_eq!(
            LabeledGrid::from_data(vec![1, 1, 6, 1], 2, 2).err(),
            Some(GridError::InvalidPixelValue { x: 0, y: 1, value: 6 })
        );
        assert_eq!(
            LabeledGrid::from_data(vec![2, 2_000_000_000], 2, 1).err(),
            Some(GridError::InvalidPixelValue {
                x: 1,
                y: 0,
                value: 2_000_000_000
            })
        );
        assert_eq!(
            LabeledGrid::from_data(vec![2, 1, 0, 2], 2, 2).err(),
            Some(GridError::InvalidPixelValue { x: 0, y: 1, value: 0 })
        );
        assert_eq!(
            LabeledGrid::from_data(vec![2, 1, 1], 2, 2).err(),
            Some(GridError::InvalidDimension {
                width: 2,
                height: 2,
                len: 3
            })
        );
    }
}
