//! Error types reported when validating pixel grids.

use thiserror::Error;

/// Errors that can occur when constructing a [`LabeledGrid`](crate::LabeledGrid)
/// from caller-supplied pixel data.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    /// The product of the grid's width and height does not match the length
    /// of the pixel data, or does not fit the coordinate types.
    #[error("grid size {width}x{height} does not match data length {len}")]
    InvalidDimension {
        width: usize,
        height: usize,
        len: usize,
    },

    /// A pixel has a value which is not valid at this stage.
    #[error("invalid pixel value {value} at ({x}, {y})")]
    InvalidPixelValue { x: usize, y: usize, value: i32 },

    /// The grid has too many components to assign each a distinct `i32`
    /// label.
    #[error("too many components to label")]
    LabelOverflow,
}
