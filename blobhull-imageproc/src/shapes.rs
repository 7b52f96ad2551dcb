use std::fmt;

/// A pixel position defined by X and Y coordinates.
///
/// Y increases going down, matching the row order of an image.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde_traits", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Construct a point from Y and X coordinates.
    pub fn from_yx(y: i32, x: i32) -> Self {
        Point { y, x }
    }

    /// Construct a point from X and Y coordinates.
    pub fn from_xy(x: i32, y: i32) -> Self {
        Point { y, x }
    }

    /// Return the sum of the absolute X and Y distances between `self` and
    /// `other`.
    ///
    /// For points lying on the same ray from `self` this orders them the same
    /// way as euclidean distance, without the risk of overflow from squaring.
    pub fn manhattan_distance(self, other: Point) -> i64 {
        let dx = other.x as i64 - self.x as i64;
        let dy = other.y as i64 - self.y as i64;
        dx.abs() + dy.abs()
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
