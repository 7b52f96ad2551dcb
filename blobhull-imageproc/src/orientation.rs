use crate::Point;

/// Direction of the turn made by three points.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde_traits", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// The points lie on one line.
    Collinear,

    /// The third point lies to the left of the directed line through the
    /// first two, ie. the 2D cross product is positive.
    Left,

    /// The third point lies to the right of the directed line through the
    /// first two.
    Right,
}

/// Classify where `b` lies relative to the directed line `c -> a`.
///
/// This is the sign of the cross product `(a - c) x (b - c)`. The products are
/// computed using 64-bit arithmetic, which cannot overflow for non-negative
/// coordinates such as pixel positions.
pub fn orientation(c: Point, a: Point, b: Point) -> Orientation {
    let (cx, cy) = (c.x as i64, c.y as i64);
    let cross = (a.x as i64 - cx) * (b.y as i64 - cy) - (a.y as i64 - cy) * (b.x as i64 - cx);

    match cross.signum() {
        0 => Orientation::Collinear,
        1 => Orientation::Left,
        _ => Orientation::Right,
    }
}
