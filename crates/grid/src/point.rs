use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Integer grid position.
///
/// Ordered by `(y, x)` so that sorted collections of points iterate in
/// row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Packed row-major index of this point in a grid of the given width.
    pub fn to_index(self, width: i32) -> usize {
        (self.y as usize) * (width as usize) + self.x as usize
    }

    /// Inverse of [`to_index`](Self::to_index).
    pub fn from_index(index: usize, width: i32) -> Self {
        let w = width as usize;
        Self::new((index % w) as i32, (index / w) as i32)
    }

    /// The position one step in `direction` from this one.
    pub fn step(self, direction: Direction) -> Self {
        self + direction
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, rhs: Direction) -> Point {
        Point::new(self.x + rhs.dx(), self.y + rhs.dy())
    }
}

impl AddAssign<Direction> for Point {
    fn add_assign(&mut self, rhs: Direction) {
        *self = *self + rhs;
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}
