use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{GridError, Result};
use crate::point::Point;

/// Axis-aligned rectangle of grid cells with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Rect> {
        if width < 0 || height < 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Rect {
            x,
            y,
            width,
            height,
        })
    }

    /// Rectangle spanning both corners inclusively.
    pub fn from_corners(min: Point, max: Point) -> Rect {
        Rect {
            x: min.x,
            y: min.y,
            width: (max.x - min.x + 1).max(0),
            height: (max.y - min.y + 1).max(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Smallest contained position. Meaningless for empty rectangles.
    pub fn min_extent(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Largest contained position. Meaningless for empty rectangles.
    pub fn max_extent(&self) -> Point {
        Point::new(self.x + self.width - 1, self.y + self.height - 1)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x + (self.width - 1) / 2,
            self.y + (self.height - 1) / 2,
        )
    }

    pub fn corners(&self) -> [Point; 4] {
        let min = self.min_extent();
        let max = self.max_extent();
        [
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ]
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (self.contains(other.min_extent()) && self.contains(other.max_extent()))
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Grows every side outward by `n` (or shrinks for negative `n`,
    /// bottoming out at zero extents).
    pub fn expanded(&self, n: i32) -> Rect {
        Rect {
            x: self.x - n,
            y: self.y - n,
            width: (self.width + 2 * n).max(0),
            height: (self.height + 2 * n).max(0),
        }
    }

    /// Smallest rectangle containing both this one and `p`.
    ///
    /// Empty rectangles have no location, so the result for one is the
    /// single-cell rectangle at `p`.
    pub fn union_point(&self, p: Point) -> Rect {
        if self.is_empty() {
            return Rect {
                x: p.x,
                y: p.y,
                width: 1,
                height: 1,
            };
        }
        let min = self.min_extent();
        let max = self.max_extent();
        Rect::from_corners(
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }

    /// Row-major iteration over every contained position.
    pub fn positions(&self) -> RectPositions {
        RectPositions {
            rect: *self,
            index: 0,
        }
    }

    /// Every contained position on the outer edge, row-major.
    pub fn perimeter_positions(&self) -> Vec<Point> {
        self.positions()
            .filter(|p| {
                p.x == self.x
                    || p.y == self.y
                    || p.x == self.x + self.width - 1
                    || p.y == self.y + self.height - 1
            })
            .collect()
    }

    /// The contained cells along one side, e.g. the top row for `Up`.
    ///
    /// Fails with `InvalidParameter` for non-cardinal directions.
    pub fn side_positions(&self, side: Direction) -> Result<Vec<Point>> {
        if self.is_empty() {
            return Ok(vec![]);
        }
        let min = self.min_extent();
        let max = self.max_extent();
        match side {
            Direction::Up => Ok((min.x..=max.x).map(|x| Point::new(x, min.y)).collect()),
            Direction::Down => Ok((min.x..=max.x).map(|x| Point::new(x, max.y)).collect()),
            Direction::Left => Ok((min.y..=max.y).map(|y| Point::new(min.x, y)).collect()),
            Direction::Right => Ok((min.y..=max.y).map(|y| Point::new(max.x, y)).collect()),
            other => Err(GridError::InvalidParameter {
                what: format!("side must be cardinal, got {other:?}"),
            }),
        }
    }
}

/// Row-major position iterator returned by [`Rect::positions`].
#[derive(Debug, Clone)]
pub struct RectPositions {
    rect: Rect,
    index: usize,
}

impl Iterator for RectPositions {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let count = (self.rect.width as usize) * (self.rect.height as usize);
        if self.index >= count {
            return None;
        }
        let local = Point::from_index(self.index, self.rect.width);
        self.index += 1;
        Some(Point::new(self.rect.x + local.x, self.rect.y + local.y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = (self.rect.width as usize) * (self.rect.height as usize);
        let remaining = count.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RectPositions {}
