use std::cell::Cell;
use std::collections::HashSet;

use rand::Rng;

use crate::error::{GridError, Result};
use crate::point::Point;
use crate::rect::Rect;

/// Unordered set of grid positions with a lazily cached bounding rectangle.
///
/// Positions are kept in insertion order alongside a hash index, so
/// membership tests are O(1) while iteration stays deterministic for
/// seeded runs. Removal swaps the last position into the hole.
#[derive(Debug, Clone, Default)]
pub struct Area {
    positions: Vec<Point>,
    index: HashSet<Point>,
    bounds: Cell<Option<Rect>>,
}

impl Area {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Point) -> bool {
        self.index.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.positions.iter().copied()
    }

    /// Adds a position. Duplicates are ignored.
    pub fn add(&mut self, pos: Point) {
        if !self.index.insert(pos) {
            return;
        }
        self.positions.push(pos);
        if let Some(bounds) = self.bounds.get() {
            self.bounds.set(Some(bounds.union_point(pos)));
        }
    }

    pub fn add_all(&mut self, positions: impl IntoIterator<Item = Point>) {
        for pos in positions {
            self.add(pos);
        }
    }

    /// Removes a position; removing a non-member is a no-op.
    pub fn remove(&mut self, pos: Point) {
        if !self.index.remove(&pos) {
            return;
        }
        if let Some(at) = self.positions.iter().position(|&p| p == pos) {
            self.positions.swap_remove(at);
        }
        // Shrinking may tighten the rectangle, so recompute on demand.
        self.bounds.set(None);
    }

    pub fn remove_all(&mut self, positions: impl IntoIterator<Item = Point>) {
        for pos in positions {
            self.remove(pos);
        }
    }

    /// Tight bounding rectangle of the contained positions; the empty
    /// rectangle iff the area is empty.
    pub fn bounds(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let bounds = self
            .positions
            .iter()
            .fold(Rect::EMPTY, |acc, &p| acc.union_point(p));
        self.bounds.set(Some(bounds));
        bounds
    }

    /// Uniform random member, or `EmptyArea`.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Point> {
        if self.positions.is_empty() {
            return Err(GridError::EmptyArea);
        }
        Ok(self.positions[rng.gen_range(0..self.positions.len())])
    }
}

impl FromIterator<Point> for Area {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut area = Area::new();
        area.add_all(iter);
        area
    }
}

impl Extend<Point> for Area {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}
