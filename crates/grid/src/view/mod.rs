//! Bounded 2D indexable surfaces.
//!
//! A view is created with its dimensions pinned and never resizes. Every
//! view offers three equivalent lookups (by [`Point`], by `(x, y)`, by
//! packed row-major index); the trait defines the latter two in terms of
//! the first, so implementations only supply one.

mod array;
mod bits;
mod lambda;
mod translation;
mod viewport;

pub use array::ArrayView;
pub use bits::BitGridView;
pub use lambda::{LambdaGridView, SettableLambdaGridView};
pub use translation::{SettableTranslationGridView, TranslationGridView};
pub use viewport::{UnboundedViewport, Viewport};

use crate::error::{GridError, Result};
use crate::point::Point;
use crate::rect::{Rect, RectPositions};

/// Read capability over a bounded grid of values.
pub trait GridView {
    type Item;

    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Reads the value at `pos`, failing with `OutOfBounds` outside the
    /// view.
    fn get(&self, pos: Point) -> Result<Self::Item>;

    fn count(&self) -> usize {
        (self.width() as usize) * (self.height() as usize)
    }

    /// The full extent of the view as a rectangle anchored at the origin.
    fn bounds(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width(),
            height: self.height(),
        }
    }

    fn in_bounds(&self, pos: Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width() && pos.y < self.height()
    }

    fn bounds_check(&self, pos: Point) -> Result<()> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                position: pos,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    fn get_xy(&self, x: i32, y: i32) -> Result<Self::Item> {
        self.get(Point::new(x, y))
    }

    /// Lookup by packed index `y * width + x`.
    fn get_index(&self, index: usize) -> Result<Self::Item> {
        if index >= self.count() {
            return Err(GridError::OutOfBounds {
                position: Point::from_index(index, self.width().max(1)),
                width: self.width(),
                height: self.height(),
            });
        }
        self.get(Point::from_index(index, self.width()))
    }

    /// Row-major iteration over every in-bounds position.
    fn positions(&self) -> RectPositions {
        self.bounds().positions()
    }
}

/// Write capability on top of [`GridView`].
pub trait SettableGridView: GridView {
    /// Writes `value` at `pos`, failing with `OutOfBounds` outside the
    /// view.
    fn set(&mut self, pos: Point, value: Self::Item) -> Result<()>;

    fn set_xy(&mut self, x: i32, y: i32, value: Self::Item) -> Result<()> {
        self.set(Point::new(x, y), value)
    }

    /// Write by packed index `y * width + x`.
    fn set_index(&mut self, index: usize, value: Self::Item) -> Result<()> {
        if index >= self.count() {
            return Err(GridError::OutOfBounds {
                position: Point::from_index(index, self.width().max(1)),
                width: self.width(),
                height: self.height(),
            });
        }
        self.set(Point::from_index(index, self.width()), value)
    }

    /// Sets every cell to `value`.
    fn fill(&mut self, value: Self::Item)
    where
        Self::Item: Clone,
    {
        for pos in self.bounds().positions() {
            // Every iterated position is in bounds.
            let _ = self.set(pos, value.clone());
        }
    }

    /// Sets every cell to the item's default value.
    fn clear(&mut self)
    where
        Self::Item: Default + Clone,
    {
        self.fill(Self::Item::default());
    }
}

impl<V: GridView + ?Sized> GridView for &V {
    type Item = V::Item;

    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn get(&self, pos: Point) -> Result<Self::Item> {
        (**self).get(pos)
    }
}

impl<V: GridView + ?Sized> GridView for &mut V {
    type Item = V::Item;

    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn get(&self, pos: Point) -> Result<Self::Item> {
        (**self).get(pos)
    }
}

impl<V: SettableGridView + ?Sized> SettableGridView for &mut V {
    fn set(&mut self, pos: Point, value: Self::Item) -> Result<()> {
        (**self).set(pos, value)
    }
}

/// Validates dimensions at construction time, returning the cell count.
pub(crate) fn checked_count(width: i32, height: i32) -> Result<usize> {
    if width < 0 || height < 0 {
        return Err(GridError::InvalidDimensions { width, height });
    }
    Ok((width as usize) * (height as usize))
}
