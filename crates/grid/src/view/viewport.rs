use crate::error::{GridError, Result};
use crate::point::Point;
use crate::rect::Rect;
use crate::view::{GridView, SettableGridView};

/// Window over a sub-rectangle of a source view, addressed in its own
/// coordinate space. Access outside the window fails with `OutOfBounds`.
pub struct Viewport<V> {
    source: V,
    window: Rect,
}

impl<V: GridView> Viewport<V> {
    /// The window must lie entirely inside the source view.
    pub fn new(source: V, window: Rect) -> Result<Self> {
        if window.width < 0 || window.height < 0 {
            return Err(GridError::InvalidDimensions {
                width: window.width,
                height: window.height,
            });
        }
        if !source.bounds().contains_rect(&window) {
            return Err(GridError::InvalidDimensions {
                width: window.width,
                height: window.height,
            });
        }
        Ok(Self { source, window })
    }

    pub fn window(&self) -> Rect {
        self.window
    }

    pub fn source(&self) -> &V {
        &self.source
    }
}

impl<V: GridView> GridView for Viewport<V> {
    type Item = V::Item;

    fn width(&self) -> i32 {
        self.window.width
    }

    fn height(&self) -> i32 {
        self.window.height
    }

    fn get(&self, pos: Point) -> Result<V::Item> {
        self.bounds_check(pos)?;
        self.source.get(pos + self.window.position())
    }
}

impl<V: SettableGridView> SettableGridView for Viewport<V> {
    fn set(&mut self, pos: Point, value: V::Item) -> Result<()> {
        self.bounds_check(pos)?;
        let target = pos + self.window.position();
        self.source.set(target, value)
    }
}

/// Window over a source view that never fails a read: any access mapping
/// outside the source yields a configured default instead.
///
/// The window may hang off the source's edge, or lie outside it entirely.
pub struct UnboundedViewport<V: GridView> {
    source: V,
    window: Rect,
    default: V::Item,
}

impl<V: GridView> UnboundedViewport<V>
where
    V::Item: Clone,
{
    pub fn new(source: V, window: Rect, default: V::Item) -> Result<Self> {
        if window.width < 0 || window.height < 0 {
            return Err(GridError::InvalidDimensions {
                width: window.width,
                height: window.height,
            });
        }
        Ok(Self {
            source,
            window,
            default,
        })
    }

    pub fn window(&self) -> Rect {
        self.window
    }
}

impl<V: GridView> GridView for UnboundedViewport<V>
where
    V::Item: Clone,
{
    type Item = V::Item;

    fn width(&self) -> i32 {
        self.window.width
    }

    fn height(&self) -> i32 {
        self.window.height
    }

    fn get(&self, pos: Point) -> Result<V::Item> {
        let target = pos + self.window.position();
        if self.source.in_bounds(target) {
            self.source.get(target)
        } else {
            Ok(self.default.clone())
        }
    }
}
