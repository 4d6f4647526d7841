use std::marker::PhantomData;

use crate::error::Result;
use crate::point::Point;
use crate::view::{GridView, SettableGridView};

/// View mapping every value of a source view through a total function.
///
/// Same dimensions as the source; every read defers to it.
pub struct TranslationGridView<V, T, F> {
    source: V,
    map: F,
    _item: PhantomData<fn() -> T>,
}

impl<V, T, F> TranslationGridView<V, T, F>
where
    V: GridView,
    F: Fn(Point, V::Item) -> T,
{
    pub fn new(source: V, map: F) -> Self {
        Self {
            source,
            map,
            _item: PhantomData,
        }
    }

    pub fn source(&self) -> &V {
        &self.source
    }
}

impl<V, T, F> GridView for TranslationGridView<V, T, F>
where
    V: GridView,
    F: Fn(Point, V::Item) -> T,
{
    type Item = T;

    fn width(&self) -> i32 {
        self.source.width()
    }

    fn height(&self) -> i32 {
        self.source.height()
    }

    fn get(&self, pos: Point) -> Result<T> {
        let raw = self.source.get(pos)?;
        Ok((self.map)(pos, raw))
    }
}

/// Translation view with a reverse mapping, making it writable.
///
/// `unmap` composed with `map` must be the identity on the value subset in
/// use; writes must not silently drop information.
pub struct SettableTranslationGridView<V, T, F, G> {
    source: V,
    map: F,
    unmap: G,
    _item: PhantomData<fn() -> T>,
}

impl<V, T, F, G> SettableTranslationGridView<V, T, F, G>
where
    V: SettableGridView,
    F: Fn(Point, V::Item) -> T,
    G: Fn(Point, T) -> V::Item,
{
    pub fn new(source: V, map: F, unmap: G) -> Self {
        Self {
            source,
            map,
            unmap,
            _item: PhantomData,
        }
    }

    pub fn source(&self) -> &V {
        &self.source
    }
}

impl<V, T, F, G> GridView for SettableTranslationGridView<V, T, F, G>
where
    V: SettableGridView,
    F: Fn(Point, V::Item) -> T,
    G: Fn(Point, T) -> V::Item,
{
    type Item = T;

    fn width(&self) -> i32 {
        self.source.width()
    }

    fn height(&self) -> i32 {
        self.source.height()
    }

    fn get(&self, pos: Point) -> Result<T> {
        let raw = self.source.get(pos)?;
        Ok((self.map)(pos, raw))
    }
}

impl<V, T, F, G> SettableGridView for SettableTranslationGridView<V, T, F, G>
where
    V: SettableGridView,
    F: Fn(Point, V::Item) -> T,
    G: Fn(Point, T) -> V::Item,
{
    fn set(&mut self, pos: Point, value: T) -> Result<()> {
        self.source.set(pos, (self.unmap)(pos, value))
    }
}
