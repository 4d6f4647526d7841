use std::marker::PhantomData;

use crate::error::Result;
use crate::point::Point;
use crate::view::{checked_count, GridView, SettableGridView};

/// Read-only view computed from a callable.
///
/// The callable runs on every access; nothing is cached, so read cost is
/// the callable's cost.
pub struct LambdaGridView<T, F> {
    width: i32,
    height: i32,
    read: F,
    _item: PhantomData<fn() -> T>,
}

impl<T, F: Fn(Point) -> T> LambdaGridView<T, F> {
    pub fn new(width: i32, height: i32, read: F) -> Result<Self> {
        checked_count(width, height)?;
        Ok(Self {
            width,
            height,
            read,
            _item: PhantomData,
        })
    }
}

impl<T, F: Fn(Point) -> T> GridView for LambdaGridView<T, F> {
    type Item = T;

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn get(&self, pos: Point) -> Result<T> {
        self.bounds_check(pos)?;
        Ok((self.read)(pos))
    }
}

/// Callable-backed view with a paired setter callable.
pub struct SettableLambdaGridView<T, F, G> {
    width: i32,
    height: i32,
    read: F,
    write: G,
    _item: PhantomData<fn() -> T>,
}

impl<T, F, G> SettableLambdaGridView<T, F, G>
where
    F: Fn(Point) -> T,
    G: FnMut(Point, T),
{
    pub fn new(width: i32, height: i32, read: F, write: G) -> Result<Self> {
        checked_count(width, height)?;
        Ok(Self {
            width,
            height,
            read,
            write,
            _item: PhantomData,
        })
    }
}

impl<T, F, G> GridView for SettableLambdaGridView<T, F, G>
where
    F: Fn(Point) -> T,
    G: FnMut(Point, T),
{
    type Item = T;

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn get(&self, pos: Point) -> Result<T> {
        self.bounds_check(pos)?;
        Ok((self.read)(pos))
    }
}

impl<T, F, G> SettableGridView for SettableLambdaGridView<T, F, G>
where
    F: Fn(Point) -> T,
    G: FnMut(Point, T),
{
    fn set(&mut self, pos: Point, value: T) -> Result<()> {
        self.bounds_check(pos)?;
        (self.write)(pos, value);
        Ok(())
    }
}
