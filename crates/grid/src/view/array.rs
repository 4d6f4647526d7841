use crate::error::{GridError, Result};
use crate::point::Point;
use crate::view::{checked_count, GridView, SettableGridView};

/// Dense grid view owning a linear `Vec` of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayView<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T> ArrayView<T> {
    pub fn new(width: i32, height: i32) -> Result<Self>
    where
        T: Default + Clone,
    {
        Self::filled(width, height, T::default())
    }

    pub fn filled(width: i32, height: i32, value: T) -> Result<Self>
    where
        T: Clone,
    {
        let count = checked_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![value; count],
        })
    }

    /// Wraps an existing row-major buffer; the length must be a whole
    /// number of rows of `width`.
    pub fn from_vec(cells: Vec<T>, width: i32) -> Result<Self> {
        if width <= 0 {
            return Err(GridError::InvalidDimensions { width, height: 0 });
        }
        if cells.len() % (width as usize) != 0 {
            return Err(GridError::InvalidParameter {
                what: format!(
                    "buffer of {} cells is not a whole number of rows of width {width}",
                    cells.len()
                ),
            });
        }
        let height = (cells.len() / width as usize) as i32;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a view by evaluating `f` once per position, row-major.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Result<Self> {
        let count = checked_count(width, height)?;
        let cells = (0..count).map(|i| f(Point::from_index(i, width))).collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// The backing cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl<T: Clone> GridView for ArrayView<T> {
    type Item = T;

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn get(&self, pos: Point) -> Result<T> {
        self.bounds_check(pos)?;
        Ok(self.cells[pos.to_index(self.width)].clone())
    }
}

impl<T: Clone> SettableGridView for ArrayView<T> {
    fn set(&mut self, pos: Point, value: T) -> Result<()> {
        self.bounds_check(pos)?;
        self.cells[pos.to_index(self.width)] = value;
        Ok(())
    }

    fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}
