use bitvec::vec::BitVec;

use crate::error::Result;
use crate::point::Point;
use crate::view::{checked_count, GridView, SettableGridView};

/// Boolean grid view backed by a bit array, one bit per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BitGridView {
    width: i32,
    height: i32,
    bits: BitVec,
}

impl BitGridView {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::filled(width, height, false)
    }

    pub fn filled(width: i32, height: i32, value: bool) -> Result<Self> {
        let count = checked_count(width, height)?;
        Ok(Self {
            width,
            height,
            bits: BitVec::repeat(value, count),
        })
    }

    /// Number of `true` cells.
    pub fn count_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Positions of all `true` cells, row-major.
    pub fn set_positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.bits
            .iter_ones()
            .map(|index| Point::from_index(index, self.width))
    }
}

impl GridView for BitGridView {
    type Item = bool;

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn get(&self, pos: Point) -> Result<bool> {
        self.bounds_check(pos)?;
        Ok(self.bits[pos.to_index(self.width)])
    }
}

impl SettableGridView for BitGridView {
    fn set(&mut self, pos: Point, value: bool) -> Result<()> {
        self.bounds_check(pos)?;
        self.bits.set(pos.to_index(self.width), value);
        Ok(())
    }

    fn fill(&mut self, value: bool) {
        self.bits.fill(value);
    }
}
