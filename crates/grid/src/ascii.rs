//! ASCII round-trip helpers for boolean grids, used by tests and demos.

use crate::error::{GridError, Result};
use crate::point::Point;
use crate::view::{BitGridView, GridView, SettableGridView};

/// Parses a walkability grid from an ASCII diagram. Characters in
/// `floor_chars` become `true`; everything else is a wall. Rows must all
/// have the same length.
pub fn parse_bit_grid(text: &str, floor_chars: &str) -> Result<BitGridView> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let height = rows.len() as i32;
    let width = rows.first().map_or(0, |row| row.chars().count()) as i32;
    if rows
        .iter()
        .any(|row| row.chars().count() as i32 != width)
    {
        return Err(GridError::InvalidParameter {
            what: "grid rows must all have the same length".into(),
        });
    }

    let mut grid = BitGridView::new(width, height)?;
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if floor_chars.contains(ch) {
                grid.set(Point::new(x as i32, y as i32), true)?;
            }
        }
    }
    Ok(grid)
}

/// Renders a boolean grid as `.` for `true` and `#` for `false`, one row
/// per line.
pub fn render_bit_grid<V: GridView<Item = bool>>(view: &V) -> String {
    let mut out = String::with_capacity(view.count() + view.height() as usize);
    for y in 0..view.height() {
        for x in 0..view.width() {
            let floor = view.get_xy(x, y).unwrap_or(false);
            out.push(if floor { '.' } else { '#' });
        }
        out.push('\n');
    }
    out
}
