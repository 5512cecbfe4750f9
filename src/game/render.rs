//! Text rendering of the board.

use std::fmt::Write;

use crate::game::board::{Board, Coord};

/// Number of decimal digits needed to print `x`.
#[must_use]
pub(crate) const fn digits(mut x: u32) -> u32 {
    if x == 0 {
        return 1;
    }
    let mut count = 0;
    while x > 0 {
        count += 1;
        x /= 10;
    }
    count
}

impl Board {
    /// Serialize the board to a padded text grid.
    ///
    /// Rows are printed highest `y` first, each followed by a newline. Every
    /// cell is right-aligned in a field of [`Board::field_width`] columns:
    /// one column when there are at most 9 players, otherwise wide enough
    /// for the largest player number plus one separating space. Free cells
    /// render as `.`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn render(&self) -> String {
        let field = self.field_width() as usize;
        let row_len = self.width() as usize * field + 1;
        let mut out = String::with_capacity(row_len * self.height() as usize);

        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                // Writing into a String cannot fail.
                match self.owner(Coord::new(x, y)) {
                    Some(player) => {
                        let _ = write!(out, "{player:>field$}");
                    }
                    None => {
                        let _ = write!(out, "{:>field$}", '.');
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}
