use std::cmp;

use log::debug;
use ndarray::s;

use super::{Grid, EMPTY};

impl Grid {
    /// Shrinks the board to the minimal bounding rectangle of its letters
    /// and rewrites the placed words' origins accordingly. Returns the new
    /// `(height, width)`; an all-empty board is left alone and reported as
    /// `(0, 0)`. Cropping an already-cropped grid is a no-op.
    pub fn crop_empty_edges(&mut self) -> (usize, usize) {
        let mut min_row = self.height();
        let mut max_row = 0;
        let mut min_col = self.width();
        let mut max_col = 0;

        for row in 0..self.height() {
            for col in 0..self.width() {
                if self.cells[[row, col]] != EMPTY {
                    min_row = cmp::min(min_row, row);
                    max_row = cmp::max(max_row, row);
                    min_col = cmp::min(min_col, col);
                    max_col = cmp::max(max_col, col);
                }
            }
        }

        if min_row > max_row {
            return (0, 0);
        }

        let cropped = self.cells.slice(s![min_row..=max_row, min_col..=max_col]).to_owned();
        for placed in self.placed.iter_mut() {
            placed.row -= min_row;
            placed.col -= min_col;
        }
        self.cells = cropped;

        let (height, width) = (self.height(), self.width());
        self.size = cmp::max(height, width);
        debug!("Cropped grid to {}x{}", height, width);
        (height, width)
    }

    pub fn count_filled_cells(&self) -> usize {
        self.cells.iter().filter(|&&letter| letter != EMPTY).count()
    }

    /// Filled share of the current extent; 0.0 for an empty board.
    pub fn fill_density(&self) -> f64 {
        let total = self.cells.len();
        if total == 0 {
            return 0.0;
        }
        self.count_filled_cells() as f64 / total as f64
    }
}
