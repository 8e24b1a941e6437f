use log::debug;

use super::{Direction, Grid, PlacedWord, EMPTY};

impl Grid {
    /// Placement predicate. True iff the word fits the board, agrees with
    /// every letter already present, has empty end-caps, and touches other
    /// words sideways only where a perpendicular word crosses it.
    pub fn can_place(&self, word: &str, row: isize, col: isize, direction: Direction) -> bool {
        let word = word.to_uppercase();
        let letters: Vec<char> = word.chars().collect();
        let length = letters.len() as isize;

        if row < 0 || col < 0 {
            return false;
        }
        match direction {
            Direction::Horizontal => {
                if col + length > self.width() as isize || row >= self.height() as isize {
                    return false;
                }
            },
            Direction::Vertical => {
                if row + length > self.height() as isize || col >= self.width() as isize {
                    return false;
                }
            },
        }

        for (i, &letter) in letters.iter().enumerate() {
            let (cell_row, cell_col) = direction.advance(row, col, i as isize);
            let current = self.letter_at(cell_row, cell_col);

            if current != EMPTY && current != letter {
                return false;
            }

            // A cell this word would newly write must not butt against a
            // parallel neighbour; sideways contact is only legal where an
            // existing perpendicular word runs through the cell itself.
            if current == EMPTY && !self.side_contact_allowed(cell_row, cell_col, direction) {
                return false;
            }
        }

        let (before_row, before_col) = direction.advance(row, col, -1);
        if self.letter_at(before_row, before_col) != EMPTY {
            return false;
        }
        let (after_row, after_col) = direction.advance(row, col, length);
        if self.letter_at(after_row, after_col) != EMPTY {
            return false;
        }

        true
    }

    fn side_contact_allowed(&self, row: isize, col: isize, direction: Direction) -> bool {
        let (first, second) = match direction {
            Direction::Horizontal => ((row - 1, col), (row + 1, col)),
            Direction::Vertical => ((row, col - 1), (row, col + 1)),
        };
        if self.letter_at(first.0, first.1) == EMPTY && self.letter_at(second.0, second.1) == EMPTY {
            return true;
        }
        self.has_word_through(row, col, direction.rotate())
    }

    /// True iff a committed word of `direction` runs through `(row, col)`.
    fn has_word_through(&self, row: isize, col: isize, direction: Direction) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        self.placed_words()
            .iter()
            .any(|placed| placed.direction == direction && placed.covers(row, col))
    }

    /// Commits a placement. Mutates the board iff `can_place` holds for the
    /// same arguments.
    pub fn place_word(&mut self,
                      word: &str,
                      clue: &str,
                      hint: &str,
                      row: usize,
                      col: usize,
                      direction: Direction) -> bool {
        let word = word.to_uppercase();

        if !self.can_place(&word, row as isize, col as isize, direction) {
            debug!("Rejected placement of {} at ({}, {}) {:?}", word, row, col, direction);
            return false;
        }

        for (i, letter) in word.chars().enumerate() {
            let (cell_row, cell_col) = direction.advance(row as isize, col as isize, i as isize);
            self.set_letter(cell_row as usize, cell_col as usize, letter);
        }

        debug!("Placed {} at ({}, {}) {:?}", word, row, col, direction);
        self.placed.push(PlacedWord {
            word,
            clue: clue.to_string(),
            hint: hint.to_string(),
            row,
            col,
            direction,
        });
        true
    }
}
