use super::{Direction, Grid};

/// A legal, intersecting placement of a candidate word: origin, direction
/// and the number of cells where the word crosses letters already present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidatePosition {
    pub row: isize,
    pub col: isize,
    pub direction: Direction,
    pub crossings: usize,
}

impl Grid {
    /// Enumerates every legal placement of `word` that crosses a committed
    /// word. Each letter of the candidate is paired with each equal letter
    /// of each committed word; the candidate then runs perpendicular to it,
    /// anchored so the matching letters share a cell. Placements failing
    /// `can_place` are discarded, so every returned position has at least
    /// one crossing.
    pub fn intersections(&self, word: &str) -> Vec<CandidatePosition> {
        let word = word.to_uppercase();
        let letters: Vec<char> = word.chars().collect();
        let mut positions = Vec::new();

        for placed in self.placed_words() {
            let placed_letters: Vec<char> = placed.word.chars().collect();
            for (i, &placed_letter) in placed_letters.iter().enumerate() {
                for (j, &letter) in letters.iter().enumerate() {
                    if placed_letter != letter {
                        continue;
                    }
                    let direction = placed.direction.rotate();
                    let (row, col) = match placed.direction {
                        Direction::Horizontal => {
                            (placed.row as isize - j as isize, placed.col as isize + i as isize)
                        },
                        Direction::Vertical => {
                            (placed.row as isize + i as isize, placed.col as isize - j as isize)
                        },
                    };
                    if self.can_place(&word, row, col, direction) {
                        let crossings = self.count_crossings(&letters, row, col, direction);
                        positions.push(CandidatePosition { row, col, direction, crossings });
                    }
                }
            }
        }

        positions
    }

    fn count_crossings(&self, letters: &[char], row: isize, col: isize, direction: Direction) -> usize {
        letters.iter()
            .enumerate()
            .filter(|(i, &letter)| {
                let (cell_row, cell_col) = direction.advance(row, col, *i as isize);
                self.letter_at(cell_row, cell_col) == letter
            })
            .count()
    }
}
