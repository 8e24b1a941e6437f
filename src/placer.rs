use std::cmp;
use std::collections::HashSet;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::alphabet::word_length;
use crate::dictionary::WordEntry;
use crate::grid::{CandidatePosition, Direction, Grid};

/// Upper bound on consecutive failed placements before the main loop gives
/// up on the current attempt.
pub const MAX_TOTAL_ATTEMPTS: usize = 1000;

/// Number of longest words the initial pick draws from.
const INITIAL_CANDIDATES: usize = 5;

/// Number of top-scored positions the per-word pick draws from.
const TOP_POSITIONS: usize = 3;

/// Builds one puzzle attempt onto a grid it owns exclusively. All random
/// choices draw from the caller's explicitly threaded RNG stream.
pub struct Placer<'w> {
    grid: Grid,
    word_list: Vec<&'w WordEntry>,
    used: HashSet<String>,
}

impl<'w> Placer<'w> {
    pub fn new(grid: Grid, word_list: Vec<&'w WordEntry>) -> Self {
        Placer {
            grid,
            word_list,
            used: HashSet::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn used_words(&self) -> &HashSet<String> {
        &self.used
    }

    /// Seeds the grid: one of the five longest words, horizontal, centered.
    /// Fails if the list is empty or the chosen word does not fit the side.
    pub fn place_initial_word(&mut self, rng: &mut StdRng) -> bool {
        if self.word_list.is_empty() {
            return false;
        }

        let mut longest: Vec<&WordEntry> = self.word_list.clone();
        longest.sort_by_key(|entry| cmp::Reverse(word_length(&entry.word)));
        let candidates = &longest[..cmp::min(INITIAL_CANDIDATES, longest.len())];
        let entry = *candidates.choose(rng).unwrap();

        let word = entry.word.to_uppercase();
        let length = word_length(&word) as isize;
        let size = self.grid.size() as isize;

        let row = size / 2;
        let col = cmp::max((size - length) / 2, 0);
        if col + length > size {
            debug!("Initial word {} does not fit side {}", word, size);
            return false;
        }

        let success = self.grid.place_word(&word, &entry.clue, &entry.hint,
                                           row as usize, col as usize,
                                           Direction::Horizontal);
        if success {
            self.used.insert(word);
        }
        success
    }

    /// Walks the ranked list, committing each word at its best intersecting
    /// position, until the target count is reached, the list runs out, or
    /// the attempt ceiling is hit. Returns the total placed count.
    pub fn place_remaining_words(&mut self, target_count: usize, rng: &mut StdRng) -> usize {
        let mut attempts = 0;
        let mut word_index = 0;

        while self.grid.count_placed_words() < target_count
            && attempts < MAX_TOTAL_ATTEMPTS
            && word_index < self.word_list.len()
        {
            let entry = self.word_list[word_index];
            let word = entry.word.to_uppercase();

            if self.used.contains(&word) {
                word_index += 1;
                continue;
            }

            match self.find_best_position(&word, rng) {
                Some(position) => {
                    let success = self.grid.place_word(&word,
                                                       &entry.clue,
                                                       &entry.hint,
                                                       position.row as usize,
                                                       position.col as usize,
                                                       position.direction);
                    if success {
                        self.used.insert(word);
                        word_index += 1;
                        attempts = 0;
                    } else {
                        attempts += 1;
                    }
                },
                None => {
                    word_index += 1;
                    attempts += 1;
                },
            }
        }

        self.grid.count_placed_words()
    }

    /// Scores every intersecting position by `10·crossings − distance to
    /// the grid center` and picks uniformly among the top three.
    fn find_best_position(&self, word: &str, rng: &mut StdRng) -> Option<CandidatePosition> {
        let mut positions = self.grid.intersections(word);
        if positions.is_empty() {
            return None;
        }

        let center = (self.grid.size() / 2) as isize;
        positions.sort_by_key(|position| {
            let distance = (position.row - center).abs() + (position.col - center).abs();
            cmp::Reverse(10 * position.crossings as isize - distance)
        });

        let top = &positions[..cmp::min(TOP_POSITIONS, positions.len())];
        top.choose(rng).copied()
    }

    /// `(horizontal, vertical)` counts of the committed words.
    pub fn direction_balance(&self) -> (usize, usize) {
        let horizontal = self.grid.placed_words()
            .iter()
            .filter(|placed| placed.direction == Direction::Horizontal)
            .count();
        (horizontal, self.grid.count_placed_words() - horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn entry(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            clue: format!("подсказка к {}", word),
            hint: String::new(),
        }
    }

    #[test]
    fn initial_word_is_horizontal_and_centered() {
        let entries = vec![entry("МОЛЕКУЛА"), entry("АТОМ"), entry("ТОК")];
        let refs: Vec<&WordEntry> = entries.iter().collect();
        let mut placer = Placer::new(Grid::new(10), refs);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(placer.place_initial_word(&mut rng));
        let placed = &placer.grid().placed_words()[0];
        assert_eq!(placed.direction, Direction::Horizontal);
        assert_eq!(placed.row, 5);
        assert!(placer.used_words().contains(&placed.word));
    }

    #[test]
    fn initial_word_fails_when_nothing_fits() {
        let entries = vec![entry("ЭЛЕКТРИЧЕСТВО")];
        let refs: Vec<&WordEntry> = entries.iter().collect();
        let mut placer = Placer::new(Grid::new(10), refs);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(!placer.place_initial_word(&mut rng));
        assert_eq!(placer.grid().count_placed_words(), 0);
    }

    #[test]
    fn initial_word_fails_on_empty_list() {
        let mut placer = Placer::new(Grid::new(10), vec![]);
        let mut rng = StdRng::seed_from_u64(42);
        assert!(!placer.place_initial_word(&mut rng));
    }

    #[test]
    fn remaining_words_cross_the_seed_word() {
        let entries = vec![entry("КАРТИНА"), entry("РОСА"), entry("ТОК"), entry("НОРА")];
        let refs: Vec<&WordEntry> = entries.iter().collect();
        let mut placer = Placer::new(Grid::new(10), refs);
        let mut rng = StdRng::seed_from_u64(7);

        assert!(placer.place_initial_word(&mut rng));
        let placed = placer.place_remaining_words(4, &mut rng);
        assert!(placed >= 2);
        assert_eq!(placed, placer.grid().count_placed_words());

        // Every non-seed word was committed through an intersection, so no
        // word is an island.
        let words = placer.grid().placed_words();
        for first in words {
            if words.len() > 1 {
                let crosses_other = words.iter().any(|second| {
                    second.word != first.word
                        && second.cells().iter().any(|cell| first.cells().contains(cell))
                });
                assert!(crosses_other, "{} has no crossing", first.word);
            }
        }
    }

    #[test]
    fn used_words_are_not_placed_twice() {
        let entries = vec![entry("КАРТИНА"), entry("КАРТИНА"), entry("РОСА")];
        let refs: Vec<&WordEntry> = entries.iter().collect();
        let mut placer = Placer::new(Grid::new(10), refs);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(placer.place_initial_word(&mut rng));
        placer.place_remaining_words(3, &mut rng);

        let words: Vec<&str> = placer.grid().placed_words().iter().map(|p| p.word.as_str()).collect();
        let unique: HashSet<&str> = words.iter().copied().collect();
        assert_eq!(words.len(), unique.len());
    }

    #[test]
    fn direction_balance_counts_both_axes() {
        let entries = vec![entry("КАРТИНА"), entry("РОСА"), entry("ТОК")];
        let refs: Vec<&WordEntry> = entries.iter().collect();
        let mut placer = Placer::new(Grid::new(10), refs);
        let mut rng = StdRng::seed_from_u64(7);

        assert!(placer.place_initial_word(&mut rng));
        placer.place_remaining_words(3, &mut rng);

        let (horizontal, vertical) = placer.direction_balance();
        assert_eq!(horizontal + vertical, placer.grid().count_placed_words());
        assert!(horizontal >= 1);
    }
}
