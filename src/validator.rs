use std::collections::HashSet;

use log::debug;

use crate::alphabet::{is_cyrillic_word, word_length};
use crate::dictionary::WordEntry;
use crate::graph::Graph;
use crate::grid::{Direction, Grid, PlacedWord};

pub const MIN_WORDS: usize = 8;
pub const MIN_WORD_LENGTH: usize = 3;
pub const MAX_WORD_LENGTH: usize = 12;
pub const MIN_FILL_DENSITY: f64 = 0.3;
pub const MAX_FILL_DENSITY: f64 = 0.7;

/// Outcome of a certification pass. All checks run; every failure is
/// collected rather than short-circuiting.
#[derive(Debug)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Certifies a built grid: word-count floor, crossing consistency, global
/// connectivity, fill-density window, duplicate words, minimum length.
pub fn validate_crossword(grid: &Grid) -> ValidationReport {
    let words = grid.placed_words();
    let mut errors = Vec::new();

    if words.len() < MIN_WORDS {
        errors.push(format!("not enough words: {} < {}", words.len(), MIN_WORDS));
    }

    errors.extend(check_intersections(grid));

    if !words_connected(words) {
        errors.push("placed words are not all connected".to_string());
    }

    let density = grid.fill_density();
    if density < MIN_FILL_DENSITY {
        errors.push(format!("fill density too low: {:.2} < {}", density, MIN_FILL_DENSITY));
    }
    if density > MAX_FILL_DENSITY {
        errors.push(format!("fill density too high: {:.2} > {}", density, MAX_FILL_DENSITY));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for placed in words {
        if !seen.insert(&placed.word) {
            errors.push(format!("duplicate word: {}", placed.word));
        }
    }

    for placed in words {
        if placed.len() < MIN_WORD_LENGTH {
            errors.push(format!("word too short: {}", placed.word));
        }
    }

    debug!("Validation finished with {} errors", errors.len());
    ValidationReport { errors }
}

/// Every cell each word claims must lie on the board and hold the expected
/// letter.
fn check_intersections(grid: &Grid) -> Vec<String> {
    let mut errors = Vec::new();
    let (height, width) = (grid.height(), grid.width());

    for placed in grid.placed_words() {
        for (i, expected) in placed.word.chars().enumerate() {
            let (row, col) = placed.cell(i);
            if row >= height || col >= width {
                errors.push(format!("word {} runs off the board", placed.word));
                continue;
            }
            let actual = grid.letter_at(row as isize, col as isize);
            if actual != expected {
                errors.push(format!(
                    "letter mismatch at ({}, {}): expected '{}', found '{}'",
                    row, col, expected, actual));
            }
        }
    }

    errors
}

/// Builds the shared-cell graph over word indices and checks it is one
/// component. Zero or one word is trivially connected.
fn words_connected(words: &[PlacedWord]) -> bool {
    if words.len() <= 1 {
        return true;
    }

    let cell_sets: Vec<HashSet<(usize, usize)>> = words.iter()
        .map(|word| word.cells().into_iter().collect())
        .collect();

    let mut edges = Vec::new();
    for i in 0..words.len() {
        for j in (i + 1)..words.len() {
            if !cell_sets[i].is_disjoint(&cell_sets[j]) {
                edges.push((i, j));
            }
        }
    }

    let mut graph = Graph::new_from_edges(edges);
    for node in 0..words.len() {
        graph.add_node(node);
    }
    graph.is_connected()
}

/// Certifies the final state against the parallel-adjacency rule: no two
/// same-direction words at perpendicular offset 1 with overlapping extents.
pub fn check_no_adjacent_parallel(grid: &Grid) -> bool {
    let words = grid.placed_words();
    for i in 0..words.len() {
        for j in (i + 1)..words.len() {
            if words[i].direction != words[j].direction {
                continue;
            }
            if parallel_adjacent(&words[i], &words[j]) {
                return false;
            }
        }
    }
    true
}

fn parallel_adjacent(first: &PlacedWord, second: &PlacedWord) -> bool {
    let (offset, start_a, len_a, start_b, len_b) = match first.direction {
        Direction::Horizontal => {
            ((first.row as isize - second.row as isize).abs(),
             first.col, first.len(), second.col, second.len())
        },
        Direction::Vertical => {
            ((first.col as isize - second.col as isize).abs(),
             first.row, first.len(), second.row, second.len())
        },
    };
    if offset != 1 {
        return false;
    }
    start_a < start_b + len_b && start_b < start_a + len_a
}

/// Content validation of a dictionary record: word length within bounds and
/// every character Cyrillic after uppercasing.
pub fn validate_word_entry(entry: &WordEntry) -> Vec<String> {
    let mut errors = Vec::new();
    let length = word_length(&entry.word);

    if length < MIN_WORD_LENGTH {
        errors.push(format!("word too short: {}", entry.word));
    }
    if length > MAX_WORD_LENGTH {
        errors.push(format!("word too long: {}", entry.word));
    }
    if !is_cyrillic_word(&entry.word) {
        errors.push(format!("word contains invalid characters: {}", entry.word));
    }

    errors
}

/// Summary counters for a built puzzle, used by the batch driver's report.
#[derive(Debug)]
pub struct PuzzleStatistics {
    pub word_count: usize,
    pub horizontal_count: usize,
    pub vertical_count: usize,
    pub grid_height: usize,
    pub grid_width: usize,
    pub fill_density: f64,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub avg_word_length: f64,
}

pub fn puzzle_statistics(grid: &Grid) -> PuzzleStatistics {
    let words = grid.placed_words();
    let horizontal_count = words.iter()
        .filter(|word| word.direction == Direction::Horizontal)
        .count();
    let lengths: Vec<usize> = words.iter().map(|word| word.len()).collect();
    let avg_word_length = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };

    PuzzleStatistics {
        word_count: words.len(),
        horizontal_count,
        vertical_count: words.len() - horizontal_count,
        grid_height: grid.height(),
        grid_width: grid.width(),
        fill_density: grid.fill_density(),
        min_word_length: lengths.iter().min().copied().unwrap_or(0),
        max_word_length: lengths.iter().max().copied().unwrap_or(0),
        avg_word_length,
    }
}
