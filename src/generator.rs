use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::alphabet::{filter_words_by_length, rank_words, word_length};
use crate::dictionary::{load_dictionary, Dictionary, WordEntry};
use crate::error::CrosswordError;
use crate::grid::Grid;
use crate::placer::Placer;
use crate::validator;
use crate::validator::ValidationReport;

pub const DEFAULT_GRID_SIZE: usize = 10;
pub const MIN_GRID_SIZE: usize = 6;
pub const MAX_REGENERATION_ATTEMPTS: usize = 10;

/// A category is usable for generation once it holds this many entries.
pub const MIN_CATEGORY_WORDS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Unknown names resolve to `Medium`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY_PROFILE,
            Difficulty::Medium => &MEDIUM_PROFILE,
            Difficulty::Hard => &HARD_PROFILE,
        }
    }
}

/// Generation settings per difficulty. The `common_words_only` and
/// `obscure_words` flags are reserved: serialized, never consulted.
#[derive(Clone, Debug, Serialize)]
pub struct DifficultyProfile {
    pub word_count: (usize, usize),
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub common_words_only: bool,
    pub obscure_words: bool,
}

pub static EASY_PROFILE: DifficultyProfile = DifficultyProfile {
    word_count: (8, 10),
    min_word_length: 4,
    max_word_length: 8,
    common_words_only: true,
    obscure_words: false,
};

pub static MEDIUM_PROFILE: DifficultyProfile = DifficultyProfile {
    word_count: (10, 12),
    min_word_length: 3,
    max_word_length: 10,
    common_words_only: false,
    obscure_words: false,
};

pub static HARD_PROFILE: DifficultyProfile = DifficultyProfile {
    word_count: (12, 15),
    min_word_length: 3,
    max_word_length: 12,
    common_words_only: false,
    obscure_words: true,
};

/// A finished puzzle in its external JSON shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: Vec<Vec<String>>,
    pub words: Vec<PlacedWordOut>,
    pub difficulty: String,
    pub category: String,
    pub metadata: PuzzleMetadata,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedWordOut {
    pub word: String,
    pub clue: String,
    pub hint: String,
    #[serde(rename = "startRow")]
    pub start_row: usize,
    #[serde(rename = "startCol")]
    pub start_col: usize,
    pub direction: String,
    pub length: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleMetadata {
    pub word_count: usize,
    pub grid_size: [usize; 2],
    pub fill_density: f64,
}

#[derive(Debug, Default)]
struct GenerationStats {
    total_generated: usize,
    successful: usize,
    failed: usize,
    total_time: Duration,
}

#[derive(Clone, Debug, Serialize)]
pub struct GenerationSummary {
    pub total_generated: usize,
    pub successful: usize,
    pub failed: usize,
    pub success_rate: f64,
    pub avg_generation_time: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryStats {
    pub total_words: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub avg_length: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub name: String,
    pub word_count: usize,
    pub available: bool,
}

/// Crossword generator over a loaded dictionary. Owns its statistics; not
/// internally synchronized, so a shared instance needs a lock around it.
pub struct CrosswordGenerator {
    dictionary: Dictionary,
    stats: GenerationStats,
}

impl CrosswordGenerator {
    pub fn new(dictionary: Dictionary) -> Self {
        CrosswordGenerator {
            dictionary,
            stats: GenerationStats::default(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CrosswordError> {
        Ok(CrosswordGenerator::new(load_dictionary(path)?))
    }

    /// Generates one puzzle. `Ok(None)` means all regeneration attempts
    /// failed, which is a normal outcome for a thin corpus. A seed makes
    /// the whole call deterministic; `excluded_words` holds uppercase words
    /// to leave out of the candidate pool.
    pub fn generate(&mut self,
                    category: &str,
                    difficulty: &str,
                    seed: Option<u64>,
                    excluded_words: Option<&HashSet<String>>) -> Result<Option<Puzzle>, CrosswordError> {
        let start = Instant::now();
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let difficulty = Difficulty::from_name(difficulty);
        let profile = difficulty.profile();

        let entries = self.dictionary.get(category)
            .ok_or_else(|| CrosswordError::UnknownCategory(category.to_string()))?;

        let mut candidates: Vec<&WordEntry> = entries.iter().collect();
        if let Some(excluded) = excluded_words {
            candidates.retain(|entry| !excluded.contains(&entry.word.to_uppercase()));
        }
        let mut candidates = filter_words_by_length(candidates,
                                                    profile.min_word_length,
                                                    profile.max_word_length);
        if candidates.len() < profile.word_count.0 {
            return Err(CrosswordError::InsufficientWords {
                category: category.to_string(),
                available: candidates.len(),
                required: profile.word_count.0,
            });
        }
        rank_words(&mut candidates);

        let (low, high) = profile.word_count;
        let target_count = rng.gen_range(low, high + 1);
        debug!("Generating for '{}' ({}, target {})", category, difficulty.name(), target_count);

        let mut result = None;
        for attempt in 0..MAX_REGENERATION_ATTEMPTS {
            if let Some(mut puzzle) = Self::generate_single(&candidates, target_count, &mut rng) {
                puzzle.difficulty = difficulty.name().to_string();
                puzzle.category = category.to_string();
                info!("Generated puzzle for '{}' on attempt {}", category, attempt + 1);
                result = Some(puzzle);
                break;
            }
            candidates.shuffle(&mut rng);
        }

        self.stats.total_generated += 1;
        self.stats.total_time += start.elapsed();
        match result {
            Some(_) => self.stats.successful += 1,
            None => self.stats.failed += 1,
        }

        Ok(result)
    }

    /// One independent attempt: fresh grid, fresh placer, fresh used-set.
    fn generate_single(words: &[&WordEntry], target_count: usize, rng: &mut StdRng) -> Option<Puzzle> {
        let mut placer = Placer::new(Grid::new(DEFAULT_GRID_SIZE), words.to_vec());

        if !placer.place_initial_word(rng) {
            return None;
        }
        let placed_count = placer.place_remaining_words(target_count, rng);
        if placed_count < validator::MIN_WORDS {
            debug!("Only {} words placed, discarding attempt", placed_count);
            return None;
        }

        let mut grid = placer.into_grid();
        let (height, width) = grid.crop_empty_edges();
        if height < MIN_GRID_SIZE || width < MIN_GRID_SIZE {
            debug!("Cropped grid {}x{} below minimum size", height, width);
            return None;
        }

        let report = validator::validate_crossword(&grid);
        if !report.is_valid() {
            debug!("Validation rejected attempt: {:?}", report.errors);
            return None;
        }

        Some(Self::format_result(&grid))
    }

    fn format_result(grid: &Grid) -> Puzzle {
        let words = grid.placed_words()
            .iter()
            .map(|placed| PlacedWordOut {
                word: placed.word.clone(),
                clue: placed.clue.clone(),
                hint: placed.hint.clone(),
                start_row: placed.row,
                start_col: placed.col,
                direction: placed.direction.as_str().to_string(),
                length: placed.len(),
            })
            .collect();

        Puzzle {
            grid: grid.to_rows(),
            words,
            difficulty: String::new(),
            category: String::new(),
            metadata: PuzzleMetadata {
                word_count: grid.count_placed_words(),
                grid_size: [grid.height(), grid.width()],
                fill_density: (grid.fill_density() * 100.0).round() / 100.0,
            },
        }
    }

    /// Generates up to `count` puzzles, skipping failed attempts.
    pub fn generate_batch(&mut self,
                          category: &str,
                          count: usize,
                          difficulty: &str) -> Result<Vec<Puzzle>, CrosswordError> {
        let mut puzzles = Vec::new();
        for _ in 0..count {
            if let Some(puzzle) = self.generate(category, difficulty, None, None)? {
                puzzles.push(puzzle);
            }
        }
        Ok(puzzles)
    }

    pub fn get_available_categories(&self) -> Vec<String> {
        self.dictionary.keys().cloned().collect()
    }

    pub fn get_category_stats(&self, category: &str) -> Option<CategoryStats> {
        let words = self.dictionary.get(category)?;
        let lengths: Vec<usize> = words.iter().map(|entry| word_length(&entry.word)).collect();
        Some(CategoryStats {
            total_words: words.len(),
            min_length: lengths.iter().min().copied().unwrap_or(0),
            max_length: lengths.iter().max().copied().unwrap_or(0),
            avg_length: if lengths.is_empty() {
                0.0
            } else {
                lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
            },
        })
    }

    pub fn get_generation_stats(&self) -> GenerationSummary {
        let total = self.stats.total_generated;
        GenerationSummary {
            total_generated: total,
            successful: self.stats.successful,
            failed: self.stats.failed,
            success_rate: if total > 0 {
                self.stats.successful as f64 / total as f64
            } else {
                0.0
            },
            avg_generation_time: if total > 0 {
                self.stats.total_time.as_secs_f64() / total as f64
            } else {
                0.0
            },
        }
    }

    /// Checks every entry of every category, and flags categories too small
    /// to be usable.
    pub fn validate_dictionary(&self) -> ValidationReport {
        let mut errors = Vec::new();

        for (category, words) in &self.dictionary {
            if words.len() < MIN_CATEGORY_WORDS {
                errors.push(format!("category '{}': too few words ({} < {})",
                                    category, words.len(), MIN_CATEGORY_WORDS));
            }
            for (index, entry) in words.iter().enumerate() {
                for error in validator::validate_word_entry(entry) {
                    errors.push(format!("category '{}', word #{}: {}", category, index, error));
                }
            }
        }

        ValidationReport { errors }
    }

    pub fn get_total_word_count(&self) -> usize {
        self.dictionary.values().map(|words| words.len()).sum()
    }

    pub fn get_categories_info(&self) -> Vec<CategoryInfo> {
        self.dictionary.iter()
            .map(|(name, words)| CategoryInfo {
                name: name.clone(),
                word_count: words.len(),
                available: words.len() >= MIN_CATEGORY_WORDS,
            })
            .collect()
    }
}
