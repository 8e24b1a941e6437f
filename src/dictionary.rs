use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::CrosswordError;

/// One dictionary record. Dictionaries are loaded into this closed shape;
/// a record missing a key fails the whole load as a parse error.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WordEntry {
    pub word: String,
    pub clue: String,
    pub hint: String,
}

/// Category name to its word list. A `BTreeMap` keeps category listings in
/// a stable order across runs.
pub type Dictionary = BTreeMap<String, Vec<WordEntry>>;

/// Loads a UTF-8 JSON dictionary of shape `{category: [WordEntry, ...]}`.
pub fn load_dictionary(path: &Path) -> Result<Dictionary, CrosswordError> {
    let contents = fs::read_to_string(path)?;
    let dictionary: Dictionary = serde_json::from_str(&contents)?;
    info!("Loaded dictionary with {} categories from {}",
          dictionary.len(), path.display());
    Ok(dictionary)
}
