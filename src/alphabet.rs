use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::dictionary::WordEntry;

/// Russian letters ordered by corpus frequency. Only the first
/// `COMMON_LETTER_COUNT` entries contribute to the word score.
pub static FREQUENCY_ORDERED_LETTERS: &str = "ОЕАИНТСРВЛКМДПУЯЫЬГЗБЧЙХЖШЮЦЩЭФЪЁ";

const COMMON_LETTER_COUNT: usize = 15;

lazy_static! {
    static ref COMMON_LETTERS: HashSet<char> = FREQUENCY_ORDERED_LETTERS
        .chars()
        .take(COMMON_LETTER_COUNT)
        .collect();
    static ref CYRILLIC_WORD: Regex = Regex::new(r"^[А-ЯЁ]+$").unwrap();
}

/// Word length in characters, not bytes. Cyrillic letters are two bytes in
/// UTF-8, so `str::len` would be wrong everywhere a length bound applies.
pub fn word_length(word: &str) -> usize {
    word.chars().count()
}

/// Uppercases and strips spaces and hyphens.
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .to_uppercase()
        .replace(|c: char| c == ' ' || c == '-', "")
}

/// True iff every character of the uppercased word is in А-Я or is Ё.
pub fn is_cyrillic_word(word: &str) -> bool {
    CYRILLIC_WORD.is_match(&word.to_uppercase())
}

/// Placement priority of a word: longer words and words rich in frequent
/// letters give the placer more crossing opportunities.
pub fn word_score(word: &str) -> usize {
    let upper = word.to_uppercase();
    let length_score = word_length(&upper) * 10;
    let common_score = upper.chars().filter(|c| COMMON_LETTERS.contains(c)).count() * 5;
    length_score + common_score
}

/// Keeps entries whose word length lies within `[min_length, max_length]`.
pub fn filter_words_by_length<'a>(words: Vec<&'a WordEntry>,
                                  min_length: usize,
                                  max_length: usize) -> Vec<&'a WordEntry> {
    words.into_iter()
        .filter(|entry| {
            let length = word_length(&entry.word);
            length >= min_length && length <= max_length
        })
        .collect()
}

/// Stable descending sort by score; ties keep input order.
pub fn rank_words(words: &mut Vec<&WordEntry>) {
    words.sort_by_key(|entry| std::cmp::Reverse(word_score(&entry.word)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entry(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            clue: String::new(),
            hint: String::new(),
        }
    }

    #[rstest(word, expected,
        case("АТОМ", 60),
        case("атом", 60),
        case("ЩЩЩ", 30),
        case("ОСА", 45),
    )]
    fn score_counts_length_and_common_letters(word: &str, expected: usize) {
        // АТОМ: 4 letters, А/Т/О/М all in the top 15 -> 40 + 20
        // ЩЩЩ: 3 letters, none common -> 30
        // ОСА: 3 letters, all common -> 30 + 15
        assert_eq!(word_score(word), expected);
    }

    #[rstest(word, valid,
        case("АТОМ", true),
        case("ёжик", true),
        case("АТОМ1", false),
        case("ATOM", false),
        case("", false),
    )]
    fn cyrillic_check(word: &str, valid: bool) {
        assert_eq!(is_cyrillic_word(word), valid);
    }

    #[test]
    fn normalize_strips_and_uppercases() {
        assert_eq!(normalize_word("  чёрно-белый "), "ЧЁРНОБЕЛЫЙ");
    }

    #[test]
    fn length_filter_uses_character_count() {
        let entries = vec![entry("ДОМ"), entry("МОЛЕКУЛА"), entry("ЭЛЕКТРИЧЕСТВО")];
        let refs: Vec<&WordEntry> = entries.iter().collect();
        let filtered = filter_words_by_length(refs, 3, 10);
        let words: Vec<&str> = filtered.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["ДОМ", "МОЛЕКУЛА"]);
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let entries = vec![entry("РОСА"), entry("ОСЕНЬ"), entry("АРКА")];
        let mut refs: Vec<&WordEntry> = entries.iter().collect();
        rank_words(&mut refs);
        // РОСА and АРКА score equally (4 letters, 4 common); РОСА stays first.
        let words: Vec<&str> = refs.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["ОСЕНЬ", "РОСА", "АРКА"]);
    }
}
