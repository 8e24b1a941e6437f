use serde_json::{json, Value};

use crate::generator::Puzzle;

/// Deterministic 16-hex-digit puzzle ID: MD5 over the canonical JSON form
/// of the grid and word positions, truncated to the first 8 bytes. The
/// canonical form must match Python's
/// `json.dumps(content, sort_keys=True, ensure_ascii=False)` byte-for-byte
/// so that IDs agree across implementations.
pub fn puzzle_fingerprint(puzzle: &Puzzle) -> String {
    let words: Vec<Value> = puzzle.words.iter()
        .map(|word| json!({
            "word": word.word,
            "startRow": word.start_row,
            "startCol": word.start_col,
            "direction": word.direction,
        }))
        .collect();
    let content = json!({
        "grid": puzzle.grid,
        "words": words,
    });

    let canonical = canonical_json(&content);
    let digest = md5::compute(canonical.as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

/// Canonical serialization: object keys sorted lexicographically, `", "`
/// between items, `": "` after keys, non-ASCII characters preserved
/// literally.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::String(string) => write_string(string, out),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_value(item, out);
            }
            out.push(']');
        },
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (index, key) in keys.into_iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_string(key, out);
                out.push_str(": ");
                write_value(&map[key], out);
            }
            out.push('}');
        },
    }
}

fn write_string(string: &str, out: &mut String) {
    out.push('"');
    for c in string.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            },
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{PlacedWordOut, Puzzle, PuzzleMetadata};

    fn puzzle(grid: Vec<Vec<&str>>, words: Vec<(&str, usize, usize, &str)>) -> Puzzle {
        let height = grid.len();
        let width = grid.first().map(|row| row.len()).unwrap_or(0);
        Puzzle {
            grid: grid.into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
            words: words.into_iter()
                .map(|(word, row, col, direction)| PlacedWordOut {
                    word: word.to_string(),
                    clue: "определение".to_string(),
                    hint: "намёк".to_string(),
                    start_row: row,
                    start_col: col,
                    direction: direction.to_string(),
                    length: word.chars().count(),
                })
                .collect(),
            difficulty: "medium".to_string(),
            category: "Наука".to_string(),
            metadata: PuzzleMetadata {
                word_count: 1,
                grid_size: [height, width],
                fill_density: 0.5,
            },
        }
    }

    #[test]
    fn canonical_form_matches_python_dumps() {
        let sample = puzzle(vec![vec!["Т", "Е", "С", "Т"]],
                            vec![("ТЕСТ", 0, 0, "horizontal")]);
        let words: Vec<Value> = sample.words.iter()
            .map(|word| json!({
                "word": word.word,
                "startRow": word.start_row,
                "startCol": word.start_col,
                "direction": word.direction,
            }))
            .collect();
        let content = json!({"grid": sample.grid, "words": words});

        assert_eq!(
            canonical_json(&content),
            r#"{"grid": [["Т", "Е", "С", "Т"]], "words": [{"direction": "horizontal", "startCol": 0, "startRow": 0, "word": "ТЕСТ"}]}"#
        );
    }

    #[test]
    fn reference_fingerprints() {
        // Expected values pinned against CPython's hashlib/json output.
        let horizontal = puzzle(vec![vec!["Т", "Е", "С", "Т"]],
                                vec![("ТЕСТ", 0, 0, "horizontal")]);
        assert_eq!(puzzle_fingerprint(&horizontal), "24ec564f5a2edd51");

        let crossed = puzzle(
            vec![
                vec!["А", "Т", "О", "М"],
                vec!["", "Е", "", ""],
                vec!["", "С", "", ""],
                vec!["", "Т", "", ""],
            ],
            vec![("АТОМ", 0, 0, "horizontal"), ("ТЕСТ", 0, 1, "vertical")],
        );
        assert_eq!(puzzle_fingerprint(&crossed), "be4cabfe144bcb44");
    }

    #[test]
    fn fingerprint_is_sixteen_lowercase_hex_digits() {
        let sample = puzzle(vec![vec!["Т", "Е", "С", "Т"]],
                            vec![("ТЕСТ", 0, 0, "horizontal")]);
        let id = puzzle_fingerprint(&sample);
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn any_positional_change_changes_the_fingerprint() {
        let base = puzzle(vec![vec!["Т", "Е", "С", "Т"]],
                          vec![("ТЕСТ", 0, 0, "horizontal")]);
        let rotated = puzzle(vec![vec!["Т", "Е", "С", "Т"]],
                             vec![("ТЕСТ", 0, 0, "vertical")]);
        let shifted = puzzle(vec![vec!["Т", "Е", "С", "Т"]],
                             vec![("ТЕСТ", 0, 1, "horizontal")]);

        assert_eq!(puzzle_fingerprint(&rotated), "bb9b735a89ae4bfe");
        assert_ne!(puzzle_fingerprint(&base), puzzle_fingerprint(&rotated));
        assert_ne!(puzzle_fingerprint(&base), puzzle_fingerprint(&shifted));
    }

    #[test]
    fn clue_and_metadata_do_not_affect_the_fingerprint() {
        let mut first = puzzle(vec![vec!["Т", "Е", "С", "Т"]],
                               vec![("ТЕСТ", 0, 0, "horizontal")]);
        let mut second = first.clone();
        second.words[0].clue = "другая подсказка".to_string();
        second.metadata.fill_density = 0.25;
        second.difficulty = "hard".to_string();

        assert_eq!(puzzle_fingerprint(&first), puzzle_fingerprint(&second));
        first.words[0].word = "ТОСТ".to_string();
        assert_ne!(puzzle_fingerprint(&first), puzzle_fingerprint(&second));
    }
}
