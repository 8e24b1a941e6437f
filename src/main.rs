use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process;

use clap::{App, Arg};
use lazy_static::lazy_static;
use log::{error, info};

use krossvord::fingerprint::puzzle_fingerprint;
use krossvord::generator::CrosswordGenerator;
use krossvord::logging;

lazy_static! {
    /// Fixed slugs for the known Russian category names; anything else
    /// falls back to a lowercased, underscored form.
    static ref CATEGORY_SLUGS: HashMap<&'static str, &'static str> = {
        let mut slugs = HashMap::new();
        slugs.insert("Наука и технологии", "science");
        slugs.insert("История", "history");
        slugs.insert("Искусство", "art");
        slugs.insert("Спорт", "sport");
        slugs.insert("Литература", "literature");
        slugs.insert("Кино и сериалы", "cinema");
        slugs.insert("Музыка", "music");
        slugs.insert("География", "geography");
        slugs.insert("Природа", "nature");
        slugs.insert("Кулинария", "cooking");
        slugs.insert("Космос", "space");
        slugs
    };
}

fn filename_for(category: &str, difficulty: &str, index: usize) -> String {
    let slug = match CATEGORY_SLUGS.get(category) {
        Some(slug) => slug.to_string(),
        None => category.to_lowercase().replace(' ', "_"),
    };
    format!("{}_{}_{:03}.json", slug, difficulty, index)
}

fn main() {
    logging::init_logger(false);

    let matches = App::new("krossvord")
        .version("0.1.0")
        .about("Batch generation of Cyrillic crosswords")
        .arg(Arg::with_name("dictionary")
             .short("d")
             .long("dictionary")
             .value_name("FILE")
             .help("Path to the JSON dictionary")
             .takes_value(true)
             .required(true))
        .arg(Arg::with_name("output")
             .short("o")
             .long("output")
             .value_name("DIR")
             .help("Directory for generated puzzles")
             .takes_value(true)
             .default_value("output/crosswords"))
        .arg(Arg::with_name("count")
             .short("c")
             .long("count")
             .value_name("N")
             .help("Puzzles per category")
             .takes_value(true)
             .default_value("50"))
        .arg(Arg::with_name("level")
             .short("l")
             .long("level")
             .possible_values(&["easy", "medium", "hard"])
             .help("Difficulty level")
             .takes_value(true)
             .default_value("medium"))
        .arg(Arg::with_name("category")
             .long("category")
             .value_name("NAME")
             .help("Generate only for this category")
             .takes_value(true))
        .arg(Arg::with_name("seed")
             .long("seed")
             .value_name("N")
             .help("Base seed for reproducible output")
             .takes_value(true))
        .arg(Arg::with_name("validate-only")
             .long("validate-only")
             .help("Only validate the dictionary, do not generate"))
        .get_matches();

    let dictionary_path = matches.value_of("dictionary").unwrap();
    if !Path::new(dictionary_path).exists() {
        eprintln!("Dictionary file not found: {}", dictionary_path);
        process::exit(1);
    }

    let count: usize = matches.value_of("count").unwrap().parse().unwrap_or_else(|_| {
        eprintln!("--count must be a nonnegative integer");
        process::exit(1);
    });
    let seed: Option<u64> = matches.value_of("seed").map(|value| {
        value.parse().unwrap_or_else(|_| {
            eprintln!("--seed must be a nonnegative integer");
            process::exit(1);
        })
    });
    let level = matches.value_of("level").unwrap();

    println!("Loading dictionary: {}", dictionary_path);
    let mut generator = match CrosswordGenerator::from_file(Path::new(dictionary_path)) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("Failed to load dictionary: {}", err);
            process::exit(1);
        },
    };

    println!("Validating dictionary...");
    let report = generator.validate_dictionary();
    if !report.is_valid() {
        println!("Dictionary problems found:");
        for problem in report.errors.iter().take(10) {
            println!("  - {}", problem);
        }
        if report.errors.len() > 10 {
            println!("  ... and {} more", report.errors.len() - 10);
        }
    }

    if matches.is_present("validate-only") {
        if report.is_valid() {
            println!("Dictionary is valid");
            process::exit(0);
        }
        process::exit(1);
    }

    let info = generator.get_categories_info();
    println!("\nCategories: {}", info.len());
    for category in &info {
        println!("  - {}: {} words{}",
                 category.name,
                 category.word_count,
                 if category.available { "" } else { " (too few to generate)" });
    }

    let categories: Vec<String> = match matches.value_of("category") {
        Some(name) => {
            if !info.iter().any(|category| category.name == name) {
                eprintln!("Category '{}' not found", name);
                process::exit(1);
            }
            vec![name.to_string()]
        },
        None => info.iter()
            .filter(|category| category.available)
            .map(|category| category.name.clone())
            .collect(),
    };

    if categories.is_empty() {
        eprintln!("No categories usable for generation");
        process::exit(1);
    }

    let output_dir = matches.value_of("output").unwrap();
    if let Err(err) = fs::create_dir_all(output_dir) {
        eprintln!("Failed to create output directory {}: {}", output_dir, err);
        process::exit(1);
    }

    println!("\nGenerating {} puzzles per category at level '{}'", count, level);

    let mut total_successful = 0;
    let mut total_failed = 0;

    for category in &categories {
        println!("\nCategory: {}", category);
        for index in 0..count {
            let puzzle_seed = seed.map(|base| base + index as u64);
            match generator.generate(category, level, puzzle_seed, None) {
                Ok(Some(puzzle)) => {
                    let id = puzzle_fingerprint(&puzzle);
                    let filename = filename_for(category, level, index + 1);
                    let path = Path::new(output_dir).join(&filename);

                    let mut value = serde_json::to_value(&puzzle).expect("puzzle serializes");
                    value.as_object_mut().unwrap().insert("id".to_string(), id.clone().into());
                    let contents = serde_json::to_string_pretty(&value).expect("puzzle serializes");

                    if let Err(err) = fs::write(&path, contents + "\n") {
                        error!("Failed to write {}: {}", path.display(), err);
                        total_failed += 1;
                        continue;
                    }
                    info!("Saved puzzle {} to {}", id, path.display());
                    println!("  [{}/{}] ok: {}", index + 1, count, filename);
                    total_successful += 1;
                },
                Ok(None) => {
                    println!("  [{}/{}] generation failed", index + 1, count);
                    total_failed += 1;
                },
                Err(err) => {
                    println!("Error for category {}: {}", category, err);
                    break;
                },
            }
        }
    }

    let stats = generator.get_generation_stats();
    println!("\nTotals:");
    println!("  successful: {}", total_successful);
    println!("  failed: {}", total_failed);
    if total_successful + total_failed > 0 {
        println!("  success rate: {:.1}%",
                 total_successful as f64 / (total_successful + total_failed) as f64 * 100.0);
    }
    println!("  average generation time: {:.3}s", stats.avg_generation_time);
}
