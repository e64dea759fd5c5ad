//! Line-by-line diff of two text files.
//!
//! Usage: line_diff <old> <new> [lcs|myers]

use std::fs;
use std::process;

use kaleido::diff;
use kaleido::diff::Algorithm;

fn read_lines(path: &str) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => text.lines().map(str::to_string).collect(),
        Err(err) => {
            eprintln!("failed to read {}: {}", path, err);
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <old> <new> [lcs|myers]", args[0]);
        process::exit(2);
    }

    let algorithm = match args.get(3) {
        Some(name) => match name.parse::<Algorithm>() {
            Ok(algorithm) => algorithm,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(2);
            }
        },
        None => Algorithm::default(),
    };

    let old = read_lines(&args[1]);
    let new = read_lines(&args[2]);
    let edits = diff::diff(&old, &new, algorithm);
    print!("{}", diff::render(&edits, true));

    let changed = edits.iter().filter(|e| e.kind() != "common").count();
    if changed > 0 {
        process::exit(1);
    }
}
