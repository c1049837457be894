//! Resolves the `--inputtype` argument into a concrete list of
//! `(input_file, output_file)` pairs, mirroring the three modes the
//! original driver supported: a single file, a newline-delimited list of
//! files, or every `.txt` file directly under a directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputType {
    File,
    #[value(name = "list_txt")]
    ListTxt,
    Dir,
}

pub fn resolve(input_path: &str, output_path: &str, outtag: &str, input_type: InputType) -> Result<Vec<(PathBuf, PathBuf)>> {
    match input_type {
        InputType::File => Ok(vec![(PathBuf::from(input_path), single_output_path(input_path, output_path, outtag))]),
        InputType::ListTxt => {
            let contents = fs::read_to_string(input_path)
                .with_context(|| format!("reading list file {input_path}"))?;
            Ok(contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| (PathBuf::from(line), tagged_output_path(Path::new(line), output_path, outtag)))
                .collect())
        }
        InputType::Dir => {
            let mut pairs = Vec::new();
            for entry in fs::read_dir(input_path).with_context(|| format!("reading directory {input_path}"))? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("txt") {
                    let out = tagged_output_path(&path, output_path, outtag);
                    pairs.push((path, out));
                }
            }
            pairs.sort();
            Ok(pairs)
        }
    }
}

fn single_output_path(input_path: &str, output_path: &str, outtag: &str) -> PathBuf {
    if output_path.ends_with('/') {
        tagged_output_path(Path::new(input_path), output_path, outtag)
    } else {
        PathBuf::from(output_path)
    }
}

fn tagged_output_path(input_file: &Path, output_dir: &str, outtag: &str) -> PathBuf {
    let basename = input_file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    Path::new(output_dir).join(format!("{outtag}{basename}"))
}
