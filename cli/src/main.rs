//! Command-line driver for the ChiX L3 to SMARTS translator. Owns every
//! concern the core translator explicitly excludes: argument parsing,
//! input enumeration, worker-thread fan-out, logging configuration, and
//! file I/O.

mod input;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

use chix_smarts_core::Translator;
use input::InputType;

#[derive(Parser, Debug)]
#[command(name = "chix-smarts", about = "Translate ChiX L3 order-book records into SMARTS-format text")]
struct Args {
    /// Input file, list file, or directory (per --inputtype).
    input_path: String,

    /// Output file, or output directory when --inputtype is list_txt/dir.
    output_path: String,

    /// Filename prefix applied to each per-file output.
    #[arg(long, default_value = "output_")]
    outtag: String,

    /// Stop translating after this many input records (per file).
    #[arg(long)]
    maxrows: Option<usize>,

    /// Number of worker threads translating independent files concurrently.
    #[arg(long, default_value_t = 1)]
    processors: usize,

    /// How to interpret input_path.
    #[arg(long, value_enum, default_value_t = InputType::File)]
    inputtype: InputType,

    /// Suppress informational log output.
    #[arg(long)]
    nolog: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.nolog { LevelFilter::WARN } else { LevelFilter::INFO };
    tracing_subscriber::fmt().with_max_level(filter).init();

    let inputs = input::resolve(&args.input_path, &args.output_path, &args.outtag, args.inputtype)?;
    info!(count = inputs.len(), "resolved input files");

    let processors = args.processors.max(1).min(inputs.len().max(1));
    let failures = if processors <= 1 || inputs.len() <= 1 {
        run_sequential(&inputs, args.maxrows)
    } else {
        run_concurrent(&inputs, args.maxrows, processors)
    };

    if failures > 0 {
        error!(failures, "one or more files failed to translate");
        std::process::exit(1);
    }
    Ok(())
}

fn run_sequential(inputs: &[(PathBuf, PathBuf)], maxrows: Option<usize>) -> usize {
    inputs.iter().filter(|(input, output)| translate_one(input, output, maxrows).is_err()).count()
}

fn run_concurrent(inputs: &[(PathBuf, PathBuf)], maxrows: Option<usize>, processors: usize) -> usize {
    let chunks: Vec<&[(PathBuf, PathBuf)]> = chunk_evenly(inputs, processors);
    let mut failures = 0usize;
    std::thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| scope.spawn(move || chunk.iter().filter(|(input, output)| translate_one(input, output, maxrows).is_err()).count()))
            .collect();
        for handle in handles {
            failures += handle.join().unwrap_or(1);
        }
    });
    failures
}

fn chunk_evenly<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    if items.is_empty() || parts == 0 {
        return Vec::new();
    }
    let chunk_size = items.len().div_ceil(parts);
    items.chunks(chunk_size.max(1)).collect()
}

fn translate_one(input_path: &Path, output_path: &Path, maxrows: Option<usize>) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }

    let reader = BufReader::new(File::open(input_path).with_context(|| format!("opening {}", input_path.display()))?);
    let mut writer = BufWriter::new(File::create(output_path).with_context(|| format!("creating {}", output_path.display()))?);

    let mut translator = Translator::new();
    let mut rows = 0usize;
    for line in reader.lines() {
        if let Some(max) = maxrows {
            if rows >= max {
                break;
            }
        }
        let line = line.with_context(|| format!("reading line from {}", input_path.display()))?;
        rows += 1;

        match translator.process_line(&line) {
            Ok(emitted) => {
                for out_line in emitted.lines() {
                    writeln!(writer, "{out_line}")
                        .with_context(|| format!("writing to {}", output_path.display()))?;
                }
            }
            Err(translate_error) => {
                error!(file = %input_path.display(), row = rows, error = %translate_error, "translation error");
                return Err(translate_error.into());
            }
        }
    }
    translator.finish();
    writer.flush().with_context(|| format!("flushing {}", output_path.display()))?;
    info!(file = %input_path.display(), rows, "translated file");
    Ok(())
}
