use clap::Parser;
use cpu_time::ProcessTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use symspmv::{SparseMatrixCSR, SpmvConfig};

/// Multiply a symmetric sparse matrix by a random vector and time the product
#[derive(Parser)]
#[command(name = "symspmv", version)]
struct Args {
    /// Coordinate-format file holding one triangle of a symmetric matrix
    file: PathBuf,

    /// Print progress and a readable metrics report
    #[arg(short, long)]
    verbose: bool,

    /// Worker threads for the product (defaults to all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Force the single-threaded kernel
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,

    /// Seed for the random input vector (defaults to entropy)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    log::info!("importing {}", args.file.display());
    let matrix = match SparseMatrixCSR::from_file(&args.file) {
        Ok(matrix) => matrix,
        Err(err) => {
            eprintln!("[ERR]: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("generating vector of size {}", matrix.col_count());
    let x: Vec<f64> = (0..matrix.col_count())
        .map(|_| f64::from(rng.gen_range(1..=10u32)))
        .collect();

    let config = if args.sequential {
        SpmvConfig::sequential()
    } else {
        match args.threads {
            Some(n) => SpmvConfig::default().with_threads(n),
            None => SpmvConfig::default(),
        }
    };

    log::info!("starting computation");
    let cpu_start = ProcessTime::now();
    let start = Instant::now();
    let result = matrix.multiply_with_config(&x, &config);
    let cpu_time_ms = cpu_start.elapsed().as_secs_f64() * 1e3;
    let real_time_ms = start.elapsed().as_secs_f64() * 1e3;

    let y = match result {
        Ok(y) => y,
        Err(err) => {
            eprintln!("[ERR]: {}", err);
            return ExitCode::FAILURE;
        }
    };
    log::info!("computation completed, result length {}", y.len());

    if args.verbose {
        println!("Simulation metrics:");
        println!("\tMATRIX   : {} x {}", matrix.row_count(), matrix.col_count());
        println!("\tSTORED   : {}", matrix.nnz());
        println!("\tCPU  TIME: {} ms", cpu_time_ms);
        println!("\tREAL TIME: {} ms", real_time_ms);
    } else {
        println!("{}", summary_line(&args.file, cpu_time_ms, real_time_ms));
    }

    ExitCode::SUCCESS
}

/// Machine-readable `file:cpu_ms:real_ms` record
fn summary_line(file: &Path, cpu_time_ms: f64, real_time_ms: f64) -> String {
    format!("{}:{}:{}", file.display(), cpu_time_ms, real_time_ms)
}
