//! Machine Painter CLI - evolve gray circles towards a target image.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use machine_painter::{EvolutionDriver, PainterConfig, load_reference};

#[derive(Parser, Debug)]
#[command(name = "machine-painter")]
#[command(version, about = "Approximate an image with translucent gray circles via evolution")]
struct Args {
    /// Reference image path (default: obraz.png)
    reference: Option<PathBuf>,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of specimens in the population
    #[arg(short = 'n', long)]
    specimens: Option<usize>,

    /// Number of best specimens kept each generation
    #[arg(short = 'k', long)]
    survivors: Option<usize>,

    /// Write survivors every N generations
    #[arg(short, long)]
    dump_interval: Option<u64>,

    /// Directory for checkpoint images
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args);

    if args.print_config {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Load reference
    let reference = load_reference(&config.reference).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    println!("Machine Painter");
    println!("===============");
    println!("WIDTH:    {:5}", reference.width());
    println!("HEIGHT:   {:5}", reference.height());
    println!("CHANNELS: {:5}", reference.channels());
    println!();

    let mut driver = EvolutionDriver::new(reference, config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    // Runs until the process is interrupted.
    let summary = driver.run_with_callback(|progress| {
        println!(
            "Generation {:6}: best={:.0} mean={:.0}",
            progress.generation, progress.best_score, progress.mean_score
        );
        if let Some(report) = &progress.checkpoint
            && report.failed > 0
        {
            log::warn!(
                "Checkpoint {}: {} of {} writes failed",
                report.counter,
                report.failed,
                report.failed + report.written.len()
            );
        }
    });

    println!();
    println!(
        "Stopped after {} generations ({:?}), {} checkpoint files",
        summary.generations, summary.stop_reason, summary.checkpoint_files
    );
}

/// Merge the optional config file with command line overrides.
fn build_config(args: &Args) -> PainterConfig {
    let mut config = match &args.config {
        Some(path) => {
            let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => PainterConfig::default(),
    };

    if let Some(reference) = &args.reference {
        config.reference = reference.clone();
    }
    if let Some(specimens) = args.specimens {
        config.population.specimens = specimens;
    }
    if let Some(survivors) = args.survivors {
        config.population.survivors = survivors;
    }
    if let Some(interval) = args.dump_interval {
        config.checkpoint.interval = interval;
    }
    if let Some(output_dir) = &args.output_dir {
        config.checkpoint.output_dir = output_dir.clone();
    }
    if args.seed.is_some() {
        config.random_seed = args.seed;
    }

    config
}
