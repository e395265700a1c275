//! stimgen CLI: generate a testbench stimulus datafile from a string.

use std::process::ExitCode;

use stimgen_core::datafile::{generate_datafile, GenOptions};

mod config;

use config::Config;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run `stimgen --help` for usage");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> stimgen_core::Result<()> {
    println!("Generating data for string: {}", config.payload);

    let opts = GenOptions {
        valid_chance: config.valid_chance,
        max_noise_run: config.max_noise_run,
        seed: config.seed,
    };
    let stats = generate_datafile(&config.output, &config.payload, &opts)?;

    if config.print_summary {
        println!();
        println!("=== Generation Summary ===");
        println!("Output file: {}", config.output.display());
        println!("Seed: {}", config.seed);
        println!("Lines written: {}", stats.total_lines);
        println!(
            "Noise frames: {} ({:.1}% of frames)",
            stats.noise_frames,
            stats.noise_ratio() * 100.0
        );
        println!("Data frames: {}", stats.data_frames);
        if stats.forced_emits > 0 {
            println!("Forced emissions: {}", stats.forced_emits);
        }
    }

    Ok(())
}
