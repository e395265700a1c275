//! Configuration for the stimgen CLI.
//!
//! Handles parsing command-line arguments and generating sensible defaults.
//!
//! # Philosophy
//!
//! The tool works with a single positional argument and nothing else. The
//! resolved seed is always printed so runs are reproducible.

use std::path::PathBuf;

use stimgen_core::datafile::ascii_escape;

/// Complete configuration for a generation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// ASCII-escaped payload string to encode
    pub payload: String,

    /// Output file path
    pub output: PathBuf,

    /// Per-trial probability of emitting a valid frame
    pub valid_chance: f64,

    /// Random seed (explicit or time-based)
    pub seed: u64,

    /// Maximum consecutive noise frames per sampling loop
    pub max_noise_run: u32,

    /// Whether to print the generation summary
    pub print_summary: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// Exactly one positional argument is required: the string to encode.
    /// It is ASCII-escaped for use as the payload; the escaped form,
    /// lowercased, is the default output filename.
    ///
    /// If --seed is provided, uses that seed for all randomness (fully
    /// deterministic); otherwise the seed is derived from system time.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut input: Option<String> = None;
        let mut output: Option<PathBuf> = None;
        let mut valid_chance: Option<f64> = None;
        let mut seed: Option<u64> = None;
        let mut max_noise_run: Option<u32> = None;
        let mut print_summary = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output = Some(PathBuf::from(&args[i]));
                }
                "--chance" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--chance requires a probability".to_string());
                    }
                    valid_chance = Some(args[i].parse().map_err(|_| "invalid chance")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--max-noise" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--max-noise requires a number".to_string());
                    }
                    max_noise_run = Some(args[i].parse().map_err(|_| "invalid max-noise")?);
                }
                "--quiet" => {
                    print_summary = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                arg if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(format!("unknown argument: {arg}"));
                }
                arg => {
                    if input.is_some() {
                        return Err(format!("unexpected extra argument: {arg}"));
                    }
                    input = Some(arg.to_string());
                }
            }
            i += 1;
        }

        let input = input.ok_or("missing required argument: the string to encode")?;
        let payload = ascii_escape(&input);

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |t| t.as_millis() as u64)
        });

        let config = Config {
            output: output.unwrap_or_else(|| PathBuf::from(payload.to_lowercase())),
            payload,
            valid_chance: valid_chance.unwrap_or(0.25),
            seed,
            max_noise_run: max_noise_run.unwrap_or(1024),
            print_summary,
        };

        Ok(config)
    }
}

fn print_help() {
    println!("stimgen: testbench stimulus datafile generator");
    println!();
    println!("USAGE:");
    println!("    stimgen <STRING> [OPTIONS]");
    println!();
    println!("ARGS:");
    println!("    <STRING>            String to encode (ASCII-escaped if needed)");
    println!();
    println!("OPTIONS:");
    println!("    --out <PATH>        Output file (default: lowercased input string)");
    println!("    --chance <P>        Valid-frame probability, 0 < P <= 1 (default: 0.25)");
    println!("    --seed <N>          Random seed for determinism (default: time-based)");
    println!("    --max-noise <N>     Noise cap per sampling loop (default: 1024)");
    println!("    --quiet             Don't print the generation summary");
    println!("    --help, -h          Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    stimgen \"Hello World!\" --out hello.txt     # Random seed, 25% chance");
    println!("    stimgen Hi --seed 42                         # Deterministic run");
    println!("    stimgen Hi --chance 1.0                      # No noise frames at all");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(&args(&["Hi"])).unwrap();
        assert_eq!(config.payload, "Hi");
        assert_eq!(config.output, PathBuf::from("hi"));
        assert_eq!(config.valid_chance, 0.25);
        assert_eq!(config.max_noise_run, 1024);
        assert!(config.print_summary);
    }

    #[test]
    fn test_all_flags() {
        let config = Config::from_args(&args(&[
            "Hi", "--out", "stim.txt", "--chance", "0.5", "--seed", "7", "--max-noise", "16",
            "--quiet",
        ]))
        .unwrap();
        assert_eq!(config.output, PathBuf::from("stim.txt"));
        assert_eq!(config.valid_chance, 0.5);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_noise_run, 16);
        assert!(!config.print_summary);
    }

    #[test]
    fn test_missing_positional() {
        assert!(Config::from_args(&args(&["--seed", "1"])).is_err());
    }

    #[test]
    fn test_extra_positional() {
        assert!(Config::from_args(&args(&["one", "two"])).is_err());
    }

    #[test]
    fn test_flag_missing_value() {
        assert!(Config::from_args(&args(&["Hi", "--seed"])).is_err());
        assert!(Config::from_args(&args(&["Hi", "--out"])).is_err());
    }

    #[test]
    fn test_unknown_flag() {
        assert!(Config::from_args(&args(&["Hi", "--bogus"])).is_err());
    }

    #[test]
    fn test_payload_escaping() {
        let config = Config::from_args(&args(&["caf\u{e9}"])).unwrap();
        assert_eq!(config.payload, "caf\\u{e9}");
        assert_eq!(config.output, PathBuf::from("caf\\u{e9}"));
    }
}
