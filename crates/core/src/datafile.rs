//! Datafile generation: interleaving valid frames with random noise.
//!
//! The generator drives a two-phase sampling process over an output stream:
//!
//! 1. **Preamble**: noise frames until a Bernoulli trial succeeds, then one
//!    size marker announcing the payload length.
//! 2. **Payload**: for each payload byte, noise frames until a trial
//!    succeeds, then one valid data frame carrying that byte.
//!
//! Every trial succeeds with probability `valid_chance`, so the noise run
//! before each valid frame is geometrically distributed. Runs are capped at
//! `max_noise_run` frames; on hitting the cap the valid frame is emitted
//! anyway, so generation always terminates.
//!
//! # Determinism
//!
//! All randomness comes from a caller-supplied RNG. `generate_datafile`
//! seeds a ChaCha8 RNG from `GenOptions::seed`; given the same seed and
//! inputs, the output file is byte-identical.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{GenError, Result};
use crate::frame::Frame;

/// Configuration for datafile generation.
#[derive(Debug, Clone, Copy)]
pub struct GenOptions {
    /// Per-trial probability of emitting the valid frame [must be in (0, 1]]
    pub valid_chance: f64,

    /// Maximum consecutive noise frames per sampling loop before the valid
    /// frame is force-emitted
    pub max_noise_run: u32,

    /// Random seed for determinism
    pub seed: u64,
}

impl GenOptions {
    /// Create a configuration with the original tool's defaults.
    pub fn default_with_seed(seed: u64) -> Self {
        Self {
            valid_chance: 0.25,
            max_noise_run: 1024,
            seed,
        }
    }

    /// Create a configuration that never emits noise (every trial succeeds).
    pub fn no_noise(seed: u64) -> Self {
        Self {
            valid_chance: 1.0,
            max_noise_run: 0,
            seed,
        }
    }

    /// Check that the options describe a terminating generation.
    pub fn validate(&self) -> std::result::Result<(), GenError> {
        if !(self.valid_chance > 0.0 && self.valid_chance <= 1.0) {
            return Err(GenError::ChanceOutOfRange(self.valid_chance));
        }
        Ok(())
    }
}

/// Counters collected during one generation run.
///
/// Reported by the CLI so the noise overhead of a run is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenStats {
    /// Noise frames emitted across both phases
    pub noise_frames: u64,

    /// Size markers emitted (always 1 for a completed run)
    pub size_frames: u64,

    /// Valid data frames emitted (one per payload byte)
    pub data_frames: u64,

    /// Sampling loops that hit `max_noise_run` and force-emitted
    pub forced_emits: u64,

    /// Total lines written, including the comment line
    pub total_lines: u64,
}

impl GenStats {
    /// Fraction of emitted frames that were noise.
    pub fn noise_ratio(&self) -> f64 {
        let frames = self.noise_frames + self.size_frames + self.data_frames;
        if frames == 0 {
            return 0.0;
        }
        self.noise_frames as f64 / frames as f64
    }
}

/// Generate a stimulus datafile into an arbitrary writer.
///
/// Writes a comment line `# {data}`, then the preamble and payload phases
/// described in the module docs. The payload is taken byte-wise; callers
/// with non-ASCII input should pass it through [`ascii_escape`] first.
///
/// # Arguments
/// - `out`: destination stream
/// - `data`: payload string (at most `u32::MAX` bytes)
/// - `opts`: probability, noise cap (seed is unused here; the RNG is explicit)
/// - `rng`: randomness source, caller-seeded for reproducibility
///
/// # Returns
/// Counters describing the run.
pub fn write_datafile<W: Write, R: Rng>(
    out: &mut W,
    data: &str,
    opts: &GenOptions,
    rng: &mut R,
) -> Result<GenStats> {
    opts.validate()?;
    let payload_len =
        u32::try_from(data.len()).map_err(|_| GenError::PayloadTooLong(data.len()))?;

    let mut stats = GenStats::default();

    writeln!(out, "# {data}")?;
    stats.total_lines += 1;

    // Preamble: noise, then announce the payload length
    emit_with_noise(out, opts, rng, &mut stats, Frame::preamble_noise, Frame::size_marker(payload_len))?;
    stats.size_frames += 1;

    // Payload: noise before each byte
    for byte in data.bytes() {
        emit_with_noise(out, opts, rng, &mut stats, Frame::payload_noise, Frame::data(byte))?;
        stats.data_frames += 1;
    }

    Ok(stats)
}

/// Run one sampling loop: noise frames until a Bernoulli trial succeeds or
/// the cap is hit, then the valid frame.
fn emit_with_noise<W: Write, R: Rng>(
    out: &mut W,
    opts: &GenOptions,
    rng: &mut R,
    stats: &mut GenStats,
    noise: fn(&mut R) -> Frame,
    valid: Frame,
) -> Result<()> {
    let mut run = 0u32;
    while rng.gen::<f64>() >= opts.valid_chance {
        if run >= opts.max_noise_run {
            stats.forced_emits += 1;
            break;
        }
        writeln!(out, "{}", noise(rng))?;
        stats.noise_frames += 1;
        stats.total_lines += 1;
        run += 1;
    }

    writeln!(out, "{valid}")?;
    stats.total_lines += 1;
    Ok(())
}

/// Generate a stimulus datafile at `path`.
///
/// Creates or truncates the file, seeds a ChaCha8 RNG from `opts.seed`,
/// writes the full datafile, and flushes before returning.
pub fn generate_datafile(path: &Path, data: &str, opts: &GenOptions) -> Result<GenStats> {
    let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
    let mut out = BufWriter::new(File::create(path)?);
    let stats = write_datafile(&mut out, data, opts, &mut rng)?;
    out.flush()?;
    Ok(stats)
}

/// Rewrite a string so it contains only printable ASCII.
///
/// Printable ASCII passes through unchanged; control characters and
/// non-ASCII are replaced with their `escape_default` form (`\n`,
/// `\u{e9}`, ...). The result is safe to embed both in the comment line
/// and in the 8-bit data fields.
pub fn ascii_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii() && !c.is_ascii_control() {
            escaped.push(c);
        } else {
            escaped.extend(c.escape_default());
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_to_string(data: &str, opts: &GenOptions) -> (String, GenStats) {
        let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
        let mut buf = Vec::new();
        let stats = write_datafile(&mut buf, data, opts, &mut rng).unwrap();
        (String::from_utf8(buf).unwrap(), stats)
    }

    #[test]
    fn test_rejects_zero_chance() {
        let opts = GenOptions {
            valid_chance: 0.0,
            max_noise_run: 16,
            seed: 1,
        };
        assert!(matches!(opts.validate(), Err(GenError::ChanceOutOfRange(_))));
    }

    #[test]
    fn test_rejects_out_of_range_chance() {
        for chance in [-0.5, 1.5, f64::NAN] {
            let opts = GenOptions {
                valid_chance: chance,
                max_noise_run: 16,
                seed: 1,
            };
            assert!(opts.validate().is_err());
        }
    }

    #[test]
    fn test_no_noise_scenario() {
        // With every trial succeeding, the file is fully determined
        let (text, stats) = generate_to_string("Hi", &GenOptions::no_noise(0));

        let expected = "\
# Hi
1_00000000000000000000000000000010_0_00000000
0_00000000000000000000000000000000_1_01001000
0_00000000000000000000000000000000_1_01101001
";
        assert_eq!(text, expected);
        assert_eq!(stats.noise_frames, 0);
        assert_eq!(stats.size_frames, 1);
        assert_eq!(stats.data_frames, 2);
        assert_eq!(stats.total_lines, 4);
    }

    #[test]
    fn test_determinism() {
        let opts = GenOptions::default_with_seed(12345);
        let (a, _) = generate_to_string("determinism check", &opts);
        let (b, _) = generate_to_string("determinism check", &opts);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds() {
        let (a, _) = generate_to_string("seeded", &GenOptions::default_with_seed(1));
        let (b, _) = generate_to_string("seeded", &GenOptions::default_with_seed(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_noise_run_cap() {
        // Vanishingly small chance: every loop runs to the cap
        let opts = GenOptions {
            valid_chance: 1e-12,
            max_noise_run: 3,
            seed: 42,
        };
        let (text, stats) = generate_to_string("ab", &opts);

        // 3 sampling loops (size marker + 2 bytes), each capped at 3 noise
        assert_eq!(stats.forced_emits, 3);
        assert_eq!(stats.noise_frames, 9);
        assert_eq!(stats.total_lines, 13);
        assert_eq!(text.lines().count(), 13);
    }

    #[test]
    fn test_empty_payload() {
        let (text, stats) = generate_to_string("", &GenOptions::no_noise(0));

        assert_eq!(text, "# \n1_00000000000000000000000000000000_0_00000000\n");
        assert_eq!(stats.data_frames, 0);
        assert_eq!(stats.size_frames, 1);
    }

    #[test]
    fn test_noise_ratio() {
        let stats = GenStats {
            noise_frames: 6,
            size_frames: 1,
            data_frames: 1,
            forced_emits: 0,
            total_lines: 9,
        };
        assert_eq!(stats.noise_ratio(), 0.75);

        assert_eq!(GenStats::default().noise_ratio(), 0.0);
    }

    #[test]
    fn test_ascii_escape() {
        assert_eq!(ascii_escape("Hello World!"), "Hello World!");
        assert_eq!(ascii_escape("tab\there"), "tab\\there");
        assert_eq!(ascii_escape("café"), "caf\\u{e9}");
    }
}
