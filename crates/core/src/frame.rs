//! Stimulus frame representation and line serialization.
//!
//! A frame is one observation presented to the testbench's input port per
//! clock: a size field, a data byte, and a valid flag for each. Frames are
//! serialized as one text line of binary digits with underscore separators,
//! which the testbench reads with `$readmemb`-style parsing.
//!
//! # Line Format
//!
//! ```text
//! +-------------+---------------------+-------------+------------+
//! | size_valid  | size                | data_valid  | data       |
//! | 1 bit       | 32 bits, MSB first  | 1 bit       | 8 bits     |
//! +-------------+---------------------+-------------+------------+
//! ```
//!
//! Fields are joined with `_`, giving exactly 45 characters per line:
//! 42 payload bits plus 3 separators. Binary fields are zero-padded on
//! the left and never truncated; `size` is a `u32`, so the 32-bit field
//! always fits by construction.
//!
//! # Example
//!
//! ```
//! use stimgen_core::frame::Frame;
//!
//! let frame = Frame::size_marker(2);
//! assert_eq!(
//!     frame.to_string(),
//!     "1_00000000000000000000000000000010_0_00000000",
//! );
//! ```

use std::fmt;

use rand::Rng;

/// Number of characters in one serialized frame line.
///
/// 1 + 32 + 1 + 8 payload bits, plus 3 underscore separators.
pub const LINE_CHARS: usize = 45;

/// Inclusive byte range sampled for payload-phase noise data.
///
/// `'A'..='z'` in ASCII, matching what the downstream testbench expects
/// to see on the data lines while `data_valid` is low.
pub const NOISE_DATA_RANGE: std::ops::RangeInclusive<u8> = 65..=122;

/// One stimulus observation: size and data channels, each with a valid flag.
///
/// The downstream consumer treats a field as authoritative only when its
/// valid flag is set; everything else on the line is noise it must ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Whether the size field is authoritative
    pub size_valid: bool,

    /// Payload length announcement (when `size_valid`) or noise
    pub size: u32,

    /// Whether the data field is authoritative
    pub data_valid: bool,

    /// One payload byte (when `data_valid`) or noise
    pub data: u8,
}

impl Frame {
    /// Preamble-phase noise: random size, null data, neither flag set.
    pub fn preamble_noise<R: Rng>(rng: &mut R) -> Self {
        Self {
            size_valid: false,
            size: rng.gen(),
            data_valid: false,
            data: 0,
        }
    }

    /// Size marker announcing the payload length. Ends the preamble phase.
    pub fn size_marker(len: u32) -> Self {
        Self {
            size_valid: true,
            size: len,
            data_valid: false,
            data: 0,
        }
    }

    /// Payload-phase noise: random size, random letter-range data byte,
    /// neither flag set.
    pub fn payload_noise<R: Rng>(rng: &mut R) -> Self {
        Self {
            size_valid: false,
            size: rng.gen(),
            data_valid: false,
            data: rng.gen_range(NOISE_DATA_RANGE),
        }
    }

    /// Valid data frame carrying one payload byte.
    pub fn data(byte: u8) -> Self {
        Self {
            size_valid: false,
            size: 0,
            data_valid: true,
            data: byte,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{:032b}_{}_{:08b}",
            u8::from(self.size_valid),
            self.size,
            u8::from(self.data_valid),
            self.data,
        )
    }
}
