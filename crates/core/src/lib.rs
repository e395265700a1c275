//! stimgen-core: testbench stimulus datafile generation
//!
//! This library produces line-oriented stimulus files for an RTL testbench
//! that reads a framed string protocol:
//! - A size marker announces the payload length
//! - Data frames carry the payload one byte per frame
//! - Random noise frames are interleaved throughout, which the design
//!   under test must ignore
//!
//! # Architecture
//!
//! - `frame`: frame record and 45-character line serialization
//! - `datafile`: two-phase generator with seeded, bounded noise sampling
//! - `error`: structured error types
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and reported, never thrown
//! - **Deterministic**: seeded randomness makes runs reproducible
//! - **Terminating**: noise runs are capped, so generation always finishes

pub mod datafile;
pub mod error;
pub mod frame;

// Re-export commonly used types
pub use error::{Error, Result};
