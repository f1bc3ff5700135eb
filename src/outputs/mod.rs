//! Output generation.
//!
//! # Submodules
//!
//! - [`checkpoint`]: writes the accumulated article records to the single
//!   JSON output file, and reads it back

pub mod checkpoint;
