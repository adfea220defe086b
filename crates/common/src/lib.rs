//! fragreel Common Utilities
//!
//! Shared infrastructure for all fragreel crates:
//! - Error types and result aliases
//! - Frame clock for converting server frames to seconds
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
