//! Error handling for codec operations
//!
//! This module re-exports the error type used throughout the crate. It uses
//! thiserror for ergonomic error handling and provides one variant per failure
//! the codecs detect.

pub use crate::common::LevelCodecError;
pub use crate::common::Result;
