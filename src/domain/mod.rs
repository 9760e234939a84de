//! Domain layer for the configuration loader
//!
//! This module contains the document model, interpolation and the typed
//! settings views. It performs no I/O beyond home-directory lookup.

pub mod errors;
mod interpolation;
pub mod models;

pub use errors::{ConfigError, ConfigResult};
pub use interpolation::{MAX_INTERPOLATED_LEN, MAX_INTERPOLATION_DEPTH};
