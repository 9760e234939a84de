//! Infrastructure layer module
//!
//! This module contains the adapters that touch the outside world:
//! - Configuration file parsing, loading and merging
//! - Directory setup
//! - Logging infrastructure

pub mod config;
pub mod logging;
