//! Configuration management infrastructure
//!
//! - Line parser for the sectioned key/value format
//! - Validated loading from files, memory and the embedded template
//! - Override merging with an explicit policy
//! - Directory setup and template serialisation
//! - Runtime options layered with figment

pub mod loader;
pub mod options;
pub mod parser;
pub mod setup;
pub mod template;

pub use loader::ConfigLoader;
pub use options::RuntimeOptions;
pub use setup::{check_setup, setup, MissingDirectory, SetupReport};
pub use template::{to_ini_string, CONFIG_FILENAME, DEFAULT_TEMPLATE, TEMPLATE_ORIGIN};
