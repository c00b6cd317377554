//! Library surface of the tzod CLI.
//!
//! The binary in `main.rs` is a thin command layer over these modules;
//! they are exposed here so integration tests can drive the pipeline
//! directly.

pub mod config;
pub mod error;
pub mod generate;
pub mod matcher;
pub mod writer;

pub use config::{CliArgs, Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use matcher::FileMatcher;
pub use writer::{FileWriter, WriteResult};
