//! Configuration management for the CLI.
//!
//! Loads configuration from `tzod.toml` files and merges command-line
//! overrides on top.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CliResult, ConfigError};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "tzod.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input file selection.
    pub input: InputConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Generation options.
    pub generate: GenerateConfig,
}

/// Input file selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Glob patterns for files to include; `!`-prefixed patterns negate.
    pub include: Vec<String>,

    /// Glob patterns for files to exclude.
    pub exclude: Vec<String>,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Output filename.
    pub file: String,
}

/// Generation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Target backend identifier.
    pub target: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            include: vec!["**/*.ts".to_string()],
            exclude: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            file: "schemas.ts".to_string(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            target: "zod".to_string(),
        }
    }
}

/// Patterns handed to the file matcher.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Config {
    /// The matcher patterns configured for input selection.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            include: self.input.include.clone(),
            exclude: self.input.exclude.clone(),
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// An explicit path must exist; the default location is optional and
    /// falls back to the built-in defaults when absent.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(ConfigError::not_found(explicit.to_path_buf()).into());
                }
                explicit.to_path_buf()
            }
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }
        if let Some(ref file) = args.output_file {
            config.output.file = file.clone();
        }
        if let Some(ref target) = args.target {
            config.generate.target = target.clone();
        }
        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# tzod configuration file

[input]
# Glob patterns for source files to include.
# Prefix a pattern with "!" to negate it.
include = ["**/*.ts"]

# Glob patterns for files to exclude
exclude = []

[output]
# Output directory for generated schema files
dir = "./generated"

# Output file name
file = "schemas.ts"

[generate]
# Target backend: "zod" or "valibot"
target = "zod"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Output filename override.
    pub output_file: Option<String>,

    /// Target backend override.
    pub target: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.include, vec!["**/*.ts".to_string()]);
        assert!(config.input.exclude.is_empty());
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert_eq!(config.output.file, "schemas.ts");
        assert_eq!(config.generate.target, "zod");
    }

    #[test]
    fn test_merge_cli_args() {
        let config = Config::default();
        let args = CliArgs {
            output: Some(PathBuf::from("./custom")),
            target: Some("valibot".to_string()),
            ..Default::default()
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
        assert_eq!(merged.generate.target, "valibot");
        assert_eq!(merged.output.file, "schemas.ts");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[input]
include = ["src/**/*.ts", "!src/**/*.test.ts"]
exclude = ["node_modules/**"]

[output]
dir = "./out"
file = "validators.ts"

[generate]
target = "valibot"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.include.len(), 2);
        assert_eq!(config.input.exclude, vec!["node_modules/**".to_string()]);
        assert_eq!(config.output.dir, PathBuf::from("./out"));
        assert_eq!(config.output.file, "validators.ts");
        assert_eq!(config.generate.target, "valibot");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[generate]\ntarget = \"valibot\"\n").unwrap();
        assert_eq!(config.generate.target, "valibot");
        assert_eq!(config.input.include, vec!["**/*.ts".to_string()]);
        assert_eq!(config.output.file, "schemas.ts");
    }

    #[test]
    fn test_default_content_parses() {
        let config: Config = toml::from_str(ConfigManager::default_config_content()).unwrap();
        assert_eq!(config.generate.target, "zod");
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let err = ConfigManager::load(Some(Path::new("/no/such/tzod.toml"))).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Config(ConfigError::NotFound { .. })
        ));
    }
}
