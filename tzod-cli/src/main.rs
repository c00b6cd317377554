//! # tzod
//!
//! CLI tool for generating validation schemas from TypeScript classes.
//!
//! ## Usage
//!
//! ```bash
//! # Generate schemas from the current directory
//! tzod generate
//!
//! # Generate Valibot schemas to a specific output directory
//! tzod generate --target valibot --output ./generated
//!
//! # Preview without writing
//! tzod generate --dry-run
//!
//! # Print the resolved IR as JSON instead of schema code
//! tzod generate --dump-ir
//!
//! # Initialize configuration
//! tzod init
//!
//! # Verify generated schemas are up-to-date
//! tzod check
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use tzod_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::CliError,
    generate::{collect_classes, render, CollectOutcome},
    matcher::FileMatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "tzod")]
#[command(author, version, about = "Generate validation schemas from TypeScript classes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate validation schemas from TypeScript source files
    Generate {
        /// Root directory to scan for source files
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Target backend (zod, valibot)
        #[arg(short, long)]
        target: Option<String>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file name
        #[arg(long)]
        output_file: Option<String>,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Print the resolved IR as JSON instead of schema code
        #[arg(long)]
        dump_ir: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new tzod configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "tzod.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Verify that generated schemas are up-to-date
    Check {
        /// Root directory to scan for source files
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            root,
            target,
            output,
            output_file,
            dry_run,
            dump_ir,
            config,
        } => {
            let config = load_config(config.as_deref(), output, output_file, target)?;
            cmd_generate(&root, &config, dry_run, dump_ir)
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Check { root, config } => {
            let config = load_config(config.as_deref(), None, None, None)?;
            cmd_check(&root, &config)
        }
    }
}

fn load_config(
    config_path: Option<&std::path::Path>,
    output: Option<PathBuf>,
    output_file: Option<String>,
    target: Option<String>,
) -> Result<Config, CliError> {
    let config = ConfigManager::load(config_path)?;
    Ok(ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output,
            output_file,
            target,
        },
    ))
}

/// Generate command implementation.
fn cmd_generate(
    root: &PathBuf,
    config: &Config,
    dry_run: bool,
    dump_ir: bool,
) -> Result<(), CliError> {
    let outcome = scan_and_parse(root, config)?;

    if dump_ir {
        println!("{}", serde_json::to_string_pretty(&outcome.classes)?);
        return Ok(());
    }

    if outcome.classes.is_empty() {
        println!("{}", "No classes found.".yellow());
        return Ok(());
    }

    println!(
        "  Resolved {} class(es)",
        outcome.classes.len().to_string().green()
    );
    println!("{}", "Generating schemas...".cyan());

    let content = render(&outcome.classes, &config.generate.target)?;

    let output_path = config.output.dir.join(&config.output.file);
    let writer = FileWriter::new(dry_run);

    match writer.write(&output_path, &content)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(
            "Configuration file already exists".to_string(),
        ));
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Check command implementation.
fn cmd_check(root: &PathBuf, config: &Config) -> Result<(), CliError> {
    println!("{}", "Checking generated schemas...".cyan());

    let schema_path = config.output.dir.join(&config.output.file);
    if !schema_path.exists() {
        return Err(CliError::Validation(format!(
            "Schema file not found: {}",
            schema_path.display()
        )));
    }
    let existing = std::fs::read_to_string(&schema_path)?;

    let outcome = scan_and_parse(root, config)?;
    let expected = render(&outcome.classes, &config.generate.target)?;

    if existing.trim() == expected.trim() {
        println!("{} Schemas are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} Schemas are out of date", "✗".red());
        println!("  Run 'tzod generate' to update");
        Err(CliError::Validation("Schemas are out of date".to_string()))
    }
}

/// Match files under `root` and parse them, reporting per-file failures.
fn scan_and_parse(root: &PathBuf, config: &Config) -> Result<CollectOutcome, CliError> {
    println!("{}", "Scanning for source files...".cyan());

    let matcher = FileMatcher::new(&config.match_config())?;
    let outcome = collect_classes(root, &matcher)?;

    if !outcome.failures.is_empty() {
        println!(
            "{} {} file(s) failed to parse:",
            "Warning:".yellow(),
            outcome.failures.len()
        );
        for (path, error) in &outcome.failures {
            println!("  {}: {}", path.display(), error);
        }
    }

    Ok(outcome)
}
