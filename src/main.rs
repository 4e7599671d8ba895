//! apidiff: binary API compatibility checker for JVM libraries
//!
//! Compares two API baseline snapshots and reports every binary-incompatible
//! change.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use apidiff::{
    cli,
    config::{
        load_or_default, AppConfig, CompareConfig, ComparePaths, ConfigPreset, Validatable,
        VisibilityFilter, CONFIG_FILE_STEM,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nBaseline Snapshots:",
        "\n  YAML or JSON documents of component type descriptors",
        "\n\nOutput Formats:",
        "\n  json, summary"
    )
}

#[derive(Parser)]
#[command(name = "apidiff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Binary API compatibility checker", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or no fail mode requested)
    1  Changes detected (--fail-on-change)
    2  Breaking changes detected (--fail-on-breaking)
    3  Error occurred

EXAMPLES:
    # Compare two releases with auto-detected output
    apidiff compare release-1.yaml release-2.yaml

    # CI/CD pipeline check
    apidiff compare base.yaml head.yaml -o summary --fail-on-breaking

    # Export JSON for processing, API and SPI only
    apidiff compare base.yaml head.yaml --visibility api-spi -o json > delta.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "APIDIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `compare` subcommand
#[derive(Parser)]
struct CompareArgs {
    /// Path to the old (reference) baseline snapshot
    old: PathBuf,

    /// Path to the new baseline snapshot
    new: PathBuf,

    /// Only compare this component; may be repeated
    #[arg(short, long = "component")]
    components: Vec<String>,

    /// Visibility levels to compare
    #[arg(long, value_enum)]
    visibility: Option<VisibilityFilter>,

    /// Skip types whose qualified name matches this regex; may be repeated
    #[arg(long = "exclude")]
    exclude: Vec<String>,

    /// Output format (auto: summary if interactive, json otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 2 if breaking changes are found
    #[arg(long)]
    fail_on_breaking: bool,

    /// Exit with code 1 if any change is found
    #[arg(long)]
    fail_on_change: bool,

    /// Only report breaking changes
    #[arg(long)]
    only_breaking: bool,

    /// Start from a named preset (api, api-spi, all)
    #[arg(long)]
    preset: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two API baseline snapshots
    Compare(CompareArgs),

    /// Show, validate, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate an example .apidiff.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Compare(args) => {
            let (file_config, loaded_from) = load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                tracing::info!("Using config file {}", path.display());
            }

            let mut config = match args.preset.as_deref() {
                Some(name) => {
                    let preset = ConfigPreset::from_name(name).with_context(|| {
                        format!("unknown preset '{name}' (expected api, api-spi or all)")
                    })?;
                    let mut base = AppConfig::from_preset(preset);
                    base.merge(&file_config);
                    base
                }
                None => file_config,
            };

            let mut overrides = AppConfig::builder()
                .visibility(args.visibility.unwrap_or_default())
                .only_breaking(args.only_breaking)
                .output_format(args.output)
                .output_file(args.output_file)
                .no_color(cli.no_color)
                .fail_on_breaking(args.fail_on_breaking)
                .fail_on_change(args.fail_on_change)
                .quiet(cli.quiet);
            for component in args.components {
                overrides = overrides.component(component);
            }
            for pattern in args.exclude {
                overrides = overrides.exclude_type(pattern);
            }
            config.merge(&overrides.build());

            let config = CompareConfig::from_app(
                ComparePaths {
                    old: args.old,
                    new: args.new,
                },
                config,
            );
            let errors = config.validate();
            if !errors.is_empty() {
                for error in &errors {
                    tracing::error!("{error}");
                }
                anyhow::bail!("invalid configuration ({} errors)", errors.len());
            }

            let exit_code = cli::run_compare(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "apidiff", &mut io::stdout());
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                for error in config.validate() {
                    eprintln!("# warning: {error}");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Schema { output } => {
                let schema = apidiff::config::generate_json_schema();
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => {
                        println!("{schema}");
                    }
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(format!(".{CONFIG_FILE_STEM}.yaml"));
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = apidiff::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
