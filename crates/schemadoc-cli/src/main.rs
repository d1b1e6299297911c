use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use schemadoc_core::config::DEFAULT_CONFIG_FILE;
use schemadoc_core::{load_schema, Config, ConfigOverrides, Environment, LintReport, Schema};
use schemadoc_engine::{merge_additional_data, LintEngine};
use schemadoc_render::{diff_documents, write_documents, DiffLine};

/// schemadoc - Markdown documentation and lint for database schemas
#[derive(Parser)]
#[command(name = "schemadoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: schemadoc.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that render documents
#[derive(Args)]
struct RenderArgs {
    /// Reflected schema snapshot (JSON)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output directory for the Markdown documents
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pad Markdown table cells to equal width
    #[arg(long)]
    adjust: bool,

    /// Sort tables and columns by name
    #[arg(long)]
    sort: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Markdown documents for the schema
    Doc {
        #[command(flatten)]
        render: RenderArgs,

        /// Overwrite existing documents
        #[arg(short, long)]
        force: bool,
    },

    /// Show how the documents on disk differ from a fresh rendering
    Diff {
        #[command(flatten)]
        render: RenderArgs,
    },

    /// Check the schema against the configured lint rules
    Lint {
        /// Reflected schema snapshot (JSON)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Also write the lint report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Print the merged schema snapshot as JSON
    Out {
        /// Reflected schema snapshot (JSON)
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let env = environment();
    let overrides = overrides(&cli.command);

    let config_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };
    if config_path.is_none() {
        debug!("no config file found, using defaults");
    }

    let config = Config::load(config_path.as_deref(), &env, &overrides)
        .context("Failed to load config")?;

    if !config.dsn.is_empty() {
        match config.masked_dsn() {
            Ok(dsn) => info!(dsn = %dsn, "documenting database"),
            Err(e) => warn!(error = %e, "dsn is not a valid URL"),
        }
    }

    let schema = prepare_schema(&config)?;

    match cli.command {
        Commands::Doc { force, .. } => doc_command(&config, &schema, force),
        Commands::Diff { .. } => diff_command(&config, &schema),
        Commands::Lint { json, .. } => lint_command(&config, &schema, json.as_deref()),
        Commands::Out { .. } => out_command(&schema),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Process environment, with `.env` loaded first when present
fn environment() -> Environment {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "loaded .env");
    }
    std::env::vars().collect()
}

fn overrides(command: &Commands) -> ConfigOverrides {
    let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());

    match command {
        Commands::Doc { render, .. } | Commands::Diff { render } => ConfigOverrides {
            doc_path: path(&render.output),
            schema_path: path(&render.schema),
            adjust: render.adjust,
            sort: render.sort,
            ..ConfigOverrides::default()
        },
        Commands::Lint { schema, .. } | Commands::Out { schema } => ConfigOverrides {
            schema_path: path(schema),
            ..ConfigOverrides::default()
        },
    }
}

/// Load the snapshot and merge the configured relations and comments into it
fn prepare_schema(config: &Config) -> Result<Schema> {
    let schema_path = Path::new(&config.schema_path);
    let mut schema = load_schema(schema_path)
        .with_context(|| format!("Failed to load schema from {}", schema_path.display()))?;

    info!(
        schema = %schema.name,
        tables = schema.tables.len(),
        relations = schema.relations.len(),
        "loaded schema"
    );

    merge_additional_data(&mut schema, &config.relations, &config.comments)?;

    if config.format.sort {
        schema.sort();
    }

    Ok(schema)
}

/// Doc command - write Markdown documents
fn doc_command(config: &Config, schema: &Schema, force: bool) -> Result<()> {
    let doc_path = Path::new(&config.doc_path);
    let written = write_documents(schema, doc_path, force, &config.format)?;

    for path in &written {
        println!("{} {}", "wrote".green(), path.display());
    }

    Ok(())
}

/// Diff command - compare documents on disk with a fresh rendering
fn diff_command(config: &Config, schema: &Schema) -> Result<()> {
    let doc_path = Path::new(&config.doc_path);
    let diffs = diff_documents(schema, doc_path, &config.format)?;

    if diffs.is_empty() {
        eprintln!("{}", "✓ Documents are up to date".green());
        return Ok(());
    }

    for diff in &diffs {
        println!("{}", format!("--- {}", diff.path.display()).bold());
        println!("{}", format!("+++ {}", diff.path.display()).bold());
        for line in diff.changes() {
            match line {
                DiffLine::Added(_) => println!("{}", line.to_string().green()),
                DiffLine::Removed(_) => println!("{}", line.to_string().red()),
                DiffLine::Equal(_) => println!("{}", line),
            }
        }
    }

    std::process::exit(1);
}

/// Lint command - evaluate lint rules on the merged schema
fn lint_command(config: &Config, schema: &Schema, json: Option<&Path>) -> Result<()> {
    let report = LintEngine::from_config(&config.lint).report(schema);

    if let Some(path) = json {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "lint report saved");
    }

    print_lint_summary(&report);

    if report.has_warnings() {
        std::process::exit(1);
    }

    Ok(())
}

/// Out command - print the merged snapshot
fn out_command(schema: &Schema) -> Result<()> {
    let json = schema.to_snapshot().to_json()?;
    println!("{}", json);
    Ok(())
}

fn print_lint_summary(report: &LintReport) {
    if report.warnings.is_empty() {
        println!(
            "{} ({} tables checked)",
            "✓ No lint warnings".green().bold(),
            report.summary.tables_checked
        );
        return;
    }

    for warning in &report.warnings {
        println!("{} {}", warning.target.to_string().bold(), warning.message);
    }

    println!();
    println!(
        "{} in {} tables",
        format!("{} warnings", report.summary.total).yellow().bold(),
        report.summary.tables_checked
    );
    for (rule, count) in &report.summary.by_rule {
        println!("  {}: {}", rule, count);
    }
}
