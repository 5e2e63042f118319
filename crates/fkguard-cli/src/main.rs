use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fkguard_core::{Config, DialectConfig, Report};
use fkguard_engine::RuleChecker;
use fkguard_sql::SqlParser;

mod discover;

use discover::discover_sql_files;

/// fkguard - cross-schema foreign key checker for SQL migrations
#[derive(Parser, Debug)]
#[command(name = "fkguard")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("schema_source").required(true).args(["config", "schemas"])))]
struct Cli {
    /// Files or directories to scan for *.sql (comma separated lists accepted)
    #[arg(required = true, value_delimiter = ',')]
    paths: Vec<PathBuf>,

    /// Schema map file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inline JSON schema map, e.g. '{"billing": ["invoices"]}'
    #[arg(long)]
    schemas: Option<String>,

    /// SQL dialect (generic, mysql, postgres, sqlite); overrides the config file
    #[arg(short, long)]
    dialect: Option<DialectConfig>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Skip files that fail to parse instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per violation
    Text,

    /// Versioned JSON report
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = run(&cli)?;

    match cli.format {
        OutputFormat::Text => {
            for line in outcome.report.render_lines() {
                println!("{}", line);
            }
        }
        OutputFormat::Json => println!("{}", outcome.report.to_json()?),
    }

    if !outcome.skipped.is_empty() {
        return Err(anyhow::anyhow!(
            "{} file(s) could not be parsed and were skipped",
            outcome.skipped.len()
        ));
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Result of one run over all discovered files
struct Outcome {
    report: Report,

    /// Files skipped under `--keep-going`
    skipped: Vec<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match (&cli.config, &cli.schemas) {
        (Some(path), _) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        (None, Some(json)) => Config::from_json(json).context("failed to parse --schemas")?,
        (None, None) => anyhow::bail!("either --config or --schemas is required"),
    };

    if let Some(dialect) = cli.dialect {
        config.dialect = dialect;
    }

    Ok(config)
}

fn run(cli: &Cli) -> Result<Outcome> {
    let config = load_config(cli)?;
    let index = config.schema_index().context("invalid schema config")?;

    if cli.verbose {
        eprintln!(
            "{} {} tables across {} schemas (dialect: {:?})",
            "Governing".cyan(),
            index.len(),
            index.schemas().len(),
            config.dialect
        );
    }

    let sql_files = discover_sql_files(&cli.paths)?;
    let checker = RuleChecker::new(index);
    let parser = SqlParser::from_dialect(config.dialect);

    let mut report = Report::new();
    let mut skipped = Vec::new();

    for sql_file in sql_files {
        let display = sql_file.display().to_string();

        let sql = std::fs::read_to_string(&sql_file)
            .with_context(|| format!("failed to read {}", display))?;

        let result = match checker.check_sql(&parser, &sql) {
            Ok(result) => result,
            Err(e) if cli.keep_going => {
                eprintln!("{} skipping {}: {}", "warning:".yellow().bold(), display, e);
                skipped.push(sql_file);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to check {}", display));
            }
        };

        if cli.verbose {
            if result.is_clean() {
                eprintln!("  {} {}", "✓".green(), display);
            } else {
                eprintln!("  {} {} ({} violations)", "✗".red(), display, result.violations.len());
            }
        }

        report.add_file(display, result.statements, result.foreign_keys, result.violations);
    }

    if cli.verbose {
        eprintln!(
            "Checked {} files, {} foreign keys, {} violations",
            report.summary.files_checked,
            report.summary.foreign_keys_checked,
            report.summary.violations
        );
    }

    Ok(Outcome { report, skipped })
}
