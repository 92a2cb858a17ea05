//! Mipha CLI - translate cube definitions to SQL and run them
//!
//! Usage:
//!   mipha [--config <mipha.toml>] [--connector <name>] tables
//!   mipha translate <cube.toml> [--aliases]
//!   mipha run <cube.toml> [--format table|json|count]
//!
//! Examples:
//!   mipha --connector sample tables
//!   mipha translate cubes/demo.toml --aliases
//!   mipha run cubes/demo.toml --format count

use clap::{Parser, Subcommand, ValueEnum};
use mipha::config::{Connector, Settings};
use mipha::datasource::DataSource;
use mipha::definition::CubeDefinition;
use mipha::execution::{ResultSet, SqlExecutor, SqliteExecutor};
use mipha::metadata::{MetadataResolver, SqliteMetadataResolver};
use mipha::translator::{SqlTranslator, Translation};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mipha")]
#[command(about = "Mipha - translate OLAP cube definitions into join SQL")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to MIPHA_CONFIG, ./mipha.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Connector to use (defaults to the configured default connector)
    #[arg(long, global = true)]
    connector: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tables visible through the connector
    Tables,

    /// Translate a cube definition to SQL
    Translate {
        /// Path to the cube definition (.toml)
        file: PathBuf,

        /// Also print the alias assigned to each table
        #[arg(long)]
        aliases: bool,
    },

    /// Translate a cube definition and execute it
    Run {
        /// Path to the cube definition (.toml)
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Aligned text columns
    Table,
    /// One JSON object per row
    Json,
    /// Row count only
    Count,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let source = match open_source(cli.config.as_deref(), cli.connector.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Tables => cmd_tables(source).await,
        Commands::Translate { file, aliases } => cmd_translate(source, file, aliases).await,
        Commands::Run { file, format } => cmd_run(source, file, format).await,
    }
}

fn open_source(
    config: Option<&Path>,
    connector: Option<&str>,
) -> Result<DataSource, Box<dyn std::error::Error>> {
    let settings = match config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load()?,
    };
    let connector: Connector = match connector {
        Some(name) => settings.connector(name)?,
        None => settings.default_connector()?,
    };
    Ok(DataSource::open(&connector)?)
}

async fn cmd_tables(source: DataSource) -> ExitCode {
    let resolver = SqliteMetadataResolver::new(source);
    match resolver.list_tables().await {
        Ok(tables) => {
            for table in tables {
                println!("{}", table);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error listing tables: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn translate_file(source: &DataSource, file: &Path) -> Option<Translation> {
    let definition = match CubeDefinition::from_file(file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error loading '{}': {}", file.display(), e);
            return None;
        }
    };

    let resolver = SqliteMetadataResolver::new(source.clone());
    let cube = match definition.resolve(&resolver).await {
        Ok(cube) => cube,
        Err(e) => {
            eprintln!("Error resolving cube '{}': {}", definition.name, e);
            return None;
        }
    };

    match SqlTranslator::new().translate_with_aliases(&cube) {
        Ok(translation) => {
            for diagnostic in &translation.diagnostics {
                eprintln!("warning: {}", diagnostic);
            }
            Some(translation)
        }
        Err(e) => {
            eprintln!("Error translating cube '{}': {}", cube.name(), e);
            None
        }
    }
}

async fn cmd_translate(source: DataSource, file: PathBuf, aliases: bool) -> ExitCode {
    let Some(translation) = translate_file(&source, &file).await else {
        return ExitCode::FAILURE;
    };

    if aliases {
        for entry in translation.aliases.entries() {
            println!("-- {}: {}", entry.alias, entry.key);
        }
        println!();
    }
    println!("{}", translation.sql);
    ExitCode::SUCCESS
}

async fn cmd_run(source: DataSource, file: PathBuf, format: OutputFormat) -> ExitCode {
    let Some(translation) = translate_file(&source, &file).await else {
        return ExitCode::FAILURE;
    };

    let executor = SqliteExecutor::new(source);
    let result = match executor.query(&translation.sql).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error executing query: {}", e);
            eprintln!("{}", translation.sql);
            return ExitCode::FAILURE;
        }
    };

    match format {
        OutputFormat::Count => println!("{}", result.len()),
        OutputFormat::Json => {
            for row in result.to_objects() {
                println!("{}", serde_json::Value::Object(row));
            }
        }
        OutputFormat::Table => print_table(&result),
    }
    ExitCode::SUCCESS
}

fn print_table(result: &ResultSet) {
    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.len()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(&result.columns));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for row in &cells {
        println!("{}", line(row));
    }
    println!("({} row(s))", result.len());
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
