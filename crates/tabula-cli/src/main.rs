//! tabula CLI
//!
//! Command-line tool for creating tables from schema files and editing rows.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tabula_core::render_create_table;
use tabula_sqlite::{Connection, ReleasePolicy, Transaction, Value};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use tabula_cli::{SchemaFile, parse_assignment};

/// Typed table schemas on an embedded SQLite database.
#[derive(Parser)]
#[command(name = "tabula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the database file.
    #[arg(short, long, env = "TABULA_DATABASE", default_value = "tabula.sqlite3")]
    database: PathBuf,

    /// Enable verbose output (logs every statement).
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create every table described in a schema file.
    Apply {
        /// Schema file (JSON).
        schema: PathBuf,
    },

    /// Print the CREATE TABLE statements for a schema file without
    /// touching the database.
    Print {
        /// Schema file (JSON).
        schema: PathBuf,
    },

    /// Insert one row.
    Insert {
        /// Target table.
        #[arg(short, long)]
        table: String,

        /// Values as column=value.
        #[arg(required = true, value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// Update the rows matching every condition.
    Update {
        /// Target table.
        #[arg(short, long)]
        table: String,

        /// New values as column=value.
        #[arg(long = "set", required = true, value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,

        /// Conditions as column=value.
        #[arg(long = "where", required = true, value_parser = parse_assignment)]
        conditions: Vec<(String, String)>,
    },

    /// Delete the rows where a column equals a value.
    Remove {
        /// Target table.
        #[arg(short, long)]
        table: String,

        /// Column to match.
        #[arg(short, long)]
        column: String,

        /// Value to match.
        #[arg(long)]
        value: String,
    },

    /// Print every row of a table.
    Dump {
        /// Table to print.
        #[arg(short, long)]
        table: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Commands::Print { schema } = &cli.command {
        let schema = SchemaFile::load(schema)?;
        for table in &schema.tables {
            let sql = render_create_table(&table.name, &table.columns()?, &table.composites()?)?;
            println!("{sql}");
        }
        return Ok(());
    }

    let mut conn = Connection::open(&cli.database)?;

    match cli.command {
        Commands::Print { .. } => {}

        Commands::Apply { schema } => {
            let schema = SchemaFile::load(&schema)?;
            let mut tx = Transaction::begin_with(&conn, ReleasePolicy::CommitOnSuccess)?;
            for table in &schema.tables {
                tx.create(&table.name, &table.columns()?, &table.composites()?)
                    .with_context(|| format!("creating table '{}'", table.name))?;
                info!(table = %table.name, "Created table");
            }
            tx.succeeded();
            tx.finish()?;
        }

        Commands::Insert { table, values } => {
            let mut tx = Transaction::begin_with(&conn, ReleasePolicy::CommitOnSuccess)?;
            tx.insert(&table, &values)?;
            tx.succeeded();
            tx.finish()?;
            info!(table = %table, "Inserted 1 row");
        }

        Commands::Update {
            table,
            assignments,
            conditions,
        } => {
            let mut tx = Transaction::begin_with(&conn, ReleasePolicy::CommitOnSuccess)?;
            tx.update(&table, &assignments, &conditions)?;
            tx.succeeded();
            tx.finish()?;
            info!(table = %table, "Updated rows");
        }

        Commands::Remove {
            table,
            column,
            value,
        } => {
            let mut tx = Transaction::begin_with(&conn, ReleasePolicy::CommitOnSuccess)?;
            tx.remove(&table, &column, &value)?;
            tx.succeeded();
            tx.finish()?;
            info!(table = %table, "Removed rows");
        }

        Commands::Dump { table } => {
            for row in conn.select_all(&table)? {
                let fields: Vec<String> = row.iter().map(display_value).collect();
                println!("{}", fields.join("|"));
            }
        }
    }

    conn.close()?;
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::from("NULL"),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
