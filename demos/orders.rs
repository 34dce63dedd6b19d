//! Walks an ORDERS table through create, insert, select and delete.
//!
//! ```text
//! RUST_LOG=sqlite_tools=debug cargo run --example orders -- --db /tmp/orders.db
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sqlite_tools::{Columns, Row, SqliteTools};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Run the ORDERS walkthrough against a SQLite file")]
struct Args {
    /// Database file to use (created if missing)
    #[arg(long, default_value = "sqlite.db")]
    db: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let table = "ORDERS";
    let connector = SqliteTools::new(&args.db);

    let columns = Columns::new()
        .with_column("item", "text")
        .with_column("numbers", "int");
    connector.create(table, &columns)?;

    connector.insert(
        table,
        &[
            Row::new().with_value("item", "car").with_value("numbers", "123"),
            Row::new()
                .with_value("item", "elden_ring")
                .with_value("numbers", "456"),
        ],
    )?;

    let found = connector.select(table, "numbers=123")?;
    println!("{found:?}");

    connector.delete(table, "numbers=123")?;
    println!("{:?}", connector.select(table, "")?);
    Ok(())
}
