use std::env;

use anyhow::Result;
use moneyfinder::{Directory, format_location};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <zip_codes> [table]", args[0]);
        eprintln!("  zip_codes: comma-separated, no spaces (e.g., 10001,90210)");
        eprintln!("  table: JSON table asset (default: built-in table)");
        std::process::exit(1);
    }

    let zips = parse_zips(&args[1]);

    let directory = match args.get(2) {
        Some(path) => Directory::from_path(path)?,
        None => Directory::builtin(),
    };

    for zip in zips {
        let resolution = directory.lookup(zip);
        println!("{}", resolution);
        if let Some(location) = format_location(zip) {
            println!("  Location: {}", location);
        }
    }

    Ok(())
}

/// Split the comma-separated argument. Entries are resolved exactly as given;
/// empty ones fall back.
fn parse_zips(arg: &str) -> Vec<&str> {
    arg.split(',').collect()
}
