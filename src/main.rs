use simpledb::{repl, Table};
use std::io;
use std::path::PathBuf;
use std::process::exit;

/// Backing file used when no path argument is given
const DEFAULT_DB_PATH: &str = "dbfile";

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

    let table = match Table::open(&path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: failed to open database {}: {}", path.display(), e);
            exit(1);
        }
    };

    let stdin = io::stdin();
    if let Err(e) = repl::run(table, stdin.lock(), io::stdout()) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}
