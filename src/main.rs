//! admission-survey entry point
//!
//! Parses the command line, then hands off to `cli::run`. Errors are printed
//! to stderr and the process exits non-zero.

use admission_survey::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("[{}] {}", e.code(), e);
        std::process::exit(1);
    }
}
