//! CLI argument parsing for Verdant
//!
//! Two subcommands:
//! - serve: run the catalog query API
//! - generate: populate missing plant illustrations

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Verdant - plant catalog server and illustration pipeline
#[derive(Parser, Debug)]
#[command(name = "verdant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the catalog query API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind; the next free port is used when taken
        #[arg(long, default_value_t = 8000)]
        port: u16,

        /// Catalog CSV file
        #[arg(long, default_value = "tropical-plants.csv")]
        csv: PathBuf,

        /// Directory served under /images
        #[arg(long, default_value = "img")]
        images_dir: PathBuf,

        /// Disable the permissive development CORS layer
        #[arg(long)]
        no_cors: bool,
    },

    /// Generate missing plant illustrations
    ///
    /// For every catalog row whose illustration is not already on disk,
    /// submits a generation task to the NanoBanana API, polls it to
    /// completion and downloads the result. Rows already satisfied are
    /// skipped, so interrupted runs can simply be restarted.
    ///
    /// Requires the NANOBANANA_API_KEY environment variable unless
    /// --dry-run is given.
    Generate {
        /// Catalog CSV file
        #[arg(long, default_value = "tropical-plants.csv")]
        csv: PathBuf,

        /// Directory downloaded images are written to
        #[arg(long, default_value = "img")]
        out_dir: PathBuf,

        /// Start from row N (0-indexed)
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Only process N rows
        #[arg(long)]
        limit: Option<usize>,

        /// Print intended actions without making API calls
        #[arg(long)]
        dry_run: bool,

        /// Enable verbose logging
        #[arg(long, short = 'v')]
        verbose: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_a_subcommand() {
        let cli = Cli::try_parse_from(["verdant"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["verdant", "serve"]).unwrap();
        match cli.command {
            Command::Serve {
                host,
                port,
                csv,
                images_dir,
                no_cors,
            } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8000);
                assert_eq!(csv, PathBuf::from("tropical-plants.csv"));
                assert_eq!(images_dir, PathBuf::from("img"));
                assert!(!no_cors);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "verdant", "generate", "--start", "10", "--limit", "5", "--dry-run", "-v",
        ])
        .unwrap();
        match cli.command {
            Command::Generate {
                start,
                limit,
                dry_run,
                verbose,
                ..
            } => {
                assert_eq!(start, 10);
                assert_eq!(limit, Some(5));
                assert!(dry_run);
                assert!(verbose);
            }
            _ => panic!("expected generate"),
        }
    }
}
