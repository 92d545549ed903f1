mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vd_catalog::Catalog;
use vd_imagegen::{NanoBananaClient, Pipeline, PipelineConfig};
use vd_server::{start_server, ServerConfig};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Command::Generate { verbose: true, .. });
    init_logging(verbose);

    match cli.command {
        Command::Serve {
            host,
            port,
            csv,
            images_dir,
            no_cors,
        } => {
            let catalog = Arc::new(Catalog::load(&csv));
            let config = ServerConfig {
                host,
                port,
                images_dir,
                enable_cors: !no_cors,
            };

            let (_state, handle, _port) = start_server(config, catalog).await?;
            handle.await?;
        }
        Command::Generate {
            csv,
            out_dir,
            start,
            limit,
            dry_run,
            ..
        } => {
            let client = if dry_run {
                None
            } else {
                let api_key = std::env::var("NANOBANANA_API_KEY")
                    .ok()
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "NANOBANANA_API_KEY environment variable not set; \
                             export it or run with --dry-run"
                        )
                    })?;
                Some(NanoBananaClient::new(api_key))
            };

            let config = PipelineConfig {
                csv_path: csv,
                output_dir: out_dir,
                start,
                limit,
                dry_run,
                ..Default::default()
            };

            let summary = Pipeline::new(config, client).run().await?;
            info!(
                "Successful: {} | Errors: {} | Skipped: {}",
                summary.succeeded, summary.failed, summary.skipped
            );
        }
    }

    Ok(())
}

/// Initialize logging. `--verbose` forces debug everywhere; otherwise
/// RUST_LOG is honored with an info-level default for our crates.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "verdant=info,vd_cli=info,vd_catalog=info,vd_server=info,vd_imagegen=info".into()
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
