use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use eye_model::config::{CliArgs, ModelConfig, OutputFormat};
use eye_model::pipeline::{Pipeline, print_summary};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Init tracing
    let filter = if args.verbose {
        EnvFilter::new("eye_model=debug")
    } else {
        EnvFilter::new("eye_model=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config: ModelConfig = args.into();

    // Configure rayon thread pool
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure rayon thread pool")?;
    }

    match Pipeline::run(&config) {
        Ok(result) => {
            match config.format {
                OutputFormat::Text => {
                    print_summary(&result);
                    println!(
                        "Done: {} parts built in {:.2}s",
                        result.scene_objects,
                        result.duration.as_secs_f64()
                    );
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&result)
                        .context("Failed to serialize summary")?;
                    println!("{json}");
                }
            }
            Ok(())
        }
        Err(e) => {
            error!(%e, "Model build failed");
            Err(anyhow::anyhow!(e)).context("eye-model build failed")
        }
    }
}
