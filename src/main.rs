//! CLI entry point for yass

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yass::cli::Args;
use yass::render::PandocRenderer;
use yass::Site;

fn main() -> Result<()> {
    let args = Args::parse_expanded(std::env::args_os())?;

    // Initialize logging
    let filter = if args.debug {
        "yass=debug,info"
    } else {
        "yass=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let site = Site::new(args.into_config());
    tracing::debug!("Configuration: {:?}", site.config);

    let renderer = PandocRenderer::new(&site.config);
    match renderer.locate() {
        Ok(path) => tracing::debug!("Using {:?}", path),
        Err(e) => {
            tracing::error!("Could not find {}. Is it installed?", renderer.program());
            return Err(e).context("Renderer unavailable");
        }
    }

    let report = site.generate(&renderer)?;
    if report.failed > 0 {
        tracing::warn!("{} render passes failed", report.failed);
    }
    println!("Generated successfully! ({})", report);

    Ok(())
}
