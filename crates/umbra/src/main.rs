use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use umbra_engine::config::{BackendKind, ConfigLoader, UmbraConfig};
use umbra_engine::{DocumentBackend, Outcome, Resolver, ResultCache};
use umbra_h::{HeadlessBackend, RendererPool};
use umbra_s::StaticBackend;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    /// Plain HTTP fetch + HTML parser
    Static,
    /// Headless Chromium via CDP
    Headless,
}

#[derive(Parser)]
#[command(
    name = "umbra",
    version,
    about = "Look up a black hole's mass on a configured web source"
)]
struct Args {
    /// Object name to resolve, e.g. "Sagittarius A*"
    name: String,

    /// Config file (default: ./umbra.yaml, then ~/.umbra/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the backend chosen in the config
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Launch the browser in visible mode (headless backend only)
    #[arg(long)]
    visible: bool,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr; stdout carries only the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from(path).await?,
        None => ConfigLoader::load_default().await?,
    };

    let backend_kind = match args.backend {
        Some(BackendArg::Static) => BackendKind::Static,
        Some(BackendArg::Headless) => BackendKind::Headless,
        None => config.backend.kind,
    };

    let backend = build_backend(&config, backend_kind, args.visible);
    let strategy = config.strategy.build()?;
    let options = config.resolver_options()?;

    let mut resolver = Resolver::new(backend, strategy, options);
    if config.cache.enabled {
        resolver = resolver.with_cache(ResultCache::new(Duration::from_secs(config.cache.ttl_secs)));
    }

    let result = resolver.resolve(&args.name).await;
    if let Err(e) = resolver.shutdown().await {
        tracing::warn!("shutdown failed: {}", e);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    std::process::exit(match result.outcome() {
        Outcome::Success => 0,
        Outcome::SoftFail => 1,
        Outcome::HardFail => 2,
    });
}

fn build_backend(
    config: &UmbraConfig,
    kind: BackendKind,
    visible: bool,
) -> Box<dyn DocumentBackend> {
    match kind {
        BackendKind::Static => Box::new(StaticBackend::new(Duration::from_secs(
            config.source.timeout_secs,
        ))),
        BackendKind::Headless => {
            let pool = Arc::new(RendererPool::new(
                config.backend.max_renderers,
                visible || config.backend.visible,
            ));
            Box::new(HeadlessBackend::new(pool))
        }
    }
}
