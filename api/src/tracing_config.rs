use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

pub enum LogFormat {
    /// Indented, human-readable output for local development.
    Tree,
    /// One bunyan-style JSON object per line.
    Json,
}

impl LogFormat {
    pub fn for_env(production: bool) -> LogFormat {
        if production {
            LogFormat::Json
        } else {
            LogFormat::Tree
        }
    }
}

pub fn configure<W>(
    name: impl Into<String>,
    format: LogFormat,
    console_sink: W,
) -> Result<(), anyhow::Error>
where
    W: for<'a> MakeWriter<'a> + 'static + Send + Sync,
{
    LogTracer::builder()
        .ignore_crate("rustls")
        .with_max_level(log::LevelFilter::Debug)
        .init()?;

    let env_filter = EnvFilter::try_from_env("LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(env_filter)
        .with(ErrorLayer::default());

    match format {
        LogFormat::Tree => {
            let tree = HierarchicalLayer::new(2)
                .with_writer(console_sink)
                .with_targets(true)
                .with_bracketed_fields(true);
            set_global_default(subscriber.with(tree))?;
        }
        LogFormat::Json => {
            let formatting_layer = BunyanFormattingLayer::new(name.into(), console_sink);
            set_global_default(subscriber.with(JsonStorageLayer).with(formatting_layer))?;
        }
    }

    Ok(())
}
