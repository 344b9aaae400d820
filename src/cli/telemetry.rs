use anyhow::Result;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow::anyhow!("unknown log format: {other}")),
        }
    }
}

fn filter(verbosity_level: Level) -> Result<EnvFilter> {
    // RUST_LOG= takes precedence over the default level
    Ok(EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("tokio=error".parse()?))
}

/// Initialize logging.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init(verbosity_level: Option<Level>, format: LogFormat) -> Result<()> {
    let filter = filter(verbosity_level.unwrap_or(Level::ERROR))?;

    match format {
        LogFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_target(false)
                .pretty();

            let subscriber = Registry::default().with(fmt_layer).with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .json()
                .flatten_event(true);

            let subscriber = Registry::default().with(fmt_layer).with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
