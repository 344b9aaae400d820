use crate::{
    cli::globals::GlobalArgs,
    directory::Directory,
    server::{self, SearchState},
};
use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dataset: PathBuf,
    pub globals: GlobalArgs,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the dataset cannot be loaded or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let directory = Directory::load(&args.dataset)
        .with_context(|| format!("Could not load dataset {}", args.dataset.display()))?;

    info!("Loaded {} users", directory.len());
    debug!("Global args: {:?}", args.globals);

    let state = SearchState::new(Arc::new(directory), args.globals.access_token);

    server::new(args.port, state).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("dataset", args.dataset.display().to_string()),
        ("access_token", "REDACTED".to_string()),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {}\n\n{title}:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[tokio::test]
    async fn test_execute_missing_dataset() {
        let args = Args {
            port: 0,
            dataset: PathBuf::from("/nonexistent/usersearch/dataset.json"),
            globals: GlobalArgs::new(SecretString::from("access allowed".to_string())),
        };

        let err = execute(args).await.err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("Could not load dataset /nonexistent/usersearch/dataset.json")
        );
    }
}
