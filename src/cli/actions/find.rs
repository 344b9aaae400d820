use crate::{client::SearchClient, cli::globals::GlobalArgs, model::SearchRequest};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub url: String,
    pub request: SearchRequest,
    pub timeout: Duration,
    pub globals: GlobalArgs,
}

/// Execute the find action, printing the page as JSON on stdout.
/// # Errors
/// Returns an error if the client cannot be built or the search fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = SearchClient::with_timeout(&args.url, args.globals.access_token, args.timeout)?;

    debug!("Searching {} with {:?}", client.url(), args.request);

    let response = client
        .find_users(&args.request)
        .await
        .with_context(|| format!("search against {} failed", args.url))?;

    let json = serde_json::to_string_pretty(&response)?;
    println!("{json}");

    Ok(())
}
