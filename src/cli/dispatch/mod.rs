use crate::{
    cli::{
        actions::{find, server, Action},
        commands::ARG_ACCESS_TOKEN,
        globals::GlobalArgs,
    },
    model::{OrderBy, SearchRequest},
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("server", sub_m)) => {
            let globals = globals(sub_m)?;
            let port = sub_m.get_one::<u16>("port").copied().unwrap_or(8080);
            let dataset = sub_m
                .get_one::<String>("dataset")
                .map(PathBuf::from)
                .context("missing required argument: --dataset")?;

            Ok(Action::Server(server::Args {
                port,
                dataset,
                globals,
            }))
        }
        Some(("find", sub_m)) => {
            let globals = globals(sub_m)?;
            let url = sub_m
                .get_one::<String>("url")
                .cloned()
                .context("missing required argument: --url")?;

            let request = SearchRequest {
                limit: sub_m.get_one::<i64>("limit").copied().unwrap_or(0),
                offset: sub_m.get_one::<i64>("offset").copied().unwrap_or(0),
                query: sub_m.get_one::<String>("query").cloned().unwrap_or_default(),
                order_field: sub_m
                    .get_one::<String>("order-field")
                    .cloned()
                    .unwrap_or_default(),
                order_by: sub_m
                    .get_one::<OrderBy>("order-by")
                    .copied()
                    .unwrap_or_default(),
            };

            let timeout = Duration::from_secs(sub_m.get_one::<u64>("timeout").copied().unwrap_or(1));

            Ok(Action::Find(find::Args {
                url,
                request,
                timeout,
                globals,
            }))
        }
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let access_token = matches
        .get_one::<String>(ARG_ACCESS_TOKEN)
        .cloned()
        .context("missing required argument: --access-token")?;

    Ok(GlobalArgs::new(SecretString::from(access_token)))
}
