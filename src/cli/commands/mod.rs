pub mod logging;

use crate::model::OrderBy;
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub const ARG_ACCESS_TOKEN: &str = "access-token";

#[must_use]
pub fn validator_order_by() -> ValueParser {
    ValueParser::from(move |order: &str| -> std::result::Result<OrderBy, String> {
        order.parse::<OrderBy>().map_err(|err| err.to_string())
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("usersearch")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_ACCESS_TOKEN)
                .long("access-token")
                .help("Shared secret sent and expected in the AccessToken header")
                .env("USERSEARCH_ACCESS_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .subcommand(server())
        .subcommand(find());

    logging::with_args(command)
}

fn server() -> Command {
    Command::new("server")
        .about("Serve the search endpoint over a dataset file")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("USERSEARCH_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .help("JSON dataset with the users to serve")
                .env("USERSEARCH_DATASET")
                .required(true),
        )
}

fn find() -> Command {
    Command::new("find")
        .about("Query a running search endpoint and print the result as JSON")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .help("Search endpoint URL")
                .default_value("http://127.0.0.1:8080")
                .env("USERSEARCH_URL"),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .help("Page size, 0 for no cap")
                .default_value("25")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("offset")
                .short('o')
                .long("offset")
                .help("Number of matching users to skip")
                .default_value("0")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .help("Substring to look for in name and about")
                .default_value(""),
        )
        .arg(
            Arg::new("order-field")
                .long("order-field")
                .help("Sort field: Id, Age or Name")
                .default_value(""),
        )
        .arg(
            Arg::new("order-by")
                .long("order-by")
                .help("Sort direction: asc, desc, as-is (or 1, -1, 0)")
                .default_value("as-is")
                .allow_negative_numbers(true)
                .value_parser(validator_order_by()),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("1")
                .env("USERSEARCH_TIMEOUT")
                .value_parser(clap::value_parser!(u64)),
        )
}
