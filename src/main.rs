//! Post a single message to Slack from the command line, optionally with a
//! file attached.
//!
//! ```sh
//! courier "Nightly export finished" ./export.csv
//! ```
//!
//! Configuration is read from the environment, or a `.env` file:
//!
//! - `SLACK_TOKEN`: a bot token with `chat:write` and `files:write`.
//! - `SLACK_CHANNEL`: the ID of the channel to post in.
//! - `SLACK_API_BASE`: optional, defaults to Slack's own API.

use courier::slack::{api::API_BASE, ClientConfig, OperationResult, SlackClient};
use dotenvy::dotenv;
use std::{env, path::PathBuf, process::ExitCode};
use tracing::{error, warn};

/// Application entrypoint. Initialises tracing, checks for environment
/// variables, and sends once.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let (token, channel) = match (env::var("SLACK_TOKEN"), env::var("SLACK_CHANNEL")) {
        (Ok(token), Ok(channel)) => (token, channel),
        _ => {
            error!("Both $SLACK_TOKEN and $SLACK_CHANNEL must be set");
            return ExitCode::FAILURE;
        }
    };

    let mut args = env::args().skip(1);
    let Some(message) = args.next() else {
        error!("Usage: courier <message> [file]");
        return ExitCode::FAILURE;
    };
    let file = args.next().map(PathBuf::from);

    let base = env::var("SLACK_API_BASE").unwrap_or_else(|_| API_BASE.into());
    let client = SlackClient::with_base(base, ClientConfig::new(token, channel));

    let res = client.send(&message, file.as_deref()).await;
    let op = OperationResult::from(&res);

    match op.last_error() {
        None => ExitCode::SUCCESS,
        Some(es) => {
            error!("{}", es);
            if let Some(data) = op.error_data() {
                error!("Slack responded with {}", data);
            }
            ExitCode::FAILURE
        }
    }
}
