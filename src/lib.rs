//! Post messages, optionally with a file attached, to a Slack
//! channel.
//!
//! ```no_run
//! use courier::slack::{ClientConfig, SlackClient};
//!
//! # async fn run() {
//! let client = SlackClient::new(ClientConfig::new("xoxb-token", "C0123456789"));
//! let res = client.send("Nightly export finished", None).await;
//! # }
//! ```

mod de;
pub mod slack;
