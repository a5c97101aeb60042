//! Post messages, optionally with a file attached, to a Slack channel.
//!
//! See [SlackClient::send].

pub mod api;
pub mod auth;
pub mod channel;
pub mod config;
pub mod error;
mod message;
mod send;
pub mod upload;

pub use api::SlackClient;
pub use config::ClientConfig;
pub use error::SlackError;
pub use send::{Delivery, OperationResult};
