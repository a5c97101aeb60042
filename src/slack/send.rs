//! The single entrypoint for delivering to Slack, choosing between a plain
//! message and a file upload.

use super::{api::SlackClient, SlackError};
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// What was successfully delivered by [SlackClient::send].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Message,
    File { file_id: String },
}

impl SlackClient {
    /// Post `message` in the configured channel, attaching the file at `file`
    /// if there is one and it can be read. Otherwise the message is sent on
    /// its own.
    ///
    /// Nothing is retried, and nothing is cleaned up on Slack's end should a
    /// file upload fail partway through.
    ///
    /// Each call returns its own outcome and the client holds no per-call
    /// state, so a single client may be shared between callers.
    pub async fn send(&self, message: &str, file: Option<&Path>) -> Result<Delivery, SlackError> {
        let readable = match file {
            Some(path) => is_readable_file(path).await,
            None => false,
        };

        let res = match file {
            Some(path) if readable => self
                .post_file(message, path)
                .await
                .map(|file_id| Delivery::File { file_id }),
            Some(path) => {
                warn!(
                    "Cannot read {}, sending message without it",
                    path.display()
                );
                self.post_message(message).await.map(|_| Delivery::Message)
            }
            None => self.post_message(message).await.map(|_| Delivery::Message),
        };

        if let Ok(delivery) = &res {
            info!("Delivered {:?} to {}", delivery, self.config().channel());
        }

        res
    }
}

async fn is_readable_file(path: &Path) -> bool {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_file() => fs::File::open(path).await.is_ok(),
        _ => false,
    }
}

/// A flattened view of the outcome of a single [SlackClient::send], for
/// callers that only want a flag and some diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    success: bool,
    error_message: Option<String>,
    error_payload: Option<Value>,
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The raw Slack response behind the error, for the calls that keep one.
    pub fn error_data(&self) -> Option<&Value> {
        self.error_payload.as_ref()
    }
}

impl<T> From<&Result<T, SlackError>> for OperationResult {
    fn from(res: &Result<T, SlackError>) -> Self {
        match res {
            Ok(_) => OperationResult {
                success: true,
                error_message: None,
                error_payload: None,
            },
            Err(e) => OperationResult {
                success: false,
                error_message: Some(e.to_string()),
                error_payload: e.payload().cloned(),
            },
        }
    }
}
