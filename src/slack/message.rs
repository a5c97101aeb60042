//! Send plain text messages to the configured Slack channel.

use super::{api::*, channel::ChannelId, SlackError};
use serde::{de::IgnoredAny, Serialize};

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
struct MessageRequest<'a> {
    channel: &'a ChannelId,
    text: &'a str,
}

impl SlackClient {
    /// Post a plain text message in the configured channel. The bot must
    /// already be a member of it.
    pub async fn post_message(&self, text: &str) -> Result<(), SlackError> {
        let req = self.post(ApiCall::PostMessage).json(&MessageRequest {
            channel: self.config().channel(),
            text,
        });

        let (_, body) = dispatch(ApiCall::PostMessage, req).await?;
        decode::<IgnoredAny>(ApiCall::PostMessage, body)?;

        Ok(())
    }
}
