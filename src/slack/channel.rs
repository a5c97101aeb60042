//! Identify the Slack channel that messages are delivered to.

use serde::Serialize;
use std::fmt;

/// Channels are referred to by their underlying ID rather than their name,
/// as names can change. The ID can be found in the UI by copying a link to
/// the channel.
///
/// No validation is performed; Slack will reject unknown IDs with
/// `channel_not_found`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChannelId(pub String);

/// Format without the surrounding newtype wrapper.
///
/// ```
/// use courier::slack::channel::ChannelId;
///
/// let x = ChannelId("C0123456789".into());
/// assert_eq!(format!("{}", x), "C0123456789");
/// ```
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
