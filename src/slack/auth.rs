//! Helpers around Slack's use of OAuth Bearer Authentication.

use std::fmt;

/// A newtype wrapper around Slack bot access tokens.
#[derive(PartialEq, Eq, Clone)]
pub struct SlackAccessToken(pub String);

/// Redacted, so that configuration can be logged safely.
impl fmt::Debug for SlackAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlackAccessToken(***)")
    }
}

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
///
/// ```
/// use courier::slack::auth::*;
///
/// let token = SlackAccessToken("xoxb-foo".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer xoxb-foo");
/// ```
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}
