//! Type definitions and helpers for the Slack API.

use super::{auth::to_auth_header_val, config::ClientConfig, error::SlackError};
use reqwest::{header, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;
use url::Url;

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// The remote calls we make, used to attribute failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// <https://api.slack.com/methods/chat.postMessage>
    PostMessage,
    /// <https://api.slack.com/methods/files.getUploadURLExternal>
    GetUploadUrl,
    /// The one-off URL handed out by [ApiCall::GetUploadUrl]. Not part of the
    /// Web API proper.
    UploadFile,
    /// <https://api.slack.com/methods/files.completeUploadExternal>
    CompleteUpload,
}

impl ApiCall {
    /// Whether the raw response is kept alongside an error Slack reports for
    /// this call.
    fn keeps_payload(self) -> bool {
        matches!(self, ApiCall::PostMessage | ApiCall::GetUploadUrl)
    }
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ApiCall::PostMessage => "chat.postMessage",
            ApiCall::GetUploadUrl => "files.getUploadURLExternal",
            ApiCall::UploadFile => "upload URL",
            ApiCall::CompleteUpload => "files.completeUploadExternal",
        };

        write!(f, "{}", x)
    }
}

/// Posts to a single channel on behalf of a single bot. Holds a connection
/// pool internally, as per [reqwest::Client].
pub struct SlackClient {
    base: String,
    http: reqwest::Client,
    config: ClientConfig,
}

impl SlackClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_base(API_BASE.into(), config)
    }

    /// Target a Slack API lookalike at `base` instead, without a trailing
    /// slash.
    pub fn with_base(base: String, config: ClientConfig) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a POST request to any Slack API method, handling
    /// authentication.
    pub(super) fn post(&self, call: ApiCall) -> RequestBuilder {
        self.http
            .post(format!("{}/{}", self.base, call))
            .header(header::AUTHORIZATION, to_auth_header_val(self.config.token()))
    }

    /// Create a POST request to a one-off upload URL. These are
    /// pre-authorised, so no token is sent.
    pub(super) fn upload(&self, url: Url) -> RequestBuilder {
        self.http.post(url)
    }
}

/// Send a request and read the response body in full, whatever its status.
pub(super) async fn dispatch(
    call: ApiCall,
    req: RequestBuilder,
) -> Result<(StatusCode, String), SlackError> {
    debug!("Calling {}", call);

    let failed = |source| SlackError::APIRequestFailed { call, source };

    let res = req.send().await.map_err(failed)?;
    let status = res.status();
    let body = res.text().await.map_err(failed)?;

    debug!("{} responded with {}", call, status);

    Ok((status, body))
}

/// Slack's API returns a common envelope, representing whether a request was
/// successful.
///
/// ```json
/// {
///     "ok": true,
///     "file_id": "F0123456789"
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
// `ok` is read by truthiness, and an absent one is treated like a false one.
// An `error` that isn't a string is ignored.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default, deserialize_with = "crate::de::truthy")]
    ok: bool,
    #[serde(default, deserialize_with = "crate::de::only_string")]
    error: Option<String>,
}

/// Decode a Slack API response body, first checking the envelope and then
/// the shape `T` expected of a successful response.
pub(super) fn decode<T: DeserializeOwned>(call: ApiCall, body: String) -> Result<T, SlackError> {
    let value = match serde_json::from_str::<Value>(&body) {
        Ok(x @ Value::Object(_)) => x,
        _ => return Err(SlackError::APIResponseMalformed { call, body }),
    };

    let envelope = match Envelope::deserialize(&value) {
        Ok(x) => x,
        Err(_) => return Err(SlackError::APIResponseMalformed { call, body }),
    };

    if !envelope.ok {
        return Err(SlackError::APIResponseError {
            call,
            error: envelope.error.unwrap_or_else(|| "unknown".into()),
            payload: call.keeps_payload().then_some(value),
        });
    }

    T::deserialize(&value).map_err(|_| SlackError::APIResponseMalformed { call, body })
}
