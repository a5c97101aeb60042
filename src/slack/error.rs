use super::api::ApiCall;
use reqwest::StatusCode;
use serde_json::Value;
use std::{fmt, io, path::PathBuf};

/// Sum type representing every possible unexceptional fail state.
#[derive(Debug)]
pub enum SlackError {
    /// The request never produced a response, or its body couldn't be read.
    APIRequestFailed {
        call: ApiCall,
        source: reqwest::Error,
    },
    /// The response body wasn't a JSON object, or didn't have the shape
    /// promised for a successful response.
    APIResponseMalformed { call: ApiCall, body: String },
    /// A well-formed response with a false or absent `ok`. `error` falls
    /// back to `unknown` when Slack didn't supply one.
    APIResponseError {
        call: ApiCall,
        error: String,
        payload: Option<Value>,
    },
    /// The upload URL request succeeded without naming where to upload to.
    IncompleteUploadTicket { missing: &'static str },
    /// The upload host answered with anything other than `200 OK`.
    UploadRejected { status: StatusCode, body: String },
    FileUnreadable { path: PathBuf, source: io::Error },
    ManifestEncoding(serde_json::Error),
}

impl SlackError {
    /// The raw response Slack sent alongside a reported error, where one was
    /// kept.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            SlackError::APIResponseError { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(e: serde_json::Error) -> Self {
        SlackError::ManifestEncoding(e)
    }
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            SlackError::APIRequestFailed { call, source } => {
                format!("Slack API request to {} failed: {}", call, source)
            }
            SlackError::APIResponseMalformed { call, body } => {
                format!("Slack API returned malformed response to {}: {}", call, body)
            }
            SlackError::APIResponseError { call, error, .. } => {
                format!("Slack API returned error for {}: {}", call, error)
            }
            SlackError::IncompleteUploadTicket { missing } => {
                format!("Slack API returned no upload ticket, missing {}", missing)
            }
            SlackError::UploadRejected { status, body } => {
                format!("File upload failed with HTTP {}: {}", status, body)
            }
            SlackError::FileUnreadable { path, source } => {
                format!("Could not read file {}: {}", path.display(), source)
            }
            SlackError::ManifestEncoding(e) => format!("Failed to encode upload manifest: {}", e),
        };

        write!(f, "{}", x)
    }
}

impl std::error::Error for SlackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SlackError::APIRequestFailed { source, .. } => Some(source),
            SlackError::FileUnreadable { source, .. } => Some(source),
            SlackError::ManifestEncoding(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn prop_remote_error_is_rendered(code: String) -> bool {
            let e = SlackError::APIResponseError {
                call: ApiCall::PostMessage,
                error: code.clone(),
                payload: None,
            };

            e.to_string().ends_with(&code)
        }

        fn prop_rejected_upload_shows_status_and_body(code: u16, body: String) -> bool {
            match StatusCode::from_u16(code) {
                Err(_) => true,
                Ok(status) => {
                    let e = SlackError::UploadRejected { status, body: body.clone() };
                    let s = e.to_string();

                    s.contains(status.as_str()) && s.ends_with(&body)
                }
            }
        }
    }

    #[test]
    fn test_distinct_messages_per_failure_kind() {
        let malformed = SlackError::APIResponseMalformed {
            call: ApiCall::PostMessage,
            body: "<html>".into(),
        };
        let remote = SlackError::APIResponseError {
            call: ApiCall::PostMessage,
            error: "unknown".into(),
            payload: None,
        };

        assert_eq!(
            malformed.to_string(),
            "Slack API returned malformed response to chat.postMessage: <html>"
        );
        assert_eq!(
            remote.to_string(),
            "Slack API returned error for chat.postMessage: unknown"
        );
    }

    #[test]
    fn test_payload_only_on_remote_errors() {
        let payload = serde_json::json!({ "ok": false, "error": "invalid_auth" });
        let remote = SlackError::APIResponseError {
            call: ApiCall::GetUploadUrl,
            error: "invalid_auth".into(),
            payload: Some(payload.clone()),
        };
        let ticket = SlackError::IncompleteUploadTicket {
            missing: "upload_url",
        };

        assert_eq!(remote.payload(), Some(&payload));
        assert_eq!(ticket.payload(), None);
    }
}
