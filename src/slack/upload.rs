//! Attach a file to a message via Slack's external upload flow.
//!
//! Slack splits this into three calls, which we make in sequence, giving up
//! at the first failure:
//!
//! 1. ask for somewhere to upload the file to, receiving an [UploadTicket];
//! 2. upload the raw bytes there;
//! 3. complete the upload, sharing the file in the channel with the message
//!    as its comment.
//!
//! Slack offers no way to cancel a ticket, so one abandoned after step 1 is
//! simply dropped.
//!
//! <https://api.slack.com/messaging/files#uploading_files>

use super::{api::*, channel::ChannelId, SlackError};
use reqwest::{header, StatusCode};
use serde::{de::IgnoredAny, Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use std::path::Path;
use tokio::fs;
use url::Url;

/// Where and as what a file is to be uploaded. Only lives for the duration of
/// a single upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub upload_url: Url,
    pub file_id: String,
}

/// <https://api.slack.com/methods/files.getUploadURLExternal#args>
#[derive(Serialize)]
struct UploadUrlRequest<'a> {
    filename: &'a str,
    length: u64,
}

/// <https://api.slack.com/methods/files.getUploadURLExternal#examples>
#[serde_as]
#[derive(Deserialize)]
struct UploadUrlResponse {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    upload_url: Option<Url>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    file_id: Option<String>,
}

impl TryFrom<UploadUrlResponse> for UploadTicket {
    type Error = SlackError;

    fn try_from(res: UploadUrlResponse) -> Result<Self, Self::Error> {
        match (res.upload_url, res.file_id) {
            (Some(upload_url), Some(file_id)) => Ok(UploadTicket {
                upload_url,
                file_id,
            }),
            (None, Some(_)) => Err(SlackError::IncompleteUploadTicket {
                missing: "upload_url",
            }),
            (Some(_), None) => Err(SlackError::IncompleteUploadTicket { missing: "file_id" }),
            (None, None) => Err(SlackError::IncompleteUploadTicket {
                missing: "upload_url and file_id",
            }),
        }
    }
}

/// An entry in the `files` manifest of [CompleteRequest].
#[derive(Serialize)]
struct FileRef<'a> {
    id: &'a str,
    title: &'a str,
}

/// <https://api.slack.com/methods/files.completeUploadExternal#args>
#[derive(Serialize)]
struct CompleteRequest<'a> {
    /// A JSON array of [FileRef], embedded as a string in the form body.
    files: String,
    channel_id: &'a ChannelId,
    initial_comment: &'a str,
}

impl SlackClient {
    /// Share the file at `path` in the configured channel, with `text` as its
    /// comment. Returns the ID Slack assigned the file.
    pub async fn post_file(&self, text: &str, path: &Path) -> Result<String, SlackError> {
        let filename = file_name(path);

        let length = fs::metadata(path)
            .await
            .map_err(|source| unreadable(path, source))?
            .len();

        let ticket = self.get_upload_url(&filename, length).await?;

        let bytes = fs::read(path)
            .await
            .map_err(|source| unreadable(path, source))?;

        self.upload_bytes(&ticket, bytes).await?;
        self.complete_upload(&ticket, &filename, text).await?;

        Ok(ticket.file_id)
    }

    async fn get_upload_url(&self, filename: &str, length: u64) -> Result<UploadTicket, SlackError> {
        let req = self
            .post(ApiCall::GetUploadUrl)
            .form(&UploadUrlRequest { filename, length });

        let (_, body) = dispatch(ApiCall::GetUploadUrl, req).await?;

        decode::<UploadUrlResponse>(ApiCall::GetUploadUrl, body)?.try_into()
    }

    /// Anything but `200 OK` is a failure, including other 2xx statuses.
    async fn upload_bytes(&self, ticket: &UploadTicket, bytes: Vec<u8>) -> Result<(), SlackError> {
        let req = self
            .upload(ticket.upload_url.clone())
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes);

        let (status, body) = dispatch(ApiCall::UploadFile, req).await?;

        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(SlackError::UploadRejected { status, body })
        }
    }

    async fn complete_upload(
        &self,
        ticket: &UploadTicket,
        title: &str,
        comment: &str,
    ) -> Result<(), SlackError> {
        let files = serde_json::to_string(&[FileRef {
            id: &ticket.file_id,
            title,
        }])?;

        let req = self.post(ApiCall::CompleteUpload).form(&CompleteRequest {
            files,
            channel_id: self.config().channel(),
            initial_comment: comment,
        });

        let (_, body) = dispatch(ApiCall::CompleteUpload, req).await?;
        decode::<IgnoredAny>(ApiCall::CompleteUpload, body)?;

        Ok(())
    }
}

/// The name Slack will display for the file, falling back to the full path
/// if there's no final component.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn unreadable(path: &Path, source: std::io::Error) -> SlackError {
    SlackError::FileUnreadable {
        path: path.to_owned(),
        source,
    }
}
