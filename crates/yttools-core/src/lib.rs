//! Backend-agnostic types and traits for the YouTube tools service.
//!
//! This crate intentionally contains no IO or downloader-specific logic. The
//! HTTP layer and the yt-dlp adapter both depend on it, so handlers can be
//! exercised against a canned provider without a downloader installed.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The downloader exited non-zero or ran past its timeout; the payload is
    /// the tool's own diagnostic text.
    #[error("downloader error: {0}")]
    Tool(String),
    /// The downloader produced output we could not parse.
    #[error("unreadable downloader output: {0}")]
    Parse(String),
    /// No caption file was produced for the requested video/languages.
    #[error("captions not found")]
    CaptionsNotFound,
    /// Anything else: spawn failures, temp dir IO, caption file reads.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fixed projection of the downloader's metadata output.
///
/// Every field is optional. Absent fields stay `None` and serialize as JSON
/// `null` rather than being dropped, so callers always see the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub duration: Option<f64>,
    pub upload_date: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub channel_url: Option<String>,
}

impl VideoMetadata {
    /// Project the downloader's raw JSON record onto the fixed field set.
    /// Fields outside the set are dropped; missing ones stay `None`.
    pub fn from_raw(raw: serde_json::Value) -> Result<Self> {
        serde_json::from_value(raw).map_err(|e| Error::Parse(e.to_string()))
    }
}

/// Capability interface over the external downloader.
///
/// The HTTP handlers depend only on this trait; `yttools-local` implements it
/// by shelling out to yt-dlp, and tests substitute canned implementations.
#[async_trait::async_trait]
pub trait VideoDataProvider: Send + Sync {
    /// Fetch and normalize metadata for `url` without downloading the video.
    async fn video_data(&self, url: &str) -> Result<VideoMetadata>;

    /// Fetch auto-generated captions for `url` in the first available of
    /// `languages` and flatten them to a single transcript string. An empty
    /// list means "use the configured default language".
    async fn video_captions(&self, url: &str, languages: &[String]) -> Result<String>;
}
