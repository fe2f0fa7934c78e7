//! yt-dlp adapter: the only component that talks to the external downloader.
//!
//! Both operations run `yt-dlp` with `--skip-download`; metadata is read from
//! stdout as JSON, captions are written by the tool into a request-private
//! temp dir and flattened after reading. The temp dir guard removes caption
//! files on every exit path.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use yttools_core::{Error, Result, VideoDataProvider, VideoMetadata};

use crate::shellout::{self, run_bounded};
use crate::youtube;

#[derive(Debug, Clone)]
pub struct YtDlp {
    bin: String,
    timeout: Duration,
    max_transcript_chars: usize,
    default_langs: Vec<String>,
}

impl YtDlp {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            timeout: Duration::from_secs(120),
            max_transcript_chars: 200_000,
            default_langs: vec!["en".to_string()],
        }
    }

    /// Build the adapter from `YTTOOLS_*` environment knobs. Unset or
    /// unparsable values fall back to defaults; numeric knobs are clamped.
    pub fn from_env() -> Self {
        let default_langs = shellout::env("YTTOOLS_SUB_LANGS")
            .unwrap_or_else(|| "en".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        Self {
            bin: shellout::env("YTTOOLS_YTDLP_BIN").unwrap_or_else(|| "yt-dlp".to_string()),
            timeout: shellout::timeout_from_env_ms("YTTOOLS_YTDLP_TIMEOUT_MS", 120_000),
            max_transcript_chars: shellout::max_chars_from_env("YTTOOLS_MAX_TRANSCRIPT_CHARS", 200_000),
            default_langs: if default_langs.is_empty() {
                vec!["en".to_string()]
            } else {
                default_langs
            },
        }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("--skip-download").arg("--no-warnings");
        cmd
    }

    fn effective_langs(&self, requested: &[String]) -> Vec<String> {
        let langs = requested
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if langs.is_empty() {
            self.default_langs.clone()
        } else {
            langs
        }
    }
}

fn trimmed_stderr(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stderr).trim().to_string()
}

/// Find the caption file the tool wrote. Requested languages are tried in
/// order; the tool sometimes tags files with a `-orig` language suffix, and
/// sometimes with a language we did not ask for, hence the final any-vtt scan.
fn locate_caption_file(dir: &Path, video_id: Option<&str>, langs: &[String]) -> Option<PathBuf> {
    if let Some(id) = video_id {
        for lang in langs {
            for name in [format!("{id}.{lang}.vtt"), format!("{id}.{lang}-orig.vtt")] {
                let p = dir.join(name);
                if p.is_file() {
                    return Some(p);
                }
            }
        }
    }
    let rd = std::fs::read_dir(dir).ok()?;
    for ent in rd.flatten() {
        let p = ent.path();
        if p.extension().and_then(|s| s.to_str()) == Some("vtt") {
            return Some(p);
        }
    }
    None
}

#[async_trait::async_trait]
impl VideoDataProvider for YtDlp {
    async fn video_data(&self, url: &str) -> Result<VideoMetadata> {
        let mut cmd = self.command();
        cmd.arg("--print-json").arg(url);
        let out = run_bounded(cmd, self.timeout).await?;
        if !out.status.success() {
            return Err(Error::Tool(trimmed_stderr(&out)));
        }
        let raw: serde_json::Value =
            serde_json::from_slice(&out.stdout).map_err(|e| Error::Parse(e.to_string()))?;
        VideoMetadata::from_raw(raw)
    }

    async fn video_captions(&self, url: &str, languages: &[String]) -> Result<String> {
        let langs = self.effective_langs(languages);
        let id = youtube::video_id(url);

        // Request-private temp dir: concurrent requests for the same video
        // cannot collide, and the guard removes caption files on success,
        // not-found, and error paths alike.
        let tmpdir = tempfile::tempdir()
            .map_err(|e| Error::Internal(format!("failed to create temp dir: {e}")))?;
        let out_tmpl = tmpdir.path().join("%(id)s.%(ext)s");

        let mut cmd = self.command();
        cmd.arg("--write-auto-sub")
            .arg("--sub-format")
            .arg("vtt")
            .arg("--sub-lang")
            .arg(langs.join(","))
            .arg("-o")
            .arg(&out_tmpl)
            .arg(url);
        let out = run_bounded(cmd, self.timeout).await?;
        if !out.status.success() {
            return Err(Error::Tool(trimmed_stderr(&out)));
        }

        let path = locate_caption_file(tmpdir.path(), id.as_deref(), &langs)
            .ok_or(Error::CaptionsNotFound)?;
        let vtt = std::fs::read_to_string(&path)
            .map_err(|e| Error::Internal(format!("failed to read caption file: {e}")))?;
        Ok(youtube::flatten_vtt(&vtt, self.max_transcript_chars))
    }
}
