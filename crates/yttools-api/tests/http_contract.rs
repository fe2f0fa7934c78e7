//! HTTP contract tests against a canned provider: response shapes and the
//! error→status mapping, with no downloader involved.

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use yttools_api::server::router;
use yttools_core::{Error, Result, VideoDataProvider, VideoMetadata};

#[derive(Clone, Default)]
struct Canned {
    metadata: Option<VideoMetadata>,
    captions: Option<String>,
    tool_stderr: Option<&'static str>,
}

#[async_trait::async_trait]
impl VideoDataProvider for Canned {
    async fn video_data(&self, _url: &str) -> Result<VideoMetadata> {
        if let Some(stderr) = self.tool_stderr {
            return Err(Error::Tool(stderr.to_string()));
        }
        Ok(self.metadata.clone().unwrap_or_default())
    }

    async fn video_captions(&self, _url: &str, _languages: &[String]) -> Result<String> {
        if let Some(stderr) = self.tool_stderr {
            return Err(Error::Tool(stderr.to_string()));
        }
        self.captions.clone().ok_or(Error::CaptionsNotFound)
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn root_and_health_report_service_liveness() {
    let addr = serve(router(Arc::new(Canned::default()))).await;

    let v: serde_json::Value = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v["message"], "YouTube Tools API is running");

    let v: serde_json::Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v["status"], "ok");
}

#[tokio::test]
async fn video_data_returns_the_normalized_record_with_explicit_nulls() {
    let provider = Canned {
        metadata: Some(VideoMetadata {
            title: Some("Never Gonna Give You Up".to_string()),
            uploader: Some("Rick Astley".to_string()),
            duration: Some(213.0),
            ..Default::default()
        }),
        ..Default::default()
    };
    let addr = serve(router(Arc::new(provider))).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/video-data"))
        .json(&serde_json::json!({ "url": "https://youtu.be/dQw4w9WgXcQ" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(v["title"], "Never Gonna Give You Up");
    assert_eq!(v["duration"], 213.0);
    // Absent fields are present as explicit nulls, not dropped.
    assert!(v.as_object().unwrap().contains_key("like_count"));
    assert_eq!(v["like_count"], serde_json::Value::Null);
}

#[tokio::test]
async fn video_data_tool_failure_maps_to_500_carrying_the_tool_diagnostics() {
    let provider = Canned {
        tool_stderr: Some("ERROR: [youtube] dQw4w9WgXcQ: Video unavailable"),
        ..Default::default()
    };
    let addr = serve(router(Arc::new(provider))).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/video-data"))
        .json(&serde_json::json!({ "url": "https://youtu.be/dQw4w9WgXcQ" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let v: serde_json::Value = resp.json().await.unwrap();
    let detail = v["detail"].as_str().unwrap_or_default();
    assert!(detail.contains("Video unavailable"), "detail={detail:?}");
}

#[tokio::test]
async fn video_captions_returns_the_flattened_transcript_string() {
    let provider = Canned {
        captions: Some("Hello world".to_string()),
        ..Default::default()
    };
    let addr = serve(router(Arc::new(provider))).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/video-captions"))
        .json(&serde_json::json!({
            "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "languages": ["en", "pt"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(v, serde_json::json!("Hello world"));
}

#[tokio::test]
async fn video_captions_missing_captions_map_to_404() {
    let addr = serve(router(Arc::new(Canned::default()))).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/video-captions"))
        .json(&serde_json::json!({ "url": "https://youtu.be/dQw4w9WgXcQ" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let v: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(v["detail"], "captions not found");
}
