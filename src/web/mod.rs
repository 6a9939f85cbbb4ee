pub mod handlers;
pub mod page;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;

use crate::errors::{Result, TtsError};
use crate::tts::{tts::TtsService, voice::Voice};

/// Shared state of the web form.
#[derive(Clone)]
pub struct AppState {
    pub service: TtsService,
    pub default_voice: Voice,
    /// Held for the duration of a submission so only one request is in flight.
    pub submissions: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(service: TtsService, default_voice: Voice) -> Self {
        Self {
            service,
            default_voice,
            submissions: Arc::new(Mutex::new(())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::generate))
        .route("/voices", get(handlers::voices))
        .route("/stats", get(handlers::stats))
        .with_state(state)
}

pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| TtsError::server(format!("cannot bind {}: {}", addr, e)))?;
    info!("Qwen-TTS WebUI listening on http://{}", addr);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| TtsError::server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::{credentials::CredentialSource, dashscope::dashscope::DashScopeClient, fetcher::AudioFetcher};
    use axum::{body::Body, http::{header, Request, StatusCode}};
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn test_state() -> AppState {
        let client = DashScopeClient::with_base_url(
            CredentialSource::env("QWEN_TTS_WEBUI_UNSET_KEY"),
            "http://127.0.0.1:1/api/v1",
        );
        let service = TtsService::new(Arc::new(client), AudioFetcher::default());
        AppState::new(service, Voice::Dylan)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let app = router(test_state());
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Qwen-TTS WebUI"));
        assert!(html.contains("Sunny (Sichuan dialect - Female)"));
    }

    #[tokio::test]
    async fn test_submit_without_key_reports_error() {
        let app = router(test_state());
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.wav");
        let body = format!(
            "text=Hello&save_path={}&voice=Cherry",
            target.to_str().unwrap().replace('/', "%2F")
        );
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("An error occurred: Configuration error: QWEN_TTS_WEBUI_UNSET_KEY"));
        assert!(html.contains("<option value=\"Cherry\" selected>"));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_unknown_voice_reported_in_result() {
        let state = test_state();
        let app = router(state.clone());
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=Hi&save_path=a.wav&voice=Nobody"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("An error occurred: Invalid input: Unsupported voice: Nobody"));
        assert_eq!(state.service.metrics().get_stats().other_failures, 1);
    }

    #[tokio::test]
    async fn test_voices_json() {
        let app = router(test_state());
        let request = Request::builder().uri("/voices").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        let voices = json.as_array().unwrap();
        assert_eq!(voices.len(), 7);
        assert_eq!(voices[0]["id"], "Chelsie");
        assert_eq!(voices[4]["label"], "Dylan (Beijing dialect - Male)");
    }

    #[tokio::test]
    async fn test_stats_json() {
        let app = router(test_state());
        let request = Request::builder().uri("/stats").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["requests"], 0);
        assert_eq!(json["successes"], 0);
        assert_eq!(json["success_rate"], 0.0);
    }

    #[tokio::test]
    async fn test_stats_after_rejected_submission() {
        let state = test_state();
        let submit = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=Hi&save_path=a.wav&voice=Nobody"))
            .unwrap();
        router(state.clone()).oneshot(submit).await.unwrap();

        let request = Request::builder().uri("/stats").body(Body::empty()).unwrap();
        let response = router(state).oneshot(request).await.unwrap();

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["requests"], 1);
        assert_eq!(json["other_failures"], 1);
        assert_eq!(json["success_rate"], 0.0);
    }
}
