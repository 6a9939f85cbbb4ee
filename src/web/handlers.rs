use axum::{
    extract::{Form, State},
    response::{Html, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{
    page::{render_page, FormView},
    AppState,
};
use crate::errors::constants::ERROR_PREFIX;
use crate::metrics::MetricsSnapshot;
use crate::tts::voice::Voice;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateForm {
    pub text: String,
    pub save_path: String,
    pub voice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceOption {
    pub id: &'static str,
    pub label: &'static str,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&FormView::blank(state.default_voice)))
}

/// Handle a form submission. Errors end up in the Result box, never as an HTTP error.
pub async fn generate(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Html<String> {
    let result = match form.voice.parse::<Voice>() {
        Ok(voice) => {
            let _turn = state.submissions.lock().await;
            info!(voice = %voice, save_path = %form.save_path, "Form submitted");
            state.service.handle(&form.text, &form.save_path, voice).await
        }
        Err(err) => {
            warn!(voice = %form.voice, "Rejected form with unknown voice");
            state.service.metrics().record_request();
            state.service.metrics().record_failure(&err);
            format!("{}{}", ERROR_PREFIX, err)
        }
    };

    Html(render_page(&FormView {
        text: form.text,
        save_path: form.save_path,
        voice: form.voice,
        result,
    }))
}

pub async fn voices() -> Json<Vec<VoiceOption>> {
    Json(
        Voice::options()
            .into_iter()
            .map(|(label, voice)| VoiceOption {
                id: voice.as_str(),
                label,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    pub success_rate: f64,
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let counters = state.service.metrics().get_stats();
    Json(StatsResponse {
        success_rate: counters.success_rate(),
        counters,
    })
}
