use serde::{Deserialize, Serialize};

/// Every layer is optional on the wire; the client checks them one by one.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SynthesizeResponse {
    pub output: Option<SynthesisOutput>,
    pub usage: Option<serde_json::Value>,
    pub request_id: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SynthesisOutput {
    pub finish_reason: Option<String>,
    pub audio: Option<AudioReference>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AudioReference {
    pub url: String,
    pub id: Option<String>,
    pub expires_at: Option<i64>,
    pub data: Option<String>,
}
