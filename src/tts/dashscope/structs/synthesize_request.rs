use crate::errors::constants::DEFAULT_MODEL;
use crate::tts::{dashscope::structs::synthesis_input::SynthesisInput, voice::Voice};
use serde::{Deserialize, Serialize};

/// Body of a multimodal-generation call.
///
/// Example:
/// ```rust
/// use qwen_tts_webui::tts::{dashscope::structs::synthesize_request::SynthesizeRequest, voice::Voice};
///
/// let request = SynthesizeRequest::new("Hello").with_voice(Voice::Cherry);
/// assert_eq!(request.model, "qwen-tts-latest");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SynthesizeRequest {
    pub model: String,
    pub input: SynthesisInput,
}

impl SynthesizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            input: SynthesisInput {
                text: text.into(),
                voice: Voice::default(),
            },
        }
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.input.voice = voice;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
