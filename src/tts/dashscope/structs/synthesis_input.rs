use serde::{Deserialize, Serialize};

use crate::tts::voice::Voice;

/// Example:
/// ```rust
/// use qwen_tts_webui::tts::{dashscope::structs::synthesis_input::SynthesisInput, voice::Voice};
///
/// let input = SynthesisInput {
///     text: String::from("Hello"),
///     voice: Voice::Cherry,
/// };
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SynthesisInput {
    pub text: String,
    pub voice: Voice,
}
