use std::fmt::Write;

use crate::errors::constants::{DEFAULT_SAVE_PATH, PAGE_TITLE};
use crate::tts::voice::Voice;

/// Values shown in the form and the result box.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub text: String,
    pub save_path: String,
    pub voice: String,
    pub result: String,
}

impl FormView {
    pub fn blank(default_voice: Voice) -> Self {
        Self {
            text: String::new(),
            save_path: DEFAULT_SAVE_PATH.to_string(),
            voice: default_voice.as_str().to_string(),
            result: String::new(),
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn voice_options(selected: &str) -> String {
    let mut options = String::new();
    for (label, voice) in Voice::options() {
        let marker = if voice.as_str() == selected { " selected" } else { "" };
        let _ = writeln!(
            options,
            "            <option value=\"{}\"{}>{}</option>",
            voice.as_str(),
            marker,
            escape_html(label)
        );
    }
    options
}

pub fn render_page(view: &FormView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; }}
    h1 {{ text-align: center; font-size: 36px; font-weight: bold; }}
    .row {{ display: flex; gap: 2rem; }}
    .column {{ flex: 1; display: flex; flex-direction: column; gap: 0.5rem; }}
    textarea, input, select {{ width: 100%; box-sizing: border-box; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <form method="post" action="/">
    <div class="row">
      <div class="column">
        <label for="text">Input text</label>
        <textarea id="text" name="text" rows="5" placeholder="please input text here...">{text}</textarea>
        <label for="save_path">save path</label>
        <input id="save_path" name="save_path" value="{save_path}" placeholder="please input save path here..., eg.audio.wav">
        <label for="voice">Select voice</label>
        <select id="voice" name="voice">
{options}        </select>
        <button type="submit">Generate Voice</button>
      </div>
      <div class="column">
        <label for="result">Result</label>
        <textarea id="result" rows="5" readonly>{result}</textarea>
      </div>
    </div>
  </form>
</body>
</html>
"#,
        title = PAGE_TITLE,
        text = escape_html(&view.text),
        save_path = escape_html(&view.save_path),
        options = voice_options(&view.voice),
        result = escape_html(&view.result),
    )
}
