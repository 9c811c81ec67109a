use eyre::{Result, bail};
use log::debug;

use crate::{GenerationRequest, style};

const SYSTEM_PROMPT: &str = "You are a writing assistant that turns video transcripts into \
polished articles. Produce a formatted article with a title, an overview, key points, and a \
closing section. Stay faithful to the transcript; do not invent facts.";

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const OPENAI_API_BASE: &str = "https://api.openai.com";

/// Knobs for the external model call
#[derive(Debug, Clone)]
pub struct ModelParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Overrides the provider's API host; None means the real endpoint
    pub api_base: Option<String>,
}

pub fn is_anthropic_model(model: &str) -> bool {
    model.starts_with("claude")
}

fn build_user_message(request: &GenerationRequest) -> String {
    let descriptor = style::build_style_descriptor(
        &request.style_preset,
        &request.style_detail,
        &request.language,
    );

    let mut message = String::from("Write an article summarizing the following video transcript.\n");
    message.push_str(&format!("Target length: {}.\n", request.length.word_target()));
    if !descriptor.is_empty() {
        message.push_str(&descriptor);
        message.push('\n');
    }
    if request.truncated {
        message.push_str("Note: the transcript was truncated.\n");
    }
    message.push_str("\nTranscript:\n");
    message.push_str(&request.transcript);
    message
}

/// Generate an article via an external model. One call, no retries.
pub async fn generate_article(
    client: &reqwest::Client,
    params: &ModelParams,
    api_key: &str,
    request: &GenerationRequest,
) -> Result<String> {
    let user_message = build_user_message(request);

    if is_anthropic_model(&params.model) {
        generate_anthropic(client, params, api_key, &user_message).await
    } else {
        generate_openai(client, params, api_key, &user_message).await
    }
}

fn anthropic_request_body(params: &ModelParams, user_message: &str) -> serde_json::Value {
    serde_json::json!({
        "model": params.model,
        "max_tokens": params.max_tokens,
        "temperature": params.temperature,
        "system": SYSTEM_PROMPT,
        "messages": [
            {
                "role": "user",
                "content": user_message
            }
        ]
    })
}

// OpenAI chat models take max_completion_tokens; max_tokens is rejected
fn openai_request_body(params: &ModelParams, user_message: &str) -> serde_json::Value {
    serde_json::json!({
        "model": params.model,
        "max_completion_tokens": params.max_tokens,
        "temperature": params.temperature,
        "messages": [
            {
                "role": "system",
                "content": SYSTEM_PROMPT
            },
            {
                "role": "user",
                "content": user_message
            }
        ]
    })
}

async fn generate_anthropic(
    client: &reqwest::Client,
    params: &ModelParams,
    api_key: &str,
    user_message: &str,
) -> Result<String> {
    debug!("Generating article via Anthropic API with model {}", params.model);

    let base = params.api_base.as_deref().unwrap_or(ANTHROPIC_API_BASE);
    let body = anthropic_request_body(params, user_message);

    let resp = client
        .post(format!("{base}/v1/messages"))
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("Anthropic API returned {status}: {body}");
    }

    let json: serde_json::Value = resp.json().await?;
    extract_anthropic_text(&json)
}

fn extract_anthropic_text(json: &serde_json::Value) -> Result<String> {
    if let Some(content) = json.get("content").and_then(|c| c.as_array()) {
        let text: String = content
            .iter()
            .filter_map(|block| {
                if block.get("type")?.as_str()? == "text" {
                    block.get("text")?.as_str().map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }
    bail!("unexpected Anthropic API response format");
}

async fn generate_openai(
    client: &reqwest::Client,
    params: &ModelParams,
    api_key: &str,
    user_message: &str,
) -> Result<String> {
    debug!("Generating article via OpenAI API with model {}", params.model);

    let base = params.api_base.as_deref().unwrap_or(OPENAI_API_BASE);
    let body = openai_request_body(params, user_message);

    let resp = client
        .post(format!("{base}/v1/chat/completions"))
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("OpenAI API returned {status}: {body}");
    }

    let json: serde_json::Value = resp.json().await?;
    extract_openai_text(&json)
}

fn extract_openai_text(json: &serde_json::Value) -> Result<String> {
    if let Some(text) = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
    {
        return Ok(text.to_string());
    }
    bail!("unexpected OpenAI API response format");
}
