//! Design/planning suggestion synthesis.
//!
//! Two generator variants, selected once at startup: a disabled variant
//! producing deterministic placeholders, and a remote variant delegating to
//! an OpenAI-compatible chat-completions endpoint. Both always return
//! non-empty fields; the phase classifier's role boosts depend on that.

use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, warn};

use civicsift_core::SuggestionConfig;

const CHAT_COMPLETIONS_URL: &str = "https://router.huggingface.co/v1/chat/completions";
const MAX_TOKENS: usize = 200;

/// One design suggestion and one planning suggestion for a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub design_suggestion: String,
    pub planning_suggestion: String,
}

/// Suggestion generator, chosen from configuration at startup.
pub enum SuggestionGenerator {
    Disabled,
    Remote(RemoteGenerator),
}

impl SuggestionGenerator {
    pub fn from_config(config: &SuggestionConfig) -> Self {
        match &config.api_token {
            Some(token) if config.enabled => {
                info!("Suggestion generation enabled (model: {})", config.model);
                Self::Remote(RemoteGenerator::new(config.model.clone(), token.clone()))
            }
            _ => {
                info!("Suggestion generation disabled, emitting placeholders");
                Self::Disabled
            }
        }
    }

    /// Generate suggestions for a (keyword, evidence sentence) pair.
    /// Never fails and never returns empty fields.
    pub async fn generate(&self, keyword: &str, sentence: &str) -> Suggestions {
        match self {
            Self::Disabled => disabled_placeholders(keyword),
            Self::Remote(remote) => remote.generate(keyword, sentence).await,
        }
    }
}

fn disabled_placeholders(keyword: &str) -> Suggestions {
    Suggestions {
        design_suggestion: format!("[generator disabled] design suggestion for '{}'", keyword),
        planning_suggestion: format!("[generator disabled] planning suggestion for '{}'", keyword),
    }
}

fn unavailable_placeholders(keyword: &str) -> Suggestions {
    Suggestions {
        design_suggestion: format!("[model unavailable] design suggestion for '{}'", keyword),
        planning_suggestion: format!("[model unavailable] planning suggestion for '{}'", keyword),
    }
}

/// Split a model reply into sentences: a boundary character followed by
/// whitespace ends a sentence.
fn split_reply_sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if (b == b'.' || b == b'!' || b == b'?')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            sentences.push(&text[start..=i]);
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    if start < bytes.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Parse a plain-text reply into the two suggestion fields. The first
/// sentence is the design suggestion, the second the planning suggestion;
/// missing pieces get explicit placeholders, never empty strings.
pub(crate) fn parse_suggestions(reply: &str, keyword: &str) -> Suggestions {
    let joined = reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let sentences = split_reply_sentences(&joined);

    let design = sentences
        .first()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("[model empty] design suggestion for '{}'", keyword));
    let planning = sentences
        .get(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("[model empty] planning suggestion for '{}'", keyword));

    Suggestions {
        design_suggestion: design,
        planning_suggestion: planning,
    }
}

/// Remote generator calling an OpenAI-compatible chat-completions API.
pub struct RemoteGenerator {
    client: Client,
    model: String,
    api_token: String,
}

impl RemoteGenerator {
    pub fn new(model: String, api_token: String) -> Self {
        Self {
            client: Client::new(),
            model,
            api_token,
        }
    }

    async fn generate(&self, keyword: &str, sentence: &str) -> Suggestions {
        let context = format!(
            "Based on this citizen feedback keyword '{}' from the sentence: \"{}\"",
            keyword, sentence
        );
        let prompt = format!(
            "You are an expert urban designer and planner.\n\n{}\n\n\
             Please provide two short suggestions as plain text: first a design suggestion, \
             then a planning suggestion.\n\
             Each suggestion should be 1-2 short sentences. Do not return JSON; return plain \
             text only, with the design suggestion first, then the planning suggestion on the \
             next line.",
            context
        );

        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": MAX_TOKENS,
        });

        debug!("Requesting suggestions for '{}' from {}", keyword, self.model);

        let response = match self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Suggestion request failed: {}", e);
                return unavailable_placeholders(keyword);
            }
        };

        if !response.status().is_success() {
            warn!("Suggestion API returned status {}", response.status());
            return unavailable_placeholders(keyword);
        }

        let parsed: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("Unreadable suggestion response: {}", e);
                return unavailable_placeholders(keyword);
            }
        };

        let text = parsed["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("");
        if text.trim().is_empty() {
            return unavailable_placeholders(keyword);
        }

        parse_suggestions(text, keyword)
    }
}
