use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::services::config::AppConfig;
use crate::services::display::CommentarySource;
use crate::utils::error::AppError;

pub const NO_CANDIDATES: &str = "Could not retrieve context from Gemini.";

// Header form keeps the key out of the URL, and so out of transport errors.
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Prompt asking for the context of one verse, optionally in a persona's voice.
pub fn build_prompt(reference: &str, persona: Option<&str>) -> String {
    match persona {
        Some(persona) => format!(
            "Speaking as {persona}, in one tight paragraph, explain the context of {reference} \
             and add an insight that {persona} might have. No verse quotes. Weave the sayings \
             or writings of {persona} into the paragraph if relevant. Let your voice as \
             {persona} shape the tone and insight."
        ),
        None => format!(
            "In one tight, gritty paragraph, explain why the verse at {reference} matters. \
             No verse quotes, just tell how it fits in the story that's unfolding. Name the \
             speaker or what's happening, and why it packs a punch. For Old Testament, spot \
             any Christian typology (like the Ark hinting at Mary) and hit it quick."
        ),
    }
}

/// "gemini-2.0-flash" -> "Gemini 2.0 Flash"
pub fn model_label(model: &str) -> String {
    model
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(client: Client, config: &AppConfig) -> GeminiClient {
        GeminiClient {
            client,
            endpoint: config.gemini_endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.gemini_api_key.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("Error fetching context from Gemini: GEMINI_API_KEY is not set")?;

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
            },
        };

        log::info!("Requesting commentary from {}", url);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(e.without_url().to_string()))
            .context("Error fetching context from Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            log::error!("Gemini returned {}: {}", status, text);
            bail!(
                "Error fetching context from Gemini: {}\nResponse: {}",
                status,
                if text.is_empty() { "No response" } else { text.as_str() }
            );
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .context("Error decoding Gemini response")?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| anyhow!(NO_CANDIDATES))
    }
}

impl CommentarySource for GeminiClient {
    fn label(&self) -> String {
        model_label(&self.model)
    }

    async fn commentary(
        &self,
        book_name: &str,
        chapter: u32,
        verse: u32,
        persona: Option<&str>,
    ) -> Result<String> {
        let reference = format!("{} {}:{}", book_name, chapter, verse);
        self.generate(&build_prompt(&reference, persona)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_label() {
        assert_eq!(model_label("gemini-2.0-flash"), "Gemini 2.0 Flash");
        assert_eq!(model_label("gemini-1.5-pro"), "Gemini 1.5 Pro");
    }

    #[test]
    fn test_build_prompt_persona() {
        let prompt = build_prompt("John 3:16", Some("Augustine"));
        assert!(prompt.starts_with("Speaking as Augustine"));
        assert!(prompt.contains("context of John 3:16"));
    }

    #[test]
    fn test_build_prompt_default() {
        let prompt = build_prompt("Genesis 6:14", None);
        assert!(prompt.contains("the verse at Genesis 6:14 matters"));
        assert!(prompt.contains("typology"));
    }
}
