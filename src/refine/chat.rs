//! OpenAI-compatible chat completions advisor

use crate::config::AdvisorConfig;
use crate::refine::advisor::{AdvisorError, CorrectionRequest, EnhanceRequest, SelectorAdvisor};
use crate::selectors::Field;
use crate::ConfigError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ENHANCE_SYSTEM_PROMPT: &str = "You are an expert at analyzing HTML structure for web scraping.
Your task is to validate and improve CSS selectors that will be used to select elements from parsed HTML.

Goal: Find the best CSS selectors for:
- article_links: Links to individual articles on listing pages
- title: Article title on individual article pages
- content: Main article content on individual article pages

Respond ONLY with valid JSON in the exact format shown below.";

const CORRECT_SYSTEM_PROMPT: &str = "You are an expert at CSS selectors for web scraping. Some selectors failed to find elements.
Analyze the HTML and provide corrected selectors that will work with standard CSS selector matching.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn selectors_json(selectors: &BTreeMap<Field, String>) -> Result<String, AdvisorError> {
    serde_json::to_string_pretty(selectors)
        .map_err(|e| AdvisorError::Parse(format!("Failed to serialize selectors: {}", e)))
}

/// Builds the user prompt for an enhancement request
pub fn enhance_prompt(request: &EnhanceRequest) -> Result<String, AdvisorError> {
    let articles = if request.article_samples.is_empty() {
        "No article sample available".to_string()
    } else {
        request
            .article_samples
            .iter()
            .map(|sample| format!("```html\n{}\n```", sample))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Ok(format!(
        r#"Analyze this website structure and validate/improve the CSS selectors.

Homepage HTML sample:
```html
{homepage}
```

Sample article HTML:
{articles}

Currently detected selectors:
{selectors}

Please respond with ONLY this JSON format:
```json
{{
  "selectors": {{
    "article_links": "CSS selector for article links",
    "title": "CSS selector for article title",
    "content": "CSS selector for article content"
  }},
  "confidence": "high|medium|low",
  "notes": "observations about the site structure",
  "potential_issues": ["list any concerns or potential issues"]
}}
```"#,
        homepage = request.homepage_sample,
        articles = articles,
        selectors = selectors_json(&request.selectors)?,
    ))
}

/// Builds the user prompt for a correction request
pub fn correction_prompt(request: &CorrectionRequest) -> Result<String, AdvisorError> {
    Ok(format!(
        r#"The following selectors failed to find elements:
{failed}

Context:
- "article_links" selector should find links on the HOMEPAGE that lead to articles
- "title" and "content" selectors should work on individual ARTICLE pages

Homepage HTML sample:
```html
{homepage}
```

Article page HTML sample:
```html
{article}
```

Please provide corrected selectors. Respond with ONLY JSON:
```json
{{
  "corrected_selectors": {{
    "selector_name": "corrected CSS selector"
  }},
  "explanation": "what was wrong and how you fixed it"
}}
```"#,
        failed = selectors_json(&request.failed_selectors)?,
        homepage = request.homepage_sample,
        article = request.article_sample,
    ))
}

/// Advisor backed by an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct ChatAdvisor {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl ChatAdvisor {
    pub fn new(api_key: impl Into<String>, config: &AdvisorConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// Creates an advisor reading its API key from the configured variable
    ///
    /// # Returns
    ///
    /// * `Ok(ChatAdvisor)` - Key found
    /// * `Err(ConfigError::MissingEnv)` - The variable is unset or empty
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, ConfigError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv(config.api_key_env.clone()))?;
        Ok(Self::new(api_key, config))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String, AdvisorError> {
        let start = std::time::Instant::now();
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Advisor request failed: {}", e);
                AdvisorError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Advisor API error {}: {}", status, error_text);
            return Err(AdvisorError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let chat_response: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| AdvisorError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AdvisorError::Api("Empty reply from advisor".into()))?;

        tracing::debug!(
            "Advisor reply from {} in {} ms",
            self.model,
            start.elapsed().as_millis()
        );

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl SelectorAdvisor for ChatAdvisor {
    async fn enhance(&self, request: &EnhanceRequest) -> Result<String, AdvisorError> {
        let prompt = enhance_prompt(request)?;
        self.chat(ENHANCE_SYSTEM_PROMPT, &prompt).await
    }

    async fn correct(&self, request: &CorrectionRequest) -> Result<String, AdvisorError> {
        let prompt = correction_prompt(request)?;
        self.chat(CORRECT_SYSTEM_PROMPT, &prompt).await
    }
}
