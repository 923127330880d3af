//! Chat gateway: maps one user utterance to one reply string.
//!
//! The gateway never fails: a missing credential, a transport or API error,
//! and an empty generation each map to a fixed, user-facing fallback reply.
//! Error detail goes to the log only.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::gemini::GeminiClient;
use crate::config::ChatConfig;

/// Fixed persona given to the text generator with every request.
pub const PERSONA: &str = "You are Babeo, a gentle, nurturing, and professional parenting assistant for the BabeoLife website.
Your tone is calm, reassuring, and non-judgmental.
Target audience: Sleep-deprived new parents.

Guidelines:
1. Keep answers concise (under 100 words preferably).
2. Use soft language (e.g., \"gentle,\" \"little one,\" \"it's okay\").
3. Base advice on general pediatric consensus but always include a disclaimer to consult a doctor for medical issues.
4. Do not be alarmist. If a topic is serious, gently guide them to professional help.
5. Format clearly.";

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.7;

/// Reply when no API key is configured. No request is made.
pub const RESTING_REPLY: &str = "I'm currently resting. Please check back later (API Key missing).";
/// Reply when the generator call fails.
pub const SILENCE_REPLY: &str = "I'm having a moment of silence. Please try asking again in a bit.";
/// Reply when the generator succeeds with no text.
pub const CONFUSED_REPLY: &str =
    "I'm having a little trouble thinking clearly right now. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub input: String,
    pub temperature: f32,
}

/// An external text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> anyhow::Result<String>;
}

#[derive(Clone, Default)]
pub struct ChatGateway {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ChatGateway {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Build a Gemini-backed gateway when an API key is available, an
    /// unconfigured one otherwise.
    pub fn from_config(config: &ChatConfig) -> Self {
        match config.resolve_api_key() {
            Some(api_key) => {
                let client = GeminiClient::new(
                    api_key,
                    config.model.clone(),
                    config.base_url.clone(),
                    Duration::from_secs(config.timeout_secs),
                );
                Self::new(Some(Arc::new(client)))
            }
            None => {
                warn!("chat: no API key configured, assistant will stay resting");
                Self::new(None)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn respond(&self, utterance: &str) -> String {
        let Some(generator) = &self.generator else {
            return RESTING_REPLY.to_string();
        };

        let request = GenerationRequest {
            instruction: PERSONA.to_string(),
            input: utterance.to_string(),
            temperature: TEMPERATURE,
        };

        match generator.generate(request).await {
            Ok(text) if text.trim().is_empty() => {
                debug!("chat: generator returned empty text");
                CONFUSED_REPLY.to_string()
            }
            Ok(text) => text,
            Err(e) => {
                error!("chat: generator error: {e:#}");
                SILENCE_REPLY.to_string()
            }
        }
    }
}
