//! Google Translate speech client.
//!
//! Speaks through the same RPC the Translate web page uses for its
//! "listen" button. Each request carries at most [`MAX_PART_CHARS`]
//! characters; longer text is split and the MP3 parts are concatenated.

use super::text::{split_for_speech, MAX_PART_CHARS};
use super::SpeechSynthesizer;
use crate::error::SpeechError;
use crate::i18n::Language;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

/// RPC identifier of the speech method.
const TTS_RPC_ID: &str = "jQ1olc";

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36";

/// Extracts the base64 audio payload from one response line.
static AUDIO_PAYLOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"jQ1olc","\[\\"(.*)\\"\]"#).expect("audio payload pattern is valid")
});

/// Speech synthesizer backed by translate.google.<tld>.
#[derive(Clone)]
pub struct GoogleTts {
    client: reqwest::Client,
    tld: String,
    slow: bool,
}

impl GoogleTts {
    /// Creates a client for `translate.google.com` at normal speed.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Request` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            tld: "com".to_string(),
            slow: false,
        })
    }

    /// Uses a regional Google domain, e.g. `co.in`.
    pub fn with_tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = tld.into();
        self
    }

    /// Requests slower speech.
    pub fn with_slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "https://translate.google.{}/_/TranslateWebserverUi/data/batchexecute",
            self.tld
        )
    }

    #[instrument(skip_all, fields(chars = part.chars().count()))]
    async fn synthesize_part(&self, part: &str, lang: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Referer", "http://translate.google.com/")
            .header(
                "Content-Type",
                "application/x-www-form-urlencoded;charset=utf-8",
            )
            .body(rpc_request_body(part, lang, self.slow))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        extract_audio(&body)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let parts = split_for_speech(text, MAX_PART_CHARS);
        if parts.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        debug!("Synthesizing {} part(s) in '{}'", parts.len(), language.speech_code());

        let mut audio = Vec::new();
        for part in &parts {
            audio.extend(self.synthesize_part(part, language.speech_code()).await?);
        }
        Ok(audio)
    }
}

/// Builds the form-encoded RPC body for one text part.
fn rpc_request_body(text: &str, lang: &str, slow: bool) -> String {
    let speed = if slow { json!(true) } else { json!(null) };
    let parameter = json!([text, lang, speed, "null"]).to_string();
    let rpc = json!([[[TTS_RPC_ID, parameter, null, "generic"]]]).to_string();
    let encoded: String = url::form_urlencoded::byte_serialize(rpc.as_bytes()).collect();
    format!("f.req={}&", encoded)
}

/// Finds and decodes the audio payload in an RPC response body.
fn extract_audio(body: &str) -> Result<Vec<u8>, SpeechError> {
    for line in body.lines().filter(|line| line.contains(TTS_RPC_ID)) {
        if let Some(captures) = AUDIO_PAYLOAD.captures(line) {
            return STANDARD
                .decode(&captures[1])
                .map_err(|e| SpeechError::InvalidPayload(e.to_string()));
        }
    }
    Err(SpeechError::NoAudio)
}
