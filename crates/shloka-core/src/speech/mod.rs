//! Text-to-speech for verses and their translations.
//!
//! [`SpeechSynthesizer`] turns text into MP3 bytes. [`GoogleTts`] is the
//! network implementation; tests substitute their own.
//!
//! For a search result two clips are produced: the original verse, always
//! spoken in Kannada, and the translation, spoken in the interface
//! language (see [`synthesize_verse_audio`]).

mod google;
pub mod text;

pub use google::GoogleTts;
pub use text::{split_for_speech, MAX_PART_CHARS};

use crate::corpus::Verse;
use crate::error::SpeechError;
use crate::i18n::{Language, UiText};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

/// Trait for speech synthesis backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speaks `text` in `language`, returning MP3 bytes.
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SpeechError>;
}

/// Audio clips generated for one verse.
#[derive(Debug, Default)]
pub struct VerseAudio {
    /// Original verse text spoken in Kannada
    pub original: Option<Vec<u8>>,
    /// Translation spoken in the interface language
    pub translation: Option<Vec<u8>>,
    /// Failures, as display strings, for clips that could not be generated
    pub errors: Vec<String>,
}

/// Which clip of a verse is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKind {
    Original,
    Translation,
}

impl ClipKind {
    /// Progress notice shown while this clip is generated.
    pub fn notice(self, text: &UiText) -> &'static str {
        match self {
            ClipKind::Original => text.generating_original_audio,
            ClipKind::Translation => text.generating_translation_audio,
        }
    }
}

/// Generates audio for a verse and its translation.
///
/// `on_clip` is called before each clip is requested. A failed clip is
/// logged and recorded in `errors`; the other clip is still attempted.
pub async fn synthesize_verse_audio(
    synthesizer: &dyn SpeechSynthesizer,
    verse: &Verse,
    language: Language,
    on_clip: impl Fn(ClipKind),
) -> VerseAudio {
    let mut audio = VerseAudio::default();

    on_clip(ClipKind::Original);
    match synthesizer.synthesize(&verse.text, Language::Kannada).await {
        Ok(bytes) => audio.original = Some(bytes),
        Err(e) => {
            warn!("Error generating speech for original verse: {}", e);
            audio.errors.push(e.to_string());
        }
    }

    if let Some(translation) = verse.translation_for(language) {
        on_clip(ClipKind::Translation);
        match synthesizer.synthesize(translation, language).await {
            Ok(bytes) => audio.translation = Some(bytes),
            Err(e) => {
                warn!("Error generating speech for translation: {}", e);
                audio.errors.push(e.to_string());
            }
        }
    }

    audio
}

/// HTML fragment with an inline audio player for MP3 bytes.
///
/// The audio is embedded as a base64 `data:` URI so the page is
/// self-contained. `label` is HTML-escaped.
pub fn audio_player_html(audio: &[u8], label: &str) -> String {
    format!(
        r#"<div class="audio-section">
    <span class="audio-icon">🔊</span>
    <div class="audio-label">{}</div>
    <div class="audio-player">
        <audio controls>
            <source src="data:audio/mp3;base64,{}" type="audio/mp3">
        </audio>
    </div>
</div>"#,
        escape_html(label),
        STANDARD.encode(audio)
    )
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
