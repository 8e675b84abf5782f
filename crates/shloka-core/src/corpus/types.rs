use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Label shown when a verse carries no chapter or verse number.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A single verse of the corpus.
///
/// `text` is what gets embedded. Fields the loader does not recognise are
/// kept in `extra` so JSON output can round-trip them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    /// Chapter label (numbers are rendered in decimal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    /// Verse label within the chapter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<String>,
    /// Original verse text
    pub text: String,
    /// Meaning in the corpus language (Kannada)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// English rendering, when the corpus provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_translation: Option<String>,
    /// Any other fields present on the source object
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Verse {
    /// Creates a verse with only its text set.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            chapter: None,
            verse: None,
            text: text.into(),
            translation: None,
            english_translation: None,
            extra: BTreeMap::new(),
        }
    }

    /// Chapter label, or `"Unknown"`.
    pub fn chapter_label(&self) -> &str {
        self.chapter.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    /// Verse label, or `"Unknown"`.
    pub fn verse_label(&self) -> &str {
        self.verse.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    /// Translation to display for `language`.
    ///
    /// English prefers `english_translation` and falls back to the corpus
    /// translation. Kannada always shows the corpus translation.
    pub fn translation_for(&self, language: Language) -> Option<&str> {
        match language {
            Language::English => self
                .english_translation
                .as_deref()
                .or(self.translation.as_deref()),
            Language::Kannada => self.translation.as_deref(),
        }
    }
}
