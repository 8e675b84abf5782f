//! Bilingual interface text.
//!
//! Every user-facing label exists in English and Kannada. Frontends pick a
//! [`Language`] and render labels from the matching [`UiText`] table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English labels, English translation of each verse
    #[default]
    English,
    /// Kannada labels, Kannada meaning of each verse
    Kannada,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 2] = [Language::English, Language::Kannada];

    /// Language code understood by the speech endpoint.
    pub fn speech_code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Kannada => "kn",
        }
    }

    /// Label table for this language.
    pub fn ui_text(self) -> &'static UiText {
        match self {
            Language::English => &ENGLISH,
            Language::Kannada => &KANNADA,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Kannada => write!(f, "Kannada"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "kannada" | "kn" => Ok(Language::Kannada),
            other => Err(format!(
                "unknown language '{}' (expected english or kannada)",
                other
            )),
        }
    }
}

/// Static label table for one language.
#[derive(Debug)]
pub struct UiText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub data_loaded: &'static str,
    pub example_queries_title: &'static str,
    pub example_queries: [&'static str; 5],
    pub query_prompt: &'static str,
    pub query_example: &'static str,
    pub results_count_prompt: &'static str,
    pub search: &'static str,
    pub searching: &'static str,
    pub results_title: &'static str,
    pub no_results: &'static str,
    pub chapter: &'static str,
    pub verse: &'static str,
    pub similarity: &'static str,
    pub original_verse: &'static str,
    pub translation: &'static str,
    pub generating_audio: &'static str,
    pub generating_original_audio: &'static str,
    pub generating_translation_audio: &'static str,
}

static ENGLISH: UiText = UiText {
    title: "🕉️ Bhagavad Gita Search",
    subtitle: "Semantic Search in Bhagavad Gita",
    data_loaded: "✅ Bhagavad Gita data loaded successfully",
    example_queries_title: "📝 Example Queries",
    example_queries: [
        "What is the true difference between Tyaga and Sannyasa?",
        "How do the three Gunas influence our actions and knowledge?",
        "What is the importance of performing one's own duty (Svadharma)?",
        "How can one attain liberation (Moksha) from the bondage of karma?",
        "What is the final advice given by Sri Krishna to Arjuna?",
    ],
    query_prompt: "Enter your question here",
    query_example: "Example: What did Krishna say about karma?",
    results_count_prompt: "How many results to show?",
    search: "🔍 Search",
    searching: "Searching...",
    results_title: "📖 Results",
    no_results: "No matching verses",
    chapter: "Chapter",
    verse: "Verse",
    similarity: "Similarity",
    original_verse: "Original Verse",
    translation: "English Translation",
    generating_audio: "Generating audio...",
    generating_original_audio: "Generating original verse audio...",
    generating_translation_audio: "Generating translation audio...",
};

static KANNADA: UiText = UiText {
    title: "🕉️ ಭಗವದ್ಗೀತೆ ಸರ್ಚ್",
    subtitle: "ಭಗವದ್ಗೀತೆಯಲ್ಲಿ ಸಂದರ್ಭೋಚಿತ ಹುಡುಕಾಟ",
    data_loaded: "✅ ಭಗವದ್ಗೀತೆಯ ಮಾಹಿತಿ ಈಗ ಲಭ್ಯ",
    example_queries_title: "📝 ಉದಾಹರಣೆ ಪ್ರಶ್ನೆಗಳು",
    example_queries: [
        "ತ್ಯಾಗ ಮತ್ತು ಸಂನ್ಯಾಸದ ನಡುವಿನ ನಿಜವಾದ ವ್ಯತ್ಯಾಸವೇನು?",
        "ಮೂರು ಗುಣಗಳು ನಮ್ಮ ಕರ್ಮ ಮತ್ತು ಜ್ಞಾನದ ಮೇಲೆ ಹೇಗೆ ಪ್ರಭಾವ ಬೀರುತ್ತವೆ?",
        "ಸ್ವಧರ್ಮವನ್ನು ಆಚರಿಸುವುದರ ಮಹತ್ವವೇನು?",
        "ಕರ್ಮ ಬಂಧನದಿಂದ ಮುಕ್ತರಾಗಿ ಮೋಕ್ಷವನ್ನು ಸಾಧಿಸುವುದು ಹೇಗೆ?",
        "ಅರ್ಜುನನಿಗೆ ಶ್ರೀಕೃಷ್ಣನು ನೀಡಿದ ಅಂತಿಮ ಉಪದೇಶವೇನು?",
    ],
    query_prompt: "ನಿಮ್ಮ ಪ್ರಶ್ನೆಯನ್ನು ಇಲ್ಲಿ ಬರೆಯಿರಿ",
    query_example: "ಉದಾ: ಕರ್ಮದ ಬಗ್ಗೆ ಕೃಷ್ಣನು ಏನು ಹೇಳಿದನು?",
    results_count_prompt: "ಎಷ್ಟು ಫಲಿತಾಂಶಗಳನ್ನು ತೋರಿಸಬೇಕು?",
    search: "🔍 ಹುಡುಕಿ",
    searching: "ಹುಡುಕುತ್ತಿದೆ...",
    results_title: "📖 ಫಲಿತಾಂಶಗಳು",
    no_results: "ಹೊಂದುವ ಶ್ಲೋಕಗಳಿಲ್ಲ",
    chapter: "ಅಧ್ಯಾಯ",
    verse: "ಶ್ಲೋಕ",
    similarity: "ಹೊಂದಾಣಿಕೆ",
    original_verse: "ಮೂಲ ಶ್ಲೋಕ",
    translation: "ಕನ್ನಡ ಅರ್ಥ",
    generating_audio: "ಧ್ವನಿ ತಯಾರಿಸುತ್ತಿದೆ...",
    generating_original_audio: "ಮೂಲ ಶ್ಲೋಕದ ಧ್ವನಿ ತಯಾರಿಸುತ್ತಿದೆ...",
    generating_translation_audio: "ಅನುವಾದದ ಧ್ವನಿ ತಯಾರಿಸುತ್ತಿದೆ...",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!("English".parse::<Language>(), Ok(Language::English));
        assert_eq!("kn".parse::<Language>(), Ok(Language::Kannada));
        assert_eq!(" KANNADA ".parse::<Language>(), Ok(Language::Kannada));
        assert!("hindi".parse::<Language>().is_err());
    }

    #[test]
    fn test_speech_codes() {
        assert_eq!(Language::English.speech_code(), "en");
        assert_eq!(Language::Kannada.speech_code(), "kn");
    }

    #[test]
    fn test_tables_differ_per_language() {
        let en = Language::English.ui_text();
        let kn = Language::Kannada.ui_text();
        assert_eq!(en.chapter, "Chapter");
        assert_eq!(kn.chapter, "ಅಧ್ಯಾಯ");
        assert_eq!(en.example_queries.len(), kn.example_queries.len());
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::English);
    }
}
