//! Output formatting for search results.
//!
//! Supports both human-readable terminal output and JSON for scripting.
//! Labels follow the selected interface language.

use shloka_core::i18n::Language;
use shloka_core::search::VerseMatch;
use shloka_core::speech::VerseAudio;
use serde::Serialize;
use std::path::PathBuf;

/// Width of the similarity bar in characters
const BAR_WIDTH: usize = 20;

/// JSON output structure for search results
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub query: &'a str,
    pub language: Language,
    pub results: Vec<JsonVerseResult<'a>>,
}

/// Verse-level result in JSON format
#[derive(Serialize)]
pub struct JsonVerseResult<'a> {
    pub rank: usize,
    pub chapter: &'a str,
    pub verse: &'a str,
    /// Cosine similarity in [-1, 1]
    pub similarity: f32,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub audio_files: Vec<PathBuf>,
}

/// Formats search results as JSON.
///
/// `audio_files` maps each result (by position) to the clips written for it.
pub fn format_json(
    query: &str,
    language: Language,
    results: &[VerseMatch],
    audio_files: &[Vec<PathBuf>],
) -> String {
    let output = JsonOutput {
        query,
        language,
        results: results
            .iter()
            .enumerate()
            .map(|(i, result)| JsonVerseResult {
                rank: result.rank,
                chapter: result.verse.chapter_label(),
                verse: result.verse.verse_label(),
                similarity: result.similarity,
                text: &result.verse.text,
                translation: result.verse.translation_for(language),
                audio_files: audio_files.get(i).cloned().unwrap_or_default(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Formats search results for human-readable terminal output.
///
/// Speech failures recorded in `clips` (by result position) are listed
/// under their result.
pub fn format_human(
    query: &str,
    language: Language,
    results: &[VerseMatch],
    clips: &[VerseAudio],
) -> String {
    let text = language.ui_text();
    if results.is_empty() {
        return format!("{} \"{}\"", text.no_results, query);
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n\n", text.results_title));

    for (i, result) in results.iter().enumerate() {
        output.push_str(&format!(
            "{}. {}\n",
            result.rank,
            heading(language, result)
        ));

        output.push_str(&format!("   {}:\n", text.original_verse));
        output.push_str(&format!("   {}\n", indent_text(result.verse.text.trim(), "   ")));

        if let Some(translation) = result.verse.translation_for(language) {
            output.push_str(&format!("   {}:\n", text.translation));
            output.push_str(&format!("   {}\n", indent_text(translation.trim(), "   ")));
        }

        output.push_str(&format!("   {}\n", similarity_bar(result.similarity_percent())));

        for error in clips.get(i).map(|c| c.errors.as_slice()).unwrap_or_default() {
            output.push_str(&format!("   ⚠ {}\n", error));
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

/// Result heading, e.g. `Chapter 18, Verse 66 (Similarity: 45.67%)`.
///
/// Prints the raw cosine score, so negative similarities stay negative.
pub fn heading(language: Language, result: &VerseMatch) -> String {
    let text = language.ui_text();
    format!(
        "{} {}, {} {} ({}: {:.2}%)",
        text.chapter,
        result.verse.chapter_label(),
        text.verse,
        result.verse.verse_label(),
        text.similarity,
        result.similarity * 100.0
    )
}

/// Localized example queries as a numbered list.
pub fn format_examples(language: Language) -> String {
    let text = language.ui_text();
    let mut output = format!("{}\n", text.example_queries_title);
    for (i, example) in text.example_queries.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, example));
    }
    output.trim_end().to_string()
}

/// Text progress bar for a percentage in [0, 100].
fn similarity_bar(percent: f32) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Indents all lines of text after the first line.
fn indent_text(text: &str, indent: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
