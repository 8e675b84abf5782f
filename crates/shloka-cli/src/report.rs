//! Self-contained HTML report of search results with inline audio players.

use crate::output::heading;
use anyhow::{Context, Result};
use shloka_core::i18n::Language;
use shloka_core::search::VerseMatch;
use shloka_core::speech::{audio_player_html, escape_html, VerseAudio};
use std::path::Path;
use tracing::info;

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 900px; margin: 2rem auto; color: #2c3e50; }
.result { border-left: 4px solid #ff9933; padding: 0.5rem 1rem; margin-bottom: 1.5rem; background: #fdf6ec; }
.verse-text { white-space: pre-wrap; font-size: 1.1rem; }
.translation { white-space: pre-wrap; color: #34495e; }
.audio-section { display: flex; align-items: center; gap: 0.5rem; margin: 0.5rem 0; }
.audio-label { font-weight: bold; }
.audio-error { color: #c0392b; }
"#;

/// Renders results as an HTML page.
///
/// `clips` holds generated audio by result position and may be shorter than
/// `results` (or empty) when speech was not requested.
pub fn render_html(
    query: &str,
    language: Language,
    results: &[VerseMatch],
    clips: &[VerseAudio],
) -> String {
    let text = language.ui_text();
    let mut body = String::new();

    if results.is_empty() {
        body.push_str(&format!(
            "<p>{} &quot;{}&quot;</p>\n",
            escape_html(text.no_results),
            escape_html(query)
        ));
    }

    for (i, result) in results.iter().enumerate() {
        body.push_str("<div class=\"result\">\n");
        body.push_str(&format!(
            "<h3>{}. {}</h3>\n",
            result.rank,
            escape_html(&heading(language, result))
        ));
        body.push_str(&format!(
            "<h4>{}</h4>\n<div class=\"verse-text\">{}</div>\n",
            escape_html(text.original_verse),
            escape_html(result.verse.text.trim())
        ));

        let audio = clips.get(i);
        if let Some(bytes) = audio.and_then(|a| a.original.as_ref()) {
            body.push_str(&audio_player_html(bytes, text.original_verse));
            body.push('\n');
        }

        if let Some(translation) = result.verse.translation_for(language) {
            body.push_str(&format!(
                "<h4>{}</h4>\n<div class=\"translation\">{}</div>\n",
                escape_html(text.translation),
                escape_html(translation.trim())
            ));
        }
        if let Some(bytes) = audio.and_then(|a| a.translation.as_ref()) {
            body.push_str(&audio_player_html(bytes, text.translation));
            body.push('\n');
        }
        for error in audio.map(|a| a.errors.as_slice()).unwrap_or_default() {
            body.push_str(&format!(
                "<div class=\"audio-error\">{}</div>\n",
                escape_html(error)
            ));
        }

        body.push_str("</div>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n<p>{subtitle}</p>\n<p><em>{query}</em></p>\n\
         <h2>{results_title}</h2>\n{body}</body>\n</html>\n",
        lang = language.speech_code(),
        title = escape_html(text.title),
        style = STYLE,
        subtitle = escape_html(text.subtitle),
        query = escape_html(query),
        results_title = escape_html(text.results_title),
        body = body,
    )
}

/// Writes the HTML report to `path`.
pub async fn write_html(
    path: &Path,
    query: &str,
    language: Language,
    results: &[VerseMatch],
    clips: &[VerseAudio],
) -> Result<()> {
    let html = render_html(query, language, results, clips);
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("Failed to write HTML report: {}", path.display()))?;
    info!("Wrote HTML report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shloka_core::corpus::Verse;

    fn result() -> VerseMatch {
        let mut verse = Verse::from_text("mam ekam <sharanam> vraja");
        verse.chapter = Some("18".to_string());
        verse.verse = Some("66".to_string());
        verse.english_translation = Some("Take refuge in Me alone".to_string());
        VerseMatch {
            rank: 1,
            index: 65,
            verse,
            similarity: 0.8,
        }
    }

    #[test]
    fn test_render_escapes_text() {
        let html = render_html("a & b", Language::English, &[result()], &[]);
        assert!(html.contains("mam ekam &lt;sharanam&gt; vraja"));
        assert!(html.contains("<em>a &amp; b</em>"));
        assert!(html.contains("Chapter 18, Verse 66 (Similarity: 80.00%)"));
        assert!(!html.contains("<audio"));
    }

    #[test]
    fn test_render_embeds_audio() {
        let clips = vec![VerseAudio {
            original: Some(b"abc".to_vec()),
            translation: Some(b"xyz".to_vec()),
            errors: vec![],
        }];
        let html = render_html("refuge", Language::English, &[result()], &clips);
        assert_eq!(html.matches("<audio controls>").count(), 2);
        assert!(html.contains("data:audio/mp3;base64,YWJj"));
        assert!(html.contains("data:audio/mp3;base64,eHl6"));
    }

    #[test]
    fn test_render_shows_speech_errors() {
        let clips = vec![VerseAudio {
            original: None,
            translation: Some(b"xyz".to_vec()),
            errors: vec!["Speech endpoint returned <no> audio".to_string()],
        }];
        let html = render_html("refuge", Language::English, &[result()], &clips);
        assert_eq!(html.matches("<audio controls>").count(), 1);
        assert!(html.contains(
            "<div class=\"audio-error\">Speech endpoint returned &lt;no&gt; audio</div>"
        ));
    }

    #[test]
    fn test_render_no_results_kannada() {
        let html = render_html("x", Language::Kannada, &[], &[]);
        assert!(html.contains("<html lang=\"kn\">"));
        assert!(html.contains("ಹೊಂದುವ ಶ್ಲೋಕಗಳಿಲ್ಲ"));
    }

    #[tokio::test]
    async fn test_write_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        write_html(&path, "refuge", Language::English, &[result()], &[])
            .await
            .unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
