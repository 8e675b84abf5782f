//! Speech generation for search results.

use anyhow::{Context, Result};
use shloka_core::i18n::Language;
use shloka_core::search::VerseMatch;
use shloka_core::speech::{synthesize_verse_audio, SpeechSynthesizer, VerseAudio};
use std::path::{Path, PathBuf};
use tracing::info;

/// Generates original-verse and translation audio for every result, in order.
pub async fn generate_audio(
    synthesizer: &dyn SpeechSynthesizer,
    results: &[VerseMatch],
    language: Language,
) -> Vec<VerseAudio> {
    let text = language.ui_text();
    let mut clips = Vec::with_capacity(results.len());
    eprintln!("{}", text.generating_audio);
    for result in results {
        let audio = synthesize_verse_audio(synthesizer, &result.verse, language, |kind| {
            eprintln!("  {}", kind.notice(text));
        })
        .await;
        clips.push(audio);
    }
    clips
}

/// File stem for a result's clips, e.g. `01_18_66`.
fn clip_stem(result: &VerseMatch) -> String {
    let sanitize = |label: &str| -> String {
        label
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect()
    };
    format!(
        "{:02}_{}_{}",
        result.rank,
        sanitize(result.verse.chapter_label()),
        sanitize(result.verse.verse_label())
    )
}

/// Writes generated clips as MP3 files into `dir`.
///
/// Returns the paths written for each result, in result order.
pub async fn write_audio_files(
    dir: &Path,
    results: &[VerseMatch],
    clips: &[VerseAudio],
) -> Result<Vec<Vec<PathBuf>>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create audio directory: {}", dir.display()))?;

    let mut written = vec![Vec::new(); results.len()];
    let mut count = 0;
    for (i, (result, audio)) in results.iter().zip(clips).enumerate() {
        let stem = clip_stem(result);
        let files = [
            ("original", audio.original.as_ref()),
            ("translation", audio.translation.as_ref()),
        ];
        for (kind, bytes) in files {
            let Some(bytes) = bytes else { continue };
            let path = dir.join(format!("{}_{}.mp3", stem, kind));
            tokio::fs::write(&path, bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written[i].push(path);
            count += 1;
        }
    }

    info!("Wrote {} audio files to {}", count, dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shloka_core::corpus::Verse;

    fn result(rank: usize, chapter: Option<&str>, verse: Option<&str>) -> VerseMatch {
        let mut v = Verse::from_text("text");
        v.chapter = chapter.map(str::to_string);
        v.verse = verse.map(str::to_string);
        VerseMatch {
            rank,
            index: 0,
            verse: v,
            similarity: 0.5,
        }
    }

    #[test]
    fn test_clip_stem() {
        assert_eq!(clip_stem(&result(1, Some("18"), Some("66"))), "01_18_66");
        assert_eq!(clip_stem(&result(12, None, Some("1/2"))), "12_Unknown_1-2");
    }

    #[tokio::test]
    async fn test_write_audio_files_skips_missing_clips() {
        let dir = tempfile::tempdir().unwrap();
        let results = vec![result(1, Some("18"), Some("66"))];
        let clips = vec![VerseAudio {
            original: Some(b"mp3".to_vec()),
            translation: None,
            errors: vec![],
        }];

        let written = write_audio_files(dir.path(), &results, &clips).await.unwrap();
        assert_eq!(written, vec![vec![dir.path().join("01_18_66_original.mp3")]]);
        assert_eq!(std::fs::read(&written[0][0]).unwrap(), b"mp3".to_vec());
    }
}
