//! JSON shape detection and verse normalisation.
//!
//! Corpus files in the wild come in a handful of layouts. Each layout is
//! tried in order and the first one that produces verses wins.

use super::types::Verse;
use serde_json::{Map, Value};

/// Fields searched, in order, for the text to embed.
const TEXT_FIELDS: [&str; 5] = ["text", "verse_text", "content", "kannada", "translation"];

/// Fields lifted into typed `Verse` members and therefore not kept in `extra`.
const KNOWN_FIELDS: [&str; 7] = [
    "chapter",
    "chapter_number",
    "verse",
    "verse_number",
    "text",
    "translation",
    "english_translation",
];

/// Extracts verses from any supported corpus layout.
///
/// Supported layouts:
/// 1. `[verse, ...]`
/// 2. `{"verses": [verse, ...]}`
/// 3. `{"chapters": [{"chapter_number": n, "verses": [verse, ...]}, ...]}`
/// 4. `{"<chapter>": {"verses": {"<verse>": "text", ...}}, ...}`
///
/// Returns an empty list when nothing matches.
pub(crate) fn extract_verses(data: Value) -> Vec<Verse> {
    match data {
        Value::Array(items) => items.into_iter().map(verse_from_value).collect(),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("verses") {
                return items.into_iter().map(verse_from_value).collect();
            }

            let verses = match map.get("chapters") {
                Some(Value::Array(chapters)) => verses_from_chapter_list(chapters),
                _ => Vec::new(),
            };
            if !verses.is_empty() {
                return verses;
            }

            verses_from_chapter_map(&map)
        }
        _ => Vec::new(),
    }
}

fn verses_from_chapter_list(chapters: &[Value]) -> Vec<Verse> {
    let mut verses = Vec::new();
    for chapter in chapters {
        let Some(Value::Array(items)) = chapter.get("verses") else {
            continue;
        };
        let chapter_label = chapter
            .get("chapter_number")
            .and_then(label_from_value)
            .unwrap_or_default();
        for item in items {
            let mut verse = verse_from_value(item.clone());
            verse.chapter = Some(chapter_label.clone());
            verses.push(verse);
        }
    }
    verses
}

fn verses_from_chapter_map(map: &Map<String, Value>) -> Vec<Verse> {
    let mut verses = Vec::new();
    for (chapter_label, chapter) in map {
        let Some(Value::Object(chapter_verses)) = chapter.get("verses") else {
            continue;
        };
        for (verse_label, text) in chapter_verses {
            let mut verse = Verse::from_text(text_from_value(text));
            verse.chapter = Some(chapter_label.clone());
            verse.verse = Some(verse_label.clone());
            verses.push(verse);
        }
    }
    verses
}

/// Normalises one corpus element into a `Verse`.
pub(crate) fn verse_from_value(value: Value) -> Verse {
    match value {
        Value::String(text) => Verse::from_text(text),
        Value::Object(map) => verse_from_object(map),
        other => Verse::from_text(other.to_string()),
    }
}

fn verse_from_object(map: Map<String, Value>) -> Verse {
    let text = TEXT_FIELDS
        .iter()
        .find_map(|field| map.get(*field))
        .map(text_from_value)
        .unwrap_or_else(|| Value::Object(map.clone()).to_string());

    let chapter = map
        .get("chapter")
        .or_else(|| map.get("chapter_number"))
        .and_then(label_from_value);
    let verse = map
        .get("verse")
        .or_else(|| map.get("verse_number"))
        .and_then(label_from_value);
    let translation = map.get("translation").and_then(string_field);
    let english_translation = map.get("english_translation").and_then(string_field);

    let extra = map
        .into_iter()
        .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
        .collect();

    Verse {
        chapter,
        verse,
        text,
        translation,
        english_translation,
        extra,
    }
}

/// Renders a chapter or verse label. Numbers print in decimal, null is absent.
fn label_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_field(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_array() {
        let verses = extract_verses(json!([
            {"chapter": 18, "verse": 1, "text": "a"},
            {"chapter": 18, "verse": 2, "text": "b"}
        ]));
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].chapter.as_deref(), Some("18"));
        assert_eq!(verses[1].verse.as_deref(), Some("2"));
        assert_eq!(verses[1].text, "b");
    }

    #[test]
    fn test_verses_key() {
        let verses = extract_verses(json!({"verses": ["first", "second"]}));
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].text, "first");
        assert_eq!(verses[0].chapter, None);
    }

    #[test]
    fn test_chapters_list_inherits_chapter_number() {
        let verses = extract_verses(json!({
            "chapters": [
                {"chapter_number": 18, "verses": [
                    {"chapter": 2, "verse": "1", "text": "x"},
                    {"verse": "2", "text": "y"}
                ]},
                {"verses": [{"verse": "1", "text": "z"}]}
            ]
        }));
        assert_eq!(verses.len(), 3);
        assert_eq!(verses[0].chapter.as_deref(), Some("18"));
        assert_eq!(verses[1].chapter.as_deref(), Some("18"));
        assert_eq!(verses[2].chapter.as_deref(), Some(""));
    }

    #[test]
    fn test_chapter_map_layout_preserves_order() {
        let verses = extract_verses(json!({
            "18": {"verses": {"1": "one", "2": "two", "10": "ten"}}
        }));
        let labels: Vec<_> = verses.iter().map(|v| v.verse_label()).collect();
        assert_eq!(labels, vec!["1", "2", "10"]);
        assert!(verses.iter().all(|v| v.chapter_label() == "18"));
        assert_eq!(verses[2].text, "ten");
    }

    #[test]
    fn test_unrecognised_layout_is_empty() {
        assert!(extract_verses(json!({"title": "Gita"})).is_empty());
        assert!(extract_verses(json!(42)).is_empty());
    }

    #[test]
    fn test_text_field_priority() {
        let verse = verse_from_value(json!({"content": "c", "kannada": "k"}));
        assert_eq!(verse.text, "c");

        let verse = verse_from_value(json!({"translation": "t"}));
        assert_eq!(verse.text, "t");
        assert_eq!(verse.translation.as_deref(), Some("t"));
    }

    #[test]
    fn test_object_without_text_uses_json_rendering() {
        let verse = verse_from_value(json!({"number": 7}));
        assert_eq!(verse.text, r#"{"number":7}"#);
        assert_eq!(verse.extra.get("number"), Some(&json!(7)));
    }

    #[test]
    fn test_non_object_elements() {
        assert_eq!(verse_from_value(json!(3.5)).text, "3.5");
        assert_eq!(verse_from_value(json!(null)).text, "null");
    }

    #[test]
    fn test_extra_fields_kept() {
        let verse = verse_from_value(json!({
            "text": "t",
            "transliteration": "tr",
            "english_translation": "e"
        }));
        assert_eq!(verse.english_translation.as_deref(), Some("e"));
        assert_eq!(verse.extra.len(), 1);
        assert!(verse.extra.contains_key("transliteration"));
    }
}
