//! Splitting text into parts the speech endpoint accepts.

/// Longest text (in characters) the endpoint accepts per request.
pub const MAX_PART_CHARS: usize = 100;

/// Characters after which a part may end.
const BREAK_CHARS: &[char] = &[
    '.', ',', ';', ':', '!', '?', '¡', '¿', '…', '।', '॥', '、', '。', '，', '؟', '،', '\n',
];

/// Splits `text` into speakable parts of at most `max_chars` characters.
///
/// Text is first cut after punctuation. Any piece still too long is cut at
/// the last whitespace inside the limit, or hard-cut if it has none. Parts
/// are trimmed; parts that are empty or pure punctuation are dropped.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut parts = Vec::new();

    for piece in split_after_punctuation(text) {
        for part in minimize(piece, max_chars) {
            let part = part.trim();
            if part.chars().any(char::is_alphanumeric) {
                parts.push(part.to_string());
            }
        }
    }
    parts
}

fn split_after_punctuation(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if BREAK_CHARS.contains(&c) {
            let end = i + c.len_utf8();
            pieces.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

/// Cuts `piece` into chunks of at most `max_chars` characters, preferring
/// whitespace boundaries.
fn minimize(piece: &str, max_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = piece.trim();

    while rest.chars().count() > max_chars {
        // Byte offset just past the first `max_chars` characters
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let window = &rest[..limit];
        let cut = match window.rfind(char::is_whitespace) {
            Some(i) if i > 0 => i,
            _ => limit,
        };
        chunks.push(&rest[..cut]);
        rest = rest[cut..].trim_start();
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_part() {
        assert_eq!(split_for_speech("Hello world", 100), vec!["Hello world"]);
    }

    #[test]
    fn test_splits_after_punctuation() {
        assert_eq!(
            split_for_speech("First part. Second part, third!", 100),
            vec!["First part.", "Second part,", "third!"]
        );
    }

    #[test]
    fn test_splits_on_danda() {
        let parts = split_for_speech("ಕರ್ಮಣ್ಯೇವಾಧಿಕಾರಸ್ತೇ । ಮಾ ಫಲೇಷು ಕದಾಚನ ॥", 100);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].ends_with('।'));
    }

    #[test]
    fn test_long_piece_cut_at_whitespace() {
        let text = "word ".repeat(30); // 150 chars, no punctuation
        let parts = split_for_speech(&text, 20);
        assert!(parts.iter().all(|p| p.chars().count() <= 20));
        assert!(parts.iter().all(|p| !p.starts_with(' ') && !p.ends_with(' ')));
        let rejoined: Vec<&str> = parts.iter().flat_map(|p| p.split(' ')).collect();
        assert_eq!(rejoined.len(), 30);
    }

    #[test]
    fn test_long_word_hard_cut() {
        let text = "a".repeat(25);
        let parts = split_for_speech(&text, 10);
        assert_eq!(parts, vec!["a".repeat(10), "a".repeat(10), "a".repeat(5)]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Each Kannada character is 3 bytes in UTF-8
        let text = "ಕ".repeat(12);
        let parts = split_for_speech(&text, 10);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chars().count(), 10);
    }

    #[test]
    fn test_drops_punctuation_only_parts() {
        assert_eq!(split_for_speech("... ,,, Hi.", 100), vec!["Hi."]);
        assert!(split_for_speech("   ", 100).is_empty());
    }
}
