// Character-level helpers shared by the tagging, statistics and gap stages.

/// Apostrophe variants treated as equivalent: ASCII, grave accent,
/// typographic left/right quotes, reversed quote and modifier letter.
pub const APOSTROPHES: [char; 6] = ['\'', '`', '\u{2018}', '\u{2019}', '\u{201B}', '\u{02BC}'];

pub fn is_apostrophe_char(c: char) -> bool {
    APOSTROPHES.contains(&c)
}

/// True if the text contains any apostrophe variant.
pub fn has_apostrophe(text: &str) -> bool {
    text.chars().any(is_apostrophe_char)
}

/// True if the text is exactly one apostrophe character.
pub fn is_lone_apostrophe(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_apostrophe_char(c))
}

/// Rewrite every apostrophe variant as ASCII `'`.
pub fn normalize_apostrophes(text: &str) -> String {
    text.chars()
        .map(|c| if is_apostrophe_char(c) { '\'' } else { c })
        .collect()
}

/// Case-folded form with everything but word characters and apostrophes
/// removed. Apostrophe variants fold to `'`. This is the key used for
/// frequency counts, profile matching and embedding lookups.
pub fn clean_word(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .map(|c| if is_apostrophe_char(c) { '\'' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '\'')
        .collect()
}

/// True if the word carries no letter, digit or apostrophe and should be
/// discarded as punctuation.
pub fn is_punctuation_only(word: &str) -> bool {
    let trimmed = word.trim();
    trimmed.is_empty()
        || !trimmed
            .chars()
            .any(|c| c.is_alphanumeric() || is_apostrophe_char(c))
}

/// True if every character is alphabetic (and there is at least one).
pub fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
