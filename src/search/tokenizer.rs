use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English words excluded from alignment comparison.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did",
        "will", "would", "could", "should", "may", "might", "can", "this", "that", "these",
        "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
    ]
    .into_iter()
    .collect()
});

/// Tokens must be longer than this many characters to survive.
const MIN_TOKEN_LEN: usize = 3;

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// A word character in the ASCII regex sense: `[A-Za-z0-9_]`.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Normalize free text into comparison tokens.
///
/// Lower-cases the input, splits on anything that is not a word character
/// (punctuation and whitespace alike), then drops short tokens and stop words.
/// Order is preserved and duplicates are kept, since callers count frequencies.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !is_stop_word(t))
        .map(str::to_string)
        .collect()
}
