//! Metadata normalizer for noisy source catalog strings.
//!
//! Video-hosting titles and channel names are full of markers that defeat a
//! structured search against a music catalog: "(Official Music Video)",
//! "[Remastered]", a trailing " - Topic" on auto-generated channels, and so
//! on. [`normalize`] strips these in a fixed, documented order so the result
//! is deterministic and idempotent.

use regex::Regex;
use std::sync::OnceLock;

struct NoisePatterns {
    topic_suffix: Regex,
    official_paren: Regex,
    brackets: Regex,
    parens: Regex,
    featuring: Regex,
    noise_tokens: Regex,
}

fn patterns() -> &'static NoisePatterns {
    static PATTERNS: OnceLock<NoisePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| NoisePatterns {
        topic_suffix: Regex::new(r"(?i) - Topic$").unwrap(),
        official_paren: Regex::new(r"(?i)\(.*?official.*?\)").unwrap(),
        brackets: Regex::new(r"\[.*?\]").unwrap(),
        parens: Regex::new(r"\(.*?\)").unwrap(),
        featuring: Regex::new(r"(?i)ft\.|feat\.|featuring").unwrap(),
        noise_tokens: Regex::new(r"(?i)official|audio|video|music video|lyrics|HD|HQ").unwrap(),
    })
}

/// Normalize an optional metadata string, treating `None` as empty.
///
/// See [`normalize_str`] for the cleaning rules.
pub fn normalize(text: Option<&str>) -> String {
    match text {
        Some(text) => normalize_str(text),
        None => String::new(),
    }
}

/// Clean a title/artist/album string by removing irrelevant markers.
///
/// Applied steps, in order:
///
/// 1. strip a trailing " - Topic" (case-insensitive)
/// 2. strip parenthesized spans mentioning "official" (case-insensitive)
/// 3. strip all bracketed `[...]` spans
/// 4. strip remaining parenthesized `(...)` spans
/// 5. strip featuring markers ("ft.", "feat.", "featuring")
/// 6. strip the noise tokens official/audio/video/music video/lyrics/HD/HQ
/// 7. trim leading and trailing whitespace
///
/// The order is normative: the official-parenthetical rule is checked before
/// the generic parenthetical strip so the documented behavior stays testable
/// even though the generic rule would subsume it. Interior double spaces left
/// behind by removed tokens are kept as-is.
///
/// The pass repeats until the string stops changing. Removing a token can
/// splice a new one together out of its neighbors ("ofofficialficial" loses
/// the inner "official" and becomes "official"), so a single pass would leave
/// output that a second call still changes. Each pass only ever removes
/// characters, so the loop terminates.
///
/// This is a pure function: no I/O, never fails, idempotent for any input.
///
/// # Examples
///
/// ```rust
/// use soundferry::normalize_str;
///
/// assert_eq!(normalize_str("Artist - Topic"), "Artist");
/// assert_eq!(normalize_str("Song (Official Music Video)"), "Song");
/// assert_eq!(normalize_str("Song [Remastered]"), "Song");
/// ```
pub fn normalize_str(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = strip_noise_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_noise_once(text: &str) -> String {
    let p = patterns();
    let text = p.topic_suffix.replace_all(text, "");
    let text = p.official_paren.replace_all(&text, "");
    let text = p.brackets.replace_all(&text, "");
    let text = p.parens.replace_all(&text, "");
    let text = p.featuring.replace_all(&text, "");
    let text = p.noise_tokens.replace_all(&text, "");
    text.trim().to_string()
}
