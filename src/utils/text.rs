// src/utils/text.rs

//! Small string helpers shared by the extractors and the report.

use unicode_segmentation::UnicodeSegmentation;

/// Trim `s` and return it only if something is left.
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Whether `text` contains any of the non-empty `keywords`.
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && text.contains(k.as_str()))
}

/// Cut `s` to at most `max` grapheme clusters, marking the cut with `…`.
///
/// Hangul syllables and combining sequences are never split.
pub fn truncate_graphemes(s: &str, max: usize) -> String {
    let graphemes: Vec<&str> = s.graphemes(true).collect();
    if graphemes.len() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out: String = graphemes[..max - 1].concat();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}
