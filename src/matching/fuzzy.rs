use rapidfuzz::distance::levenshtein;

use crate::matching::normalize::normalize;

/// Similarity a guess must reach to count as correct (0-100)
///
/// Shared by the single-token and compound checks so a surname guess and a
/// full-name guess are held to the same bar.
pub const MATCH_THRESHOLD: f64 = 80.0;

/// Levenshtein distance over the normalized forms of both strings
pub fn edit_distance(a: &str, b: &str) -> usize {
    distance_normalized(&normalize(a), &normalize(b))
}

/// Similarity score in [0, 100] over the normalized forms
///
/// Identical normalized strings score 100 (including two empty strings);
/// a non-empty string against an empty one scores 0; otherwise
/// `((max_len - distance) / max_len) * 100`.
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_normalized(&normalize(a), &normalize(b))
}

/// Threshold check against a single target name
pub fn is_match(guess: &str, target: &str) -> bool {
    similarity(guess, target) >= MATCH_THRESHOLD
}

/// Threshold check against any part of a multi-word name
///
/// Accepts the guess when it matches a single token of `full_name`, any
/// contiguous run of tokens joined by single spaces (multi-word surnames
/// such as "van Dijk" or "Di Gregorio"), or the full name itself.
pub fn is_compound_match(guess: &str, full_name: &str) -> bool {
    let guess_norm = normalize(guess);
    let name_norm = normalize(full_name);

    if similarity_normalized(&guess_norm, &name_norm) >= MATCH_THRESHOLD {
        return true;
    }

    let tokens: Vec<&str> = name_norm.split_whitespace().collect();
    for start in 0..tokens.len() {
        for end in start..tokens.len() {
            // The full run is already covered by the whole-name check
            if start == 0 && end == tokens.len() - 1 {
                continue;
            }
            let run = tokens[start..=end].join(" ");
            if similarity_normalized(&guess_norm, &run) >= MATCH_THRESHOLD {
                return true;
            }
        }
    }

    false
}

fn distance_normalized(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

fn similarity_normalized(a: &str, b: &str) -> f64 {
    if a == b {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    let dist = distance_normalized(a, b);
    ((max_len - dist) as f64 / max_len as f64) * 100.0
}
