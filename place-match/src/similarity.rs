use strsim::levenshtein;

/// Fixed score for one string containing the other: deliberately below an
/// exact match, and a fast short-circuit before the edit-distance fallback.
pub const CONTAINMENT_SCORE: f64 = 0.8;

/// Normalized name similarity in [0, 1].
///
/// Case- and whitespace-insensitive exact match scores 1.0; an empty side
/// scores 0.0; containment scores [`CONTAINMENT_SCORE`]; otherwise
/// `1 - levenshtein / max_len`. Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return CONTAINMENT_SCORE;
    }

    let max_len = a.chars().count().max(b.chars().count());
    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}
