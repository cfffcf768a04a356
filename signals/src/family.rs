use crate::lexicons::{HIDDEN_GEM_PHRASES, PARENT_FRIENDLY_TERMS};

/// How many of the fixed parent-friendly terms appear in the text, each
/// counted once.
pub fn parent_friendly_score(text: &str) -> i32 {
    let lowered = text.to_lowercase();
    PARENT_FRIENDLY_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .count() as i32
}

/// True if any hidden-gem phrase appears in the text.
pub fn is_hidden_gem(text: &str) -> bool {
    let lowered = text.to_lowercase();
    HIDDEN_GEM_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}
