use crate::lexicons::{CATEGORY_TRIGGERS, GENERAL_CATEGORY};

/// Keyword-bucket classifier over the concatenated title+body text.
///
/// Substring match, not tokenized; the output is an insertion-ordered set
/// and is never empty (`general` is the fallback tag).
pub fn categorize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut categories: Vec<String> = CATEGORY_TRIGGERS
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| lowered.contains(t)))
        .map(|(category, _)| (*category).to_string())
        .collect();

    if categories.is_empty() {
        categories.push(GENERAL_CATEGORY.to_string());
    }
    categories
}
