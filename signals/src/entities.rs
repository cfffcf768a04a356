use crate::lexicons::{LOCATION_GAZETTEER, TOURIST_TRAP_PHRASES};

/// Subset of `known` found as substrings of the lowercased text, in list
/// order. Set semantics: repeated occurrences collapse to one entry.
fn find_known(known: &[&str], text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    known
        .iter()
        .filter(|entry| lowered.contains(*entry))
        .map(|entry| (*entry).to_string())
        .collect()
}

pub fn extract_locations(text: &str) -> Vec<String> {
    find_known(LOCATION_GAZETTEER, text)
}

pub fn extract_tourist_traps(text: &str) -> Vec<String> {
    find_known(TOURIST_TRAP_PHRASES, text)
}
