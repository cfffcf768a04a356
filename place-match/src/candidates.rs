use regex::Regex;

/// Candidate names shorter than this or longer than `MAX_CANDIDATE_CHARS`
/// are discarded (bounds are strict).
pub const MIN_CANDIDATE_CHARS: usize = 2;
pub const MAX_CANDIDATE_CHARS: usize = 50;

/// Pattern-based extraction of candidate place names from free text.
///
/// Bounded-recall heuristics, not a parser: capitalized phrases after cue
/// words ("at", "from", "try", "love", "recommend") and capitalized
/// phrases immediately before a venue-type noun. Output occasionally
/// contains garbage (partial sentences, stray punctuation); the matcher's
/// similarity threshold is what filters that out.
#[derive(Debug)]
pub struct CandidateExtractor {
    cue_pattern: Regex,
    venue_pattern: Regex,
}

impl CandidateExtractor {
    pub fn new() -> Self {
        let cue_pattern = Regex::new(
            r"\b(?:at|from|try|love|recommend)\s+((?:[A-Z][\w'&-]*)(?:\s+[A-Z][\w'&-]*)*)",
        )
        .expect("cue pattern is valid");

        let venue_pattern = Regex::new(
            r"((?:[A-Z][\w'&-]*\s+)*[A-Z][\w'&-]*)\s+(?i:restaurant|cafe|bar|bakery|pub|diner|bistro)",
        )
        .expect("venue pattern is valid");

        Self {
            cue_pattern,
            venue_pattern,
        }
    }

    /// Deduplicated candidates in order of first appearance, length-bounded.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();

        for pattern in [&self.cue_pattern, &self.venue_pattern] {
            for caps in pattern.captures_iter(text) {
                if let Some(m) = caps.get(1) {
                    let candidate = m.as_str().trim().to_string();
                    let len = candidate.chars().count();
                    if len > MIN_CANDIDATE_CHARS
                        && len < MAX_CANDIDATE_CHARS
                        && !candidates.contains(&candidate)
                    {
                        candidates.push(candidate);
                    }
                }
            }
        }

        candidates
    }
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new()
    }
}
