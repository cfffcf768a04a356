use crate::lexicons::{NEGATIVE_WORDS, POSITIVE_WORDS};
use citylens_core::Sentiment;

/// Signed lexicon delta: distinct positive hits minus distinct negative
/// hits. Each word counts at most once per polarity no matter how often it
/// repeats. A coarse heuristic, not calibrated sentiment analysis.
pub fn sentiment_delta(text: &str) -> i32 {
    let lowered = text.to_lowercase();
    let positive = POSITIVE_WORDS
        .iter()
        .filter(|w| lowered.contains(*w))
        .count() as i32;
    let negative = NEGATIVE_WORDS
        .iter()
        .filter(|w| lowered.contains(*w))
        .count() as i32;
    positive - negative
}

pub fn score_sentiment(text: &str) -> (Sentiment, i32) {
    let delta = sentiment_delta(text);
    let label = match delta {
        d if d > 0 => Sentiment::Positive,
        d if d < 0 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    };
    (label, delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_word_counts_once() {
        assert_eq!(sentiment_delta("love love love love"), 1);
    }

    #[test]
    fn test_delta_and_labels() {
        let (label, delta) = score_sentiment("great and delicious but overpriced");
        assert_eq!(delta, 1);
        assert_eq!(label, Sentiment::Positive);

        let (label, delta) = score_sentiment("terrible, avoid this place");
        assert_eq!(delta, -2);
        assert_eq!(label, Sentiment::Negative);
    }

    #[test]
    fn test_tie_is_neutral() {
        let (label, delta) = score_sentiment("great but terrible");
        assert_eq!(delta, 0);
        assert_eq!(label, Sentiment::Neutral);

        let (label, _) = score_sentiment("");
        assert_eq!(label, Sentiment::Neutral);
    }
}
