/// Inputs to the relevance formula, all derived before scoring.
#[derive(Debug, Clone)]
pub struct RelevanceInput<'a> {
    pub ups: i64,
    pub num_comments: i64,
    pub age_days: f64,
    pub stickied: bool,
    pub categories: &'a [String],
    pub tourist_traps: &'a [String],
    pub parent_friendly_score: i32,
}

/// Combined ranking score. Pure function of its inputs; the exact caps,
/// bonuses, and final rounding are load-bearing for reproducibility.
///
/// The result may be negative when penalties dominate. Callers must not
/// clamp: negative relevance is a meaningful (low) ranking signal.
pub fn relevance_score(input: &RelevanceInput) -> i64 {
    let mut score = (input.ups as f64 / 10.0).min(30.0);
    score += (input.num_comments as f64 / 5.0).min(15.0);

    score += if input.age_days < 3.0 {
        25.0
    } else if input.age_days < 7.0 {
        15.0
    } else if input.age_days < 14.0 {
        10.0
    } else {
        0.0
    };

    if input.stickied {
        score += 20.0;
    }

    let has = |tag: &str| input.categories.iter().any(|c| c == tag);
    if has("parentFriendly") {
        score += 15.0;
    }
    if has("hiddenGems") {
        score += 20.0;
    }
    if has("food") {
        score += 10.0;
    }
    if !input.tourist_traps.is_empty() {
        score -= 10.0;
    }

    score += input.parent_friendly_score as f64 * 3.0;

    score.round() as i64
}

/// Admission filter for the expensive comment-fetch step: stickied posts,
/// guides, and anything at most 30 days old qualify.
pub fn is_temporally_relevant(stickied: bool, flair: Option<&str>, age_days: f64) -> bool {
    if stickied {
        return true;
    }
    if let Some(flair) = flair {
        if flair.to_lowercase().contains("guide") {
            return true;
        }
    }
    age_days <= 30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(categories: &'a [String], traps: &'a [String]) -> RelevanceInput<'a> {
        RelevanceInput {
            ups: 0,
            num_comments: 0,
            age_days: 100.0,
            stickied: false,
            categories,
            tourist_traps: traps,
            parent_friendly_score: 0,
        }
    }

    #[test]
    fn test_worked_example() {
        // ups=100, comments=50, 1 day old, food: 10 + 10 + 25 + 10 = 55.
        let categories = vec!["food".to_string()];
        let score = relevance_score(&RelevanceInput {
            ups: 100,
            num_comments: 50,
            age_days: 1.0,
            stickied: false,
            categories: &categories,
            tourist_traps: &[],
            parent_friendly_score: 0,
        });
        assert_eq!(score, 55);
    }

    #[test]
    fn test_engagement_caps() {
        let categories = Vec::new();
        let traps = Vec::new();
        let mut i = input(&categories, &traps);
        i.ups = 10_000;
        i.num_comments = 10_000;
        assert_eq!(relevance_score(&i), 45);
    }

    #[test]
    fn test_recency_tiers() {
        let categories = Vec::new();
        let traps = Vec::new();
        let mut i = input(&categories, &traps);

        for (age, expected) in [(2.9, 25), (3.0, 15), (6.9, 15), (7.0, 10), (13.9, 10), (14.0, 0)]
        {
            i.age_days = age;
            assert_eq!(relevance_score(&i), expected, "age {age}");
        }
    }

    #[test]
    fn test_negative_scores_are_not_clamped() {
        let categories = Vec::new();
        let traps = vec!["tourist trap".to_string()];
        let i = input(&categories, &traps);
        assert_eq!(relevance_score(&i), -10);
    }

    #[test]
    fn test_parent_friendly_multiplier_and_sticky() {
        let categories = vec!["parentFriendly".to_string()];
        let traps = Vec::new();
        let mut i = input(&categories, &traps);
        i.stickied = true;
        i.parent_friendly_score = 2;
        // 20 sticky + 15 category + 6 multiplier.
        assert_eq!(relevance_score(&i), 41);
    }

    #[test]
    fn test_purity() {
        let categories = vec!["food".to_string(), "hiddenGems".to_string()];
        let traps = Vec::new();
        let mut i = input(&categories, &traps);
        i.ups = 73;
        i.num_comments = 12;
        i.age_days = 5.5;
        let first = relevance_score(&i);
        for _ in 0..10 {
            assert_eq!(relevance_score(&i), first);
        }
    }

    #[test]
    fn test_temporal_gate() {
        assert!(is_temporally_relevant(true, None, 400.0));
        assert!(is_temporally_relevant(false, Some("Visitor Guide"), 400.0));
        assert!(is_temporally_relevant(false, None, 30.0));
        assert!(!is_temporally_relevant(false, None, 30.1));
        assert!(!is_temporally_relevant(false, Some("Discussion"), 31.0));
    }
}
