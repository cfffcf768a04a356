use crate::candidates::CandidateExtractor;
use crate::geo::haversine_km;
use crate::similarity::similarity;
use citylens_core::{GeoPoint, Mention, Place, PlaceMatch, Post};
use std::cmp::Ordering;
use tracing::debug;

/// Acceptance floor for a (post, place) pair's combined score.
pub const NAME_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Distance at which the location score decays to zero.
pub const GEO_MATCH_THRESHOLD_KM: f64 = 0.5;

/// Proximity is corroborating evidence, not a standalone strong signal, so
/// the location score is discounted before fusion.
pub const LOCATION_SCORE_WEIGHT: f64 = 0.8;

/// At most this many mentions are recorded per post, bounding fan-out from
/// a single highly engaging post.
pub const MAX_MENTIONS_PER_POST: usize = 3;

/// Engagement floor below which a post may not set a place's derived
/// trending/hidden-gem fields.
pub const TRENDING_ENGAGEMENT_FLOOR: i64 = 100;

/// Fuses fuzzy name similarity with geographic proximity to link posts to
/// catalog places.
#[derive(Debug, Default)]
pub struct PlaceMatcher {
    extractor: CandidateExtractor,
}

impl PlaceMatcher {
    pub fn new() -> Self {
        Self {
            extractor: CandidateExtractor::new(),
        }
    }

    /// Best name evidence for a place: the stronger of matching against the
    /// full text and against each extracted candidate phrase.
    pub fn name_score(&self, place_name: &str, full_text: &str, candidates: &[String]) -> f64 {
        let mut best = similarity(place_name, full_text);
        for candidate in candidates {
            best = best.max(similarity(place_name, candidate));
        }
        best
    }

    /// Linear decay from 1.0 at zero distance to 0.0 at the threshold.
    /// Zero whenever either side lacks a coordinate.
    pub fn location_score(post_geo: Option<GeoPoint>, place_geo: Option<GeoPoint>) -> f64 {
        match (post_geo, place_geo) {
            (Some(p), Some(q)) => (1.0 - haversine_km(p, q) / GEO_MATCH_THRESHOLD_KM).max(0.0),
            _ => 0.0,
        }
    }

    /// Location alone can never outscore a strong direct name match.
    pub fn combined_score(name_score: f64, location_score: f64) -> f64 {
        name_score.max(location_score * LOCATION_SCORE_WEIGHT)
    }

    pub fn is_accepted(score: f64) -> bool {
        score >= NAME_SIMILARITY_THRESHOLD
    }

    /// Ranked matches for one post against the full catalog: accepted pairs
    /// sorted by descending combined score, capped at
    /// [`MAX_MENTIONS_PER_POST`]. The hidden-gem flag is computed once from
    /// the post's text and shared by all of its matches.
    pub fn match_post(&self, post: &Post, places: &[Place]) -> Vec<PlaceMatch> {
        let text = post.full_text();
        let candidates = self.extractor.extract(&text);
        let hidden_gem = signals::is_hidden_gem(&text);

        let mut matches: Vec<PlaceMatch> = places
            .iter()
            .filter_map(|place| {
                let name = self.name_score(&place.name, &text, &candidates);
                let location = Self::location_score(post.geo, place.geo);
                let combined = Self::combined_score(name, location);
                if Self::is_accepted(combined) {
                    Some(PlaceMatch {
                        place_id: place.id.clone(),
                        score: combined,
                        hidden_gem,
                    })
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        matches.truncate(MAX_MENTIONS_PER_POST);

        debug!(
            "Post {} matched {} place(s) from {} candidate phrase(s)",
            post.reddit_id,
            matches.len(),
            candidates.len()
        );
        matches
    }
}

/// The mention record appended to a matched place. Sentiment is re-centered
/// onto a 0-10 scale with 5 as neutral.
pub fn build_mention(post: &Post) -> Mention {
    Mention {
        post_id: post.reddit_id.clone(),
        subreddit: post.subreddit.clone(),
        title: post.title.clone(),
        sentiment: (5 + post.sentiment_delta).clamp(0, 10) as u8,
        engagement: post.ups,
        posted_at: post.created_iso(),
        permalink: post.permalink.clone(),
    }
}

/// Trending score for a place, derived from one post's engagement. `None`
/// below the engagement floor: the field must be left untouched so that
/// trending status stays monotonic.
pub fn trending_score(ups: i64) -> Option<f64> {
    if ups > TRENDING_ENGAGEMENT_FLOOR {
        Some((ups as f64 / 50.0).min(10.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_text(title: &str) -> Post {
        Post {
            reddit_id: "p1".to_string(),
            subreddit: "boston".to_string(),
            title: title.to_string(),
            ..Post::default()
        }
    }

    fn place(id: &str, name: &str) -> Place {
        Place {
            id: id.to_string(),
            name: name.to_string(),
            ..Place::default()
        }
    }

    #[test]
    fn test_acceptance_boundary_is_strict() {
        assert!(PlaceMatcher::is_accepted(0.6));
        assert!(!PlaceMatcher::is_accepted(0.599999));
        assert!(PlaceMatcher::is_accepted(1.0));
    }

    #[test]
    fn test_combined_score_discounts_location() {
        // A perfect location score alone lands at 0.8, below a direct
        // name match at 1.0.
        assert_eq!(PlaceMatcher::combined_score(0.0, 1.0), 0.8);
        assert_eq!(PlaceMatcher::combined_score(1.0, 1.0), 1.0);
        assert_eq!(PlaceMatcher::combined_score(0.7, 0.5), 0.7);
    }

    #[test]
    fn test_location_score_requires_both_coordinates() {
        let here = GeoPoint {
            lat: 42.36,
            lng: -71.06,
        };
        assert_eq!(PlaceMatcher::location_score(None, Some(here)), 0.0);
        assert_eq!(PlaceMatcher::location_score(Some(here), None), 0.0);
        assert_eq!(PlaceMatcher::location_score(Some(here), Some(here)), 1.0);
    }

    #[test]
    fn test_location_score_decays_to_zero_at_threshold() {
        let a = GeoPoint {
            lat: 42.3600,
            lng: -71.0600,
        };
        // Roughly 1.1km north: past the 0.5km threshold.
        let b = GeoPoint {
            lat: 42.3700,
            lng: -71.0600,
        };
        assert_eq!(PlaceMatcher::location_score(Some(a), Some(b)), 0.0);
    }

    #[test]
    fn test_name_in_text_is_accepted_via_containment() {
        let matcher = PlaceMatcher::new();
        let post = post_with_text("Dinner at Neptune Oyster was unreal");
        let places = vec![place("pl1", "Neptune Oyster"), place("pl2", "Totally Unrelated Venue")];

        let matches = matcher.match_post(&post, &places);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].place_id, "pl1");
        assert!(matches[0].score >= 0.8);
    }

    #[test]
    fn test_top_three_cap_keeps_highest_scores() {
        let matcher = PlaceMatcher::new();
        // Title contains every place name, so all ten pairs clear the
        // threshold via containment; the exact-match place scores 1.0.
        let post = post_with_text("Spot One Spot Two Spot Three Spot Four Spot Five");
        let mut places: Vec<Place> = ["One", "Two", "Three", "Four", "Five"]
            .iter()
            .flat_map(|n| {
                vec![
                    place(&format!("a{n}"), &format!("Spot {n}")),
                    place(&format!("b{n}"), &format!("spot {n}")),
                ]
            })
            .collect();
        // One place whose name equals the whole title exactly.
        places.push(place(
            "exact",
            "Spot One Spot Two Spot Three Spot Four Spot Five",
        ));

        let matches = matcher.match_post(&post, &places);
        assert_eq!(matches.len(), MAX_MENTIONS_PER_POST);
        assert_eq!(matches[0].place_id, "exact");
        assert_eq!(matches[0].score, 1.0);
        for m in &matches {
            assert!(PlaceMatcher::is_accepted(m.score));
        }
    }

    #[test]
    fn test_hidden_gem_flag_shared_across_matches() {
        let matcher = PlaceMatcher::new();
        let post = post_with_text("Hidden gem alert: Spot One and Spot Two");
        let places = vec![place("a", "Spot One"), place("b", "Spot Two")];

        let matches = matcher.match_post(&post, &places);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.hidden_gem));
    }

    #[test]
    fn test_no_match_below_threshold() {
        let matcher = PlaceMatcher::new();
        let post = post_with_text("Completely different topic about zoning laws");
        let places = vec![place("a", "Neptune Oyster")];
        assert!(matcher.match_post(&post, &places).is_empty());
    }

    #[test]
    fn test_build_mention_sentiment_scale() {
        let mut post = post_with_text("title");
        post.sentiment_delta = 3;
        assert_eq!(build_mention(&post).sentiment, 8);

        post.sentiment_delta = -9;
        assert_eq!(build_mention(&post).sentiment, 0);

        post.sentiment_delta = 0;
        assert_eq!(build_mention(&post).sentiment, 5);
    }

    #[test]
    fn test_trending_score_respects_engagement_floor() {
        assert_eq!(trending_score(100), None);
        assert_eq!(trending_score(101), Some(2.02));
        assert_eq!(trending_score(250), Some(5.0));
        assert_eq!(trending_score(10_000), Some(10.0));
    }
}
