use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Coarse sentiment label derived from lexicon counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Sentiment::Neutral
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A Reddit post plus the signals this engine derives from its text.
///
/// Identity is `reddit_id`; persistence upserts on that key so re-running
/// enrichment overwrites in place and never duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    pub reddit_id: String,
    pub subreddit: String,
    pub title: String,
    pub body: Option<String>,
    pub ups: i64,
    pub num_comments: i64,
    pub created_utc: i64,
    pub permalink: String,
    pub flair: Option<String>,
    pub stickied: bool,

    // Derived fields, attached by enrichment.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub sentiment_delta: i32,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub tourist_traps: Vec<String>,
    #[serde(default)]
    pub parent_friendly_score: i32,
    #[serde(default)]
    pub relevance: i64,
    #[serde(default)]
    pub ai_context: String,
    #[serde(default)]
    pub geo: Option<GeoPoint>,
}

impl Post {
    /// Title and body concatenated; a missing body contributes nothing.
    pub fn full_text(&self) -> String {
        match &self.body {
            Some(body) if !body.is_empty() => format!("{} {}", self.title, body),
            _ => self.title.clone(),
        }
    }

    pub fn age_days(&self, now_utc: i64) -> f64 {
        (now_utc - self.created_utc) as f64 / SECONDS_PER_DAY
    }

    pub fn created_iso(&self) -> String {
        Utc.timestamp_opt(self.created_utc, 0)
            .single()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default()
    }
}

/// A comment fetched for a temporally relevant post. Ephemeral: feeds the
/// post's AI-context summary and is not persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub reddit_id: String,
    pub post_id: String,
    pub body: String,
    pub ups: i64,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// A known point-of-interest from the place catalog.
///
/// Read-mostly from this engine's perspective: only `reddit_mentions` is
/// appended to, and `is_hidden_gem` / `trending_score` may be set (never
/// cleared) by the place matcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub geo: Option<GeoPoint>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub reddit_mentions: Vec<Mention>,
    #[serde(default)]
    pub is_hidden_gem: bool,
    #[serde(default)]
    pub trending_score: f64,
}

/// A recorded link from one post to one place, appended into that place's
/// mention list. At most three per post per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub post_id: String,
    pub subreddit: String,
    pub title: String,
    /// Estimated sentiment on a 0-10 scale (5 is neutral).
    pub sentiment: u8,
    pub engagement: i64,
    pub posted_at: String,
    pub permalink: String,
}

/// One accepted (post, place) pairing, recomputed fresh each matcher run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceMatch {
    pub place_id: String,
    pub score: f64,
    pub hidden_gem: bool,
}

/// Per-run ingestion counters, reported once at the end of a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub processed: u64,
    pub succeeded: u64,
    pub failed: u64,
}

impl RunSummary {
    pub fn record_success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }
}

/// Matcher-run counters: total links written and hidden-gem flags seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkSummary {
    pub posts_processed: u64,
    pub links_created: u64,
    pub hidden_gems: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_post() -> Post {
        Post {
            reddit_id: "abc123".to_string(),
            subreddit: "boston".to_string(),
            title: "Title".to_string(),
            body: None,
            ups: 0,
            num_comments: 0,
            created_utc: 1_700_000_000,
            permalink: "/r/boston/comments/abc123".to_string(),
            flair: None,
            stickied: false,
            categories: Vec::new(),
            sentiment: Sentiment::Neutral,
            sentiment_delta: 0,
            locations: Vec::new(),
            tourist_traps: Vec::new(),
            parent_friendly_score: 0,
            relevance: 0,
            ai_context: String::new(),
            geo: None,
        }
    }

    #[test]
    fn test_full_text_skips_missing_body() {
        let mut post = bare_post();
        assert_eq!(post.full_text(), "Title");

        post.body = Some(String::new());
        assert_eq!(post.full_text(), "Title");

        post.body = Some("Body".to_string());
        assert_eq!(post.full_text(), "Title Body");
    }

    #[test]
    fn test_age_days() {
        let post = bare_post();
        let two_days_later = post.created_utc + 2 * 86_400;
        assert!((post.age_days(two_days_later) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentiment_label_round_trip() {
        for s in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
            assert_eq!(Sentiment::from_label(s.as_str()), s);
        }
    }
}
