pub mod categorize;
pub mod entities;
pub mod family;
pub mod lexicons;
pub mod relevance;
pub mod sentiment;

pub use categorize::categorize;
pub use entities::{extract_locations, extract_tourist_traps};
pub use family::{is_hidden_gem, parent_friendly_score};
pub use relevance::{is_temporally_relevant, relevance_score, RelevanceInput};
pub use sentiment::{score_sentiment, sentiment_delta};

use citylens_core::{Comment, Post};

/// Runs every text analyzer over a post and attaches the derived fields,
/// finishing with the relevance score. The AI-context summary and any
/// resolved coordinate are attached separately by the pipeline.
pub fn enrich_post(post: &mut Post, now_utc: i64) {
    let text = post.full_text();

    post.categories = categorize(&text);
    let (label, delta) = score_sentiment(&text);
    post.sentiment = label;
    post.sentiment_delta = delta;
    post.locations = extract_locations(&text);
    post.tourist_traps = extract_tourist_traps(&text);
    post.parent_friendly_score = parent_friendly_score(&text);

    post.relevance = relevance_score(&RelevanceInput {
        ups: post.ups,
        num_comments: post.num_comments,
        age_days: post.age_days(now_utc),
        stickied: post.stickied,
        categories: &post.categories,
        tourist_traps: &post.tourist_traps,
        parent_friendly_score: post.parent_friendly_score,
    });
}

/// Comments get the cheap subset: sentiment and location mentions.
pub fn enrich_comment(comment: &mut Comment) {
    let (label, _) = score_sentiment(&comment.body);
    comment.sentiment = label;
    comment.locations = extract_locations(&comment.body);
}
