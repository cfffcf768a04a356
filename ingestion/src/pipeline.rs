use crate::summary::build_ai_context;
use chrono::Utc;
use citylens_core::{Comment, ErrorExt, Post, RunSummary};
use database::Store;
use reddit_client::RedditApi;
use signals::{enrich_comment, enrich_post, is_temporally_relevant};
use tracing::{info, warn};

/// Orchestrates one ingestion batch: fetch a listing page, enrich each
/// post, fetch comments for the temporally relevant ones, and upsert.
///
/// Strictly sequential: every post runs to completion before the next, so
/// the fetcher's spacing floor is the only pacing in play. Persistence
/// failures are counted per item and never abort the batch.
pub struct IngestionPipeline<'a> {
    api: &'a RedditApi,
    store: &'a Store,
}

impl<'a> IngestionPipeline<'a> {
    pub fn new(api: &'a RedditApi, store: &'a Store) -> Self {
        Self { api, store }
    }

    pub async fn run(&self, subreddit: &str, limit: u32) -> RunSummary {
        let now = Utc::now().timestamp();
        let mut summary = RunSummary::default();

        let listing = self.api.subreddit_top(subreddit, limit).await;
        if listing.is_empty() {
            // Either the subreddit is quiet or the fetch failed; the
            // fetcher deliberately does not tell us which.
            info!("No posts retrieved from r/{}", subreddit);
        }

        for data in listing {
            let mut post: Post = data.into();
            enrich_post(&mut post, now);

            let comments = if is_temporally_relevant(
                post.stickied,
                post.flair.as_deref(),
                post.age_days(now),
            ) {
                self.fetch_comments(subreddit, &post.reddit_id).await
            } else {
                Vec::new()
            };

            post.ai_context = build_ai_context(&post, &comments);

            match self.store.upsert_post(&post).await {
                Ok(()) => {
                    info!("✓ {} ({}, relevance {})", post.reddit_id, post.title, post.relevance);
                    summary.record_success();
                }
                Err(e) => {
                    warn!("✗ {} [{}]: {}", post.reddit_id, e.error_code(), e);
                    summary.record_failure();
                }
            }
        }

        info!(
            "Ingestion finished: {} processed, {} succeeded, {} failed",
            summary.processed, summary.succeeded, summary.failed
        );
        summary
    }

    async fn fetch_comments(&self, subreddit: &str, post_id: &str) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .api
            .post_comments(subreddit, post_id)
            .await
            .into_iter()
            .map(|raw| Comment {
                reddit_id: raw.id,
                post_id: post_id.to_string(),
                body: raw.body,
                ups: raw.ups,
                sentiment: Default::default(),
                locations: Vec::new(),
            })
            .collect();

        for comment in &mut comments {
            enrich_comment(comment);
        }
        comments
    }
}
