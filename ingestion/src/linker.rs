use citylens_core::{CoreError, LinkSummary};
use database::Store;
use place_match::{build_mention, trending_score, PlaceMatcher};
use tracing::{info, warn};

/// Links previously persisted posts to catalog places and writes mention
/// records back onto the matched places.
///
/// The catalog is read once per run and treated as immutable in memory.
/// Matches are produced fresh every run and appended as-is: a popular post
/// re-links on every nightly run, and that accumulation is accepted
/// behavior rather than deduplicated away.
pub struct PlaceLinker<'a> {
    store: &'a Store,
    matcher: PlaceMatcher,
}

impl<'a> PlaceLinker<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            matcher: PlaceMatcher::new(),
        }
    }

    pub async fn run(&self) -> Result<LinkSummary, CoreError> {
        let posts = self.store.get_posts().await?;
        let places = self.store.get_places().await?;
        info!(
            "Linking {} post(s) against {} place(s)",
            posts.len(),
            places.len()
        );

        let mut summary = LinkSummary::default();

        for post in &posts {
            summary.posts_processed += 1;
            let matches = self.matcher.match_post(post, &places);

            for m in &matches {
                let mention = build_mention(post);
                if let Err(e) = self.store.append_mention(&m.place_id, &mention).await {
                    warn!("✗ mention {} -> {}: {}", post.reddit_id, m.place_id, e);
                    continue;
                }
                summary.links_created += 1;
                if m.hidden_gem {
                    summary.hidden_gems += 1;
                }

                // Derived flags only move on sufficiently engaging posts,
                // and only ever upward.
                if let Some(score) = trending_score(post.ups) {
                    if let Err(e) = self.store.set_trending_score(&m.place_id, score).await {
                        warn!("✗ trending score for {}: {}", m.place_id, e);
                    }
                    if m.hidden_gem {
                        if let Err(e) = self.store.mark_hidden_gem(&m.place_id).await {
                            warn!("✗ hidden-gem flag for {}: {}", m.place_id, e);
                        }
                    }
                }
            }
        }

        info!(
            "Linking finished: {} post(s), {} link(s), {} hidden-gem link(s)",
            summary.posts_processed, summary.links_created, summary.hidden_gems
        );
        Ok(summary)
    }
}
