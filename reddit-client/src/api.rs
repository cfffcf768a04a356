use crate::fetcher::{empty_shell, RateLimitedFetcher};
use citylens_core::{Post, Sentiment};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Comment trees are fetched one level deep with a capped item count.
pub const COMMENT_TREE_DEPTH: u32 = 1;
pub const COMMENT_FETCH_LIMIT: u32 = 25;
pub const COMMENT_RETAIN_LIMIT: usize = 20;
pub const COMMENT_BODY_MAX_CHARS: usize = 500;

/// Raw post record from a listing page. Every field defaults so that a
/// partially shaped item parses to something usable instead of faulting;
/// a missing body is an empty string, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditPostData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub num_comments: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub link_flair_text: Option<String>,
    #[serde(default)]
    pub stickied: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditCommentData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub ups: i64,
}

/// Typed access to the public listing endpoints, on top of the
/// rate-limited fetcher. All methods share its degradation policy: an
/// unusable response comes back as an empty collection.
#[derive(Debug)]
pub struct RedditApi {
    fetcher: RateLimitedFetcher,
}

impl RedditApi {
    pub fn new(user_agent: String) -> Self {
        Self {
            fetcher: RateLimitedFetcher::new(user_agent),
        }
    }

    pub fn with_fetcher(fetcher: RateLimitedFetcher) -> Self {
        Self { fetcher }
    }

    /// One page of top posts for a subreddit.
    pub async fn subreddit_top(&self, subreddit: &str, limit: u32) -> Vec<RedditPostData> {
        let path = format!("/r/{}/top.json", subreddit);
        let limit_str = limit.to_string();
        let value = self
            .fetcher
            .fetch(&path, &[("t", "week"), ("limit", &limit_str)])
            .await;

        let posts = parse_post_listing(&value);
        info!("Retrieved {} posts from r/{}", posts.len(), subreddit);
        posts
    }

    /// Top-level comments for one post: depth 1, at most
    /// [`COMMENT_FETCH_LIMIT`] requested and [`COMMENT_RETAIN_LIMIT`] kept,
    /// bodies truncated to [`COMMENT_BODY_MAX_CHARS`].
    pub async fn post_comments(&self, subreddit: &str, post_id: &str) -> Vec<RedditCommentData> {
        let path = format!("/r/{}/comments/{}.json", subreddit, post_id);
        let depth_str = COMMENT_TREE_DEPTH.to_string();
        let limit_str = COMMENT_FETCH_LIMIT.to_string();
        let value = self
            .fetcher
            .fetch(&path, &[("depth", &depth_str), ("limit", &limit_str)])
            .await;

        let comments = parse_comment_tree(&value);
        debug!("Retrieved {} comments for post {}", comments.len(), post_id);
        comments
    }
}

fn listing_children(value: &Value) -> Vec<Value> {
    value["data"]["children"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

/// Lenient listing parse: items that do not look like posts are skipped,
/// never propagated as errors.
pub fn parse_post_listing(value: &Value) -> Vec<RedditPostData> {
    listing_children(value)
        .into_iter()
        .filter(|child| child["kind"].as_str().unwrap_or("t3") == "t3")
        .filter_map(|child| serde_json::from_value(child["data"].clone()).ok())
        .filter(|post: &RedditPostData| !post.id.is_empty())
        .collect()
}

/// The comment endpoint answers with a two-element array: the post's own
/// listing, then the comment tree. Anything else parses as no comments.
pub fn parse_comment_tree(value: &Value) -> Vec<RedditCommentData> {
    let comment_listing = value.get(1).cloned().unwrap_or_else(empty_shell);

    listing_children(&comment_listing)
        .into_iter()
        .filter(|child| child["kind"].as_str() == Some("t1"))
        .filter_map(|child| serde_json::from_value(child["data"].clone()).ok())
        .filter(|comment: &RedditCommentData| !comment.body.is_empty())
        .take(COMMENT_RETAIN_LIMIT)
        .map(|mut comment: RedditCommentData| {
            if comment.body.chars().count() > COMMENT_BODY_MAX_CHARS {
                comment.body = comment.body.chars().take(COMMENT_BODY_MAX_CHARS).collect();
            }
            comment
        })
        .collect()
}

impl From<RedditPostData> for Post {
    fn from(data: RedditPostData) -> Self {
        Post {
            reddit_id: data.id,
            subreddit: data.subreddit,
            title: data.title,
            body: if data.selftext.is_empty() {
                None
            } else {
                Some(data.selftext)
            },
            ups: data.ups,
            num_comments: data.num_comments,
            created_utc: data.created_utc as i64,
            permalink: data.permalink,
            flair: data.link_flair_text,
            stickied: data.stickied,
            sentiment: Sentiment::Neutral,
            ..Post::default()
        }
    }
}
