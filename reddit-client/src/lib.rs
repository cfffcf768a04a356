pub mod api;
pub mod fetcher;
pub mod pacer;

pub use api::{RedditApi, RedditCommentData, RedditPostData};
pub use fetcher::{empty_shell, RateLimitedFetcher};
pub use pacer::RequestPacer;
