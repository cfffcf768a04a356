use citylens_core::{Comment, Post};

/// Hard cap on the assembled AI-context string.
pub const AI_CONTEXT_MAX_CHARS: usize = 1500;

/// Assembles the context blob handed to downstream embedding/text
/// generation: title, body, and the retained top comments, truncated to
/// [`AI_CONTEXT_MAX_CHARS`] on a character boundary.
pub fn build_ai_context(post: &Post, comments: &[Comment]) -> String {
    let mut parts = vec![format!("r/{} | {}", post.subreddit, post.title)];

    if let Some(body) = &post.body {
        if !body.is_empty() {
            parts.push(body.clone());
        }
    }

    for comment in comments {
        parts.push(format!(
            "comment ({}): {}",
            comment.sentiment.as_str(),
            comment.body
        ));
    }

    let joined = parts.join("\n");
    if joined.chars().count() > AI_CONTEXT_MAX_CHARS {
        joined.chars().take(AI_CONTEXT_MAX_CHARS).collect()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citylens_core::Sentiment;

    fn post() -> Post {
        Post {
            reddit_id: "abc".to_string(),
            subreddit: "boston".to_string(),
            title: "Title".to_string(),
            body: Some("Body text".to_string()),
            ..Post::default()
        }
    }

    fn comment(body: &str) -> Comment {
        Comment {
            reddit_id: "c1".to_string(),
            post_id: "abc".to_string(),
            body: body.to_string(),
            ups: 3,
            sentiment: Sentiment::Positive,
            locations: Vec::new(),
        }
    }

    #[test]
    fn test_context_includes_title_body_and_comments() {
        let context = build_ai_context(&post(), &[comment("Try the clam chowder")]);
        assert!(context.contains("r/boston | Title"));
        assert!(context.contains("Body text"));
        assert!(context.contains("comment (positive): Try the clam chowder"));
    }

    #[test]
    fn test_context_is_truncated() {
        let comments: Vec<Comment> = (0..10).map(|_| comment(&"x".repeat(400))).collect();
        let context = build_ai_context(&post(), &comments);
        assert_eq!(context.chars().count(), AI_CONTEXT_MAX_CHARS);
    }

    #[test]
    fn test_context_without_body_or_comments() {
        let mut p = post();
        p.body = None;
        assert_eq!(build_ai_context(&p, &[]), "r/boston | Title");
    }
}
