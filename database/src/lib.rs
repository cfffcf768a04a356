//! Document-ish persistence over sqlite: two collections (posts, places)
//! with JSON columns for the list-shaped fields. No transactions; every
//! write is an independent statement so one failed item never blocks the
//! rest of a batch.

use citylens_core::{CoreError, DatabaseError, GeoPoint, Mention, Place, Post, Sentiment};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::info;


const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS posts (
        reddit_id TEXT PRIMARY KEY,
        subreddit TEXT NOT NULL,
        title TEXT NOT NULL,
        body TEXT,
        ups INTEGER NOT NULL DEFAULT 0,
        num_comments INTEGER NOT NULL DEFAULT 0,
        created_utc INTEGER NOT NULL DEFAULT 0,
        permalink TEXT NOT NULL DEFAULT '',
        flair TEXT,
        stickied INTEGER NOT NULL DEFAULT 0,
        categories TEXT NOT NULL DEFAULT '[]',
        sentiment TEXT NOT NULL DEFAULT 'neutral',
        sentiment_delta INTEGER NOT NULL DEFAULT 0,
        locations TEXT NOT NULL DEFAULT '[]',
        tourist_traps TEXT NOT NULL DEFAULT '[]',
        parent_friendly_score INTEGER NOT NULL DEFAULT 0,
        relevance INTEGER NOT NULL DEFAULT 0,
        ai_context TEXT NOT NULL DEFAULT '',
        lat REAL,
        lng REAL
    )",
    "CREATE INDEX IF NOT EXISTS idx_posts_subreddit_relevance
        ON posts(subreddit, relevance DESC)",
    "CREATE TABLE IF NOT EXISTS places (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        lat REAL,
        lng REAL,
        categories TEXT NOT NULL DEFAULT '[]',
        reddit_mentions TEXT NOT NULL DEFAULT '[]',
        is_hidden_gem INTEGER NOT NULL DEFAULT 0,
        trending_score REAL NOT NULL DEFAULT 0
    )",
];

pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn connect(database_url: &str) -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DatabaseError::ConnectionFailed {
                reason: e.to_string(),
            })?
            .create_if_missing(true);

        // The batch job is strictly sequential; one connection is enough
        // and keeps an in-memory database coherent across calls.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), CoreError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(DatabaseError::Sql)?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    /// Idempotent write keyed by the post's Reddit id: re-running the
    /// pipeline overwrites the enrichment in place, never duplicates.
    pub async fn upsert_post(&self, post: &Post) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO posts (
                reddit_id, subreddit, title, body, ups, num_comments,
                created_utc, permalink, flair, stickied, categories,
                sentiment, sentiment_delta, locations, tourist_traps,
                parent_friendly_score, relevance, ai_context, lat, lng
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(reddit_id) DO UPDATE SET
                subreddit = excluded.subreddit,
                title = excluded.title,
                body = excluded.body,
                ups = excluded.ups,
                num_comments = excluded.num_comments,
                created_utc = excluded.created_utc,
                permalink = excluded.permalink,
                flair = excluded.flair,
                stickied = excluded.stickied,
                categories = excluded.categories,
                sentiment = excluded.sentiment,
                sentiment_delta = excluded.sentiment_delta,
                locations = excluded.locations,
                tourist_traps = excluded.tourist_traps,
                parent_friendly_score = excluded.parent_friendly_score,
                relevance = excluded.relevance,
                ai_context = excluded.ai_context,
                lat = excluded.lat,
                lng = excluded.lng",
        )
        .bind(&post.reddit_id)
        .bind(&post.subreddit)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.ups)
        .bind(post.num_comments)
        .bind(post.created_utc)
        .bind(&post.permalink)
        .bind(&post.flair)
        .bind(post.stickied)
        .bind(serde_json::to_string(&post.categories)?)
        .bind(post.sentiment.as_str())
        .bind(post.sentiment_delta)
        .bind(serde_json::to_string(&post.locations)?)
        .bind(serde_json::to_string(&post.tourist_traps)?)
        .bind(post.parent_friendly_score)
        .bind(post.relevance)
        .bind(&post.ai_context)
        .bind(post.geo.map(|g| g.lat))
        .bind(post.geo.map(|g| g.lng))
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Sql)?;

        Ok(())
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>, CoreError> {
        let rows = sqlx::query("SELECT * FROM posts")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Sql)?;
        rows.iter().map(post_from_row).collect()
    }

    /// Ranked retrieval backed by the (subreddit, relevance) index.
    pub async fn top_posts(&self, subreddit: &str, limit: i64) -> Result<Vec<Post>, CoreError> {
        let rows = sqlx::query(
            "SELECT * FROM posts WHERE subreddit = ? ORDER BY relevance DESC LIMIT ?",
        )
        .bind(subreddit)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Sql)?;
        rows.iter().map(post_from_row).collect()
    }

    /// Filtered lookup on the JSON-encoded category tags. Exact tag match
    /// via json_each; a full scan, which the small per-city tables can
    /// afford (sqlite has no multikey index over JSON arrays).
    pub async fn posts_with_category(&self, category: &str) -> Result<Vec<Post>, CoreError> {
        let rows = sqlx::query(
            "SELECT * FROM posts
             WHERE EXISTS (SELECT 1 FROM json_each(posts.categories) WHERE json_each.value = ?)",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Sql)?;
        rows.iter().map(post_from_row).collect()
    }

    pub async fn count_posts(&self) -> Result<i64, CoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Sql)?;
        Ok(row.get("n"))
    }

    /// Creates a catalog place with a store-assigned opaque identifier.
    pub async fn create_place(
        &self,
        name: &str,
        geo: Option<GeoPoint>,
        categories: &[String],
    ) -> Result<Place, CoreError> {
        let place = Place {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            geo,
            categories: categories.to_vec(),
            ..Place::default()
        };
        self.insert_place(&place).await?;
        Ok(place)
    }

    pub async fn insert_place(&self, place: &Place) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO places (
                id, name, lat, lng, categories, reddit_mentions,
                is_hidden_gem, trending_score
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&place.id)
        .bind(&place.name)
        .bind(place.geo.map(|g| g.lat))
        .bind(place.geo.map(|g| g.lng))
        .bind(serde_json::to_string(&place.categories)?)
        .bind(serde_json::to_string(&place.reddit_mentions)?)
        .bind(place.is_hidden_gem)
        .bind(place.trending_score)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Sql)?;

        Ok(())
    }

    /// The full place catalog, read once per matcher run.
    pub async fn get_places(&self) -> Result<Vec<Place>, CoreError> {
        let rows = sqlx::query("SELECT * FROM places")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Sql)?;
        rows.iter().map(place_from_row).collect()
    }

    pub async fn get_place(&self, place_id: &str) -> Result<Place, CoreError> {
        let row = sqlx::query("SELECT * FROM places WHERE id = ?")
            .bind(place_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Sql)?;

        match row {
            Some(row) => place_from_row(&row),
            None => Err(DatabaseError::PlaceNotFound {
                place_id: place_id.to_string(),
            }
            .into()),
        }
    }

    /// Appends one mention to a place's JSON mention list. Mentions are
    /// accumulated as-is across runs; deduplication is deliberately not
    /// performed here.
    pub async fn append_mention(
        &self,
        place_id: &str,
        mention: &Mention,
    ) -> Result<(), CoreError> {
        let place = self.get_place(place_id).await?;
        let mut mentions = place.reddit_mentions;
        mentions.push(mention.clone());

        sqlx::query("UPDATE places SET reddit_mentions = ? WHERE id = ?")
            .bind(serde_json::to_string(&mentions)?)
            .bind(place_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Sql)?;

        Ok(())
    }

    /// Monotonic: the flag can be set but is never cleared by this engine.
    pub async fn mark_hidden_gem(&self, place_id: &str) -> Result<(), CoreError> {
        sqlx::query("UPDATE places SET is_hidden_gem = 1 WHERE id = ?")
            .bind(place_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Sql)?;
        Ok(())
    }

    pub async fn set_trending_score(&self, place_id: &str, score: f64) -> Result<(), CoreError> {
        sqlx::query("UPDATE places SET trending_score = ? WHERE id = ?")
            .bind(score)
            .bind(place_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Sql)?;
        Ok(())
    }
}

fn json_list(raw: String) -> Vec<String> {
    serde_json::from_str(&raw).unwrap_or_default()
}

fn geo_from_columns(lat: Option<f64>, lng: Option<f64>) -> Option<GeoPoint> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
        _ => None,
    }
}

fn post_from_row(row: &SqliteRow) -> Result<Post, CoreError> {
    let sentiment_label: String = row.get("sentiment");
    Ok(Post {
        reddit_id: row.get("reddit_id"),
        subreddit: row.get("subreddit"),
        title: row.get("title"),
        body: row.get("body"),
        ups: row.get("ups"),
        num_comments: row.get("num_comments"),
        created_utc: row.get("created_utc"),
        permalink: row.get("permalink"),
        flair: row.get("flair"),
        stickied: row.get("stickied"),
        categories: json_list(row.get("categories")),
        sentiment: Sentiment::from_label(&sentiment_label),
        sentiment_delta: row.get("sentiment_delta"),
        locations: json_list(row.get("locations")),
        tourist_traps: json_list(row.get("tourist_traps")),
        parent_friendly_score: row.get("parent_friendly_score"),
        relevance: row.get("relevance"),
        ai_context: row.get("ai_context"),
        geo: geo_from_columns(row.get("lat"), row.get("lng")),
    })
}

fn place_from_row(row: &SqliteRow) -> Result<Place, CoreError> {
    let mentions_raw: String = row.get("reddit_mentions");
    Ok(Place {
        id: row.get("id"),
        name: row.get("name"),
        geo: geo_from_columns(row.get("lat"), row.get("lng")),
        categories: json_list(row.get("categories")),
        reddit_mentions: serde_json::from_str(&mentions_raw).unwrap_or_default(),
        is_hidden_gem: row.get("is_hidden_gem"),
        trending_score: row.get("trending_score"),
    })
}
