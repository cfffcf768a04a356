pub mod candidates;
pub mod geo;
pub mod matcher;
pub mod similarity;

pub use candidates::CandidateExtractor;
pub use geo::haversine_km;
pub use matcher::{
    build_mention, trending_score, PlaceMatcher, GEO_MATCH_THRESHOLD_KM, MAX_MENTIONS_PER_POST,
    NAME_SIMILARITY_THRESHOLD, TRENDING_ENGAGEMENT_FLOOR,
};
pub use similarity::similarity;
