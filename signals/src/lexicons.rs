//! Fixed word lists backing the text analyzers. Matching is always
//! case-insensitive substring matching over the lowercased input, so every
//! entry here must be lowercase.

/// Category name -> trigger substrings. A category is included when any of
/// its triggers appears anywhere in the text.
pub const CATEGORY_TRIGGERS: &[(&str, &[&str])] = &[
    (
        "food",
        &[
            "food",
            "restaurant",
            "eat",
            "pizza",
            "brunch",
            "coffee",
            "bakery",
            "dinner",
            "lunch",
            "seafood",
            "taco",
            "burger",
            "ice cream",
        ],
    ),
    (
        "parentFriendly",
        &["kid", "family", "stroller", "playground", "toddler", "children"],
    ),
    (
        "hiddenGems",
        &[
            "hidden gem",
            "underrated",
            "secret",
            "local favorite",
            "off the beaten path",
        ],
    ),
    (
        "touristTraps",
        &["tourist trap", "overrated", "overpriced", "touristy"],
    ),
    (
        "outdoors",
        &["park", "trail", "harbor", "esplanade", "bike", "beach", "garden"],
    ),
    ("events", &["event", "festival", "concert", "museum", "show"]),
    (
        "nightlife",
        &["nightlife", "cocktail", "brewery", "club", "live music"],
    ),
];

/// Fallback tag when no trigger matches; the category set is never empty.
pub const GENERAL_CATEGORY: &str = "general";

pub const POSITIVE_WORDS: &[&str] = &[
    "love",
    "great",
    "amazing",
    "best",
    "awesome",
    "delicious",
    "perfect",
    "favorite",
    "excellent",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "hate",
    "terrible",
    "awful",
    "worst",
    "avoid",
    "overpriced",
    "disappointing",
    "mediocre",
];

/// Boston-area gazetteer: known place-name substrings for fast lookup.
pub const LOCATION_GAZETTEER: &[&str] = &[
    "fenway",
    "back bay",
    "north end",
    "south end",
    "beacon hill",
    "seaport",
    "downtown",
    "cambridge",
    "somerville",
    "jamaica plain",
    "charlestown",
    "allston",
    "brookline",
    "harvard square",
    "chinatown",
    "dorchester",
    "east boston",
];

pub const TOURIST_TRAP_PHRASES: &[&str] = &[
    "tourist trap",
    "faneuil hall",
    "quincy market",
    "cheers bar",
    "duck tour",
];

pub const PARENT_FRIENDLY_TERMS: &[&str] = &[
    "kid-friendly",
    "family-friendly",
    "stroller",
    "playground",
    "kids menu",
    "changing table",
    "toddler",
    "all ages",
];

pub const HIDDEN_GEM_PHRASES: &[&str] = &[
    "hidden gem",
    "underrated",
    "secret spot",
    "locals only",
    "off the beaten path",
    "little known",
    "under the radar",
];
