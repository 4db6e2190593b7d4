use serde::{Deserialize, Serialize};

/// Editorial tone of a news item, used to tint the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// A market news card. Standalone — news items reference no other entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Stable identifier for list rendering
    pub id: String,

    /// Headline text
    pub headline: String,

    /// Publisher (e.g., "Bloomberg", "Reuters")
    pub source: String,

    /// Relative timestamp as displayed (e.g., "2 hours ago")
    pub timestamp: String,

    /// One-paragraph summary
    pub excerpt: String,

    /// Optional sentiment tag
    #[serde(default)]
    pub sentiment: Option<Sentiment>,

    /// Optional illustration URL
    #[serde(default)]
    pub image_url: Option<String>,
}
