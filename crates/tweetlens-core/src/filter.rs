//! Record-level filtering, applied before aggregation so every derived view
//! can be computed over an arbitrary slice of the dataset.

use crate::model::TweetRecord;

/// Conjunction of optional criteria; an unset criterion matches everything.
#[derive(Debug, Clone, Default)]
pub struct TweetFilter {
    /// Case-insensitive substring match against original or translated text.
    pub query: Option<String>,
    /// Sentiment label, compared case-insensitively against the normalized
    /// (lowercase) stored label.
    pub sentiment: Option<String>,
    /// Exact match against the language label.
    pub language: Option<String>,
}

impl TweetFilter {
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.sentiment.is_none() && self.language.is_none()
    }

    pub fn matches(&self, tweet: &TweetRecord) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let hit = tweet.original_text.to_lowercase().contains(&needle)
                || tweet.translated_text.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(sentiment) = &self.sentiment {
            if !tweet.sentiment().eq_ignore_ascii_case(sentiment) {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if &tweet.language != language {
                return false;
            }
        }
        true
    }
}

/// Returns the matching subset in input order.
pub fn filter_tweets<'a>(tweets: &'a [TweetRecord], filter: &TweetFilter) -> Vec<&'a TweetRecord> {
    tweets.iter().filter(|tweet| filter.matches(tweet)).collect()
}

/// Consuming form for callers that feed the result straight into aggregation.
pub fn apply_filter(mut tweets: Vec<TweetRecord>, filter: &TweetFilter) -> Vec<TweetRecord> {
    if !filter.is_empty() {
        tweets.retain(|tweet| filter.matches(tweet));
    }
    tweets
}
