//! Input schema for the two source documents.
//!
//! Every nested annotation block is optional in the wild, so each field
//! carries a serde default. Aggregations downstream can assume a fully
//! populated record and never touch raw JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Canonical weekday labels, Monday first. Ranking ties and fixed-bin
/// histograms follow this order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Short month labels for the 12 monthly histogram bins.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Emotion axis order used by every emotion chart.
pub const EMOTIONS: [&str; 8] = [
    "joy",
    "trust",
    "fear",
    "surprise",
    "sadness",
    "disgust",
    "anger",
    "anticipation",
];

/// Index of `day` in [`WEEKDAYS`], matched case-insensitively.
/// Unrecognized labels return `None` and are ignored by the aggregations.
pub fn weekday_index(day: &str) -> Option<usize> {
    WEEKDAYS.iter().position(|w| w.eq_ignore_ascii_case(day))
}

fn default_unknown() -> String {
    "Unknown".to_string()
}

fn default_unknown_lower() -> String {
    "unknown".to_string()
}

/// Lowercases the sentiment label once at the ingestion boundary so grouping
/// never has to normalize per call. `null` or a non-string value degrades to
/// `"unknown"`.
fn de_lowercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s.to_lowercase(),
        _ => default_unknown_lower(),
    })
}

/// Absent, `null`, or type-mismatched values degrade to the default instead
/// of failing the whole document. Buffers through a `Value` so the inner
/// error never reaches the outer deserializer.
fn de_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn de_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        _ => default_unknown(),
    })
}

/// One annotated tweet. Immutable once loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetRecord {
    #[serde(default, deserialize_with = "de_or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub author_username: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub original_text: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub translated_text: String,
    /// Free-text language label ("English", "Arabic", ...).
    #[serde(default = "default_unknown", deserialize_with = "de_or_unknown")]
    pub language: String,
    /// Comma-separated tag string; may be absent.
    #[serde(default, deserialize_with = "de_or_default")]
    pub hashtags: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub sentiment_analysis: SentimentAnalysis,
    #[serde(default, deserialize_with = "de_or_default")]
    pub emotion_analysis: EmotionScores,
    #[serde(default, deserialize_with = "de_or_default")]
    pub engagement_metrics: EngagementCounters,
    #[serde(default, deserialize_with = "de_or_default")]
    pub engagement_analysis: EngagementAnalysis,
    #[serde(default, deserialize_with = "de_or_default")]
    pub grammar_analysis: GrammarAnalysis,
    #[serde(default, deserialize_with = "de_or_default")]
    pub temporal_analysis: TemporalAnalysis,
}

impl TweetRecord {
    /// The opaque precomputed engagement score; 0.0 when unannotated.
    pub fn total_engagement(&self) -> f64 {
        self.engagement_analysis.metrics.total_engagement
    }

    /// The normalized (lowercase) sentiment label.
    pub fn sentiment(&self) -> &str {
        &self.sentiment_analysis.sentiment
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    #[serde(default = "default_unknown_lower", deserialize_with = "de_lowercase")]
    pub sentiment: String,
}

impl Default for SentimentAnalysis {
    fn default() -> Self {
        Self {
            sentiment: default_unknown_lower(),
        }
    }
}

/// Per-emotion intensities in [0, 1]. Missing emotions read as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmotionScores {
    #[serde(default, deserialize_with = "de_or_default")]
    pub joy: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub trust: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub fear: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub surprise: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub sadness: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub disgust: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub anger: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub anticipation: f64,
}

impl EmotionScores {
    /// Intensity for an emotion name from [`EMOTIONS`]; unknown names read 0.
    pub fn get(&self, emotion: &str) -> f64 {
        match emotion {
            "joy" => self.joy,
            "trust" => self.trust,
            "fear" => self.fear,
            "surprise" => self.surprise,
            "sadness" => self.sadness,
            "disgust" => self.disgust,
            "anger" => self.anger,
            "anticipation" => self.anticipation,
            _ => 0.0,
        }
    }
}

/// Raw interaction counters. Absent counters read 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementCounters {
    #[serde(default, deserialize_with = "de_or_default")]
    pub favorite_count: u64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub retweet_count: u64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub reply_count: u64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub bookmark_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementAnalysis {
    #[serde(default, deserialize_with = "de_or_default")]
    pub metrics: EngagementTotals,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementTotals {
    /// Precomputed upstream; not necessarily the sum of the raw counters.
    #[serde(default, deserialize_with = "de_or_default")]
    pub total_engagement: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarAnalysis {
    #[serde(default = "default_unknown", deserialize_with = "de_or_unknown")]
    pub discourse_type: String,
    #[serde(default = "default_unknown", deserialize_with = "de_or_unknown")]
    pub writing_style: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub coherence_score: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub named_entities: Vec<String>,
}

impl Default for GrammarAnalysis {
    fn default() -> Self {
        Self {
            discourse_type: default_unknown(),
            writing_style: default_unknown(),
            coherence_score: 0.0,
            named_entities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    #[serde(default, deserialize_with = "de_or_default")]
    pub posting_time: PostingTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingTime {
    /// Full English weekday name; empty when unannotated.
    #[serde(default, deserialize_with = "de_or_default")]
    pub day: String,
    /// Hour of day 0-23. `None` (or out-of-range) drops the tweet from the
    /// hourly histogram rather than polluting bin 0.
    #[serde(default, deserialize_with = "de_or_default")]
    pub hour: Option<u32>,
    /// ISO date string, e.g. "2024-11-03".
    #[serde(default, deserialize_with = "de_or_default")]
    pub date: String,
}

/// The independently aggregated patterns document. Only the daily volume
/// distribution is consumed; it is never reconciled against the tweet list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternsSummary {
    #[serde(default, deserialize_with = "de_or_default")]
    pub temporal_analysis: PatternsTemporal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternsTemporal {
    #[serde(default, deserialize_with = "de_or_default")]
    pub volume_patterns: VolumePatterns,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumePatterns {
    /// Weekday name -> tweet count.
    #[serde(default, deserialize_with = "de_or_default")]
    pub daily_distribution: HashMap<String, u64>,
}
