//! Derived-view aggregation over a loaded tweet snapshot.
//!
//! Every function here is a pure transformation of `(tweets, patterns)` into
//! a chart-ready summary. Missing annotations were already defaulted at the
//! ingestion boundary, so nothing in this module can fail: empty inputs and
//! zero denominators degrade to zero-valued results.

use crate::model::{
    weekday_index, PatternsSummary, TweetRecord, EMOTIONS, MONTHS, WEEKDAYS,
};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// Tweets with a precomputed engagement score above this are viral.
pub const VIRAL_THRESHOLD: f64 = 25.0;

/// Assumed audience size for engagement-rate computation; true follower
/// counts are not present in the dataset.
pub const FOLLOWER_BASELINE: f64 = 100.0;

/// Upper edges of the first five engagement-rate bins; the sixth is open.
const RATE_BIN_EDGES: [f64; 5] = [0.02, 0.07, 0.15, 0.3, 0.7];
const RATE_BIN_LABELS: [&str; 6] = ["0.01", "0.05", "0.1", "0.2", "0.5", "1.0"];

fn percent_round(part: f64, whole: f64) -> i64 {
    if whole == 0.0 {
        0
    } else {
        (part / whole * 100.0).round() as i64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean_of(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

// =============================================================================
// Sentiment distribution
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SentimentSlice {
    pub sentiment: String,
    pub count: usize,
    pub percent: i64,
}

/// Counts and integer percentages per normalized sentiment label.
/// Labels with zero tweets are omitted; [`SentimentDistribution::percent_of`]
/// reads them as 0.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentDistribution {
    pub total: usize,
    pub slices: Vec<SentimentSlice>,
}

impl SentimentDistribution {
    pub fn count_of(&self, sentiment: &str) -> usize {
        self.slices
            .iter()
            .find(|s| s.sentiment == sentiment)
            .map(|s| s.count)
            .unwrap_or(0)
    }

    pub fn percent_of(&self, sentiment: &str) -> i64 {
        self.slices
            .iter()
            .find(|s| s.sentiment == sentiment)
            .map(|s| s.percent)
            .unwrap_or(0)
    }
}

pub fn sentiment_distribution(tweets: &[TweetRecord]) -> SentimentDistribution {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::with_capacity(4);
    for (position, tweet) in tweets.iter().enumerate() {
        let entry = counts.entry(tweet.sentiment()).or_insert((position, 0));
        entry.1 += 1;
    }

    let total = tweets.len();
    let mut slices: Vec<(usize, SentimentSlice)> = counts
        .into_iter()
        .map(|(sentiment, (first_seen, count))| {
            (
                first_seen,
                SentimentSlice {
                    sentiment: sentiment.to_string(),
                    count,
                    percent: percent_round(count as f64, total as f64),
                },
            )
        })
        .collect();

    // First-seen order keeps the output stable across runs.
    slices.sort_by_key(|(first_seen, _)| *first_seen);

    SentimentDistribution {
        total,
        slices: slices.into_iter().map(|(_, slice)| slice).collect(),
    }
}

// =============================================================================
// Emotion averages
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EmotionAverage {
    pub emotion: String,
    /// Mean intensity scaled x100 and rounded.
    pub value: i64,
}

/// Mean intensity per emotion, in the fixed [`EMOTIONS`] axis order.
pub fn emotion_averages(tweets: &[TweetRecord]) -> Vec<EmotionAverage> {
    EMOTIONS
        .iter()
        .map(|&emotion| {
            let sum: f64 = tweets.iter().map(|t| t.emotion_analysis.get(emotion)).sum();
            EmotionAverage {
                emotion: emotion.to_string(),
                value: (mean_of(sum, tweets.len()) * 100.0).round() as i64,
            }
        })
        .collect()
}

// =============================================================================
// Engagement composition
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct InteractionSlice {
    pub name: String,
    pub count: u64,
    /// Share of the combined interaction total, one decimal place.
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngagementComposition {
    pub total: u64,
    pub slices: Vec<InteractionSlice>,
}

pub fn engagement_composition(tweets: &[TweetRecord]) -> EngagementComposition {
    let mut likes = 0u64;
    let mut retweets = 0u64;
    let mut replies = 0u64;
    let mut bookmarks = 0u64;
    for tweet in tweets {
        likes += tweet.engagement_metrics.favorite_count;
        retweets += tweet.engagement_metrics.retweet_count;
        replies += tweet.engagement_metrics.reply_count;
        bookmarks += tweet.engagement_metrics.bookmark_count;
    }

    let total = likes + retweets + replies + bookmarks;
    let share = |count: u64| {
        if total == 0 {
            0.0
        } else {
            round1(count as f64 / total as f64 * 100.0)
        }
    };

    let slices = [
        ("Likes", likes),
        ("Retweets", retweets),
        ("Replies", replies),
        ("Bookmarks", bookmarks),
    ]
    .into_iter()
    .map(|(name, count)| InteractionSlice {
        name: name.to_string(),
        count,
        percent: share(count),
    })
    .collect();

    EngagementComposition { total, slices }
}

// =============================================================================
// Engagement-rate distribution
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RateBin {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateDistribution {
    pub bins: Vec<RateBin>,
    pub mean: f64,
    pub median: f64,
}

/// Rates are `total_engagement / FOLLOWER_BASELINE * 100`, bucketed into six
/// fixed half-open bins.
pub fn engagement_rate_distribution(tweets: &[TweetRecord]) -> RateDistribution {
    let mut rates: Vec<f64> = tweets
        .iter()
        .map(|t| t.total_engagement() / FOLLOWER_BASELINE * 100.0)
        .collect();

    let mut counts = [0usize; 6];
    for &rate in &rates {
        let bin = RATE_BIN_EDGES
            .iter()
            .position(|&edge| rate < edge)
            .unwrap_or(RATE_BIN_EDGES.len());
        counts[bin] += 1;
    }

    let mean = mean_of(rates.iter().sum(), rates.len());
    rates.sort_by(f64::total_cmp);
    let median = match rates.len() {
        0 => 0.0,
        n if n % 2 == 0 => (rates[n / 2 - 1] + rates[n / 2]) / 2.0,
        n => rates[n / 2],
    };

    RateDistribution {
        bins: RATE_BIN_LABELS
            .iter()
            .zip(counts)
            .map(|(&label, count)| RateBin {
                label: label.to_string(),
                count,
            })
            .collect(),
        mean,
        median,
    }
}

// =============================================================================
// Viral split
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ViralSplit {
    pub threshold: f64,
    pub viral_count: usize,
    /// Share of all tweets, one decimal place.
    pub viral_percent: f64,
    pub viral_mean: f64,
    pub viral_max: f64,
    pub non_viral_mean: f64,
}

pub fn viral_split(tweets: &[TweetRecord]) -> ViralSplit {
    let mut viral_sum = 0.0;
    let mut viral_count = 0usize;
    let mut viral_max = 0.0f64;
    let mut rest_sum = 0.0;
    let mut rest_count = 0usize;

    for tweet in tweets {
        let engagement = tweet.total_engagement();
        if engagement > VIRAL_THRESHOLD {
            viral_sum += engagement;
            viral_count += 1;
            viral_max = viral_max.max(engagement);
        } else {
            rest_sum += engagement;
            rest_count += 1;
        }
    }

    ViralSplit {
        threshold: VIRAL_THRESHOLD,
        viral_count,
        viral_percent: if tweets.is_empty() {
            0.0
        } else {
            round1(viral_count as f64 / tweets.len() as f64 * 100.0)
        },
        viral_mean: mean_of(viral_sum, viral_count),
        viral_max,
        non_viral_mean: mean_of(rest_sum, rest_count),
    }
}

// =============================================================================
// Language-conditioned engagement
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LanguageEngagement {
    pub language: String,
    pub tweet_count: usize,
    pub mean_engagement: f64,
}

/// Mean engagement per distinct language label, largest cohort first.
pub fn language_engagement(tweets: &[TweetRecord]) -> Vec<LanguageEngagement> {
    let mut cohorts: HashMap<&str, (usize, usize, f64)> = HashMap::new();
    for (position, tweet) in tweets.iter().enumerate() {
        let entry = cohorts
            .entry(tweet.language.as_str())
            .or_insert((position, 0, 0.0));
        entry.1 += 1;
        entry.2 += tweet.total_engagement();
    }

    let mut entries: Vec<(usize, LanguageEngagement)> = cohorts
        .into_iter()
        .map(|(language, (first_seen, count, sum))| {
            (
                first_seen,
                LanguageEngagement {
                    language: language.to_string(),
                    tweet_count: count,
                    mean_engagement: mean_of(sum, count),
                },
            )
        })
        .collect();

    entries.sort_by(|a, b| b.1.tweet_count.cmp(&a.1.tweet_count).then(a.0.cmp(&b.0)));
    entries.into_iter().map(|(_, entry)| entry).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageComparison {
    pub language_a: String,
    pub language_b: String,
    pub mean_a: f64,
    pub mean_b: f64,
    /// The cohort with the higher mean; `None` when the means are equal.
    pub leader: Option<String>,
    /// The leader's surplus as a percentage of the other cohort's mean;
    /// 0 when either mean is 0.
    pub surplus_percent: f64,
}

/// Symmetric relative comparison of two language cohorts.
pub fn compare_language_engagement(
    tweets: &[TweetRecord],
    language_a: &str,
    language_b: &str,
) -> LanguageComparison {
    let cohort_mean = |language: &str| {
        let mut sum = 0.0;
        let mut count = 0usize;
        for tweet in tweets.iter().filter(|t| t.language == language) {
            sum += tweet.total_engagement();
            count += 1;
        }
        mean_of(sum, count)
    };

    let mean_a = cohort_mean(language_a);
    let mean_b = cohort_mean(language_b);
    let (leader, larger, smaller) = if mean_a > mean_b {
        (Some(language_a.to_string()), mean_a, mean_b)
    } else if mean_b > mean_a {
        (Some(language_b.to_string()), mean_b, mean_a)
    } else {
        (None, mean_a, mean_b)
    };

    LanguageComparison {
        language_a: language_a.to_string(),
        language_b: language_b.to_string(),
        mean_a,
        mean_b,
        leader,
        surplus_percent: if smaller == 0.0 {
            0.0
        } else {
            (larger / smaller - 1.0) * 100.0
        },
    }
}

// =============================================================================
// Day-of-week engagement ranking
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DayEngagement {
    pub day: String,
    pub tweet_count: usize,
    pub mean_engagement: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayEngagementRanking {
    /// All seven canonical days, descending by mean engagement; ties keep
    /// canonical Monday-to-Sunday order.
    pub days: Vec<DayEngagement>,
    pub best_day: String,
}

pub fn day_engagement_ranking(tweets: &[TweetRecord]) -> DayEngagementRanking {
    let mut accumulators = [(0usize, 0.0f64); 7];
    for tweet in tweets {
        if let Some(index) = weekday_index(&tweet.temporal_analysis.posting_time.day) {
            accumulators[index].0 += 1;
            accumulators[index].1 += tweet.total_engagement();
        }
    }

    let mut days: Vec<DayEngagement> = WEEKDAYS
        .iter()
        .zip(accumulators)
        .map(|(&day, (count, sum))| DayEngagement {
            day: day.to_string(),
            tweet_count: count,
            mean_engagement: mean_of(sum, count),
        })
        .collect();

    // Stable sort preserves canonical order between equal means.
    days.sort_by(|a, b| b.mean_engagement.total_cmp(&a.mean_engagement));
    let best_day = days[0].day.clone();

    DayEngagementRanking { days, best_day }
}

// =============================================================================
// Activity histograms
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayBucket {
    pub day: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthBucket {
    pub month: String,
    pub count: usize,
}

/// 24 fixed hourly bins from `posting_time.hour`; unannotated or
/// out-of-range hours are ignored.
pub fn hourly_activity(tweets: &[TweetRecord]) -> Vec<HourBucket> {
    let mut counts = [0usize; 24];
    for tweet in tweets {
        if let Some(hour) = tweet.temporal_analysis.posting_time.hour {
            if hour < 24 {
                counts[hour as usize] += 1;
            }
        }
    }
    counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourBucket {
            hour: hour as u32,
            count,
        })
        .collect()
}

/// 7 canonical weekday bins from `posting_time.day`.
pub fn daily_activity(tweets: &[TweetRecord]) -> Vec<DayBucket> {
    let mut counts = [0u64; 7];
    for tweet in tweets {
        if let Some(index) = weekday_index(&tweet.temporal_analysis.posting_time.day) {
            counts[index] += 1;
        }
    }
    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(&day, count)| DayBucket {
            day: day.to_string(),
            count,
        })
        .collect()
}

/// 12 month-of-year bins parsed from `posting_time.date`; unparseable dates
/// are ignored.
pub fn monthly_activity(tweets: &[TweetRecord]) -> Vec<MonthBucket> {
    let mut counts = [0usize; 12];
    for tweet in tweets {
        if let Some(date) = parse_date(&tweet.temporal_analysis.posting_time.date) {
            counts[date.month0() as usize] += 1;
        }
    }
    MONTHS
        .iter()
        .zip(counts)
        .map(|(&month, count)| MonthBucket {
            month: month.to_string(),
            count,
        })
        .collect()
}

/// Indices of the top `n` buckets by count, ties broken by ascending index.
pub fn peak_indices(counts: &[usize], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| counts[b].cmp(&counts[a]).then(a.cmp(&b)));
    order.truncate(n);
    order
}

/// The top `n` hours of the hourly histogram.
pub fn peak_hours(hourly: &[HourBucket], n: usize) -> Vec<u32> {
    let counts: Vec<usize> = hourly.iter().map(|b| b.count).collect();
    peak_indices(&counts, n)
        .into_iter()
        .map(|index| hourly[index].hour)
        .collect()
}

/// Daily tweet volume from the patterns document; the only field of that
/// document this pipeline consumes. Unrecognized weekday keys are ignored.
pub fn daily_volume_overlay(patterns: &PatternsSummary) -> Vec<DayBucket> {
    let mut counts = [0u64; 7];
    for (day, &count) in &patterns.temporal_analysis.volume_patterns.daily_distribution {
        if let Some(index) = weekday_index(day) {
            counts[index] = count;
        }
    }
    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(&day, count)| DayBucket {
            day: day.to_string(),
            count,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekendSplit {
    pub weekday_percent: i64,
    pub weekend_percent: i64,
}

/// Share of datable tweets posted Monday-Friday vs Saturday/Sunday.
pub fn weekend_split(daily: &[DayBucket]) -> WeekendSplit {
    let weekend: u64 = daily
        .iter()
        .filter(|b| b.day == "Saturday" || b.day == "Sunday")
        .map(|b| b.count)
        .sum();
    let weekday: u64 = daily
        .iter()
        .filter(|b| b.day != "Saturday" && b.day != "Sunday")
        .map(|b| b.count)
        .sum();

    let total = weekday + weekend;
    if total == 0 {
        return WeekendSplit {
            weekday_percent: 0,
            weekend_percent: 0,
        };
    }
    let weekday_percent = percent_round(weekday as f64, total as f64);
    WeekendSplit {
        weekday_percent,
        weekend_percent: 100 - weekday_percent,
    }
}

// =============================================================================
// Top-N rankings
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TopTweet {
    pub id: String,
    pub author_username: String,
    pub created_at: String,
    pub text: String,
    pub total_engagement: f64,
    pub favorite_count: u64,
    pub retweet_count: u64,
    pub sentiment: String,
}

/// The `n` highest-engagement tweets; equal scores keep input order.
pub fn top_tweets(tweets: &[TweetRecord], n: usize) -> Vec<TopTweet> {
    let mut ranked: Vec<&TweetRecord> = tweets.iter().collect();
    ranked.sort_by(|a, b| b.total_engagement().total_cmp(&a.total_engagement()));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|tweet| TopTweet {
            id: tweet.id.clone(),
            author_username: tweet.author_username.clone(),
            created_at: tweet.created_at.clone(),
            text: tweet.original_text.clone(),
            total_engagement: tweet.total_engagement(),
            favorite_count: tweet.engagement_metrics.favorite_count,
            retweet_count: tweet.engagement_metrics.retweet_count,
            sentiment: tweet.sentiment().to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: u64,
}

/// Frequency-ranks a stream of labels: descending by count, ties broken by
/// first-seen order, truncated to `n`.
fn ranked_counts<I>(labels: I, n: usize) -> Vec<TermCount>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, (usize, u64)> = HashMap::new();
    let mut next_seen = 0usize;
    for label in labels {
        let entry = counts.entry(label).or_insert_with(|| {
            let seen = next_seen;
            next_seen += 1;
            (seen, 0)
        });
        entry.1 += 1;
    }

    let mut entries: Vec<(usize, TermCount)> = counts
        .into_iter()
        .map(|(term, (first_seen, count))| (first_seen, TermCount { term, count }))
        .collect();
    entries.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
    entries.truncate(n);
    entries.into_iter().map(|(_, entry)| entry).collect()
}

/// Top hashtags across the comma-separated `hashtags` fields.
pub fn top_hashtags(tweets: &[TweetRecord], n: usize) -> Vec<TermCount> {
    ranked_counts(
        tweets
            .iter()
            .filter(|t| !t.hashtags.is_empty())
            .flat_map(|t| t.hashtags.split(','))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string),
        n,
    )
}

/// Top named entities from the grammar annotations.
pub fn top_named_entities(tweets: &[TweetRecord], n: usize) -> Vec<TermCount> {
    ranked_counts(
        tweets
            .iter()
            .flat_map(|t| t.grammar_analysis.named_entities.iter().cloned()),
        n,
    )
}

// =============================================================================
// Overview and language summaries
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewSummary {
    pub total_tweets: usize,
    pub avg_engagement: f64,
    pub viral_count: usize,
    pub viral_percent: i64,
    pub positive_percent: i64,
    /// Distinct language labels, largest cohort first.
    pub languages: Vec<LanguageCount>,
}

pub fn overview_summary(tweets: &[TweetRecord]) -> OverviewSummary {
    let total = tweets.len();
    let engagement_sum: f64 = tweets.iter().map(|t| t.total_engagement()).sum();
    let viral_count = tweets
        .iter()
        .filter(|t| t.total_engagement() > VIRAL_THRESHOLD)
        .count();
    let positive = tweets.iter().filter(|t| t.sentiment() == "positive").count();

    let languages = language_engagement(tweets)
        .into_iter()
        .map(|cohort| LanguageCount {
            language: cohort.language,
            count: cohort.tweet_count,
        })
        .collect();

    OverviewSummary {
        total_tweets: total,
        avg_engagement: mean_of(engagement_sum, total),
        viral_count,
        viral_percent: percent_round(viral_count as f64, total as f64),
        positive_percent: percent_round(positive as f64, total as f64),
        languages,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageSentiment {
    pub language: String,
    pub tweet_count: usize,
    pub positive_percent: i64,
    pub negative_percent: i64,
    pub neutral_percent: i64,
}

/// Sentiment shares per language cohort, largest cohorts first, top `n`.
pub fn sentiment_by_language(tweets: &[TweetRecord], n: usize) -> Vec<LanguageSentiment> {
    #[derive(Default)]
    struct Cohort {
        first_seen: usize,
        positive: usize,
        negative: usize,
        neutral: usize,
        total: usize,
    }

    let mut cohorts: HashMap<&str, Cohort> = HashMap::new();
    for (position, tweet) in tweets.iter().enumerate() {
        let cohort = cohorts.entry(tweet.language.as_str()).or_insert_with(|| Cohort {
            first_seen: position,
            ..Cohort::default()
        });
        match tweet.sentiment() {
            "positive" => cohort.positive += 1,
            "negative" => cohort.negative += 1,
            "neutral" => cohort.neutral += 1,
            _ => {}
        }
        cohort.total += 1;
    }

    let mut entries: Vec<(usize, LanguageSentiment)> = cohorts
        .into_iter()
        .map(|(language, cohort)| {
            let total = cohort.total as f64;
            (
                cohort.first_seen,
                LanguageSentiment {
                    language: language.to_string(),
                    tweet_count: cohort.total,
                    positive_percent: percent_round(cohort.positive as f64, total),
                    negative_percent: percent_round(cohort.negative as f64, total),
                    neutral_percent: percent_round(cohort.neutral as f64, total),
                },
            )
        })
        .collect();

    entries.sort_by(|a, b| b.1.tweet_count.cmp(&a.1.tweet_count).then(a.0.cmp(&b.0)));
    entries.truncate(n);
    entries.into_iter().map(|(_, entry)| entry).collect()
}

// =============================================================================
// Linguistics
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
    pub percent: i64,
}

fn categorical_distribution<'a, I>(labels: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut total = 0usize;
    for (position, label) in labels.into_iter().enumerate() {
        let entry = counts.entry(label).or_insert((position, 0));
        entry.1 += 1;
        total += 1;
    }

    let mut entries: Vec<(usize, CategoryCount)> = counts
        .into_iter()
        .map(|(name, (first_seen, count))| {
            (
                first_seen,
                CategoryCount {
                    name: name.to_string(),
                    count,
                    percent: percent_round(count as f64, total as f64),
                },
            )
        })
        .collect();
    entries.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
    entries.into_iter().map(|(_, entry)| entry).collect()
}

/// Discourse-type distribution; unannotated tweets group under "Unknown".
pub fn discourse_types(tweets: &[TweetRecord]) -> Vec<CategoryCount> {
    categorical_distribution(tweets.iter().map(|t| t.grammar_analysis.discourse_type.as_str()))
}

/// Writing-style distribution; unannotated tweets group under "Unknown".
pub fn writing_styles(tweets: &[TweetRecord]) -> Vec<CategoryCount> {
    categorical_distribution(tweets.iter().map(|t| t.grammar_analysis.writing_style.as_str()))
}

pub fn average_coherence(tweets: &[TweetRecord]) -> f64 {
    let sum: f64 = tweets.iter().map(|t| t.grammar_analysis.coherence_score).sum();
    mean_of(sum, tweets.len())
}

// =============================================================================
// Sentiment trends
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySentiment {
    /// "YYYY-MM" bucket key.
    pub month: String,
    pub tweet_count: usize,
    pub positive_percent: i64,
    pub negative_percent: i64,
    pub neutral_percent: i64,
}

/// Month-bucketed sentiment shares from real posting dates, chronological.
/// Tweets without a parseable `posting_time.date` are excluded.
pub fn sentiment_trends(tweets: &[TweetRecord]) -> Vec<MonthlySentiment> {
    #[derive(Default)]
    struct MonthAccumulator {
        positive: usize,
        negative: usize,
        neutral: usize,
        total: usize,
    }

    let mut months: HashMap<String, MonthAccumulator> = HashMap::new();
    for tweet in tweets {
        let Some(date) = parse_date(&tweet.temporal_analysis.posting_time.date) else {
            continue;
        };
        let key = format!("{:04}-{:02}", date.year(), date.month());
        let entry = months.entry(key).or_default();
        match tweet.sentiment() {
            "positive" => entry.positive += 1,
            "negative" => entry.negative += 1,
            "neutral" => entry.neutral += 1,
            _ => {}
        }
        entry.total += 1;
    }

    let mut trend: Vec<MonthlySentiment> = months
        .into_iter()
        .map(|(month, acc)| {
            let total = acc.total as f64;
            MonthlySentiment {
                month,
                tweet_count: acc.total,
                positive_percent: percent_round(acc.positive as f64, total),
                negative_percent: percent_round(acc.negative as f64, total),
                neutral_percent: percent_round(acc.neutral as f64, total),
            }
        })
        .collect();
    trend.sort_by(|a, b| a.month.cmp(&b.month));
    trend
}

// =============================================================================
// Snapshot assembly
// =============================================================================

/// Default list lengths for the ranked views.
pub const TOP_TWEETS: usize = 3;
pub const TOP_HASHTAGS: usize = 5;
pub const TOP_ENTITIES: usize = 15;
pub const TOP_LANGUAGES: usize = 5;

/// Every derived view over one immutable snapshot. Owned and serializable;
/// recompute by calling [`compute_derived_views`] again on fresh input.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedViews {
    pub overview: OverviewSummary,
    pub sentiment: SentimentDistribution,
    pub sentiment_by_language: Vec<LanguageSentiment>,
    pub sentiment_trends: Vec<MonthlySentiment>,
    pub emotions: Vec<EmotionAverage>,
    pub engagement_composition: EngagementComposition,
    pub rate_distribution: RateDistribution,
    pub viral: ViralSplit,
    pub language_engagement: Vec<LanguageEngagement>,
    pub day_ranking: DayEngagementRanking,
    pub hourly_activity: Vec<HourBucket>,
    pub daily_activity: Vec<DayBucket>,
    pub monthly_activity: Vec<MonthBucket>,
    pub daily_volume: Vec<DayBucket>,
    pub weekend_split: WeekendSplit,
    pub top_tweets: Vec<TopTweet>,
    pub top_hashtags: Vec<TermCount>,
    pub top_entities: Vec<TermCount>,
    pub discourse_types: Vec<CategoryCount>,
    pub writing_styles: Vec<CategoryCount>,
    pub average_coherence: f64,
}

/// Computes the complete view model for one snapshot. Pure: same inputs,
/// same output, no ambient state.
pub fn compute_derived_views(tweets: &[TweetRecord], patterns: &PatternsSummary) -> DerivedViews {
    tracing::debug!(tweet_count = tweets.len(), "computing derived views");

    let daily = daily_activity(tweets);
    let weekend = weekend_split(&daily);

    DerivedViews {
        overview: overview_summary(tweets),
        sentiment: sentiment_distribution(tweets),
        sentiment_by_language: sentiment_by_language(tweets, TOP_LANGUAGES),
        sentiment_trends: sentiment_trends(tweets),
        emotions: emotion_averages(tweets),
        engagement_composition: engagement_composition(tweets),
        rate_distribution: engagement_rate_distribution(tweets),
        viral: viral_split(tweets),
        language_engagement: language_engagement(tweets),
        day_ranking: day_engagement_ranking(tweets),
        hourly_activity: hourly_activity(tweets),
        daily_activity: daily,
        monthly_activity: monthly_activity(tweets),
        daily_volume: daily_volume_overlay(patterns),
        weekend_split: weekend,
        top_tweets: top_tweets(tweets, TOP_TWEETS),
        top_hashtags: top_hashtags(tweets, TOP_HASHTAGS),
        top_entities: top_named_entities(tweets, TOP_ENTITIES),
        discourse_types: discourse_types(tweets),
        writing_styles: writing_styles(tweets),
        average_coherence: average_coherence(tweets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EngagementCounters, PostingTime};

    fn tweet_with_engagement(total: f64) -> TweetRecord {
        let mut tweet = TweetRecord::default();
        tweet.engagement_analysis.metrics.total_engagement = total;
        tweet
    }

    fn tweet_with_sentiment(sentiment: &str) -> TweetRecord {
        let mut tweet = TweetRecord::default();
        tweet.sentiment_analysis.sentiment = sentiment.to_string();
        tweet
    }

    fn tweet_with_hashtags(hashtags: &str) -> TweetRecord {
        TweetRecord {
            hashtags: hashtags.to_string(),
            ..TweetRecord::default()
        }
    }

    fn tweet_on_day(day: &str, engagement: f64) -> TweetRecord {
        let mut tweet = tweet_with_engagement(engagement);
        tweet.temporal_analysis.posting_time = PostingTime {
            day: day.to_string(),
            hour: None,
            date: String::new(),
        };
        tweet
    }

    #[test]
    fn test_sentiment_distribution_counts_and_percents() {
        let tweets = vec![
            tweet_with_sentiment("positive"),
            tweet_with_sentiment("positive"),
            tweet_with_sentiment("negative"),
            tweet_with_sentiment("neutral"),
        ];
        let dist = sentiment_distribution(&tweets);
        assert_eq!(dist.total, 4);
        assert_eq!(dist.count_of("positive"), 2);
        assert_eq!(dist.percent_of("positive"), 50);
        assert_eq!(dist.percent_of("negative"), 25);
        // Zero-count categories are omitted but read as 0.
        assert_eq!(dist.percent_of("unknown"), 0);
        assert_eq!(dist.slices.len(), 3);
    }

    #[test]
    fn test_sentiment_percentages_sum_within_rounding_drift() {
        let tweets = vec![
            tweet_with_sentiment("positive"),
            tweet_with_sentiment("positive"),
            tweet_with_sentiment("negative"),
            tweet_with_sentiment("negative"),
            tweet_with_sentiment("negative"),
            tweet_with_sentiment("neutral"),
            tweet_with_sentiment("neutral"),
        ];
        let dist = sentiment_distribution(&tweets);
        let sum: i64 = dist.slices.iter().map(|s| s.percent).sum();
        // 1 point of drift per category at most.
        assert!((sum - 100).abs() <= dist.slices.len() as i64);
    }

    #[test]
    fn test_sentiment_distribution_empty() {
        let dist = sentiment_distribution(&[]);
        assert_eq!(dist.total, 0);
        assert!(dist.slices.is_empty());
        assert_eq!(dist.percent_of("positive"), 0);
    }

    #[test]
    fn test_emotion_averages_fixed_order() {
        let mut tweet = TweetRecord::default();
        tweet.emotion_analysis.joy = 0.8;
        tweet.emotion_analysis.anticipation = 0.4;
        let mut other = TweetRecord::default();
        other.emotion_analysis.joy = 0.4;

        let averages = emotion_averages(&[tweet, other]);
        assert_eq!(averages.len(), 8);
        assert_eq!(averages[0].emotion, "joy");
        assert_eq!(averages[0].value, 60);
        assert_eq!(averages[7].emotion, "anticipation");
        assert_eq!(averages[7].value, 20);
        // Tweets missing an emotion contribute 0.
        assert_eq!(averages[1].value, 0);
    }

    #[test]
    fn test_emotion_averages_empty() {
        let averages = emotion_averages(&[]);
        assert_eq!(averages.len(), 8);
        assert!(averages.iter().all(|a| a.value == 0));
    }

    #[test]
    fn test_engagement_composition_percentages() {
        let tweet = TweetRecord {
            engagement_metrics: EngagementCounters {
                favorite_count: 50,
                retweet_count: 30,
                reply_count: 15,
                bookmark_count: 5,
            },
            ..TweetRecord::default()
        };
        let composition = engagement_composition(&[tweet]);
        assert_eq!(composition.total, 100);
        assert_eq!(composition.slices[0].name, "Likes");
        assert_eq!(composition.slices[0].percent, 50.0);
        assert_eq!(composition.slices[3].percent, 5.0);
    }

    #[test]
    fn test_engagement_composition_zero_total_not_nan() {
        let composition = engagement_composition(&[TweetRecord::default()]);
        assert_eq!(composition.total, 0);
        assert!(composition.slices.iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn test_engagement_composition_order_independent() {
        let mut a = TweetRecord::default();
        a.engagement_metrics.favorite_count = 7;
        let mut b = TweetRecord::default();
        b.engagement_metrics.retweet_count = 3;
        let mut c = TweetRecord::default();
        c.engagement_metrics.reply_count = 11;

        let forward = engagement_composition(&[a.clone(), b.clone(), c.clone()]);
        let reversed = engagement_composition(&[c, b, a]);
        assert_eq!(forward.total, reversed.total);
        for (x, y) in forward.slices.iter().zip(&reversed.slices) {
            assert_eq!(x.count, y.count);
            assert_eq!(x.percent, y.percent);
        }
    }

    #[test]
    fn test_rate_distribution_binning() {
        // Rates: 1.0, 0.05, 0.1, 0.01 (engagement / 100 * 100).
        let tweets = vec![
            tweet_with_engagement(1.0),
            tweet_with_engagement(0.05),
            tweet_with_engagement(0.1),
            tweet_with_engagement(0.01),
        ];
        let dist = engagement_rate_distribution(&tweets);
        assert_eq!(dist.bins[0].count, 1); // 0.01 in [0, 0.02)
        assert_eq!(dist.bins[1].count, 1); // 0.05 in [0.02, 0.07)
        assert_eq!(dist.bins[2].count, 1); // 0.1 in [0.07, 0.15)
        assert_eq!(dist.bins[5].count, 1); // 1.0 in [0.7, inf)
    }

    #[test]
    fn test_rate_median_even_and_odd() {
        let even = vec![
            tweet_with_engagement(1.0),
            tweet_with_engagement(2.0),
            tweet_with_engagement(3.0),
            tweet_with_engagement(4.0),
        ];
        let dist = engagement_rate_distribution(&even);
        assert!((dist.median - 2.5).abs() < 1e-9);

        let odd = vec![
            tweet_with_engagement(1.0),
            tweet_with_engagement(2.0),
            tweet_with_engagement(3.0),
        ];
        let dist = engagement_rate_distribution(&odd);
        assert!((dist.median - 2.0).abs() < 1e-9);
        assert!((dist.mean - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_distribution_empty() {
        let dist = engagement_rate_distribution(&[]);
        assert_eq!(dist.mean, 0.0);
        assert_eq!(dist.median, 0.0);
        assert!(dist.bins.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_viral_split_below_threshold() {
        let tweets = vec![tweet_with_engagement(10.0)];
        let split = viral_split(&tweets);
        assert_eq!(split.viral_count, 0);
        assert_eq!(split.viral_mean, 0.0);
        assert_eq!(split.viral_max, 0.0);
        assert!((split.non_viral_mean - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_viral_split_partitions() {
        let tweets = vec![
            tweet_with_engagement(100.0),
            tweet_with_engagement(50.0),
            tweet_with_engagement(10.0),
            tweet_with_engagement(20.0),
        ];
        let split = viral_split(&tweets);
        assert_eq!(split.viral_count, 2);
        assert_eq!(split.viral_percent, 50.0);
        assert!((split.viral_mean - 75.0).abs() < 1e-9);
        assert_eq!(split.viral_max, 100.0);
        assert!((split.non_viral_mean - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_viral_split_empty() {
        let split = viral_split(&[]);
        assert_eq!(split.viral_count, 0);
        assert_eq!(split.viral_percent, 0.0);
        assert_eq!(split.non_viral_mean, 0.0);
    }

    #[test]
    fn test_language_comparison_symmetric_surplus() {
        let mut english = tweet_with_engagement(20.0);
        english.language = "English".to_string();
        let mut arabic = tweet_with_engagement(40.0);
        arabic.language = "Arabic".to_string();
        let tweets = vec![english, arabic];

        let comparison = compare_language_engagement(&tweets, "English", "Arabic");
        assert_eq!(comparison.mean_a, 20.0);
        assert_eq!(comparison.mean_b, 40.0);
        assert_eq!(comparison.leader.as_deref(), Some("Arabic"));
        assert!((comparison.surplus_percent - 100.0).abs() < 1e-9);

        // Same result regardless of argument order.
        let flipped = compare_language_engagement(&tweets, "Arabic", "English");
        assert_eq!(flipped.leader.as_deref(), Some("Arabic"));
        assert!((flipped.surplus_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_language_comparison_zero_cohort() {
        let comparison = compare_language_engagement(&[], "English", "Arabic");
        assert!(comparison.leader.is_none());
        assert_eq!(comparison.surplus_percent, 0.0);
    }

    #[test]
    fn test_language_engagement_cohort_means() {
        let mut english = tweet_with_engagement(20.0);
        english.language = "English".to_string();
        let mut english2 = tweet_with_engagement(40.0);
        english2.language = "English".to_string();
        let mut arabic = tweet_with_engagement(10.0);
        arabic.language = "Arabic".to_string();

        let cohorts = language_engagement(&[english, english2, arabic]);
        assert_eq!(cohorts.len(), 2);
        assert_eq!(cohorts[0].language, "English");
        assert_eq!(cohorts[0].tweet_count, 2);
        assert!((cohorts[0].mean_engagement - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_day_increasing_sunday_to_saturday() {
        // Uniform coverage, engagement strictly increasing Sunday -> Saturday.
        let order = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];
        let tweets: Vec<TweetRecord> = order
            .iter()
            .enumerate()
            .map(|(rank, day)| tweet_on_day(day, (rank + 1) as f64 * 10.0))
            .collect();

        let ranking = day_engagement_ranking(&tweets);
        assert_eq!(ranking.best_day, "Saturday");
        assert_eq!(ranking.days[0].day, "Saturday");
        assert!((ranking.days[0].mean_engagement - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_day_ties_follow_canonical_order() {
        let ranking = day_engagement_ranking(&[]);
        assert_eq!(ranking.days.len(), 7);
        assert_eq!(ranking.best_day, "Monday");
    }

    #[test]
    fn test_day_ranking_ignores_unrecognized_days() {
        let tweets = vec![tweet_on_day("Someday", 100.0), tweet_on_day("Friday", 5.0)];
        let ranking = day_engagement_ranking(&tweets);
        assert_eq!(ranking.best_day, "Friday");
        let counted: usize = ranking.days.iter().map(|d| d.tweet_count).sum();
        assert_eq!(counted, 1);
    }

    #[test]
    fn test_hourly_activity_bins_and_range() {
        let mut early = TweetRecord::default();
        early.temporal_analysis.posting_time.hour = Some(0);
        let mut late = TweetRecord::default();
        late.temporal_analysis.posting_time.hour = Some(23);
        let mut invalid = TweetRecord::default();
        invalid.temporal_analysis.posting_time.hour = Some(24);
        let unannotated = TweetRecord::default();

        let hourly = hourly_activity(&[early, late, invalid, unannotated]);
        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly[0].count, 1);
        assert_eq!(hourly[23].count, 1);
        let total: usize = hourly.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_monthly_activity_parses_dates() {
        let mut january = TweetRecord::default();
        january.temporal_analysis.posting_time.date = "2024-01-15".to_string();
        let mut december = TweetRecord::default();
        december.temporal_analysis.posting_time.date = "2024-12-31T10:00:00+00:00".to_string();
        let mut garbage = TweetRecord::default();
        garbage.temporal_analysis.posting_time.date = "not-a-date".to_string();

        let monthly = monthly_activity(&[january, december, garbage]);
        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly[0].month, "Jan");
        assert_eq!(monthly[0].count, 1);
        assert_eq!(monthly[11].count, 1);
    }

    #[test]
    fn test_peak_indices_tie_break_ascending() {
        let counts = [3, 5, 5, 1];
        assert_eq!(peak_indices(&counts, 3), vec![1, 2, 0]);
    }

    #[test]
    fn test_peak_hours_from_histogram() {
        let mut tweets = Vec::new();
        for _ in 0..3 {
            let mut tweet = TweetRecord::default();
            tweet.temporal_analysis.posting_time.hour = Some(20);
            tweets.push(tweet);
        }
        let mut tweet = TweetRecord::default();
        tweet.temporal_analysis.posting_time.hour = Some(8);
        tweets.push(tweet);

        let hourly = hourly_activity(&tweets);
        assert_eq!(peak_hours(&hourly, 2), vec![20, 8]);
    }

    #[test]
    fn test_daily_volume_overlay_ignores_unknown_keys() {
        let mut patterns = PatternsSummary::default();
        patterns
            .temporal_analysis
            .volume_patterns
            .daily_distribution
            .insert("Monday".to_string(), 12);
        patterns
            .temporal_analysis
            .volume_patterns
            .daily_distribution
            .insert("Funday".to_string(), 99);

        let overlay = daily_volume_overlay(&patterns);
        assert_eq!(overlay.len(), 7);
        assert_eq!(overlay[0].day, "Monday");
        assert_eq!(overlay[0].count, 12);
        let total: u64 = overlay.iter().map(|b| b.count).sum();
        assert_eq!(total, 12);
    }

    #[test]
    fn test_weekend_split() {
        let tweets = vec![
            tweet_on_day("Monday", 0.0),
            tweet_on_day("Tuesday", 0.0),
            tweet_on_day("Wednesday", 0.0),
            tweet_on_day("Saturday", 0.0),
        ];
        let split = weekend_split(&daily_activity(&tweets));
        assert_eq!(split.weekday_percent, 75);
        assert_eq!(split.weekend_percent, 25);
    }

    #[test]
    fn test_weekend_split_empty() {
        let split = weekend_split(&daily_activity(&[]));
        assert_eq!(split.weekday_percent, 0);
        assert_eq!(split.weekend_percent, 0);
    }

    #[test]
    fn test_top_tweets_descending() {
        let mut low = tweet_with_engagement(5.0);
        low.id = "low".to_string();
        let mut high = tweet_with_engagement(50.0);
        high.id = "high".to_string();
        let mut mid = tweet_with_engagement(25.0);
        mid.id = "mid".to_string();

        let top = top_tweets(&[low, high, mid], 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "high");
        assert_eq!(top[1].id, "mid");
    }

    #[test]
    fn test_top_hashtags_split_trim_and_rank() {
        let top = top_hashtags(&[tweet_with_hashtags("#a, #b"), tweet_with_hashtags("#a")], 5);
        assert_eq!(
            top,
            vec![
                TermCount {
                    term: "#a".to_string(),
                    count: 2
                },
                TermCount {
                    term: "#b".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_top_hashtags_idempotent() {
        let tweets = vec![tweet_with_hashtags("#x, #y, #x"), tweet_with_hashtags("#y, #z")];

        let once = top_hashtags(&tweets, 3);
        let twice = top_hashtags(&tweets, 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_top_named_entities() {
        let mut first = TweetRecord::default();
        first.grammar_analysis.named_entities =
            vec!["Riyadh".to_string(), "Expo".to_string(), "Riyadh".to_string()];
        let mut second = TweetRecord::default();
        second.grammar_analysis.named_entities = vec!["Expo".to_string()];

        let top = top_named_entities(&[first, second], 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].term, "Riyadh");
        assert_eq!(top[0].count, 2);
    }

    #[test]
    fn test_ranked_counts_tie_first_seen() {
        let labels = ["b", "a", "b", "a"].iter().map(|s| s.to_string());
        let ranked = ranked_counts(labels, 2);
        assert_eq!(ranked[0].term, "b");
        assert_eq!(ranked[1].term, "a");
    }

    #[test]
    fn test_overview_summary() {
        let mut positive = tweet_with_sentiment("positive");
        positive.engagement_analysis.metrics.total_engagement = 30.0;
        positive.language = "English".to_string();
        let mut neutral = tweet_with_sentiment("neutral");
        neutral.engagement_analysis.metrics.total_engagement = 10.0;
        neutral.language = "Arabic".to_string();

        let overview = overview_summary(&[positive, neutral]);
        assert_eq!(overview.total_tweets, 2);
        assert!((overview.avg_engagement - 20.0).abs() < 1e-9);
        assert_eq!(overview.viral_count, 1);
        assert_eq!(overview.viral_percent, 50);
        assert_eq!(overview.positive_percent, 50);
        assert_eq!(overview.languages.len(), 2);
    }

    #[test]
    fn test_overview_summary_empty() {
        let overview = overview_summary(&[]);
        assert_eq!(overview.total_tweets, 0);
        assert_eq!(overview.avg_engagement, 0.0);
        assert_eq!(overview.viral_percent, 0);
        assert_eq!(overview.positive_percent, 0);
        assert!(overview.languages.is_empty());
    }

    #[test]
    fn test_sentiment_by_language_top_cohorts() {
        let mut tweets = Vec::new();
        for _ in 0..3 {
            let mut tweet = tweet_with_sentiment("positive");
            tweet.language = "English".to_string();
            tweets.push(tweet);
        }
        let mut negative = tweet_with_sentiment("negative");
        negative.language = "Arabic".to_string();
        tweets.push(negative);

        let cohorts = sentiment_by_language(&tweets, 5);
        assert_eq!(cohorts[0].language, "English");
        assert_eq!(cohorts[0].positive_percent, 100);
        assert_eq!(cohorts[1].language, "Arabic");
        assert_eq!(cohorts[1].negative_percent, 100);
    }

    #[test]
    fn test_discourse_types_defaults_to_unknown() {
        let mut annotated = TweetRecord::default();
        annotated.grammar_analysis.discourse_type = "Informative".to_string();

        let types = discourse_types(&[annotated, TweetRecord::default()]);
        assert_eq!(types.len(), 2);
        assert!(types.iter().any(|t| t.name == "Unknown" && t.count == 1));
        assert!(types.iter().all(|t| t.percent == 50));
    }

    #[test]
    fn test_average_coherence_empty_and_populated() {
        assert_eq!(average_coherence(&[]), 0.0);

        let mut tweet = TweetRecord::default();
        tweet.grammar_analysis.coherence_score = 8.0;
        let mut other = TweetRecord::default();
        other.grammar_analysis.coherence_score = 6.0;
        assert!((average_coherence(&[tweet, other]) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_sentiment_trends_month_buckets() {
        let mut january = tweet_with_sentiment("positive");
        january.temporal_analysis.posting_time.date = "2024-01-10".to_string();
        let mut january2 = tweet_with_sentiment("negative");
        january2.temporal_analysis.posting_time.date = "2024-01-20".to_string();
        let mut march = tweet_with_sentiment("positive");
        march.temporal_analysis.posting_time.date = "2024-03-01".to_string();
        let undated = tweet_with_sentiment("positive");

        let trend = sentiment_trends(&[january, january2, march, undated]);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month, "2024-01");
        assert_eq!(trend[0].tweet_count, 2);
        assert_eq!(trend[0].positive_percent, 50);
        assert_eq!(trend[1].month, "2024-03");
        assert_eq!(trend[1].positive_percent, 100);
    }

    #[test]
    fn test_compute_derived_views_empty_input() {
        let views = compute_derived_views(&[], &PatternsSummary::default());
        assert_eq!(views.overview.total_tweets, 0);
        assert_eq!(views.sentiment.total, 0);
        assert_eq!(views.emotions.len(), 8);
        assert_eq!(views.rate_distribution.mean, 0.0);
        assert_eq!(views.viral.viral_count, 0);
        assert_eq!(views.hourly_activity.len(), 24);
        assert_eq!(views.daily_activity.len(), 7);
        assert_eq!(views.monthly_activity.len(), 12);
        assert!(views.top_tweets.is_empty());
        assert!(views.top_hashtags.is_empty());
        assert_eq!(views.average_coherence, 0.0);
    }

    #[test]
    fn test_compute_derived_views_serializes() {
        let mut tweet = tweet_with_sentiment("positive");
        tweet.hashtags = "#launch".to_string();
        let views = compute_derived_views(&[tweet], &PatternsSummary::default());
        let json = serde_json::to_value(&views).unwrap();
        assert_eq!(json["overview"]["total_tweets"], 1);
        assert_eq!(json["top_hashtags"][0]["term"], "#launch");
    }
}
