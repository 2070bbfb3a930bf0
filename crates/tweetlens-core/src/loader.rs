//! Snapshot ingestion: reads the tweets and patterns documents from disk or
//! fetches them from an analytics endpoint.

use crate::model::{PatternsSummary, TweetRecord};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: simd_json::Error,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Wire shape of the tweets document: a bare array or `{"tweets": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TweetsDocument {
    Wrapped { tweets: Vec<TweetRecord> },
    Bare(Vec<TweetRecord>),
}

impl TweetsDocument {
    fn into_tweets(self) -> Vec<TweetRecord> {
        match self {
            TweetsDocument::Wrapped { tweets } => tweets,
            TweetsDocument::Bare(tweets) => tweets,
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let display = path.display().to_string();
    let mut bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    simd_json::from_slice(&mut bytes).map_err(|source| LoadError::Json {
        path: display,
        source,
    })
}

/// Loads the tweet array from a JSON file.
pub fn load_tweets_file(path: &Path) -> Result<Vec<TweetRecord>, LoadError> {
    let document: TweetsDocument = read_json(path)?;
    let tweets = document.into_tweets();
    tracing::debug!(path = %path.display(), count = tweets.len(), "loaded tweets");
    Ok(tweets)
}

/// Loads the patterns document from a JSON file.
pub fn load_patterns_file(path: &Path) -> Result<PatternsSummary, LoadError> {
    let patterns = read_json(path)?;
    tracing::debug!(path = %path.display(), "loaded patterns");
    Ok(patterns)
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, LoadError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| LoadError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut bytes: Vec<u8> = response
        .bytes()
        .await
        .map_err(|source| LoadError::Http {
            url: url.to_string(),
            source,
        })?
        .to_vec();
    simd_json::from_slice(&mut bytes).map_err(|source| LoadError::Json {
        path: url.to_string(),
        source,
    })
}

/// Fetches both documents from `{base_url}/api/tweets` and
/// `{base_url}/api/patterns`.
pub async fn fetch_dataset(
    base_url: &str,
) -> Result<(Vec<TweetRecord>, PatternsSummary), LoadError> {
    let base = base_url.trim_end_matches('/');
    let client = reqwest::Client::new();

    let tweets_url = format!("{base}/api/tweets");
    let document: TweetsDocument = fetch_json(&client, &tweets_url).await?;
    let tweets = document.into_tweets();
    tracing::debug!(url = %tweets_url, count = tweets.len(), "fetched tweets");

    let patterns_url = format!("{base}/api/patterns");
    let patterns: PatternsSummary = fetch_json(&client, &patterns_url).await?;
    tracing::debug!(url = %patterns_url, "fetched patterns");

    Ok((tweets, patterns))
}
