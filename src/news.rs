use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::constant::HOT_HEAT_THRESHOLD;

/// Coarse directional classification of a headline's tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One headline to be turned into a post. Immutable once a feed has built it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRecord {
    pub id: String,
    pub title: String,
    pub source: String,
    pub source_url: Option<String>,
    pub summary: Option<String>,
    /// Unix epoch milliseconds; only used for relative-age display.
    pub published_ms: i64,
    pub ticker: Option<String>,
    pub sentiment: Sentiment,
    pub price_change: Option<f64>,
    pub heat: u32,
    pub categories: Vec<String>,
}

/// Which fetched headlines the pipeline keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsFilter {
    All,
    Hot,
    Bullish,
    Bearish,
}

impl NewsFilter {
    pub fn matches(self, record: &NewsRecord) -> bool {
        match self {
            NewsFilter::All => true,
            NewsFilter::Hot => record.heat > HOT_HEAT_THRESHOLD,
            NewsFilter::Bullish => record.sentiment == Sentiment::Bullish,
            NewsFilter::Bearish => record.sentiment == Sentiment::Bearish,
        }
    }
}

impl FromStr for NewsFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(NewsFilter::All),
            "hot" => Ok(NewsFilter::Hot),
            "bullish" => Ok(NewsFilter::Bullish),
            "bearish" => Ok(NewsFilter::Bearish),
            other => Err(anyhow::anyhow!("Unknown feed filter: {other}")),
        }
    }
}

/// Compact relative age for log lines: "15m", "2h", "3d".
pub fn time_ago(published_ms: i64, now_ms: i64) -> String {
    let minutes = (now_ms - published_ms).max(0) / 60_000;
    if minutes < 60 {
        format!("{minutes}m")
    } else if minutes < 1440 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}d", minutes / 1440)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sentiment: Sentiment, heat: u32) -> NewsRecord {
        NewsRecord {
            id: "1".to_string(),
            title: "Test headline".to_string(),
            source: "Test".to_string(),
            source_url: None,
            summary: None,
            published_ms: 0,
            ticker: None,
            sentiment,
            price_change: None,
            heat,
            categories: vec![],
        }
    }

    #[test]
    fn filter_matches_by_sentiment_and_heat() {
        let bullish = record(Sentiment::Bullish, 95);
        let bearish = record(Sentiment::Bearish, 40);

        assert!(NewsFilter::All.matches(&bullish));
        assert!(NewsFilter::All.matches(&bearish));
        assert!(NewsFilter::Hot.matches(&bullish));
        assert!(!NewsFilter::Hot.matches(&bearish));
        assert!(NewsFilter::Bullish.matches(&bullish));
        assert!(!NewsFilter::Bullish.matches(&bearish));
        assert!(NewsFilter::Bearish.matches(&bearish));
        assert!(!NewsFilter::Bearish.matches(&bullish));
    }

    #[test]
    fn filter_parses_known_names_only() {
        assert_eq!("hot".parse::<NewsFilter>().unwrap(), NewsFilter::Hot);
        assert_eq!("all".parse::<NewsFilter>().unwrap(), NewsFilter::All);
        assert!("spicy".parse::<NewsFilter>().is_err());
    }

    #[test]
    fn time_ago_buckets() {
        let now = 1_000_000_000_000;
        assert_eq!(time_ago(now - 15 * 60_000, now), "15m");
        assert_eq!(time_ago(now - 95 * 60_000, now), "1h");
        assert_eq!(time_ago(now - 3 * 1440 * 60_000, now), "3d");
        assert_eq!(time_ago(now, now), "0m");
        // Clock skew never produces negative ages.
        assert_eq!(time_ago(now + 60_000, now), "0m");
    }
}
