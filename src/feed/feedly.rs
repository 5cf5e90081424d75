use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::annotate::annotate;
use crate::config::Config;
use crate::constant::MAX_ITEMS_PER_FEED;
use crate::news::NewsRecord;

use super::Feed;

const STREAM_CONTENTS_URL: &str = "https://cloud.feedly.com/v3/streams/contents";

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    items: Vec<StreamItem>,
}

#[derive(Debug, Deserialize)]
struct StreamItem {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    origin: Option<Origin>,
    #[serde(default)]
    summary: Option<Content>,
    #[serde(default)]
    published: Option<i64>,
    #[serde(default)]
    engagement: Option<u32>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    alternate: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Origin {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "htmlUrl")]
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(default)]
    href: Option<String>,
}

pub struct FeedlyFeed {
    client: Client,
    token: String,
    stream_id: String,
}

impl FeedlyFeed {
    pub fn new() -> Self {
        let config = Config::get();
        let token = config.feedly_token.clone().expect("FEEDLY_TOKEN is not set");
        let stream_id = config
            .feedly_stream_id
            .clone()
            .expect("FEEDLY_STREAM_ID is not set");

        Self {
            client: Client::new(),
            token,
            stream_id,
        }
    }
}

#[async_trait]
impl Feed for FeedlyFeed {
    fn name(&self) -> &'static str {
        "feedly"
    }

    async fn fetch(&self) -> Result<Vec<NewsRecord>> {
        let count = MAX_ITEMS_PER_FEED.to_string();
        let response = self
            .client
            .get(STREAM_CONTENTS_URL)
            .bearer_auth(&self.token)
            .query(&[
                ("streamId", self.stream_id.as_str()),
                ("count", count.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<StreamResponse>()
            .await?;

        Ok(response.items.into_iter().map(record_from_item).collect())
    }
}

fn record_from_item(item: StreamItem) -> NewsRecord {
    let title = item.title.unwrap_or_else(|| "No Title".to_string());
    let summary = item.summary.and_then(|s| s.content).filter(|s| !s.is_empty());

    let text = match &summary {
        Some(summary) => format!("{title} {summary}"),
        None => title.clone(),
    };
    let annotation = annotate(&text);

    let (source, origin_url) = match item.origin {
        Some(origin) => (
            origin.title.unwrap_or_else(|| "Feedly".to_string()),
            origin.html_url,
        ),
        None => ("Feedly".to_string(), None),
    };
    let source_url = item
        .alternate
        .into_iter()
        .find_map(|link| link.href)
        .or(origin_url);

    NewsRecord {
        id: item.id,
        title,
        source,
        source_url,
        summary,
        published_ms: item.published.unwrap_or(0),
        ticker: annotation.ticker,
        sentiment: annotation.sentiment,
        price_change: annotation.percentage,
        heat: item.engagement.unwrap_or(0),
        categories: item
            .categories
            .into_iter()
            .filter_map(|category| category.label)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::Sentiment;

    #[test]
    fn stream_item_maps_to_record() {
        let raw = serde_json::json!({
            "id": "entry/abc123",
            "title": "$GME rallies 42% as retail buying returns",
            "origin": { "title": "Yahoo Finance", "htmlUrl": "https://finance.yahoo.com" },
            "summary": { "content": "Meme stock mania is back." },
            "published": 1717000000000i64,
            "engagement": 99,
            "categories": [ { "label": "Meme" }, { "label": "Retail" } ],
            "alternate": [ { "href": "https://finance.yahoo.com/news/gme" } ]
        });

        let item: StreamItem = serde_json::from_value(raw).unwrap();
        let record = record_from_item(item);

        assert_eq!(record.id, "entry/abc123");
        assert_eq!(record.source, "Yahoo Finance");
        assert_eq!(
            record.source_url.as_deref(),
            Some("https://finance.yahoo.com/news/gme")
        );
        assert_eq!(record.summary.as_deref(), Some("Meme stock mania is back."));
        assert_eq!(record.published_ms, 1717000000000);
        assert_eq!(record.heat, 99);
        assert_eq!(record.categories, vec!["Meme", "Retail"]);
        // Derived by the annotator.
        assert_eq!(record.ticker.as_deref(), Some("GME"));
        assert_eq!(record.sentiment, Sentiment::Bullish);
        assert_eq!(record.price_change, Some(42.0));
    }

    #[test]
    fn sparse_item_gets_defaults() {
        let raw = serde_json::json!({ "id": "entry/empty" });

        let item: StreamItem = serde_json::from_value(raw).unwrap();
        let record = record_from_item(item);

        assert_eq!(record.title, "No Title");
        assert_eq!(record.source, "Feedly");
        assert_eq!(record.source_url, None);
        assert_eq!(record.summary, None);
        assert_eq!(record.heat, 0);
        assert_eq!(record.ticker, None);
        assert_eq!(record.sentiment, Sentiment::Neutral);
        assert_eq!(record.price_change, None);
    }
}
