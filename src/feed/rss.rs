use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use uuid::Uuid;

use crate::annotate::annotate;
use crate::config::Config;
use crate::constant::MAX_ITEMS_PER_FEED;
use crate::news::NewsRecord;

use super::Feed;

pub struct RssFeed {
    urls: Vec<String>,
}

impl RssFeed {
    pub fn new() -> Self {
        Self {
            urls: Config::get().rss_urls.clone(),
        }
    }

    #[allow(dead_code)]
    pub fn from_urls(urls: &[impl AsRef<str>]) -> Self {
        Self {
            urls: urls.iter().map(|url| url.as_ref().to_string()).collect(),
        }
    }
}

#[async_trait]
impl Feed for RssFeed {
    fn name(&self) -> &'static str {
        "rss"
    }

    async fn fetch(&self) -> Result<Vec<NewsRecord>> {
        let mut records = Vec::new();
        for url in &self.urls {
            let body = reqwest::get(url).await?.bytes().await?;
            let channel = rss::Channel::read_from(&body[..])?;

            let source = channel.title().to_string();
            for item in channel.items().iter().take(MAX_ITEMS_PER_FEED) {
                records.push(record_from_item(&source, item));
            }
        }

        Ok(records)
    }
}

fn record_from_item(source: &str, item: &rss::Item) -> NewsRecord {
    let title = item.title().unwrap_or("No Title").to_string();
    let summary = item
        .description()
        .map(str::to_string)
        .filter(|s| !s.is_empty());

    let text = match &summary {
        Some(summary) => format!("{title} {summary}"),
        None => title.clone(),
    };
    let annotation = annotate(&text);

    let id = item
        .guid()
        .map(|guid| guid.value().to_string())
        .or_else(|| item.link().map(str::to_string))
        .unwrap_or_else(|| {
            if title == "No Title" {
                Uuid::new_v4().to_string()
            } else {
                title.clone()
            }
        });

    let published_ms = item
        .pub_date()
        .and_then(|date| DateTime::parse_from_rfc2822(date).ok())
        .map(|date| date.timestamp_millis())
        .unwrap_or(0);

    NewsRecord {
        id,
        title,
        source: source.to_string(),
        source_url: item.link().map(str::to_string),
        summary,
        published_ms,
        ticker: annotation.ticker,
        sentiment: annotation.sentiment,
        price_change: annotation.percentage,
        heat: 0,
        categories: item
            .categories()
            .iter()
            .map(|category| category.name().to_string())
            .collect(),
    }
}
