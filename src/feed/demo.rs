use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::news::{NewsRecord, Sentiment};

use super::Feed;

/// Built-in headlines used when no real source is configured, so the whole
/// pipeline can be exercised without credentials.
pub struct DemoFeed {}

impl DemoFeed {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Feed for DemoFeed {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn fetch(&self) -> Result<Vec<NewsRecord>> {
        Ok(demo_records(Utc::now().timestamp_millis()))
    }
}

struct DemoItem {
    id: &'static str,
    title: &'static str,
    source: &'static str,
    source_url: &'static str,
    summary: &'static str,
    age_mins: i64,
    ticker: &'static str,
    sentiment: Sentiment,
    price_change: f64,
    heat: u32,
    categories: [&'static str; 2],
}

const DEMO_ITEMS: [DemoItem; 6] = [
    DemoItem {
        id: "demo-1",
        title: "NVIDIA Surges 8% on Record AI Chip Demand from Major Cloud Providers",
        source: "Reuters",
        source_url: "https://reuters.com",
        summary: "NVIDIA shares jumped after the company reported unprecedented demand for its H100 and upcoming Blackwell chips from hyperscalers.",
        age_mins: 15,
        ticker: "NVDA",
        sentiment: Sentiment::Bullish,
        price_change: 8.2,
        heat: 98,
        categories: ["Tech", "AI"],
    },
    DemoItem {
        id: "demo-2",
        title: "Federal Reserve Signals Potential Rate Cut at September Meeting",
        source: "Bloomberg",
        source_url: "https://bloomberg.com",
        summary: "Fed officials indicated growing confidence that inflation is moving sustainably toward target, opening door to rate cuts.",
        age_mins: 32,
        ticker: "SPY",
        sentiment: Sentiment::Bullish,
        price_change: 1.4,
        heat: 95,
        categories: ["Macro", "Fed"],
    },
    DemoItem {
        id: "demo-3",
        title: "Tesla Deliveries Miss Wall Street Estimates, Stock Drops 5%",
        source: "CNBC",
        source_url: "https://cnbc.com",
        summary: "Tesla delivered fewer vehicles than expected in Q2, raising concerns about demand and increased competition in EV market.",
        age_mins: 48,
        ticker: "TSLA",
        sentiment: Sentiment::Bearish,
        price_change: -5.1,
        heat: 87,
        categories: ["EV", "Earnings"],
    },
    DemoItem {
        id: "demo-4",
        title: "GameStop Rallies 40% as Keith Gill Returns to Social Media",
        source: "Yahoo Finance",
        source_url: "https://finance.yahoo.com",
        summary: "Meme stock phenomenon returns as Roaring Kitty posts cryptic message, triggering massive retail buying activity.",
        age_mins: 95,
        ticker: "GME",
        sentiment: Sentiment::Bullish,
        price_change: 42.3,
        heat: 99,
        categories: ["Meme", "Retail"],
    },
    DemoItem {
        id: "demo-5",
        title: "Apple Announces $110B Stock Buyback Program",
        source: "WSJ",
        source_url: "https://wsj.com",
        summary: "Apple unveiled the largest stock buyback in corporate history, signaling confidence in future growth.",
        age_mins: 120,
        ticker: "AAPL",
        sentiment: Sentiment::Bullish,
        price_change: 2.8,
        heat: 82,
        categories: ["Tech", "Buyback"],
    },
    DemoItem {
        id: "demo-6",
        title: "Oil Plunges 4% on OPEC Supply Decision",
        source: "Financial Times",
        source_url: "https://ft.com",
        summary: "Crude prices tumbled after OPEC+ announced plans to gradually restore production cuts.",
        age_mins: 150,
        ticker: "USO",
        sentiment: Sentiment::Bearish,
        price_change: -4.2,
        heat: 76,
        categories: ["Commodities", "Energy"],
    },
];

fn demo_records(now_ms: i64) -> Vec<NewsRecord> {
    DEMO_ITEMS
        .iter()
        .map(|item| NewsRecord {
            id: item.id.to_string(),
            title: item.title.to_string(),
            source: item.source.to_string(),
            source_url: Some(item.source_url.to_string()),
            summary: Some(item.summary.to_string()),
            published_ms: now_ms - item.age_mins * 60_000,
            ticker: Some(item.ticker.to_string()),
            sentiment: item.sentiment,
            price_change: Some(item.price_change),
            heat: item.heat,
            categories: item.categories.iter().map(|c| c.to_string()).collect(),
        })
        .collect()
}
