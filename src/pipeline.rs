use anyhow::Result;
use chrono::Utc;
use tokio::sync::Mutex;

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::card::{self, CardRequest};
use crate::config::Config;
use crate::feed::Feed;
use crate::news::{time_ago, NewsRecord};
use crate::tweet::generate_tweet;

pub struct Pipeline {
    feeds: Vec<Box<dyn Feed>>,
    seen: Mutex<HashSet<String>>,
}

impl Pipeline {
    fn new(feeds: Vec<Box<dyn Feed>>) -> Self {
        Self {
            feeds,
            seen: Mutex::new(HashSet::new()),
        }
    }

    pub async fn run_once(&self) -> Result<()> {
        let config = Config::get();
        tokio::fs::create_dir_all(&config.output_dir).await?;

        let mut fresh = Vec::new();
        for feed in self.feeds.iter() {
            match feed.fetch().await {
                Ok(records) => {
                    tracing::info!("Fetched {} headlines from {}", records.len(), feed.name());
                    fresh.extend(self.retain_unseen(records).await);
                }
                Err(e) => {
                    tracing::error!("Failed to fetch from {}: {}", feed.name(), e);
                }
            }
        }

        let fresh: Vec<NewsRecord> = fresh
            .into_iter()
            .filter(|record| config.feed_filter.matches(record))
            .collect();
        if fresh.is_empty() {
            tracing::info!("No fresh headlines this round");
            return Ok(());
        }

        for record in fresh {
            let now_ms = Utc::now().timestamp_millis();
            tracing::info!(
                "{} · {} · {}",
                record.source,
                time_ago(record.published_ms, now_ms),
                record.title
            );

            let tweet = generate_tweet(&record, config.tweet_style).await;
            tracing::info!("Tweet ({} chars): {}", tweet.chars().count(), tweet);

            let card = card::render(&CardRequest {
                news: &record,
                message: &tweet,
                branding: &config.branding_text,
            });
            let path = Path::new(&config.output_dir).join(card::file_name(&record, now_ms));
            tokio::fs::write(&path, card.png_bytes()?).await?;
            tracing::info!(
                "Card saved to {} ({}x{})",
                path.display(),
                card.width(),
                card.height()
            );
        }

        Ok(())
    }

    pub async fn run_loop(&self) -> Result<()> {
        let interval = Duration::from_secs(Config::get().refresh_interval_mins * 60);
        let mut timer = tokio::time::interval(interval);

        let mut round = 1;
        loop {
            timer.tick().await;
            tracing::info!("Running refresh round {}", round);

            if let Err(e) = self.run_once().await {
                tracing::error!("Refresh round {} failed: {}", round, e);
            }

            round += 1;
        }
    }

    /// Drops records whose id was already processed this session.
    async fn retain_unseen(&self, records: Vec<NewsRecord>) -> Vec<NewsRecord> {
        let mut seen = self.seen.lock().await;
        records
            .into_iter()
            .filter(|record| seen.insert(record.id.clone()))
            .collect()
    }
}

pub struct PipelineBuilder {
    feeds: Vec<Box<dyn Feed>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self { feeds: vec![] }
    }

    pub fn build(self) -> Pipeline {
        Pipeline::new(self.feeds)
    }

    pub fn with_feed(mut self, feed: impl Feed + 'static) -> Self {
        self.feeds.push(Box::new(feed));
        self
    }

    pub fn has_feeds(&self) -> bool {
        !self.feeds.is_empty()
    }
}
