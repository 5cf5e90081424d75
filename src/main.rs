mod annotate;
mod card;
mod config;
mod constant;
mod feed;
mod llm;
mod news;
mod pipeline;
mod tweet;

use anyhow::Result;

use crate::config::Config;
use crate::feed::demo::DemoFeed;
use crate::feed::feedly::FeedlyFeed;
use crate::feed::rss::RssFeed;
use crate::pipeline::PipelineBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    setup_env_and_tracing();

    let config = Config::get();

    let mut builder = PipelineBuilder::new();
    if config.is_feedly_configured() {
        builder = builder.with_feed(FeedlyFeed::new());
    }
    if !config.rss_urls.is_empty() {
        builder = builder.with_feed(RssFeed::new());
    }
    if !builder.has_feeds() {
        tracing::info!("No headline source configured, using built-in demo headlines");
        builder = builder.with_feed(DemoFeed::new());
    }
    let pipeline = builder.build();

    tracing::info!(
        "Tweet style: {} ({})",
        config.tweet_style,
        config.tweet_style.description()
    );
    if config.anthropic_api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY not set, tweets will use the fallback text");
    }

    if config.refresh_interval_mins == 0 {
        pipeline.run_once().await?;
    } else {
        pipeline.run_loop().await?;
    }

    Ok(())
}

pub fn setup_env_and_tracing() {
    dotenv::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
