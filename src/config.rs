use std::sync::OnceLock;

use crate::news::NewsFilter;
use crate::tweet::TweetStyle;

#[derive(Debug, Clone)]
pub struct Config {
    // Feedly configuration
    pub feedly_token: Option<String>,
    pub feedly_stream_id: Option<String>,

    // RSS configuration
    pub rss_urls: Vec<String>,

    // Anthropic configuration
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_api_version: String,

    // Card configuration
    pub branding_text: String,

    // Pipeline configuration
    pub tweet_style: TweetStyle,
    pub feed_filter: NewsFilter,
    pub refresh_interval_mins: u64, // 0 = run once and exit
    pub output_dir: String,
}

impl Config {
    pub fn get() -> &'static Config {
        static INSTANCE: OnceLock<Config> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let feedly_token = std::env::var("FEEDLY_TOKEN").ok().filter(|s| !s.is_empty());
            let feedly_stream_id = std::env::var("FEEDLY_STREAM_ID")
                .ok()
                .filter(|s| !s.is_empty());

            let rss_urls = std::env::var("RSS_FEED_URLS")
                .map(|urls| {
                    urls.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|s| !s.is_empty());
            let anthropic_model = std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".into());
            let anthropic_api_version =
                std::env::var("ANTHROPIC_API_VERSION").unwrap_or_else(|_| "2023-06-01".into());

            let branding_text =
                std::env::var("BRANDING_TEXT").unwrap_or_else(|_| "Trades & Gains".into());

            let tweet_style = std::env::var("TWEET_STYLE")
                .unwrap_or_else(|_| "spicy".into())
                .parse()
                .expect("TWEET_STYLE must be one of: spicy, pro, degen, news");
            let feed_filter = std::env::var("FEED_FILTER")
                .unwrap_or_else(|_| "all".into())
                .parse()
                .expect("FEED_FILTER must be one of: all, hot, bullish, bearish");

            let refresh_interval_mins = std::env::var("REFRESH_INTERVAL_MINS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("REFRESH_INTERVAL_MINS must be a valid u64");
            let output_dir = std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "cards".into());

            Config {
                feedly_token,
                feedly_stream_id,
                rss_urls,
                anthropic_api_key,
                anthropic_model,
                anthropic_api_version,
                branding_text,
                tweet_style,
                feed_filter,
                refresh_interval_mins,
                output_dir,
            }
        })
    }

    pub fn is_feedly_configured(&self) -> bool {
        self.feedly_token.is_some() && self.feedly_stream_id.is_some()
    }
}
