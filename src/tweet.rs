use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;
use crate::constant::{TWEET_MAX_ATTEMPTS, TWEET_MAX_CHARS};
use crate::llm::claude::ClaudeClient;
use crate::news::NewsRecord;

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Closed set of tone presets for generated posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweetStyle {
    Spicy,
    Pro,
    Degen,
    News,
}

impl TweetStyle {
    pub const ALL: [TweetStyle; 4] = [
        TweetStyle::Spicy,
        TweetStyle::Pro,
        TweetStyle::Degen,
        TweetStyle::News,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TweetStyle::Spicy => "spicy",
            TweetStyle::Pro => "pro",
            TweetStyle::Degen => "degen",
            TweetStyle::News => "news",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TweetStyle::Spicy => "Hot takes & controversy",
            TweetStyle::Pro => "Clean & analytical",
            TweetStyle::Degen => "Full send energy",
            TweetStyle::News => "Straight facts",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            TweetStyle::Spicy => SPICY_PROMPT,
            TweetStyle::Pro => PRO_PROMPT,
            TweetStyle::Degen => DEGEN_PROMPT,
            TweetStyle::News => NEWS_PROMPT,
        }
    }
}

impl fmt::Display for TweetStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TweetStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spicy" => Ok(TweetStyle::Spicy),
            "pro" => Ok(TweetStyle::Pro),
            "degen" => Ok(TweetStyle::Degen),
            "news" => Ok(TweetStyle::News),
            other => Err(anyhow::anyhow!(
                "Unknown tweet style: {other} (expected one of: {})",
                TweetStyle::ALL.map(TweetStyle::id).join(", ")
            )),
        }
    }
}

pub fn user_prompt(news: &NewsRecord) -> String {
    let mut prompt = format!(
        "Write a tweet about this financial news:\n\nHeadline: {}\nSource: {}\n",
        news.title, news.source
    );
    if let Some(summary) = &news.summary {
        prompt.push_str(&format!("Summary: {summary}\n"));
    }
    prompt.push_str("\nRespond with ONLY the tweet text, nothing else.");
    prompt
}

/// Deterministic substitute used whenever generation is unavailable or
/// produces unusable output.
pub fn fallback_tweet(news: &NewsRecord) -> String {
    match &news.ticker {
        Some(ticker) => format!("{} ${}", news.title, ticker),
        None => news.title.clone(),
    }
}

/// Generates a post for the record in the given style. Never fails: any
/// generation problem degrades to the fallback string.
pub async fn generate_tweet(news: &NewsRecord, style: TweetStyle) -> String {
    if Config::get().anthropic_api_key.is_none() {
        tracing::debug!("No model API key configured, using fallback tweet");
        return fallback_tweet(news);
    }

    let system = style.system_prompt();
    let user = user_prompt(news);

    for attempt in 1..=TWEET_MAX_ATTEMPTS {
        match ClaudeClient::get().run_prompt(system, &user).await {
            Ok(text) => {
                if text.chars().count() <= TWEET_MAX_CHARS {
                    return text;
                }
                tracing::warn!(
                    "Generated tweet is too long ({} chars) on attempt {}, retrying...",
                    text.chars().count(),
                    attempt
                );
            }
            Err(e) => {
                tracing::error!("Tweet generation failed: {e}");
                return fallback_tweet(news);
            }
        }

        tokio::time::sleep(RETRY_DELAY).await;
    }

    fallback_tweet(news)
}

const SPICY_PROMPT: &str = "You are a spicy financial commentator known for hot takes. Write a single tweet (under 280 chars) about this news. Be provocative, use market slang, add emojis sparingly. No hashtags. Be bold and slightly controversial but not offensive.";

const PRO_PROMPT: &str = "You are a professional market analyst. Write a single tweet (under 280 chars) about this news. Include the ticker symbol with $, mention key levels or metrics if relevant. Clean, analytical tone. No hashtags or excessive emojis.";

const DEGEN_PROMPT: &str = "You are a degen trader with full send energy. Write a single tweet (under 280 chars) about this news. Use caps for emphasis, rocket emojis, trading slang like \"printing\", \"rekt\", \"LFG\". High energy, gambling mentality. No hashtags.";

const NEWS_PROMPT: &str = "You are a financial news reporter. Write a single tweet (under 280 chars) about this news. Just the facts - what happened, the numbers, the impact. Professional, neutral tone. Include ticker with $. No hashtags or emojis.";
