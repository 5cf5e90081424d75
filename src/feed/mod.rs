pub mod demo;
pub mod feedly;
pub mod rss;

use anyhow::Result;
use async_trait::async_trait;

use crate::news::NewsRecord;

/// A headline source. Implementations fill in ticker, sentiment, and
/// percentage (via the annotator) when the upstream does not supply them.
#[async_trait]
pub trait Feed {
    fn name(&self) -> &'static str;
    async fn fetch(&self) -> Result<Vec<NewsRecord>>;
}
