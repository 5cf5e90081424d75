pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 628;

pub const TWEET_MAX_CHARS: usize = 280;
pub const TWEET_MAX_ATTEMPTS: usize = 3;

pub const MAX_ITEMS_PER_FEED: usize = 20;

pub const HOT_HEAT_THRESHOLD: u32 = 90;
