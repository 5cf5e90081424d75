use regex::Regex;

use std::sync::OnceLock;

use crate::news::Sentiment;

const BULLISH_WORDS: [&str; 12] = [
    "surge", "soar", "jump", "rise", "gain", "rally", "up", "high", "record", "boost", "bullish",
    "buy",
];

const BEARISH_WORDS: [&str; 12] = [
    "drop", "fall", "plunge", "crash", "down", "low", "miss", "cut", "bearish", "sell", "decline",
    "slump",
];

/// Best-effort signals derived from headline text. Lossy by design.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub ticker: Option<String>,
    pub sentiment: Sentiment,
    pub percentage: Option<f64>,
}

pub fn annotate(text: &str) -> Annotation {
    Annotation {
        ticker: extract_ticker(text),
        sentiment: detect_sentiment(text),
        percentage: extract_percentage(text),
    }
}

fn dollar_ticker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$([A-Z]{1,5})\b").expect("valid ticker regex"))
}

fn bare_ticker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z]{2,5})\b").expect("valid ticker regex"))
}

fn motion_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:stock|shares|price|up|down|surge|drop|fall|rise)\b")
            .expect("valid motion word regex")
    })
}

/// Finds a ticker symbol in free text.
///
/// A `$`-prefixed 1-5 letter uppercase token always wins. Failing that, the
/// first bare 2-5 letter uppercase token that is followed anywhere later in
/// the text by a market-motion word is used. Returns the symbol without `$`.
pub fn extract_ticker(text: &str) -> Option<String> {
    if let Some(caps) = dollar_ticker_re().captures(text) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    for caps in bare_ticker_re().captures_iter(text) {
        if let Some(m) = caps.get(1) {
            if motion_word_re().is_match(&text[m.end()..]) {
                return Some(m.as_str().to_string());
            }
        }
    }

    None
}

/// Scores tone by substring containment of fixed word lists, so "downtown"
/// counts toward "down".
pub fn detect_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let bullish = BULLISH_WORDS.iter().filter(|&&w| lower.contains(w)).count();
    let bearish = BEARISH_WORDS.iter().filter(|&&w| lower.contains(w)).count();

    if bullish > bearish {
        Sentiment::Bullish
    } else if bearish > bullish {
        Sentiment::Bearish
    } else {
        Sentiment::Neutral
    }
}

fn percentage_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([+-]?\d+(?:\.\d+)?)\s*%").expect("valid percentage regex"))
}

/// Returns the first signed decimal immediately followed by `%`, if any.
pub fn extract_percentage(text: &str) -> Option<f64> {
    percentage_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_ticker_wins_over_fallback() {
        assert_eq!(
            extract_ticker("AMD shares slide as $NVDA stock soars"),
            Some("NVDA".to_string())
        );
        assert_eq!(extract_ticker("Watch $TSLA today"), Some("TSLA".to_string()));
        assert_eq!(extract_ticker("$A rated a buy"), Some("A".to_string()));
    }

    #[test]
    fn bare_ticker_needs_a_later_motion_word() {
        assert_eq!(
            extract_ticker("GME stock rallies after earnings"),
            Some("GME".to_string())
        );
        // Motion word is case-insensitive and may appear anywhere after.
        assert_eq!(
            extract_ticker("AAPL hits new all-time Price target"),
            Some("AAPL".to_string())
        );
        // No motion word after the token.
        assert_eq!(extract_ticker("Record AI Chip Demand"), None);
        // Six letters is out of range even with a motion word after.
        assert_eq!(extract_ticker("NVIDIA shares climb"), None);
    }

    #[test]
    fn motion_words_match_whole_words_only() {
        // "Supply" contains "up" but is not a motion word.
        assert_eq!(extract_ticker("OPEC Supply Decision"), None);
        assert_eq!(extract_ticker("OPEC output down sharply"), Some("OPEC".to_string()));
    }

    #[test]
    fn no_pattern_means_no_ticker() {
        assert_eq!(extract_ticker(""), None);
        assert_eq!(extract_ticker("Markets were quiet on Tuesday"), None);
    }

    #[test]
    fn sentiment_counts_are_symmetric() {
        assert_eq!(detect_sentiment("soar rally boost"), Sentiment::Bullish);
        assert_eq!(detect_sentiment("crash decline slump"), Sentiment::Bearish);
        // Equal nonzero counts cancel out.
        assert_eq!(detect_sentiment("soar crash"), Sentiment::Neutral);
        assert_eq!(detect_sentiment(""), Sentiment::Neutral);
    }

    #[test]
    fn sentiment_uses_substring_containment() {
        // "downtown" contains "down".
        assert_eq!(detect_sentiment("downtown office towers"), Sentiment::Bearish);
        // "soared" contains "soar" and "upbeat" contains "up".
        assert_eq!(
            detect_sentiment("shares soared on upbeat guidance"),
            Sentiment::Bullish
        );
    }

    #[test]
    fn percentage_takes_first_match() {
        assert_eq!(extract_percentage("up 8.2%"), Some(8.2));
        assert_eq!(extract_percentage("down -5.1%"), Some(-5.1));
        assert_eq!(extract_percentage("moved 3 % then 9%"), Some(3.0));
        assert_eq!(extract_percentage("+1.5% pre-market"), Some(1.5));
        assert_eq!(extract_percentage("no numbers here"), None);
        assert_eq!(extract_percentage("100 percent"), None);
    }

    #[test]
    fn nvidia_headline_scenario() {
        let text = "NVIDIA Surges 8% on Record AI Chip Demand";
        let annotation = annotate(text);

        // "NVIDIA" is six letters, outside the 2-5 range, and "AI" has no
        // motion word after it, so the heuristic finds nothing.
        assert_eq!(annotation.ticker, None);
        assert_eq!(annotation.sentiment, Sentiment::Bullish);
        assert_eq!(annotation.percentage, Some(8.0));
    }

    #[test]
    fn oil_headline_scenario() {
        let text = "Oil Plunges 4% on OPEC Supply Decision";
        let annotation = annotate(text);

        assert_eq!(annotation.ticker, None);
        // "plunges" contains "plunge", but "Supply" contains "up", so the
        // containment counts tie at one each.
        assert_eq!(annotation.sentiment, Sentiment::Neutral);
        assert_eq!(annotation.percentage, Some(4.0));
    }

    #[test]
    fn tesla_headline_scenario() {
        let text = "Tesla Deliveries Miss Wall Street Estimates, Stock Drops 5%";
        let annotation = annotate(text);

        assert_eq!(annotation.ticker, None);
        assert_eq!(annotation.sentiment, Sentiment::Bearish);
        assert_eq!(annotation.percentage, Some(5.0));
    }
}
