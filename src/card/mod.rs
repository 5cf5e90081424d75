mod surface;

pub use surface::{FontFace, RasterSurface, Surface};

use anyhow::Result;

use crate::constant::{CARD_HEIGHT, CARD_WIDTH};
use crate::news::{NewsRecord, Sentiment};

const MARGIN: f32 = 48.0;

const WATERMARK_PX: f32 = 180.0;
const WATERMARK_ALPHA: f32 = 0.08;

const BADGE_X: i32 = 48;
const BADGE_Y: i32 = 48;
const BADGE_WIDTH: u32 = 140;
const BADGE_HEIGHT: u32 = 36;
const BADGE_RADIUS: f32 = 6.0;
const BADGE_TEXT_PX: f32 = 16.0;

const TICKER_PX: f32 = 56.0;
const TICKER_BASELINE: f32 = 150.0;

const BODY_PX: f32 = 28.0;
const BODY_FIRST_BASELINE: f32 = 220.0;
const BODY_LINE_HEIGHT: f32 = 38.0;
const BODY_MAX_BASELINE: f32 = 480.0;
const BODY_ALPHA: f32 = 0.9;

const FOOTER_PX: f32 = 20.0;

const WHITE: [u8; 3] = [255, 255, 255];

/// Renderer input: the annotated record, the message to lay out, and the
/// branding line for the bottom-right corner.
pub struct CardRequest<'a> {
    pub news: &'a NewsRecord,
    pub message: &'a str,
    pub branding: &'a str,
}

/// A composed share card, ready to encode.
pub struct RenderedCard {
    surface: RasterSurface,
}

impl RenderedCard {
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    #[allow(dead_code)]
    pub fn image(&self) -> &image::RgbImage {
        self.surface.image()
    }

    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        self.surface.png_bytes()
    }
}

/// Renders the fixed-size share card for a record and message.
pub fn render(request: &CardRequest<'_>) -> RenderedCard {
    let mut surface = RasterSurface::new(CARD_WIDTH, CARD_HEIGHT);
    compose(request, &mut surface);
    RenderedCard { surface }
}

/// Draws every layer onto the given surface, back to front.
pub fn compose(request: &CardRequest<'_>, surface: &mut impl Surface) {
    let news = request.news;
    let width = surface.width() as f32;
    let height = surface.height() as f32;

    surface.fill_diagonal_gradient(gradient_stops(news.sentiment));

    if let Some(ticker) = &news.ticker {
        let watermark = format!("${ticker}");
        let x = width - 40.0 - surface.text_width(FontFace::SansBold, WATERMARK_PX, &watermark);
        surface.draw_text(
            FontFace::SansBold,
            WATERMARK_PX,
            x,
            200.0,
            WHITE,
            WATERMARK_ALPHA,
            &watermark,
        );
    }

    surface.fill_rounded_rect(
        BADGE_X,
        BADGE_Y,
        BADGE_WIDTH,
        BADGE_HEIGHT,
        BADGE_RADIUS,
        badge_color(news.sentiment),
    );
    surface.draw_text(
        FontFace::SansBold,
        BADGE_TEXT_PX,
        62.0,
        72.0,
        WHITE,
        1.0,
        badge_label(news.sentiment),
    );

    if let Some(ticker) = &news.ticker {
        let mut line = format!("${ticker}");
        if let Some(change) = news.price_change {
            let sign = if change > 0.0 { "+" } else { "" };
            line.push_str(&format!(" {sign}{change}%"));
        }
        surface.draw_text(
            FontFace::SansBold,
            TICKER_PX,
            MARGIN,
            TICKER_BASELINE,
            WHITE,
            1.0,
            &line,
        );
    }

    for (line, baseline) in body_lines(surface, request.message) {
        surface.draw_text(
            FontFace::Sans,
            BODY_PX,
            MARGIN,
            baseline,
            WHITE,
            BODY_ALPHA,
            &line,
        );
    }

    surface.draw_text(
        FontFace::Sans,
        FOOTER_PX,
        MARGIN,
        height - MARGIN,
        WHITE,
        0.4,
        &news.source,
    );

    let branding_x =
        width - MARGIN - surface.text_width(FontFace::Mono, FOOTER_PX, request.branding);
    surface.draw_text(
        FontFace::Mono,
        FOOTER_PX,
        branding_x,
        height - MARGIN,
        WHITE,
        0.6,
        request.branding,
    );
}

/// Greedy word wrap against the body width. A break never happens before at
/// least one word is on the line, empty lines are skipped, and layout stops
/// once the baseline cursor would pass the bottom threshold.
fn body_lines(surface: &impl Surface, message: &str) -> Vec<(String, f32)> {
    let max_width = surface.width() as f32 - 2.0 * MARGIN;
    let mut lines = Vec::new();

    let mut line = String::new();
    let mut baseline = BODY_FIRST_BASELINE;
    for (i, word) in message.split(' ').enumerate() {
        let test = format!("{line}{word} ");
        if surface.text_width(FontFace::Sans, BODY_PX, &test) > max_width && i > 0 {
            let flushed = line.trim();
            if !flushed.is_empty() {
                lines.push((flushed.to_string(), baseline));
            }
            baseline += BODY_LINE_HEIGHT;
            if baseline > BODY_MAX_BASELINE {
                return lines;
            }
            line = format!("{word} ");
        } else {
            line = test;
        }
    }

    let tail = line.trim();
    if !tail.is_empty() {
        lines.push((tail.to_string(), baseline));
    }
    lines
}

fn gradient_stops(sentiment: Sentiment) -> [[u8; 3]; 3] {
    match sentiment {
        Sentiment::Bullish => [[0x06, 0x4e, 0x3b], [0x06, 0x5f, 0x46], [0x00, 0x00, 0x00]],
        Sentiment::Bearish => [[0x7f, 0x1d, 0x1d], [0x99, 0x1b, 0x1b], [0x00, 0x00, 0x00]],
        Sentiment::Neutral => [[0x1e, 0x3a, 0x5f], [0x1e, 0x40, 0xaf], [0x00, 0x00, 0x00]],
    }
}

fn badge_color(sentiment: Sentiment) -> [u8; 3] {
    match sentiment {
        Sentiment::Bullish => [0x10, 0xb9, 0x81],
        Sentiment::Bearish => [0xef, 0x44, 0x44],
        Sentiment::Neutral => [0x3b, 0x82, 0xf6],
    }
}

fn badge_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Bullish => "↑ BULLISH",
        Sentiment::Bearish => "↓ BEARISH",
        Sentiment::Neutral => "● NEUTRAL",
    }
}

/// Download-style file name: ticker (or a generic tag) plus a timestamp.
pub fn file_name(news: &NewsRecord, at_ms: i64) -> String {
    format!(
        "tweet-{}-{}.png",
        news.ticker.as_deref().unwrap_or("news"),
        at_ms
    )
}
