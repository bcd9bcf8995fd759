//! Lexicon-based sentiment scoring.
//!
//! Provides:
//! - Word-level polarity lexicon tuned for platform/marketplace reviews
//! - `polarity()` mapping raw review text to a score in [-1, 1]
//! - Three-way labeling with fixed cutoffs (>0.1 / <-0.1)

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Scored sentiment words. Positive entries in (0, 1], negative in [-1, 0).
static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let entries: &[(&str, f64)] = &[
        // Strongly positive
        ("excellent", 0.9),
        ("amazing", 0.85),
        ("wonderful", 0.85),
        ("fantastic", 0.85),
        ("outstanding", 0.85),
        ("awesome", 0.8),
        ("love", 0.75),
        ("loved", 0.75),
        ("best", 0.8),
        ("perfect", 0.85),
        ("incredible", 0.8),
        ("great", 0.7),
        ("recommend", 0.6),
        ("recommended", 0.6),
        ("impressive", 0.6),
        ("reliable", 0.55),
        ("trustworthy", 0.6),
        ("helpful", 0.5),
        ("legit", 0.5),
        ("legitimate", 0.5),
        // Moderately positive
        ("good", 0.5),
        ("nice", 0.45),
        ("happy", 0.5),
        ("satisfied", 0.5),
        ("easy", 0.4),
        ("fast", 0.4),
        ("quick", 0.35),
        ("fair", 0.35),
        ("smooth", 0.4),
        ("flexible", 0.35),
        ("professional", 0.4),
        ("responsive", 0.45),
        // Strongly negative
        ("terrible", -0.85),
        ("horrible", -0.85),
        ("awful", -0.8),
        ("worst", -0.85),
        ("hate", -0.75),
        ("scam", -0.95),
        ("fraud", -0.95),
        ("fraudulent", -0.95),
        ("scammer", -0.9),
        ("scammers", -0.9),
        ("stole", -0.85),
        ("stolen", -0.85),
        ("stealing", -0.85),
        ("cheated", -0.8),
        ("lied", -0.75),
        ("useless", -0.7),
        ("worthless", -0.75),
        ("garbage", -0.75),
        ("pathetic", -0.7),
        ("dishonest", -0.75),
        ("banned", -0.6),
        ("suspended", -0.55),
        ("terminated", -0.6),
        // Moderately negative
        ("bad", -0.5),
        ("poor", -0.5),
        ("slow", -0.4),
        ("broken", -0.55),
        ("bug", -0.4),
        ("buggy", -0.5),
        ("glitch", -0.4),
        ("crash", -0.5),
        ("error", -0.35),
        ("problem", -0.4),
        ("problems", -0.4),
        ("issue", -0.35),
        ("issues", -0.35),
        ("delayed", -0.45),
        ("unpaid", -0.6),
        ("ignored", -0.55),
        ("unfair", -0.55),
        ("frustrating", -0.55),
        ("frustrated", -0.55),
        ("disappointed", -0.55),
        ("disappointing", -0.55),
        ("waste", -0.55),
        ("never", -0.3),
        ("unstable", -0.45),
        ("unreliable", -0.5),
        ("difficult", -0.35),
        ("confusing", -0.4),
    ];
    entries.iter().copied().collect()
});

/// Coarse sentiment bucket derived from the polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

/// Score raw review text in [-1, 1].
///
/// The score is the average polarity of the lexicon words found in the
/// text. Text with no lexicon hits (including empty text) scores 0.0 and
/// never errors.
pub fn polarity(text: &str) -> f64 {
    let lowercase_text = text.to_lowercase();
    let words = lowercase_text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| w.len() > 2);

    let mut sum = 0.0;
    let mut hits = 0usize;
    for word in words {
        if let Some(score) = LEXICON.get(word) {
            sum += score;
            hits += 1;
        }
    }

    if hits == 0 {
        return 0.0;
    }
    sum / hits as f64
}

/// Label a polarity score: > 0.1 positive, < -0.1 negative, else neutral.
pub fn label_for_score(score: f64) -> SentimentLabel {
    if score > 0.1 {
        SentimentLabel::Positive
    } else if score < -0.1 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}
