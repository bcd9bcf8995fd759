//! Review dataset loading and in-memory snapshot.
//!
//! Reads the Trustpilot export CSV, keeps only rows in the configured
//! review language, computes a sentiment score and label per review at
//! load time, and exposes the aggregate metrics the dashboard shows.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use utoipa::ToSchema;

use crate::sentiment::{self, SentimentLabel};

/// One CSV row as exported. Text fields are optional: scraped exports
/// contain rows with empty titles or bodies.
#[derive(Debug, Deserialize)]
pub struct RawReview {
    #[serde(rename = "reviewScore")]
    pub score: u8,
    #[serde(rename = "reviewLanguage")]
    pub language: String,
    #[serde(rename = "reviewTitle", default)]
    pub title: Option<String>,
    #[serde(rename = "reviewText", default)]
    pub text: Option<String>,
    #[serde(rename = "reviewUrl", default)]
    pub url: Option<String>,
}

/// A loaded review with its computed sentiment. Immutable once loaded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Review {
    /// Star rating, 1-5.
    pub score: u8,
    pub language: String,
    pub title: String,
    pub text: String,
    pub url: String,
    /// Polarity score in [-1, 1].
    pub sentiment: f64,
    pub sentiment_label: SentimentLabel,
}

impl From<RawReview> for Review {
    fn from(raw: RawReview) -> Self {
        let text = raw.text.unwrap_or_default();
        let sentiment = sentiment::polarity(&text);
        Review {
            score: raw.score,
            language: raw.language,
            title: raw.title.unwrap_or_default(),
            text,
            url: raw.url.unwrap_or_default(),
            sentiment,
            sentiment_label: sentiment::label_for_score(sentiment),
        }
    }
}

/// Counts per sentiment label.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// Read-only snapshot of the filtered review table.
#[derive(Debug, Clone)]
pub struct ReviewSet {
    pub reviews: Vec<Review>,
    /// Language the snapshot was filtered to, e.g. "en".
    pub language: String,
    /// Rows discarded because their language did not match.
    pub discarded: usize,
}

impl ReviewSet {
    /// Load from a CSV file, keeping only rows in `language`.
    pub fn load(path: impl AsRef<Path>, language: &str) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open review file {}", path.display()))?;
        let set = Self::from_csv_reader(&mut reader, language)
            .with_context(|| format!("failed to parse review file {}", path.display()))?;
        info!(
            "Loaded {} {} reviews from {} ({} other-language rows discarded)",
            set.reviews.len(),
            language,
            path.display(),
            set.discarded
        );
        Ok(set)
    }

    /// Parse from any CSV reader. Split out of [`ReviewSet::load`] so
    /// tests can feed in-memory data.
    pub fn from_csv_reader<R: std::io::Read>(
        reader: &mut csv::Reader<R>,
        language: &str,
    ) -> Result<Self> {
        let mut reviews = Vec::new();
        let mut discarded = 0usize;

        for record in reader.deserialize() {
            let raw: RawReview = record.context("malformed review row")?;
            if raw.language != language {
                discarded += 1;
                continue;
            }
            reviews.push(Review::from(raw));
        }

        Ok(ReviewSet {
            reviews,
            language: language.to_string(),
            discarded,
        })
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Mean star rating, 0.0 for an empty set.
    pub fn mean_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        self.reviews.iter().map(|r| r.score as f64).sum::<f64>() / self.reviews.len() as f64
    }

    /// Mean polarity score, 0.0 for an empty set.
    pub fn mean_sentiment(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        self.reviews.iter().map(|r| r.sentiment).sum::<f64>() / self.reviews.len() as f64
    }

    pub fn sentiment_breakdown(&self) -> SentimentBreakdown {
        let mut breakdown = SentimentBreakdown::default();
        for review in &self.reviews {
            match review.sentiment_label {
                SentimentLabel::Positive => breakdown.positive += 1,
                SentimentLabel::Neutral => breakdown.neutral += 1,
                SentimentLabel::Negative => breakdown.negative += 1,
            }
        }
        breakdown
    }

    /// Review counts per star rating 1..=5. Out-of-range scores are
    /// ignored rather than panicking on a dirty export.
    pub fn rating_histogram(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for review in &self.reviews {
            if (1..=5).contains(&review.score) {
                counts[review.score as usize - 1] += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
reviewScore,reviewLanguage,reviewTitle,reviewText,reviewUrl
5,en,Great,Amazing platform and great support,https://example.com/r/1
1,en,Scam,This is a scam and a total fraud,https://example.com/r/2
3,en,Meh,,https://example.com/r/3
4,de,Gut,Alles gut,https://example.com/r/4
2,en,Slow,Terrible support and slow payments,https://example.com/r/5
";

    fn sample_set() -> ReviewSet {
        let mut reader = csv::Reader::from_reader(SAMPLE_CSV.as_bytes());
        ReviewSet::from_csv_reader(&mut reader, "en").unwrap()
    }

    #[test]
    fn test_language_filter() {
        let set = sample_set();
        assert_eq!(set.len(), 4);
        assert_eq!(set.discarded, 1);
        assert!(set.reviews.iter().all(|r| r.language == "en"));
    }

    #[test]
    fn test_missing_text_is_neutral() {
        let set = sample_set();
        let empty = set.reviews.iter().find(|r| r.title == "Meh").unwrap();
        assert_eq!(empty.text, "");
        assert_eq!(empty.sentiment, 0.0);
        assert_eq!(empty.sentiment_label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_sentiment_computed_at_load() {
        let set = sample_set();
        let scam = set.reviews.iter().find(|r| r.title == "Scam").unwrap();
        assert_eq!(scam.sentiment_label, SentimentLabel::Negative);
        let great = set.reviews.iter().find(|r| r.title == "Great").unwrap();
        assert_eq!(great.sentiment_label, SentimentLabel::Positive);
    }

    #[test]
    fn test_metrics() {
        let set = sample_set();
        assert!((set.mean_rating() - 11.0 / 4.0).abs() < 1e-9);
        let histogram = set.rating_histogram();
        assert_eq!(histogram, [1, 1, 1, 0, 1]);
        let breakdown = set.sentiment_breakdown();
        assert_eq!(
            breakdown.positive + breakdown.neutral + breakdown.negative,
            set.len()
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ReviewSet::load("/definitely/not/here.csv", "en").unwrap_err();
        assert!(err.to_string().contains("not/here.csv"));
    }

    #[test]
    fn test_empty_csv() {
        let csv = "reviewScore,reviewLanguage,reviewTitle,reviewText,reviewUrl\n";
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let set = ReviewSet::from_csv_reader(&mut reader, "en").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.mean_rating(), 0.0);
        assert_eq!(set.mean_sentiment(), 0.0);
    }
}
