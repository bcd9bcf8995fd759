//! Pain-point aggregation over classified reviews.
//!
//! Groups non-positive reviews by theme, drops thin groups, samples
//! representative quotes with a fixed seed and ranks the surviving
//! themes by member count.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::classifier;
use crate::dataset::Review;
use crate::insights::{self, ThemeInsights};
use crate::sentiment::SentimentLabel;

/// Default number of themes returned.
pub const DEFAULT_MAX_THEMES: usize = 5;

/// Groups with fewer members than this are dropped as noise.
const MIN_GROUP_SIZE: usize = 2;

/// Quotes sampled per group.
const MAX_QUOTES: usize = 3;

/// Fixed seed so the sampled quotes are repeatable for identical input
/// ordering.
const QUOTE_SEED: u64 = 42;

/// One aggregated pain-point group.
#[derive(Debug, Clone, Serialize)]
pub struct PainPoint {
    pub theme: String,
    /// Short affected-count blurb, e.g. "17 users affected".
    pub summary: String,
    pub count: usize,
    /// Up to three representative review quotes.
    pub quotes: Vec<String>,
    pub impact: String,
    pub insights: ThemeInsights,
}

/// Aggregate non-positive reviews into ranked pain-point groups.
///
/// Pure over its inputs: the same review slice in the same order yields
/// the same groups, quotes included. An empty result means no pain
/// points were detected, not a failure.
pub fn extract_pain_points(reviews: &[Review], max_themes: usize) -> Vec<PainPoint> {
    let mut groups: BTreeMap<&'static str, Vec<&Review>> = BTreeMap::new();
    for review in reviews {
        if review.sentiment_label == SentimentLabel::Positive {
            continue;
        }
        groups.entry(classifier::classify(&review.text)).or_default().push(review);
    }

    let mut pain_points: Vec<PainPoint> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= MIN_GROUP_SIZE)
        .map(|(theme, members)| {
            let quotes = sample_quotes(&members);
            PainPoint {
                theme: theme.to_string(),
                summary: format!("{} users affected", members.len()),
                count: members.len(),
                quotes,
                impact: insights::impact_statement().to_string(),
                insights: insights::insights_for(theme),
            }
        })
        .collect();

    // Stable sort keeps the alphabetical group order for equal counts.
    pain_points.sort_by(|a, b| b.count.cmp(&a.count));
    pain_points.truncate(max_themes);
    pain_points
}

fn sample_quotes(members: &[&Review]) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(QUOTE_SEED);
    members
        .choose_multiple(&mut rng, MAX_QUOTES.min(members.len()))
        .map(|r| r.text.clone())
        .collect()
}
