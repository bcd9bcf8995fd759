//! Customer review analytics: lexicon sentiment scoring, rule-based
//! pain-point classification and aggregation, exposed as a JSON API
//! with a static dashboard.

pub mod api;
pub mod classifier;
pub mod dataset;
pub mod insights;
pub mod pain_points;
pub mod sentiment;
