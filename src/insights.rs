//! Static insight catalog: theme summaries, impact text and the
//! marketing/product recommendation payloads.
//!
//! The catalog ships as `data/insights.json` embedded at build time and
//! can be overridden at runtime via `INSIGHTS_FILE` so the copy can be
//! edited or localized without touching code.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

const EMBEDDED_CATALOG: &str = include_str!("../data/insights.json");

/// One actionable recommendation entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub problem: String,
    pub solution: String,
    pub implementation: String,
    pub expected_impact: String,
}

/// Per-theme catalog entry. Themes without dedicated recommendation
/// lists fall back to the generic entry at lookup time.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeEntry {
    pub summary: String,
    #[serde(default)]
    pub marketing: Vec<Recommendation>,
    #[serde(default)]
    pub product: Vec<Recommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightCatalog {
    pub impact_statement: String,
    pub fallback: ThemeEntry,
    pub themes: HashMap<String, ThemeEntry>,
}

/// Marketing + product recommendation pair returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeInsights {
    pub marketing: Vec<Recommendation>,
    pub product: Vec<Recommendation>,
}

static CATALOG: Lazy<InsightCatalog> = Lazy::new(|| {
    if let Ok(path) = std::env::var("INSIGHTS_FILE") {
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<InsightCatalog>(&content) {
                Ok(catalog) => {
                    tracing::info!("Loaded insight catalog from {}", path);
                    return catalog;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using embedded catalog.", path, e)
                }
            },
            Err(e) => tracing::warn!("Failed to read {}: {}. Using embedded catalog.", path, e),
        }
    }

    serde_json::from_str(EMBEDDED_CATALOG).expect("embedded insights.json is invalid")
});

/// Fixed impact statement attached to every pain-point group.
pub fn impact_statement() -> &'static str {
    &CATALOG.impact_statement
}

/// Summary paragraph for a theme; generic text for unknown themes.
pub fn summary_for(theme: &str) -> &'static str {
    CATALOG
        .themes
        .get(theme)
        .map(|t| t.summary.as_str())
        .unwrap_or(CATALOG.fallback.summary.as_str())
}

/// Recommendation payloads for a theme, exact-name lookup.
///
/// A theme with no dedicated lists (or an unknown theme) gets the
/// generic fallback recommendations.
pub fn insights_for(theme: &str) -> ThemeInsights {
    let entry = CATALOG.themes.get(theme);

    let marketing = entry
        .filter(|t| !t.marketing.is_empty())
        .map(|t| t.marketing.clone())
        .unwrap_or_else(|| CATALOG.fallback.marketing.clone());
    let product = entry
        .filter(|t| !t.product.is_empty())
        .map(|t| t.product.clone())
        .unwrap_or_else(|| CATALOG.fallback.product.clone());

    ThemeInsights { marketing, product }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        assert!(!impact_statement().is_empty());
        assert!(!CATALOG.themes.is_empty());
    }

    #[test]
    fn test_known_theme_has_dedicated_insights() {
        let insights = insights_for("Users Accusing Platform of Being a Scam/Fraud");
        assert_eq!(insights.marketing.len(), 3);
        assert_eq!(insights.product.len(), 2);
        assert!(insights.marketing[0].problem.contains("trust"));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let insights = insights_for("Something Never Seen Before");
        assert_eq!(insights.marketing.len(), 1);
        assert_eq!(insights.product.len(), 1);
        assert!(insights.marketing[0].problem.starts_with("Generic"));
    }

    #[test]
    fn test_theme_with_summary_only_falls_back_to_generic_lists() {
        let theme = "Platform Technical Problems and System Bugs";
        assert!(summary_for(theme).contains("technical"));
        let insights = insights_for(theme);
        assert_eq!(insights.marketing.len(), 1);
        assert!(insights.marketing[0].problem.starts_with("Generic"));
    }

    #[test]
    fn test_unknown_theme_summary_is_generic() {
        assert!(summary_for("Nope").contains("experiencing issues"));
    }

    #[test]
    fn test_every_classifier_theme_has_a_summary() {
        for rule in crate::classifier::THEME_RULES {
            assert!(
                CATALOG.themes.contains_key(rule.theme),
                "missing summary for {}",
                rule.theme
            );
        }
        assert!(CATALOG.themes.contains_key(crate::classifier::GENERAL_ISSUES));
    }
}
