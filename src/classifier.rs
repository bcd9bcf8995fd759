//! Rule-based theme classification for negative/neutral reviews.
//!
//! Provides:
//! - A fixed table of 8 keyword/regex rule sets, one per pain-point category
//! - Weighted scoring: 1 point per keyword present, 2 per pattern match
//! - Priority boosts for scam accusations and payment+suspension overlap
//! - A deterministic winner pick with a minimum-evidence threshold

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Sentinel theme for reviews with no category reaching the threshold.
pub const GENERAL_ISSUES: &str = "General Issues";

/// Minimum winning weight; anything below maps to [`GENERAL_ISSUES`].
const MIN_MATCH_WEIGHT: u32 = 2;

/// One rule set: keyword vocabulary plus phrase patterns for a category.
pub struct ThemeRule {
    /// Stable machine identifier, also used as the API path slug.
    pub category: &'static str,
    /// Human-readable theme title shown on pain-point cards.
    pub theme: &'static str,
    pub keywords: &'static [&'static str],
    pub patterns: &'static [&'static str],
}

/// Rule table in priority order. Ties are resolved by this order: the
/// winner must strictly exceed the running maximum, so the earliest
/// category reaching the top weight wins.
pub static THEME_RULES: &[ThemeRule] = &[
    ThemeRule {
        category: "payment_issues",
        theme: "Payment Delays or Missing Payments After Work Completed",
        keywords: &[
            "payment", "pay", "money", "earnings", "salary", "wage", "compensation", "paid",
            "unpaid", "dollars", "cash",
        ],
        patterns: &[
            r"not.*paid",
            r"payment.*delayed",
            r"money.*owed",
            r"earnings.*missing",
            r"compensation.*issue",
        ],
    },
    ThemeRule {
        category: "account_suspension",
        theme: "Accounts Suspended/Blocked Without Clear Explanation",
        keywords: &[
            "ban", "block", "suspended", "deactivated", "terminated", "removed",
            "account closed", "banned", "blocked",
        ],
        patterns: &[
            r"account.*suspended",
            r"got.*banned",
            r"blocked.*account",
            r"suspended.*without",
            r"terminated.*account",
        ],
    },
    ThemeRule {
        category: "support_issues",
        theme: "Poor Customer Support - Slow Response or No Help",
        keywords: &[
            "support", "help", "customer service", "response", "contact", "assistance",
            "ticket", "email", "reply",
        ],
        patterns: &[
            r"no.*response",
            r"support.*ignored",
            r"contact.*difficult",
            r"help.*unavailable",
            r"customer.*service.*poor",
        ],
    },
    ThemeRule {
        category: "work_availability",
        theme: "No Work Available - Empty Queues and Project Instability",
        keywords: &[
            "work", "task", "project", "job", "assignment", "queue", "available", "empty",
            "no work", "projects",
        ],
        patterns: &[
            r"no.*work.*available",
            r"empty.*queue",
            r"no.*projects",
            r"work.*dried",
            r"no.*tasks",
        ],
    },
    ThemeRule {
        category: "training_issues",
        theme: "Excessive Unpaid Training and Assessment Requirements",
        keywords: &[
            "training", "onboarding", "assessment", "test", "course", "learning",
            "unpaid training", "exam",
        ],
        patterns: &[
            r"unpaid.*training",
            r"excessive.*training",
            r"training.*required",
            r"assessment.*difficult",
            r"too.*much.*training",
        ],
    },
    ThemeRule {
        category: "technical_issues",
        theme: "Platform Technical Problems and System Bugs",
        keywords: &[
            "platform", "system", "bug", "error", "technical", "website", "app", "glitch",
            "crash", "broken",
        ],
        patterns: &[
            r"platform.*broken",
            r"system.*error",
            r"technical.*issue",
            r"bug.*platform",
            r"website.*down",
        ],
    },
    ThemeRule {
        category: "scam_accusations",
        theme: "Users Accusing Platform of Being a Scam/Fraud",
        keywords: &[
            "scam", "fraud", "fake", "deceive", "steal", "trick", "scammer", "cheat",
            "dishonest",
        ],
        patterns: &[
            r"this.*scam",
            r"fraudulent.*company",
            r"fake.*platform",
            r"deceiving.*users",
            r"stealing.*money",
        ],
    },
    ThemeRule {
        category: "privacy_concerns",
        theme: "Concerns About Personal Data Collection and Privacy",
        keywords: &[
            "data", "personal", "information", "privacy", "id", "document", "identity",
            "private",
        ],
        patterns: &[
            r"personal.*data",
            r"privacy.*concern",
            r"private.*information",
            r"data.*collection",
            r"identity.*theft",
        ],
    },
];

/// Patterns compiled once, in the same order as [`THEME_RULES`].
static COMPILED_PATTERNS: Lazy<Vec<Vec<Regex>>> = Lazy::new(|| {
    THEME_RULES
        .iter()
        .map(|rule| {
            rule.patterns
                .iter()
                .map(|p| Regex::new(p).expect("invalid theme rule pattern"))
                .collect()
        })
        .collect()
});

/// Accumulated evidence for one category on one review.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWeight {
    pub category: &'static str,
    pub theme: &'static str,
    pub weight: u32,
}

/// Score the text against every rule set.
///
/// Keyword hits are substring checks over the lowercased text, so a text
/// containing "payments" counts both "payment" and "pay". Pattern matches
/// count double.
pub fn analyze(text: &str) -> Vec<CategoryWeight> {
    let text_lower = text.to_lowercase();

    THEME_RULES
        .iter()
        .zip(COMPILED_PATTERNS.iter())
        .map(|(rule, patterns)| {
            let keyword_hits = rule
                .keywords
                .iter()
                .filter(|kw| text_lower.contains(*kw))
                .count() as u32;
            let pattern_hits = patterns.iter().filter(|re| re.is_match(&text_lower)).count() as u32;

            let mut weight = keyword_hits + 2 * pattern_hits;

            // Scam accusations outrank everything else when present at all.
            if rule.category == "scam_accusations" && weight > 0 {
                weight *= 2;
            }
            // Payment trouble combined with a suspension is the critical case.
            if rule.category == "payment_issues" && text_lower.contains("suspended") {
                weight += 3;
            }

            CategoryWeight {
                category: rule.category,
                theme: rule.theme,
                weight,
            }
        })
        .collect()
}

/// Classify a review into the best-matching theme title.
///
/// Returns [`GENERAL_ISSUES`] for empty text or when no category reaches
/// the minimum weight.
pub fn classify(text: &str) -> &'static str {
    if text.trim().is_empty() {
        return GENERAL_ISSUES;
    }

    let mut max_weight = 0;
    let mut best_theme = None;
    for cw in analyze(text) {
        if cw.weight > max_weight {
            max_weight = cw.weight;
            best_theme = Some(cw.theme);
        }
    }

    if max_weight < MIN_MATCH_WEIGHT {
        return GENERAL_ISSUES;
    }
    best_theme.unwrap_or(GENERAL_ISSUES)
}

/// Theme title for a category slug, if the slug exists.
pub fn theme_for_category(category: &str) -> Option<&'static str> {
    if category == "general_issues" {
        return Some(GENERAL_ISSUES);
    }
    THEME_RULES
        .iter()
        .find(|r| r.category == category)
        .map(|r| r.theme)
}

/// Category slug for a theme title (inverse of [`theme_for_category`]).
pub fn category_for_theme(theme: &str) -> Option<&'static str> {
    if theme == GENERAL_ISSUES {
        return Some("general_issues");
    }
    THEME_RULES
        .iter()
        .find(|r| r.theme == theme)
        .map(|r| r.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scam_keywords_win() {
        // Two scam keyword hits and nothing else: weight 2, doubled to 4.
        let theme = classify("What a scam, complete fraud.");
        assert_eq!(theme, "Users Accusing Platform of Being a Scam/Fraud");
    }

    #[test]
    fn test_weak_evidence_is_general() {
        // Single keyword in one category only: weight 1 < 2.
        assert_eq!(classify("My ticket vanished."), GENERAL_ISSUES);
        assert_eq!(classify("Mediocre overall."), GENERAL_ISSUES);
    }

    #[test]
    fn test_empty_text_is_general() {
        assert_eq!(classify(""), GENERAL_ISSUES);
        assert_eq!(classify("   "), GENERAL_ISSUES);
    }

    #[test]
    fn test_suspension_payment_boost() {
        let text = "I was suspended and never got paid";
        let weights = analyze(text);
        let payment = weights.iter().find(|w| w.category == "payment_issues").unwrap();
        let suspension = weights
            .iter()
            .find(|w| w.category == "account_suspension")
            .unwrap();

        // "paid" keyword plus the +3 suspension boost.
        assert_eq!(payment.weight, 4);
        // "suspended" keyword alone.
        assert_eq!(suspension.weight, 1);
        assert_eq!(
            classify(text),
            "Payment Delays or Missing Payments After Work Completed"
        );
    }

    #[test]
    fn test_pattern_hits_count_double() {
        // "account suspended without warning": keywords "suspended" +
        // patterns "account.*suspended" and "suspended.*without".
        let weights = analyze("My account was suspended without warning");
        let suspension = weights
            .iter()
            .find(|w| w.category == "account_suspension")
            .unwrap();
        assert_eq!(suspension.weight, 1 + 2 * 2);
    }

    #[test]
    fn test_tie_break_is_declaration_order() {
        // support_issues and technical_issues both score 2; support_issues
        // comes first in the rule table and must win.
        let text = "support help platform system";
        let weights = analyze(text);
        let support = weights.iter().find(|w| w.category == "support_issues").unwrap();
        let technical = weights
            .iter()
            .find(|w| w.category == "technical_issues")
            .unwrap();
        assert_eq!(support.weight, technical.weight);
        assert_eq!(classify(text), "Poor Customer Support - Slow Response or No Help");
    }

    #[test]
    fn test_category_theme_round_trip() {
        for rule in THEME_RULES {
            assert_eq!(theme_for_category(rule.category), Some(rule.theme));
            assert_eq!(category_for_theme(rule.theme), Some(rule.category));
        }
        assert_eq!(theme_for_category("general_issues"), Some(GENERAL_ISSUES));
        assert_eq!(category_for_theme(GENERAL_ISSUES), Some("general_issues"));
        assert_eq!(theme_for_category("nope"), None);
    }
}
