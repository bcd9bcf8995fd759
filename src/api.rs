//! HTTP API: application state and handlers.
//!
//! All data endpoints answer over a read-only snapshot loaded at
//! startup. While no dataset is loaded (missing or unreadable CSV) they
//! return 503 with the load error so the dashboard can surface it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::classifier;
use crate::dataset::{Review, ReviewSet, SentimentBreakdown};
use crate::insights;
use crate::pain_points;

pub struct AppState {
    pub reviews: Option<ReviewSet>,
    /// Set when loading failed; reported on every data endpoint.
    pub load_error: Option<String>,
    pub max_themes: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            message: message.into(),
        }),
    )
}

/// Resolve the snapshot or answer 503 with the load error.
fn require_dataset(state: &AppState) -> Result<&ReviewSet, ApiError> {
    state.reviews.as_ref().ok_or_else(|| {
        error(
            StatusCode::SERVICE_UNAVAILABLE,
            state
                .load_error
                .clone()
                .unwrap_or_else(|| "Review dataset not loaded".to_string()),
        )
    })
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub dataset_loaded: bool,
    pub review_count: usize,
    pub load_error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "insights",
    responses((status = 200, description = "Service status", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        dataset_loaded: state.reviews.is_some(),
        review_count: state.reviews.as_ref().map(|r| r.len()).unwrap_or(0),
        load_error: state.load_error.clone(),
    })
}

// ============================================================================
// Overview
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingBucket {
    /// Star rating, 1-5.
    pub rating: u8,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewResponse {
    pub total_reviews: usize,
    /// Language the dataset is filtered to.
    pub language: String,
    /// Rows dropped because they were in another language.
    pub discarded_other_language: usize,
    pub average_rating: f64,
    pub average_sentiment: f64,
    pub sentiment_breakdown: SentimentBreakdown,
    pub rating_histogram: Vec<RatingBucket>,
    pub generated_at: String,
}

#[utoipa::path(
    get,
    path = "/overview",
    tag = "insights",
    responses(
        (status = 200, description = "Aggregate review metrics", body = OverviewResponse),
        (status = 503, description = "Dataset not loaded", body = ErrorResponse)
    )
)]
pub async fn overview(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let set = require_dataset(&state)?;

    let rating_histogram = set
        .rating_histogram()
        .iter()
        .enumerate()
        .map(|(i, &count)| RatingBucket {
            rating: i as u8 + 1,
            count,
        })
        .collect();

    Ok(Json(OverviewResponse {
        total_reviews: set.len(),
        language: set.language.clone(),
        discarded_other_language: set.discarded,
        average_rating: set.mean_rating(),
        average_sentiment: set.mean_sentiment(),
        sentiment_breakdown: set.sentiment_breakdown(),
        rating_histogram,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}

// ============================================================================
// Review browsing
// ============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number, default 1.
    pub page: Option<usize>,
    /// Rows per page, default 50, max 200.
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewPage {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub reviews: Vec<Review>,
}

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "insights",
    params(PageParams),
    responses(
        (status = 200, description = "Paginated review table", body = ReviewPage),
        (status = 503, description = "Dataset not loaded", body = ErrorResponse)
    )
)]
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<ReviewPage>, ApiError> {
    let set = require_dataset(&state)?;

    let per_page = params.per_page.unwrap_or(50).clamp(1, 200);
    let page = params.page.unwrap_or(1).max(1);
    let total = set.len();
    let total_pages = total.div_ceil(per_page).max(1);

    let reviews = set
        .reviews
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Ok(Json(ReviewPage {
        page,
        per_page,
        total,
        total_pages,
        reviews,
    }))
}

// ============================================================================
// Pain points
// ============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct LimitParams {
    /// Maximum number of themes, defaults to the configured value.
    pub limit: Option<usize>,
}

/// Card shown on the pain-points view: everything except the
/// recommendation payloads.
#[derive(Debug, Serialize, ToSchema)]
pub struct PainPointCard {
    pub theme: String,
    /// API slug for the detail endpoint.
    pub category: String,
    /// Summary paragraph for the theme.
    pub description: String,
    /// Affected-count blurb, e.g. "17 users affected".
    pub summary: String,
    pub count: usize,
}

#[utoipa::path(
    get,
    path = "/pain-points",
    tag = "insights",
    params(LimitParams),
    responses(
        (status = 200, description = "Ranked pain-point themes", body = [PainPointCard]),
        (status = 503, description = "Dataset not loaded", body = ErrorResponse)
    )
)]
pub async fn list_pain_points(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<PainPointCard>>, ApiError> {
    let set = require_dataset(&state)?;
    let limit = params.limit.unwrap_or(state.max_themes);

    let cards = pain_points::extract_pain_points(&set.reviews, limit)
        .into_iter()
        .map(|p| PainPointCard {
            category: classifier::category_for_theme(&p.theme)
                .unwrap_or("general_issues")
                .to_string(),
            description: insights::summary_for(&p.theme).to_string(),
            theme: p.theme,
            summary: p.summary,
            count: p.count,
        })
        .collect();

    Ok(Json(cards))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ThemeDetailResponse {
    pub theme: String,
    pub category: String,
    pub description: String,
    pub count: usize,
    /// Share of all loaded reviews in this group, percent.
    pub affected_share: f64,
    /// High above 50 members, Medium above 20, else Low.
    pub priority: String,
    pub quotes: Vec<String>,
    pub impact: String,
    pub marketing: Vec<insights::Recommendation>,
    pub product: Vec<insights::Recommendation>,
}

#[utoipa::path(
    get,
    path = "/pain-points/{category}",
    tag = "insights",
    params(("category" = String, Path, description = "Theme category slug, e.g. payment_issues")),
    responses(
        (status = 200, description = "Full theme detail", body = ThemeDetailResponse),
        (status = 404, description = "Unknown category or no such pain point", body = ErrorResponse),
        (status = 503, description = "Dataset not loaded", body = ErrorResponse)
    )
)]
pub async fn pain_point_detail(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<ThemeDetailResponse>, ApiError> {
    let set = require_dataset(&state)?;

    let theme = classifier::theme_for_category(&category)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("Unknown category: {}", category)))?;

    // No truncation here: the detail view must find themes that rank
    // below the card cutoff.
    let all = pain_points::extract_pain_points(&set.reviews, usize::MAX);
    let point = all.into_iter().find(|p| p.theme == theme).ok_or_else(|| {
        error(
            StatusCode::NOT_FOUND,
            format!("'{}' is not among the current pain points", theme),
        )
    })?;

    let affected_share = if set.is_empty() {
        0.0
    } else {
        point.count as f64 / set.len() as f64 * 100.0
    };
    let priority = if point.count > 50 {
        "High"
    } else if point.count > 20 {
        "Medium"
    } else {
        "Low"
    };

    Ok(Json(ThemeDetailResponse {
        theme: point.theme.clone(),
        category,
        description: insights::summary_for(&point.theme).to_string(),
        count: point.count,
        affected_share,
        priority: priority.to_string(),
        quotes: point.quotes,
        impact: point.impact,
        marketing: point.insights.marketing,
        product: point.insights.product,
    }))
}

// ============================================================================
// Actionable insights
// ============================================================================

/// Pain point with its marketing strategies, for the growth view.
#[derive(Debug, Serialize, ToSchema)]
pub struct InsightCard {
    pub theme: String,
    pub count: usize,
    pub impact: String,
    pub marketing: Vec<insights::Recommendation>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InsightsResponse {
    /// Wider net than the card view so smaller themes still surface.
    pub themes: Vec<InsightCard>,
}

#[utoipa::path(
    get,
    path = "/insights",
    tag = "insights",
    responses(
        (status = 200, description = "Pain points with marketing strategies", body = InsightsResponse),
        (status = 503, description = "Dataset not loaded", body = ErrorResponse)
    )
)]
pub async fn actionable_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let set = require_dataset(&state)?;

    let themes = pain_points::extract_pain_points(&set.reviews, 10)
        .into_iter()
        .map(|p| InsightCard {
            theme: p.theme,
            count: p.count,
            impact: p.impact,
            marketing: p.insights.marketing,
        })
        .collect();

    Ok(Json(InsightsResponse { themes }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(reviews: Option<ReviewSet>, load_error: Option<String>) -> Arc<AppState> {
        Arc::new(AppState {
            reviews,
            load_error,
            max_themes: pain_points::DEFAULT_MAX_THEMES,
        })
    }

    fn loaded_state() -> Arc<AppState> {
        let csv = "\
reviewScore,reviewLanguage,reviewTitle,reviewText,reviewUrl
1,en,Scam,This is a scam and a fraud,https://example.com/r/1
1,en,Scam too,Total scam and fraud operation,https://example.com/r/2
1,en,Scam again,Obvious scam and fraud behaviour,https://example.com/r/3
5,en,Great,Amazing platform with great support,https://example.com/r/4
2,de,Schlecht,Nicht gut,https://example.com/r/5
";
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let set = ReviewSet::from_csv_reader(&mut reader, "en").unwrap();
        state_with(Some(set), None)
    }

    #[tokio::test]
    async fn test_data_endpoints_503_without_dataset() {
        let state = state_with(None, Some("file not found".to_string()));

        let err = overview(State(state.clone())).await.unwrap_err();
        assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.1.message, "file not found");

        let err = list_pain_points(State(state), Query(LimitParams { limit: None }))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_reports_load_error() {
        let state = state_with(None, Some("boom".to_string()));
        let resp = health(State(state)).await;
        assert!(!resp.dataset_loaded);
        assert_eq!(resp.load_error.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_overview_metrics() {
        let resp = overview(State(loaded_state())).await.unwrap();
        assert_eq!(resp.total_reviews, 4);
        assert_eq!(resp.discarded_other_language, 1);
        assert_eq!(resp.rating_histogram.len(), 5);
        assert_eq!(resp.rating_histogram[0].count, 3);
        assert_eq!(resp.sentiment_breakdown.negative, 3);
    }

    #[tokio::test]
    async fn test_review_pagination() {
        let page = list_reviews(
            State(loaded_state()),
            Query(PageParams {
                page: Some(2),
                per_page: Some(3),
            }),
        )
        .await
        .unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_pain_point_cards_and_detail() {
        let state = loaded_state();

        let cards = list_pain_points(State(state.clone()), Query(LimitParams { limit: None }))
            .await
            .unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].category, "scam_accusations");
        assert_eq!(cards[0].count, 3);

        let detail = pain_point_detail(State(state.clone()), Path("scam_accusations".to_string()))
            .await
            .unwrap();
        assert_eq!(detail.count, 3);
        assert_eq!(detail.priority, "Low");
        assert_eq!(detail.affected_share, 75.0);
        assert_eq!(detail.marketing.len(), 3);

        let err = pain_point_detail(State(state.clone()), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);

        // Valid slug, but no group of that theme in the data.
        let err = pain_point_detail(State(state), Path("payment_issues".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_insights_endpoint() {
        let resp = actionable_insights(State(loaded_state())).await.unwrap();
        assert_eq!(resp.themes.len(), 1);
        assert!(!resp.themes[0].marketing.is_empty());
    }
}
