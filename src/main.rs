use axum::{routing::get, Router};
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use review_insights::{api, dataset, pain_points};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health,
        api::overview,
        api::list_reviews,
        api::list_pain_points,
        api::pain_point_detail,
        api::actionable_insights
    ),
    components(
        schemas(
            api::HealthResponse,
            api::OverviewResponse,
            api::RatingBucket,
            api::ReviewPage,
            api::PainPointCard,
            api::ThemeDetailResponse,
            api::InsightCard,
            api::InsightsResponse,
            api::ErrorResponse,
            review_insights::dataset::Review,
            review_insights::dataset::SentimentBreakdown,
            review_insights::sentiment::SentimentLabel,
            review_insights::insights::Recommendation
        )
    ),
    tags(
        (name = "insights", description = "Review analysis and pain point API")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let csv_path = env::var("REVIEWS_CSV").unwrap_or_else(|_| "data/reviews.csv".to_string());
    let language = env::var("REVIEW_LANGUAGE").unwrap_or_else(|_| "en".to_string());
    let max_themes = env::var("MAX_THEMES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(pain_points::DEFAULT_MAX_THEMES);

    // A missing or unreadable file is reported, not fatal: the service
    // stays up and every data endpoint returns the error.
    let (reviews, load_error) = match dataset::ReviewSet::load(&csv_path, &language) {
        Ok(set) => (Some(set), None),
        Err(e) => {
            tracing::error!("{:#}. Serving idle without data.", e);
            (None, Some(format!("{:#}", e)))
        }
    };

    let state = Arc::new(api::AppState {
        reviews,
        load_error,
        max_themes,
    });

    let app = Router::new()
        .merge(
            SwaggerUi::new("/review-insights-swagger")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .route("/health", get(api::health))
        .route("/overview", get(api::overview))
        .route("/reviews", get(api::list_reviews))
        .route("/pain-points", get(api::list_pain_points))
        .route("/pain-points/:category", get(api::pain_point_detail))
        .route("/insights", get(api::actionable_insights))
        .nest_service("/", ServeDir::new("static")) // Serve Dashboard
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
