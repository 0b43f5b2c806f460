//! Axum REST facade over the campaign store.
//!
//! Purely translational: handlers decode query/body input, call the store,
//! and wrap results in the `success`/`data` envelope the mobile client
//! expects. All domain errors surface here as [`ApiError`] and are mapped
//! to status codes; nothing below this layer touches HTTP.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::errors::ApiError;
use crate::models::{
    Campaign, CampaignSortField, Donation, DonationSortField, NewDonation, Pagination, SortOrder,
};
use crate::store::{CampaignQuery, CampaignStore, DonationQuery, DonationSummary, Statistics};

pub struct AppState {
    pub store: CampaignStore,
    pub started_at: Instant,
}

/// Build the application router with all routes and middleware attached.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/fundraisers", get(list_fundraisers))
        .route("/api/fundraisers/:id", get(get_fundraiser))
        .route(
            "/api/fundraisers/:id/donations",
            get(list_donations).post(create_donation),
        )
        .route("/api/stats", get(stats))
        .route("/api/categories", get(categories))
        .route("/health", get(health))
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Query parameters
// ─────────────────────────────────────────────────────────

/// Raw query string for the list endpoints. Everything is optional and
/// tolerant: unknown sort fields and unparsable numbers fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    status: Option<String>,
    category: Option<String>,
    search: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl ListParams {
    fn campaign_query(&self) -> CampaignQuery {
        CampaignQuery {
            status: non_empty(&self.status),
            category: non_empty(&self.category),
            search: non_empty(&self.search),
            sort_by: CampaignSortField::parse(non_empty(&self.sort_by).as_deref()),
            sort_order: SortOrder::parse(non_empty(&self.sort_order).as_deref()),
            page: positive_or(&self.page, 1),
            limit: positive_or(&self.limit, 10),
        }
    }

    fn donation_query(&self) -> DonationQuery {
        DonationQuery {
            sort_by: DonationSortField::parse(non_empty(&self.sort_by).as_deref()),
            sort_order: SortOrder::parse(non_empty(&self.sort_order).as_deref()),
            page: positive_or(&self.page, 1),
            limit: positive_or(&self.limit, 20),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

fn positive_or(raw: &Option<String>, default: u64) -> u64 {
    raw.as_deref()
        .and_then(|v| v.parse::<i64>().ok())
        .map(|v| v.max(1) as u64)
        .unwrap_or(default)
}

/// Campaign ids arrive as path strings; anything that is not a positive
/// integer behaves like an id with no match.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<Campaign>,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct DonationListResponse {
    pub success: bool,
    pub data: Vec<Donation>,
    pub summary: DonationSummary,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: Donation,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since process start.
    pub uptime: f64,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            error: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("Fundraiser not found"),
            ),
            ApiError::InvalidState(message) => (StatusCode::BAD_REQUEST, ErrorBody::new(message)),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    errors: Some(errors),
                    ..ErrorBody::new("Validation failed")
                },
            ),
            ApiError::Config(detail) | ApiError::Internal(detail) => {
                error!("internal error: {detail}");
                let detail = development_mode().then_some(detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: detail,
                        ..ErrorBody::new("Internal server error")
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Whether 500 bodies include internal error detail. Set once at startup
/// from [`crate::config::Config`]; until then (and in production) the
/// client only sees the generic message.
static DEV_MODE: OnceLock<bool> = OnceLock::new();

pub fn set_development_mode(enabled: bool) {
    let _ = DEV_MODE.set(enabled);
}

fn development_mode() -> bool {
    DEV_MODE.get().copied().unwrap_or(false)
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /api/fundraisers`
pub async fn list_fundraisers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (data, pagination) = state.store.list_campaigns(&params.campaign_query())?;
    Ok(Json(ListResponse {
        success: true,
        data,
        pagination,
    }))
}

/// `GET /api/fundraisers/:id`
pub async fn get_fundraiser(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let campaign = state.store.campaign(parse_id(&id)?)?;
    Ok(Json(ItemResponse {
        success: true,
        data: campaign,
    }))
}

/// `GET /api/fundraisers/:id/donations`
pub async fn list_donations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (data, summary, pagination) = state
        .store
        .donations_for_campaign(parse_id(&id)?, &params.donation_query())?;
    Ok(Json(DonationListResponse {
        success: true,
        data,
        summary,
        pagination,
    }))
}

/// `POST /api/fundraisers/:id/donations`
pub async fn create_donation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<NewDonation>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // A body that fails to deserialize still gets the JSON envelope.
    let Json(body) = body.map_err(|r| ApiError::Validation(vec![r.body_text()]))?;
    let donation = state.store.submit_donation(parse_id(&id)?, body)?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            message: "Donation created successfully",
            data: donation,
        }),
    ))
}

/// `GET /api/stats`
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ItemResponse<Statistics>>, ApiError> {
    let statistics = state.store.statistics()?;
    Ok(Json(ItemResponse {
        success: true,
        data: statistics,
    }))
}

/// `GET /api/categories`
pub async fn categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ItemResponse<Vec<String>>>, ApiError> {
    let categories = state.store.categories()?;
    Ok(Json(ItemResponse {
        success: true,
        data: categories,
    }))
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// Catch-all for unmatched routes.
pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Route not found")),
    )
}

// ─────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(AppState {
            store: CampaignStore::with_seed_data(),
            started_at: Instant::now(),
        }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        decode(response).await
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        decode(response).await
    }

    async fn decode(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn list_fundraisers_returns_envelope_with_pagination() {
        let (status, body) = get_json(app(), "/api/fundraisers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"].as_array().unwrap().len(), 6);
        assert_eq!(body["pagination"]["total"], json!(6));
        assert_eq!(body["pagination"]["totalPages"], json!(1));
    }

    #[tokio::test]
    async fn list_fundraisers_applies_filters_and_paging() {
        let (status, body) =
            get_json(app(), "/api/fundraisers?status=active&page=1&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["total"], json!(5));
        assert_eq!(body["pagination"]["totalPages"], json!(3));
    }

    #[tokio::test]
    async fn garbage_paging_parameters_fall_back_to_defaults() {
        let (status, body) =
            get_json(app(), "/api/fundraisers?page=abc&limit=&sortBy=bogus").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["page"], json!(1));
        assert_eq!(body["pagination"]["limit"], json!(10));
    }

    #[tokio::test]
    async fn get_fundraiser_by_id() {
        let (status, body) = get_json(app(), "/api/fundraisers/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], json!("Save the Ocean"));
        assert!(!body["data"]["imageUrl"].as_str().unwrap().is_empty());
        assert_eq!(body["data"]["createdAt"], json!("2024-01-15T10:00:00Z"));
    }

    #[tokio::test]
    async fn unknown_fundraiser_is_404() {
        let (status, body) = get_json(app(), "/api/fundraisers/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Fundraiser not found"));
    }

    #[tokio::test]
    async fn non_numeric_fundraiser_id_is_404() {
        let (status, body) = get_json(app(), "/api/fundraisers/abc").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], json!("Fundraiser not found"));
    }

    #[tokio::test]
    async fn donations_listing_includes_summary() {
        let (status, body) = get_json(app(), "/api/fundraisers/1/donations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 4);
        assert_eq!(body["summary"]["totalAmount"], json!(430.0));
        assert_eq!(body["summary"]["totalCount"], json!(4));
        assert_eq!(body["summary"]["averageAmount"], json!(107.5));
        assert_eq!(body["pagination"]["limit"], json!(20));
    }

    #[tokio::test]
    async fn donations_for_unknown_fundraiser_is_404() {
        let (status, body) = get_json(app(), "/api/fundraisers/999/donations").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], json!("Fundraiser not found"));
    }

    #[tokio::test]
    async fn create_donation_returns_201_with_the_record() {
        let (status, body) = post_json(
            app(),
            "/api/fundraisers/1/donations",
            json!({"amount": 50, "donorName": "Jane Doe", "message": "Good luck!"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Donation created successfully"));
        assert_eq!(body["data"]["id"], json!(11));
        assert_eq!(body["data"]["fundraiserId"], json!(1));
        assert_eq!(body["data"]["donorName"], json!("Jane Doe"));
        assert_eq!(body["data"]["amount"], json!(50.0));
    }

    #[tokio::test]
    async fn anonymous_donation_masks_the_name_in_the_response() {
        let (status, body) = post_json(
            app(),
            "/api/fundraisers/1/donations",
            json!({"amount": 20, "donorName": "X Y", "anonymous": true}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["donorName"], json!("Anonymous"));
        assert_eq!(body["data"]["anonymous"], json!(true));
    }

    #[tokio::test]
    async fn invalid_donation_lists_every_violation() {
        let (status, body) = post_json(
            app(),
            "/api/fundraisers/1/donations",
            json!({"amount": -5, "donorName": "A"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Validation failed"));
        assert!(body["errors"].as_array().unwrap().len() >= 2);
    }

    #[tokio::test]
    async fn string_amount_is_a_validation_failure_in_the_envelope() {
        let (status, body) = post_json(
            app(),
            "/api/fundraisers/1/donations",
            json!({"amount": "50", "donorName": "Jane Doe"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Validation failed"));
        assert_eq!(body["errors"], json!(["Amount must be a positive number"]));
    }

    #[tokio::test]
    async fn malformed_json_body_still_gets_the_envelope() {
        let request = Request::post("/api/fundraisers/1/donations")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let (status, body) = decode(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Validation failed"));
        assert!(body["errors"].as_array().is_some());
    }

    #[tokio::test]
    async fn internal_errors_hide_detail_outside_development() {
        let response = ApiError::Internal("lock poisoned".to_string()).into_response();
        let (status, body) = decode(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Internal server error"));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn donating_to_a_completed_fundraiser_is_rejected() {
        let (status, body) = post_json(
            app(),
            "/api/fundraisers/6/donations",
            json!({"amount": 50, "donorName": "Jane Doe"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            json!("Cannot donate to a fundraiser that is not active")
        );
    }

    #[tokio::test]
    async fn donation_to_unknown_fundraiser_is_404() {
        let (status, body) = post_json(
            app(),
            "/api/fundraisers/999/donations",
            json!({"amount": 50, "donorName": "Jane Doe"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], json!("Fundraiser not found"));
    }

    #[tokio::test]
    async fn stats_reports_seeded_aggregates() {
        let (status, body) = get_json(app(), "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["fundraisers"]["total"], json!(6));
        assert_eq!(body["data"]["fundraisers"]["active"], json!(5));
        assert_eq!(body["data"]["fundraisers"]["completed"], json!(1));
        assert_eq!(body["data"]["fundraising"]["percentage"], json!(66.72));
        assert_eq!(body["data"]["donations"]["totalCount"], json!(10));
        assert_eq!(body["data"]["donations"]["averageAmount"], json!(233.0));
    }

    #[tokio::test]
    async fn categories_endpoint_lists_distinct_values() {
        let (status, body) = get_json(app(), "/api/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!([
                "Environment",
                "Education",
                "Hunger Relief",
                "Animals",
                "Health",
                "Sports"
            ])
        );
    }

    #[tokio::test]
    async fn health_reports_ok_and_uptime() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("ok"));
        assert!(body["timestamp"].is_string());
        assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn unmatched_routes_get_the_json_404() {
        let (status, body) = get_json(app(), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Route not found"));
    }

    #[tokio::test]
    async fn completion_is_visible_to_subsequent_reads() {
        let app = app();
        // Campaign 3 needs 11_500 to reach its goal.
        let (status, _) = post_json(
            app.clone(),
            "/api/fundraisers/3/donations",
            json!({"amount": 11500, "donorName": "Jane Doe"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = get_json(app, "/api/fundraisers/3").await;
        assert_eq!(body["data"]["status"], json!("completed"));
        assert_eq!(body["data"]["raised"], json!(30000.0));
    }
}
