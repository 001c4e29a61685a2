//! HTTP routes for laptop recommendations.
//!
//! - `GET /`: liveness message
//! - `GET /recommend?budget=<int>&type=<use case>`: top value picks within budget
//! - `GET /health`: catalog readiness (see [`crate::health`])

use std::any::Any;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use laprec_core::{
    AppContext, ApplicationError, InterfaceError, Recommendation, RecommendationQuery,
};
use serde::Serialize;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::health;

pub const HOME_MESSAGE: &str = "Laptop Recommender API is running!";

#[derive(Clone)]
pub struct ApiState {
    context: AppContext,
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router(context: AppContext, cors_enabled: bool) -> Router {
    let routes = Router::new()
        .route("/", get(home))
        .route("/recommend", get(recommend))
        .with_state(ApiState { context: context.clone() })
        .merge(health::router(context));

    with_layers(routes, cors_enabled)
}

fn with_layers(routes: Router, cors_enabled: bool) -> Router {
    let routes =
        routes.layer(CatchPanicLayer::custom(handle_panic)).layer(TraceLayer::new_for_http());

    if cors_enabled {
        routes.layer(CorsLayer::permissive())
    } else {
        routes
    }
}

pub async fn home() -> Json<StatusMessage> {
    Json(StatusMessage { message: HOME_MESSAGE.to_string() })
}

pub async fn recommend(
    State(state): State<ApiState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Recommendation>, (StatusCode, Json<ErrorBody>)> {
    let correlation_id = Uuid::new_v4().simple().to_string();

    let budget = first_param(&params, "budget");
    let use_case = first_param(&params, "type");
    let query = RecommendationQuery::from_params(budget, use_case)
        .map_err(|error| reject(ApplicationError::from(error), &correlation_id))?;

    let recommendation =
        state.context.recommend(&query).map_err(|error| reject(error, &correlation_id))?;

    info!(
        event_name = "api.recommend.served",
        correlation_id = %correlation_id,
        budget = query.budget(),
        use_case = %query.use_case(),
        total_matches = recommendation.total_matches,
        returned = recommendation.laptops.len(),
        "recommendation served"
    );

    Ok(Json(recommendation))
}

/// Repeated keys resolve to their first occurrence.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(name, _)| name == key).map(|(_, value)| value.as_str())
}

fn reject(error: ApplicationError, correlation_id: &str) -> (StatusCode, Json<ErrorBody>) {
    match &error {
        ApplicationError::Validation(_) => warn!(
            event_name = "api.recommend.rejected",
            correlation_id = %correlation_id,
            error = %error,
            "recommendation request rejected"
        ),
        ApplicationError::DataUnavailable(_) | ApplicationError::Computation(_) => error!(
            event_name = "api.recommend.failed",
            correlation_id = %correlation_id,
            error = %error,
            "recommendation request failed"
        ),
    }

    error_response(&error.into_interface(correlation_id))
}

fn error_response(error: &InterfaceError) -> (StatusCode, Json<ErrorBody>) {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody { error: error.message().to_string() }))
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };

    let correlation_id = Uuid::new_v4().simple().to_string();
    error!(
        event_name = "api.handler.panicked",
        correlation_id = %correlation_id,
        detail = %detail,
        "request handler panicked"
    );

    error_response(&InterfaceError::internal(detail, correlation_id)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::{Query, State},
        http::{header, Request, StatusCode},
        routing::get,
        Json, Router,
    };
    use laprec_core::{AppContext, Catalog, LaptopRecord};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use super::{recommend, router, with_layers, ApiState};

    fn gaming_context() -> AppContext {
        AppContext::new(Catalog::new(vec![
            LaptopRecord::new("Entry Gamer", 50_000.0, 8.0, 512.0, "Gaming")
                .with_extra("cpu", "Ryzen 5 5600H"),
            LaptopRecord::new("Pro Gamer", 60_000.0, 16.0, 1024.0, "gaming")
                .with_extra("gpu", "RTX 4060"),
            LaptopRecord::new("Office", 35_000.0, 8.0, 512.0, "business"),
        ]))
    }

    fn params(pairs: &[(&str, &str)]) -> Query<Vec<(String, String)>> {
        Query(pairs.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("router responds");
        let status = response.status();
        let bytes =
            axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body reads");
        (status, serde_json::from_slice(&bytes).expect("body is json"))
    }

    #[tokio::test]
    async fn recommend_ranks_matches_by_value() {
        let Json(recommendation) = recommend(
            State(ApiState { context: gaming_context() }),
            params(&[("budget", "75000"), ("type", "Gaming")]),
        )
        .await
        .expect("request succeeds");

        let names: Vec<_> =
            recommendation.laptops.iter().map(|record| record.name.as_str()).collect();
        assert_eq!(names, vec!["Pro Gamer", "Entry Gamer"]);
        assert_eq!(recommendation.message, "Found 2 laptops matching your criteria");
    }

    #[tokio::test]
    async fn recommend_uses_first_occurrence_of_repeated_keys() {
        let Json(recommendation) = recommend(
            State(ApiState { context: gaming_context() }),
            params(&[("type", "business"), ("budget", "40000"), ("type", "gaming")]),
        )
        .await
        .expect("request succeeds");

        assert_eq!(recommendation.laptops.len(), 1);
        assert_eq!(recommendation.laptops[0].name, "Office");
    }

    #[tokio::test]
    async fn home_reports_running() {
        let (status, body) = get_json(router(gaming_context(), true), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Laptop Recommender API is running!"}));
    }

    #[tokio::test]
    async fn recommend_returns_full_records() {
        let (status, body) =
            get_json(router(gaming_context(), true), "/recommend?budget=75000&type=Gaming").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Found 2 laptops matching your criteria");
        assert_eq!(
            body["laptops"][0],
            json!({
                "name": "Pro Gamer",
                "price": 60000,
                "ram": 16,
                "storage": 1024,
                "use_case": "gaming",
                "gpu": "RTX 4060"
            })
        );
        assert_eq!(body["laptops"][1]["cpu"], "Ryzen 5 5600H");
    }

    #[tokio::test]
    async fn no_matches_is_success_with_empty_list() {
        let (status, body) =
            get_json(router(gaming_context(), true), "/recommend?budget=100&type=Gaming").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "message": "No laptops found for budget 100 and use case 'Gaming'",
                "laptops": []
            })
        );
    }

    #[tokio::test]
    async fn missing_type_is_bad_request() {
        let (status, body) =
            get_json(router(gaming_context(), true), "/recommend?budget=75000").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Both 'budget' and 'type' parameters are required"}));
    }

    #[tokio::test]
    async fn missing_query_string_is_bad_request() {
        let (status, body) = get_json(router(gaming_context(), true), "/recommend").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Both 'budget' and 'type' parameters are required");
    }

    #[tokio::test]
    async fn negative_budget_is_bad_request() {
        let (status, body) =
            get_json(router(gaming_context(), true), "/recommend?budget=-100&type=Gaming").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Budget must be greater than 0"}));
    }

    #[tokio::test]
    async fn out_of_range_budgets_are_still_integers() {
        let (status, body) = get_json(
            router(gaming_context(), true),
            "/recommend?budget=-99999999999999999999&type=Gaming",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Budget must be greater than 0"}));

        let (status, body) = get_json(
            router(gaming_context(), true),
            "/recommend?budget=99999999999999999999&type=Gaming",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Found 2 laptops matching your criteria");
    }

    #[tokio::test]
    async fn empty_catalog_is_server_error() {
        let context = AppContext::new(Catalog::default());
        let (status, body) =
            get_json(router(context, true), "/recommend?budget=75000&type=Gaming").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "No laptop data available"}));
    }

    #[tokio::test]
    async fn validation_precedes_catalog_check() {
        let context = AppContext::new(Catalog::default());
        let (status, _) = get_json(router(context, true), "/recommend?budget=0&type=Gaming").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn computation_failure_is_generic_server_error() {
        let context = AppContext::new(Catalog::new(vec![LaptopRecord::new(
            "Free", 0.0, 8.0, 512.0, "gaming",
        )]));
        let (status, body) =
            get_json(router(context, true), "/recommend?budget=75000&type=gaming").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().expect("error is a string");
        assert!(message.starts_with("Internal server error: "));
    }

    #[tokio::test]
    async fn panics_become_internal_server_errors() {
        async fn corrupted() -> &'static str {
            panic!("catalog index corrupted")
        }

        let routes = Router::new().route("/boom", get(corrupted));
        let (status, body) = get_json(with_layers(routes, false), "/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error: catalog index corrupted"}));
    }

    #[tokio::test]
    async fn health_is_mounted() {
        let (status, body) = get_json(router(gaming_context(), true), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn cors_headers_are_sent_when_enabled() {
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .expect("request builds");

        let enabled = router(gaming_context(), true).oneshot(request).await.expect("responds");
        assert!(enabled.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .expect("request builds");
        let disabled = router(gaming_context(), false).oneshot(request).await.expect("responds");
        assert!(!disabled.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
