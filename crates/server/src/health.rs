use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use laprec_core::AppContext;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    context: AppContext,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(context: AppContext) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { context })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&state.context);
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "laprec-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn catalog_check(context: &AppContext) -> HealthCheck {
    match context.catalog().len() {
        0 => HealthCheck { status: "degraded", detail: "catalog has no records".to_string() },
        count => HealthCheck { status: "ready", detail: format!("{count} laptop records loaded") },
    }
}
