use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::infra::app_state::AppState;

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.postgres {
        Some(db) => match sqlx::query("SELECT 1").execute(db.pool()).await {
            Ok(_) => {
                let stats = db.pool_stats();
                json!({
                    "status": "ok",
                    "pool": {
                        "size": stats.size,
                        "idle": stats.idle,
                        "max_size": stats.max_size,
                    }
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, "health check query failed");
                json!({ "status": "unavailable" })
            }
        },
        None => json!({ "status": "in-memory" }),
    };

    let healthy = database["status"] != "unavailable";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if healthy { "healthy" } else { "degraded" },
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
            "checks": { "database": database },
        })),
    )
}
