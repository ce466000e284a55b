//! Liveness route, answered without touching storage

use axum::{Json, Router, extract::State, routing::get};
use classifieds_env::Environment;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Liveness {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    environment: Environment,
}

pub fn router(environment: Environment) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(environment)
}

#[tracing::instrument]
async fn health(State(environment): State<Environment>) -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        environment,
    })
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn reports_service_and_environment() {
        let res = router(Environment::Develop)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(res.status().is_success());
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "status": "ok",
                "service": "classifieds_service",
                "version": env!("CARGO_PKG_VERSION"),
                "environment": "develop",
            })
        );
    }
}
