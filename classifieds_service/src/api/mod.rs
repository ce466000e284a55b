use anyhow::Context;
use axum::{
    Router,
    http::{
        Method,
        header::{CONTENT_TYPE, HeaderName},
    },
};
use classifieds_service::domain::ports::ClassifiedsService;
use classifieds_service::inbound::{ClassifiedsRouterState, classifieds_router};
use classifieds_service::inbound::http::extractors::USER_ID_HEADER;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;

mod health;
pub mod swagger;

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_headers(vec![CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(Any)
}

pub async fn setup_and_serve<T>(service: T, config: &Config) -> anyhow::Result<()>
where
    T: ClassifiedsService,
{
    let app: Router = classifieds_router(ClassifiedsRouterState::new(service))
        .layer(TraceLayer::new_for_http())
        .merge(health::router(config.environment))
        .layer(cors_layer())
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", swagger::ApiDoc::openapi()));

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind to address {}", bind_address))?;

    tracing::info!(
        "classifieds service is up and running with environment {} on port {}",
        config.environment,
        config.port
    );

    axum::serve(listener, app.into_make_service())
        .await
        .context("error running axum server")
}
