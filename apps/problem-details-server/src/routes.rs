//! Demo routes exercising every branch of the problem details plugin

use std::sync::Arc;

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use problem_details::{MapperRegistry, ProblemDef, ProblemDocument};
use problem_details_axum::{
    HandlerError, ProblemDetailsConfig, ProblemDetailsPlugin, RegistryMappingStrategy,
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

pub const USER_NOT_FOUND: ProblemDef = ProblemDef {
    status: 404,
    title: "User Not Found",
    type_url: "https://errors.example.com/user-not-found",
};

pub const OUT_OF_TEA: ProblemDef = ProblemDef {
    status: 418,
    title: "Out Of Tea",
    type_url: "https://errors.example.com/out-of-tea",
};

#[derive(Debug, thiserror::Error)]
#[error("user {id} does not exist")]
pub struct UserNotFound {
    pub id: u64,
}

#[derive(Debug, thiserror::Error)]
#[error("the server melted down")]
pub struct Meltdown;

/// Registry with the mappers this service knows about.
#[must_use]
pub fn build_registry() -> MapperRegistry {
    let mut registry = MapperRegistry::new();
    registry.register_fn(|e: &UserNotFound| {
        let mut doc = USER_NOT_FOUND.as_problem(e.to_string());
        doc.extensions.insert("user_id".to_owned(), e.id.into());
        doc
    });
    registry
}

/// Build the application router with the plugin registered.
///
/// # Errors
/// Returns an error if the problem details configuration is invalid.
pub fn build_router(config: ProblemDetailsConfig) -> anyhow::Result<Router> {
    let registry = Arc::new(build_registry());
    let strategy = Arc::new(RegistryMappingStrategy::new(registry));
    let options = config.into_options(strategy)?;

    let info = ProblemDetailsPlugin::info();
    tracing::info!(
        plugin = info.name,
        version = info.version,
        error_status_codes = options.error_status_codes().len(),
        "registering problem details plugin"
    );

    let routes = Router::new()
        .route("/health", get(health))
        .route("/boom", get(boom))
        .route("/missing", get(missing))
        .route("/users/{id}", get(get_user))
        .route("/teapot", get(teapot));

    Ok(ProblemDetailsPlugin::register(routes, options).layer(TraceLayer::new_for_http()))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn boom() -> Result<Json<Value>, HandlerError> {
    Err(Meltdown.into())
}

async fn missing() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn get_user(Path(id): Path<u64>) -> Result<Json<Value>, HandlerError> {
    if id == 1 {
        Ok(Json(json!({"id": 1, "name": "admin"})))
    } else {
        Err(UserNotFound { id }.into())
    }
}

async fn teapot() -> Result<ProblemDocument, HandlerError> {
    Ok(OUT_OF_TEA
        .as_problem("the pot is empty")
        .with_extension("refill_in_seconds", 30)?)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header::CONTENT_TYPE};
    use axum::response::Response;
    use problem_details::APPLICATION_PROBLEM_JSON;
    use tower::ServiceExt;

    async fn call(uri: &str) -> Response {
        build_router(ProblemDetailsConfig::default())
            .unwrap()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn content_type(resp: &Response) -> &str {
        resp.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    async fn json_body(resp: Response) -> Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_passes_through() {
        let resp = call("/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn boom_is_generic_500() {
        let resp = call("/boom").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type(&resp), APPLICATION_PROBLEM_JSON);
        assert_eq!(
            json_body(resp).await,
            json!({"type": "about:blank", "status": 500})
        );
    }

    #[tokio::test]
    async fn missing_is_status_derived_404() {
        let resp = call("/missing").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(content_type(&resp), APPLICATION_PROBLEM_JSON);
        assert_eq!(
            json_body(resp).await,
            json!({"type": "about:blank", "status": 404})
        );
    }

    #[tokio::test]
    async fn unknown_user_uses_registered_mapper() {
        let resp = call("/users/42").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = json_body(resp).await;
        assert_eq!(json["type"], USER_NOT_FOUND.type_url);
        assert_eq!(json["detail"], "user 42 does not exist");
        assert_eq!(json["user_id"], 42);
    }

    #[tokio::test]
    async fn known_user_is_returned() {
        let resp = call("/users/1").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["name"], "admin");
    }

    #[tokio::test]
    async fn handler_built_problem_is_kept() {
        let resp = call("/teapot").await;
        assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
        let json = json_body(resp).await;
        assert_eq!(json["type"], OUT_OF_TEA.type_url);
        assert_eq!(json["refill_in_seconds"], 30);
    }

    #[test]
    fn user_not_found_mapper_adds_user_id() {
        let registry = build_registry();
        let error = UserNotFound { id: 7 };
        let doc = registry.get_mapper(&error).map_error(&error);
        assert_eq!(doc.status, StatusCode::NOT_FOUND);
        assert_eq!(doc.extension("user_id"), Some(&json!(7)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ProblemDetailsConfig {
            error_status_codes: Some(vec![200]),
            ..ProblemDetailsConfig::default()
        };
        assert!(build_router(config).is_err());
    }
}
