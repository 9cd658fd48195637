//! API Routes
//!
//! Configures the Axum router with all employee proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_employee_handler, delete_employee_handler, get_employee_handler,
    health_handler, highest_salary_handler, list_employees_handler,
    search_employees_handler, stats_handler, top_ten_names_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Static segments win over `:id`, so the aggregate routes never reach
    // the id handler.
    Router::new()
        .route(
            "/api/v1/employee",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/api/v1/employee/search/:search_string",
            get(search_employees_handler),
        )
        .route("/api/v1/employee/highestSalary", get(highest_salary_handler))
        .route(
            "/api/v1/employee/topTenHighestEarningEmployeeNames",
            get(top_ten_names_handler),
        )
        .route(
            "/api/v1/employee/:id",
            get(get_employee_handler).delete(delete_employee_handler),
        )
        .route("/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use crate::resilience::RetryPolicy;
    use crate::service::EmployeeService;
    use crate::upstream::fake::{row, FakeUpstream};
    use crate::upstream::UpstreamClient;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app(fake: Arc<FakeUpstream>) -> Router {
        let service = EmployeeService::new(
            UpstreamClient::new(fake),
            Arc::new(ResponseCache::new(100, Duration::from_secs(60))),
            RetryPolicy::immediate(3),
        );
        create_router(AppState::new(service))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(Arc::new(FakeUpstream::default()));

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_test_app(Arc::new(FakeUpstream::default()));

        let response = app.oneshot(get_request("/cache/stats")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_aggregate_routes_are_not_taken_as_ids() {
        let fake = Arc::new(FakeUpstream::with(vec![row("Ann", 10)]));
        let app = create_test_app(fake.clone());

        let response = app
            .clone()
            .oneshot(get_request("/api/v1/employee/highestSalary"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get_request("/api/v1/employee/topTenHighestEarningEmployeeNames"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(fake.gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let app = create_test_app(Arc::new(FakeUpstream::default()));
        let uri = format!("/api/v1/employee/{}", uuid::Uuid::new_v4());

        let response = app.oneshot(get_request(&uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_malformed_id_is_bad_request() {
        let app = create_test_app(Arc::new(FakeUpstream::default()));

        let response = app
            .oneshot(get_request("/api/v1/employee/nope"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
