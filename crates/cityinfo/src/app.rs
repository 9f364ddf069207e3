use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        cities::{get_city, list_cities},
        health::livez,
        points_of_interest::{
            create_point_of_interest, delete_point_of_interest, get_point_of_interest,
            list_points_of_interest, patch_point_of_interest, update_point_of_interest,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/cities", get(list_cities))
        .route("/cities/{id}", get(get_city))
        .route(
            "/cities/{city_id}/pointsOfInterest",
            get(list_points_of_interest).post(create_point_of_interest),
        )
        .route(
            "/cities/{city_id}/pointsOfInterest/{id}",
            get(get_point_of_interest)
                .put(update_point_of_interest)
                .patch(patch_point_of_interest)
                .delete(delete_point_of_interest),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
