use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Proficiency catalog
        .route("/api/proficiency", get(handlers::a002_proficiency::catalog))
        .route(
            "/api/proficiency/testdata",
            post(handlers::a002_proficiency::insert_test_data),
        )
        // Tutors
        .route(
            "/api/tutor",
            get(handlers::a001_tutor::list_all).post(handlers::a001_tutor::upsert),
        )
        .route(
            "/api/tutor/testdata",
            post(handlers::a001_tutor::insert_test_data),
        )
        .route("/api/tutor/:id", get(handlers::a001_tutor::get_by_id))
        .route(
            "/api/tutor/:id/proficiencies",
            put(handlers::a001_tutor::update_proficiencies),
        )
        // Students
        .route(
            "/api/student",
            get(handlers::a004_student::list_all).post(handlers::a004_student::upsert),
        )
        .route(
            "/api/student/testdata",
            post(handlers::a004_student::insert_test_data),
        )
        // Bundles
        .route(
            "/api/bundle",
            get(handlers::a003_bundle::list_all).post(handlers::a003_bundle::create),
        )
}
