// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{lead, leaderboard, method_not_allowed, not_found, plan, profile, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Quizzes, leaderboard, waitlist and plans are public.
/// * Profile routes require a bearer token.
/// * Wrong verbs answer 405 and unknown paths 404, both as JSON.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).fallback(method_not_allowed))
        .route("/{slug}", get(quiz::get_quiz).fallback(method_not_allowed))
        .route(
            "/{slug}/submit",
            post(quiz::submit_quiz).fallback(method_not_allowed),
        );

    let leaderboard_routes = Router::new()
        .route(
            "/",
            get(leaderboard::get_leaderboard).fallback(method_not_allowed),
        )
        .route(
            "/rank/{user_id}",
            get(leaderboard::get_user_rank).fallback(method_not_allowed),
        );

    let profile_routes = Router::new()
        .route(
            "/me",
            get(profile::get_me)
                .post(profile::upsert_me)
                .fallback(method_not_allowed),
        )
        .route(
            "/me/onboarding",
            post(profile::complete_onboarding).fallback(method_not_allowed),
        )
        .route(
            "/me/points",
            post(profile::award_points).fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let plan_routes = Router::new()
        .route("/", get(plan::list_plans).fallback(method_not_allowed))
        .route(
            "/{plan}/access",
            get(plan::check_access).fallback(method_not_allowed),
        );

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/leaderboard", leaderboard_routes)
        .nest("/api/profiles", profile_routes)
        .nest("/api/plans", plan_routes)
        .route(
            "/api/waitlist",
            post(lead::join_waitlist).fallback(method_not_allowed),
        )
        .fallback(not_found)
        // Global middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
