use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::{
    AppState,
    auth::auth_middleware,
    handlers::{auth, users, videos},
};

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Public authentication endpoints
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .merge(create_protected_routes(state))
}

/// Create protected routes that require authentication
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Accounts and the follow graph
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}/follow", patch(users::follow_user))
        .route("/users/{id}/unfollow", patch(users::unfollow_user))
        // Videos, publication and engagement
        .route(
            "/videos",
            post(videos::create_video).get(videos::list_videos),
        )
        .route(
            "/videos/{id}",
            get(videos::get_video).patch(videos::update_video),
        )
        .route("/videos/{id}/publish", patch(videos::publish_video))
        .route("/videos/{id}/unpublish", patch(videos::unpublish_video))
        .route("/videos/{id}/like", patch(videos::like_video))
        .route("/videos/{id}/dislike", patch(videos::dislike_video))
        .route("/videos/{id}/favorite", patch(videos::favorite_video))
        .route("/videos/{id}/unfavorite", patch(videos::unfavorite_video))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
