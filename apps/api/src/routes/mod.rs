pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::diary::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/diary",
            post(handlers::handle_create_diary)
                .get(handlers::handle_read_diary)
                .patch(handlers::handle_update_diary)
                .delete(handlers::handle_delete_diary),
        )
        .route("/api/v1/diaries", get(handlers::handle_read_diaries))
        .with_state(state)
}
