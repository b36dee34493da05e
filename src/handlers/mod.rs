pub mod cards;
pub mod info;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Card lifecycle
        .route("/api/create", post(cards::create_card))
        .route("/api/fetch", get(cards::fetch_card))
        .route("/api/update", put(cards::update_card))
        .route("/api/delete", delete(cards::delete_card))
        // Service info
        .route("/api/build-info", get(info::build_info))
        .route("/api/contact-info", get(info::contact_info))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
        )
        .with_state(state)
}
