use axum::{Json, extract::State};

use crate::{app_state::AppState, config::ContactInfo};

/// GET /api/build-info
pub async fn build_info(State(state): State<AppState>) -> String {
    state.config.build_version.clone()
}

/// GET /api/contact-info
pub async fn contact_info(State(state): State<AppState>) -> Json<ContactInfo> {
    Json(state.config.contact_info())
}
