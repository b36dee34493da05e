use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    app_state::AppState,
    db::models::{CardView, validate_mobile_number},
    error::ApiError,
};

pub const MESSAGE_201: &str = "Card created successfully";
pub const MESSAGE_200: &str = "Request processed successfully";
pub const MESSAGE_417_UPDATE: &str = "Update operation failed. Please try again or contact Dev team";
pub const MESSAGE_417_DELETE: &str = "Delete operation failed. Please try again or contact Dev team";

#[derive(Debug, Deserialize, Validate)]
pub struct MobileNumberQuery {
    #[serde(rename = "mobileNumber")]
    #[validate(custom(function = "validate_mobile_number"))]
    mobile_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status_code: String,
    pub status_msg: String,
}

impl StatusResponse {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status_code: status.as_u16().to_string(),
            status_msg: message.to_string(),
        }
    }
}

type StatusReply = (StatusCode, Json<StatusResponse>);

/// POST /api/create?mobileNumber={mobile}
/// Issues a new card with default limits
pub async fn create_card(
    uri: Uri,
    State(state): State<AppState>,
    params: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<StatusReply, ApiError> {
    let params = mobile_number_query(&uri, params)?;

    state
        .cards
        .create_card(&params.mobile_number)
        .await
        .map_err(|e| ApiError::from_card_error(uri.path(), e))?;

    Ok(reply(StatusCode::CREATED, MESSAGE_201))
}

/// GET /api/fetch?mobileNumber={mobile}
pub async fn fetch_card(
    uri: Uri,
    State(state): State<AppState>,
    params: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<Json<CardView>, ApiError> {
    let params = mobile_number_query(&uri, params)?;

    let card = state
        .cards
        .fetch_card(&params.mobile_number)
        .await
        .map_err(|e| ApiError::from_card_error(uri.path(), e))?;

    Ok(Json(card))
}

/// PUT /api/update
/// Replaces the mutable fields of the card named by `cardNumber`
pub async fn update_card(
    uri: Uri,
    State(state): State<AppState>,
    body: Result<Json<CardView>, JsonRejection>,
) -> Result<StatusReply, ApiError> {
    let Json(view) = body.map_err(|e| ApiError::bad_request(uri.path(), e.body_text()))?;
    view.validate()
        .map_err(|e| ApiError::validation(uri.path(), &e))?;

    let updated = state
        .cards
        .update_card(&view)
        .await
        .map_err(|e| ApiError::from_card_error(uri.path(), e))?;

    if updated {
        Ok(reply(StatusCode::OK, MESSAGE_200))
    } else {
        Ok(reply(StatusCode::EXPECTATION_FAILED, MESSAGE_417_UPDATE))
    }
}

/// DELETE /api/delete?mobileNumber={mobile}
pub async fn delete_card(
    uri: Uri,
    State(state): State<AppState>,
    params: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<StatusReply, ApiError> {
    let params = mobile_number_query(&uri, params)?;

    let deleted = state
        .cards
        .delete_card(&params.mobile_number)
        .await
        .map_err(|e| ApiError::from_card_error(uri.path(), e))?;

    if deleted {
        Ok(reply(StatusCode::OK, MESSAGE_200))
    } else {
        Ok(reply(StatusCode::EXPECTATION_FAILED, MESSAGE_417_DELETE))
    }
}

/// Unwraps the mobile number query, rejecting a missing or malformed one
fn mobile_number_query(
    uri: &Uri,
    params: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<MobileNumberQuery, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(uri.path(), e.body_text()))?;
    params
        .validate()
        .map_err(|e| ApiError::validation(uri.path(), &e))?;

    Ok(params)
}

fn reply(status: StatusCode, message: &str) -> StatusReply {
    (status, Json(StatusResponse::new(status, message)))
}
