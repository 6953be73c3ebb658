use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::entities::commission::{CommissionRecord, CommissionStatus, NewCommission};
use crate::domain::errors::CommissionError;
use crate::domain::services::commission::CommissionEngine;
use crate::domain::value_objects::sale_price::SalePrice;

/// Request body for recording a sale
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordSaleRequest {
    pub affiliate_username: String,
    pub affiliate_role: String,
    pub customer_username: String,
    pub product_id: String,
    pub sale_price: f64,
}

/// Request body for a single status update
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Request body for a bulk status update
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkUpdateStatusRequest {
    pub ids: Vec<String>,
    pub status: String,
}

/// API response for a bulk status update
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkUpdateStatusResponse {
    pub requested: usize,
    pub updated: usize,
}

/// API response for an affiliate's commission history
#[derive(Debug, Serialize, Deserialize)]
pub struct AffiliateCommissionsResponse {
    pub affiliate_username: String,
    pub commissions: Vec<CommissionRecord>,
    pub total: usize,
}

/// Record a commission for a sale made through an affiliate
pub async fn record_commission(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordSaleRequest>,
) -> Result<Json<CommissionRecord>, (StatusCode, Json<ErrorResponse>)> {
    if !state.engine.is_eligible_affiliate(&request.affiliate_role) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: format!("Role not eligible for commission: {}", request.affiliate_role),
            }),
        ));
    }

    let price = SalePrice::new(request.sale_price).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let amount = state.engine.calculate_commission(&request.product_id, price);
    let product_name = state
        .engine
        .rule(&request.product_id)
        .map(|r| r.product_name.clone())
        .unwrap_or_else(|| request.product_id.clone());

    let record = state
        .ledger
        .record(NewCommission {
            affiliate_username: request.affiliate_username,
            customer_username: request.customer_username,
            product_id: request.product_id,
            product_name,
            amount,
        })
        .await;

    Ok(Json(record))
}

/// Commission history for one affiliate, in insertion order
pub async fn get_affiliate_commissions(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Json<AffiliateCommissionsResponse> {
    let commissions = state.ledger.commissions_for(&username).await;
    let total = commissions.len();
    Json(AffiliateCommissionsResponse {
        affiliate_username: username,
        commissions,
        total,
    })
}

/// Reject blank record ids before they reach the ledger, which would
/// otherwise report them as a plain miss.
fn validate_record_id(id: &str) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if id.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: CommissionError::InvalidRecordId("id must not be blank".to_string())
                    .to_string(),
            }),
        ));
    }
    Ok(())
}

/// Update the status of one commission record
pub async fn update_commission_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    validate_record_id(&id)?;
    let status = CommissionStatus::from_str(&request.status).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    if state.ledger.update_status(&id, status).await {
        Ok(Json(serde_json::json!({ "updated": true, "id": id })))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Commission record not found: {}", id),
            }),
        ))
    }
}

/// Apply one status to many commission records; unknown ids are skipped
pub async fn bulk_update_commission_status(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BulkUpdateStatusRequest>,
) -> Result<Json<BulkUpdateStatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    for id in &request.ids {
        validate_record_id(id)?;
    }
    let status = CommissionStatus::from_str(&request.status).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let updated = state.ledger.bulk_update_status(&request.ids, status).await;
    Ok(Json(BulkUpdateStatusResponse {
        requested: request.ids.len(),
        updated,
    }))
}

/// Whether a member role may earn commission at all
pub async fn check_affiliate_eligibility(
    State(state): State<Arc<AppState>>,
    Path(role): Path<String>,
) -> Json<serde_json::Value> {
    let eligible = state.engine.is_eligible_affiliate(&role);
    Json(serde_json::json!({ "role": role, "eligible": eligible }))
}

/// Generate a referral code for an affiliate
pub async fn generate_affiliate_code(Path(username): Path<String>) -> Json<serde_json::Value> {
    let code = CommissionEngine::generate_affiliate_code(&username);
    Json(serde_json::json!({ "username": username, "code": code }))
}
