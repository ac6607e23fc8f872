// ABOUTME: HTTP request handlers for deal operations
// ABOUTME: Deal ingestion plus list, detail and update proxies to the lending API

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use lendflow_core::{record_to_deal_view, Deal, DealUpdate, DealsPage, ExternalDealUpdate};
use lendflow_deals::IngestionMetadata;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CallerCredential;
use crate::error::{ApiResult, AppError};
use crate::pagination::DealListParams;
use crate::state::AppState;

/// Request body for creating a deal from free text
#[derive(Debug, Deserialize)]
pub struct CreateDealRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateDealResponse {
    pub success: bool,
    pub deal: Deal,
    pub message: String,
    pub metadata: IngestionMetadata,
}

/// Ingest a submitted deal
pub async fn create_deal(
    State(state): State<AppState>,
    credential: CallerCredential,
    body: Result<Json<CreateDealRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateDealResponse>)> {
    let Json(request) = body.map_err(|e| AppError::validation(e.body_text()))?;
    let content = request.content.unwrap_or_default();

    info!("Ingesting deal submission ({} chars)", content.chars().count());

    let outcome = state.ingestion.ingest(&content, credential.0).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateDealResponse {
            success: true,
            deal: outcome.deal,
            message: outcome.message,
            metadata: outcome.metadata,
        }),
    ))
}

/// List deals from the lending API
pub async fn list_deals(
    State(state): State<AppState>,
    credential: CallerCredential,
    params: Result<Query<DealListParams>, QueryRejection>,
) -> ApiResult<Json<DealsPage>> {
    let credential = credential.require()?;
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;

    info!(
        "Listing deals (page: {}, limit: {})",
        params.page(),
        params.limit()
    );

    let page = state
        .store
        .list_deals(&params.to_list_query(), &credential)
        .await?;

    let fetched = page.data.len();
    let deals = params
        .to_filter()
        .apply(page.data.iter().map(record_to_deal_view).collect());

    // Report the narrowed count once the local filter drops rows
    let total = if deals.len() < fetched {
        deals.len() as u64
    } else {
        page.total
    };

    Ok(Json(DealsPage {
        deals,
        total,
        current_page: page.current_page,
        total_pages: page.total_pages,
        start: page.start,
        end: page.end,
    }))
}

/// Get a single deal by ID
pub async fn get_deal(
    State(state): State<AppState>,
    credential: CallerCredential,
    Path(id): Path<String>,
) -> ApiResult<Json<Deal>> {
    let credential = credential.require()?;
    info!("Getting deal: {}", id);

    let record = state.store.get_deal(&id, &credential).await?;
    Ok(Json(record_to_deal_view(&record)))
}

/// Apply a partial update to a deal
pub async fn update_deal(
    State(state): State<AppState>,
    credential: CallerCredential,
    Path(id): Path<String>,
    body: Result<Json<DealUpdate>, JsonRejection>,
) -> ApiResult<Json<Deal>> {
    let credential = credential.require()?;
    let Json(update) = body.map_err(|e| AppError::validation(e.body_text()))?;

    if update.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    info!("Updating deal: {}", id);

    let record = state
        .store
        .update_deal(&id, &ExternalDealUpdate::from(update), &credential)
        .await?;
    Ok(Json(record_to_deal_view(&record)))
}
