//! Campaign API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    CampaignResponseDto, CreateCampaignRequestDto, UpdateCampaignRequestDto,
};
use crate::application::services::{
    CampaignService, CreateCampaignRequest, UpdateCampaignRequest,
};
use crate::domain::value_objects::CampaignId;
use crate::infrastructure::state::AppState;

pub(super) fn parse_campaign_id(raw: &str) -> Result<CampaignId, (StatusCode, String)> {
    Uuid::parse_str(raw)
        .map(CampaignId::from)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid campaign ID".to_string()))
}

/// List all campaigns
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CampaignResponseDto>>, (StatusCode, String)> {
    let campaigns = state
        .campaign_service
        .list_campaigns()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        campaigns.into_iter().map(CampaignResponseDto::from).collect(),
    ))
}

/// Create a new campaign
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCampaignRequestDto>,
) -> Result<(StatusCode, Json<CampaignResponseDto>), (StatusCode, String)> {
    let campaign = state
        .campaign_service
        .create_campaign(CreateCampaignRequest {
            name: req.name,
            settings: req.settings.unwrap_or_default(),
        })
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok((StatusCode::CREATED, Json(CampaignResponseDto::from(campaign))))
}

/// Get a campaign by ID
pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CampaignResponseDto>, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let campaign = state
        .campaign_service
        .get_campaign(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Campaign not found".to_string()))?;

    Ok(Json(CampaignResponseDto::from(campaign)))
}

/// Update a campaign's name and/or settings
pub async fn update_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCampaignRequestDto>,
) -> Result<Json<CampaignResponseDto>, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let campaign = state
        .campaign_service
        .update_campaign(
            campaign_id,
            UpdateCampaignRequest {
                name: req.name,
                settings: req.settings,
            },
        )
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Campaign not found".to_string()))?;

    Ok(Json(CampaignResponseDto::from(campaign)))
}

/// Delete a campaign
pub async fn delete_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .campaign_service
        .delete_campaign(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}
