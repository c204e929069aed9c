//! Expedition API routes
//!
//! Choice rejections and blocked transitions are 422 responses with a
//! structured payload; the expedition state itself never errors over them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::application::dto::{
    BestiaryStageDto, BlockedResponseDto, ChoiceStatusRequestDto, SetChoiceRequestDto,
    SetDestinationRequestDto,
};
use crate::application::services::{ChoiceOutcome, ExpeditionService, PhaseAdvance, StageService};
use crate::domain::value_objects::{CharacterId, KingdomId};
use crate::infrastructure::http::campaign_routes::parse_campaign_id;
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChoiceRejectedResponse {
    pub rejected: String,
}

#[derive(Debug, Serialize)]
pub struct PhaseResponse {
    pub phase: String,
}

fn choice_response(outcome: ChoiceOutcome) -> Response {
    match outcome {
        ChoiceOutcome::Recorded => StatusCode::NO_CONTENT.into_response(),
        ChoiceOutcome::Rejected(reason) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ChoiceRejectedResponse { rejected: reason }),
        )
            .into_response(),
    }
}

/// Start a fresh expedition cycle
pub async fn begin_expedition(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .expedition_service
        .begin_expedition(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::CREATED)
}

/// End the expedition, clearing its state
pub async fn end_expedition(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .expedition_service
        .end_expedition(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Pick the destination kingdom for the current cycle
pub async fn set_destination(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetDestinationRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .expedition_service
        .set_destination(campaign_id, KingdomId::from(req.kingdom_id))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Record a knight's choice for the current cycle
pub async fn set_choice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetChoiceRequestDto>,
) -> Result<Response, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let Some(choice) = req.to_choice() else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Investigation choices require a chapter and slot".to_string(),
        ));
    };

    let outcome = state
        .expedition_service
        .set_choice(campaign_id, CharacterId::from(req.character_id), choice)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(choice_response(outcome))
}

/// Resolve a knight's in-progress choice
pub async fn set_choice_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ChoiceStatusRequestDto>,
) -> Result<Response, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let outcome = state
        .expedition_service
        .set_choice_status(
            campaign_id,
            CharacterId::from(req.character_id),
            req.status.into(),
        )
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(choice_response(outcome))
}

/// Advance to the next expedition phase
pub async fn advance_phase(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let advance = state
        .expedition_service
        .advance_phase(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(match advance {
        PhaseAdvance::Advanced(phase) => Json(PhaseResponse {
            phase: phase.to_string(),
        })
        .into_response(),
        PhaseAdvance::Blocked(blocked) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(BlockedResponseDto { blocked }),
        )
            .into_response(),
    })
}

/// Resolve the stage row that applies to the live expedition
pub async fn get_expedition_stage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BestiaryStageDto>, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let stage = state
        .stage_service
        .expedition_stage(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(BestiaryStageDto::from(stage)))
}
