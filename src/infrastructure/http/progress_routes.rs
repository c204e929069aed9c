//! Progress ledger and stage API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::dto::{
    AdventureViewDto, BestiaryStageDto, ContractViewDto, DeltaRequestDto, SingleAttemptRequestDto,
};
use crate::application::services::{ProgressService, StageService};
use crate::domain::value_objects::{CharacterId, ContentId, KingdomId};
use crate::infrastructure::http::campaign_routes::parse_campaign_id;
use crate::infrastructure::state::AppState;

/// One kingdom as listed by the catalog
#[derive(Debug, Serialize)]
pub struct KingdomSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StageQuery {
    pub chapter: u8,
    #[serde(default)]
    pub quest_completed: bool,
    #[serde(default)]
    pub investigations_done: u32,
}

/// List the kingdoms known to the content catalog
pub async fn list_kingdoms(State(state): State<Arc<AppState>>) -> Json<Vec<KingdomSummary>> {
    Json(
        state
            .catalog
            .kingdoms()
            .into_iter()
            .map(|k| KingdomSummary {
                id: k.id.to_string(),
                name: k.name,
            })
            .collect(),
    )
}

/// Mark a single-attempt content unit as attempted
pub async fn record_single_attempt(
    State(state): State<Arc<AppState>>,
    Path((id, kingdom_id)): Path<(String, String)>,
    Json(req): Json<SingleAttemptRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let kingdom_id = KingdomId::from(kingdom_id);
    let content_id = ContentId::derive(&kingdom_id, &req.name);

    state
        .progress_service
        .record_single_attempt(campaign_id, kingdom_id, content_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add a positive delta to a repeatable content unit
pub async fn add_progress_delta(
    State(state): State<Arc<AppState>>,
    Path((id, kingdom_id)): Path<(String, String)>,
    Json(req): Json<DeltaRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let kingdom_id = KingdomId::from(kingdom_id);
    let content_id = ContentId::derive(&kingdom_id, &req.name);

    state
        .progress_service
        .increment_by_delta(campaign_id, kingdom_id, content_id, req.delta)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Move a member to the next chapter
pub async fn advance_member_chapter(
    State(state): State<Arc<AppState>>,
    Path((id, character_id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .progress_service
        .advance_member_chapter(campaign_id, CharacterId::from(character_id))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Catalog adventures merged with the campaign's ledger
pub async fn list_adventures(
    State(state): State<Arc<AppState>>,
    Path((id, kingdom_id)): Path<(String, String)>,
) -> Result<Json<Vec<AdventureViewDto>>, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let views = state
        .progress_service
        .adventure_views(campaign_id, KingdomId::from(kingdom_id))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(views.into_iter().map(AdventureViewDto::from).collect()))
}

/// Catalog contracts merged with the campaign's ledger
pub async fn list_contracts(
    State(state): State<Arc<AppState>>,
    Path((id, kingdom_id)): Path<(String, String)>,
) -> Result<Json<Vec<ContractViewDto>>, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let views = state
        .progress_service
        .contract_views(campaign_id, KingdomId::from(kingdom_id))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(views.into_iter().map(ContractViewDto::from).collect()))
}

/// Resolve a kingdom's stage row for explicit progression inputs
pub async fn get_kingdom_stage(
    State(state): State<Arc<AppState>>,
    Path(kingdom_id): Path<String>,
    Query(query): Query<StageQuery>,
) -> Json<BestiaryStageDto> {
    let stage = state.stage_service.kingdom_stage(
        &KingdomId::from(kingdom_id),
        query.chapter,
        query.quest_completed,
        query.investigations_done,
    );
    Json(BestiaryStageDto::from(stage))
}

/// Resolve the stage row for one member's recorded progression
pub async fn get_member_stage(
    State(state): State<Arc<AppState>>,
    Path((id, kingdom_id, character_id)): Path<(String, String, String)>,
) -> Result<Json<BestiaryStageDto>, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let stage = state
        .stage_service
        .member_stage(
            campaign_id,
            KingdomId::from(kingdom_id),
            CharacterId::from(character_id),
        )
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(BestiaryStageDto::from(stage)))
}
