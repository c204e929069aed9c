//! Roster API routes
//!
//! Template-slot conflicts surface as 409 with a structured payload naming
//! the existing holder; the UI offers replacement from there. Operations on
//! unknown members inside a known campaign are no-ops and report 204.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::dto::{
    BenchRequestDto, ConflictDetailDto, ConflictResponseDto, JoinMemberRequestDto,
    ReplaceActiveRequestDto,
};
use crate::application::services::RosterService;
use crate::domain::aggregates::{AddActiveOutcome, MemberMeta};
use crate::domain::value_objects::{CharacterId, TemplateId};
use crate::infrastructure::http::campaign_routes::parse_campaign_id;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetLeaderRequest {
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SetLeaderRequest {
    fn into_meta(self) -> Option<MemberMeta> {
        match (self.template_id, self.name) {
            (Some(template_id), Some(name)) => Some(MemberMeta {
                template_id: TemplateId::from(template_id),
                name,
            }),
            _ => None,
        }
    }
}

/// Activate a character in the campaign party
pub async fn add_active_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<JoinMemberRequestDto>,
) -> Result<Response, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let meta = MemberMeta {
        template_id: TemplateId::from(req.template_id),
        name: req.name,
    };

    let outcome = state
        .roster_service
        .add_active(campaign_id, CharacterId::from(req.character_id), meta)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match outcome {
        None => Err((StatusCode::NOT_FOUND, "Campaign not found".to_string())),
        Some(AddActiveOutcome::Activated) => Ok(StatusCode::CREATED.into_response()),
        Some(AddActiveOutcome::Conflict { existing }) => Ok((
            StatusCode::CONFLICT,
            Json(ConflictResponseDto {
                conflict: ConflictDetailDto {
                    existing_id: existing.to_string(),
                },
            }),
        )
            .into_response()),
    }
}

/// Ensure a benched membership exists
pub async fn add_benched_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<JoinMemberRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let meta = MemberMeta {
        template_id: TemplateId::from(req.template_id),
        name: req.name,
    };

    state
        .roster_service
        .add_benched(campaign_id, CharacterId::from(req.character_id), meta)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::CREATED)
}

/// Swap the active holder of a template slot
pub async fn replace_active_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ReplaceActiveRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    let template_id = TemplateId::from(req.template_id);
    let meta = MemberMeta {
        template_id: template_id.clone(),
        name: req.name,
    };

    state
        .roster_service
        .replace_active(
            campaign_id,
            template_id,
            CharacterId::from(req.character_id),
            meta,
        )
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Bench or re-activate a member
pub async fn set_bench_state(
    State(state): State<Arc<AppState>>,
    Path((id, character_id)): Path<(String, String)>,
    Json(req): Json<BenchRequestDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .roster_service
        .set_bench_state(campaign_id, CharacterId::from(character_id), req.benched)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a member from the campaign
pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    Path((id, character_id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .roster_service
        .remove(campaign_id, CharacterId::from(character_id))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Make a character the exclusive party leader
pub async fn set_leader(
    State(state): State<Arc<AppState>>,
    Path((id, character_id)): Path<(String, String)>,
    Json(req): Json<SetLeaderRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .roster_service
        .set_leader(campaign_id, CharacterId::from(character_id), req.into_meta())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Clear the party leader
pub async fn clear_leader(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let campaign_id = parse_campaign_id(&id)?;
    state
        .roster_service
        .clear_leader(campaign_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}
