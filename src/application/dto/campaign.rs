//! Campaign and roster DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::dto::expedition::ExpeditionResponseDto;
use crate::domain::aggregates::Campaign;
use crate::domain::entities::CampaignMember;
use crate::domain::value_objects::CampaignSettings;

/// Request to create a campaign
#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequestDto {
    pub name: String,
    #[serde(default)]
    pub settings: Option<CampaignSettings>,
}

/// Request to update a campaign's name and/or settings
#[derive(Debug, Deserialize)]
pub struct UpdateCampaignRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub settings: Option<CampaignSettings>,
}

/// Request to enroll or identify a character in a campaign
#[derive(Debug, Deserialize)]
pub struct JoinMemberRequestDto {
    pub character_id: String,
    pub template_id: String,
    pub name: String,
}

/// Request to toggle a member's bench state
#[derive(Debug, Deserialize)]
pub struct BenchRequestDto {
    pub benched: bool,
}

/// Request to swap the active holder of a template slot
#[derive(Debug, Deserialize)]
pub struct ReplaceActiveRequestDto {
    pub template_id: String,
    pub character_id: String,
    pub name: String,
}

/// Structured conflict payload returned instead of a roster mutation
#[derive(Debug, Serialize)]
pub struct ConflictResponseDto {
    pub conflict: ConflictDetailDto,
}

#[derive(Debug, Serialize)]
pub struct ConflictDetailDto {
    pub existing_id: String,
}

#[derive(Debug, Serialize)]
pub struct CampaignResponseDto {
    pub id: String,
    pub name: String,
    pub settings: CampaignSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub party_leader_id: Option<String>,
    pub members: Vec<MemberResponseDto>,
    pub expedition: Option<ExpeditionResponseDto>,
}

impl From<Campaign> for CampaignResponseDto {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id.to_string(),
            party_leader_id: campaign.party_leader().map(|id| id.to_string()),
            members: campaign
                .members()
                .iter()
                .map(MemberResponseDto::from)
                .collect(),
            expedition: campaign.expedition().map(ExpeditionResponseDto::from),
            name: campaign.name,
            settings: campaign.settings,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberResponseDto {
    pub character_id: String,
    pub template_id: String,
    pub name: String,
    pub is_active: bool,
    pub is_leader: bool,
    pub joined_at: DateTime<Utc>,
    pub chapter: u8,
    pub quest_completed: bool,
    pub investigations_done: u32,
}

impl From<&CampaignMember> for MemberResponseDto {
    fn from(member: &CampaignMember) -> Self {
        Self {
            character_id: member.character_id.to_string(),
            template_id: member.template_id.to_string(),
            name: member.name.clone(),
            is_active: member.is_active,
            is_leader: member.is_leader,
            joined_at: member.joined_at,
            chapter: member.progress.chapter,
            quest_completed: member.progress.quest_completed,
            investigations_done: member.progress.investigations_done(),
        }
    }
}
