//! HTTP REST API routes

mod campaign_routes;
mod expedition_routes;
mod progress_routes;
mod roster_routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use campaign_routes::*;
pub use expedition_routes::*;
pub use progress_routes::*;
pub use roster_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Campaign routes
        .route("/api/campaigns", get(campaign_routes::list_campaigns))
        .route("/api/campaigns", post(campaign_routes::create_campaign))
        .route("/api/campaigns/{id}", get(campaign_routes::get_campaign))
        .route("/api/campaigns/{id}", put(campaign_routes::update_campaign))
        .route(
            "/api/campaigns/{id}",
            delete(campaign_routes::delete_campaign),
        )
        // Roster routes
        .route(
            "/api/campaigns/{id}/members/active",
            post(roster_routes::add_active_member),
        )
        .route(
            "/api/campaigns/{id}/members/benched",
            post(roster_routes::add_benched_member),
        )
        .route(
            "/api/campaigns/{id}/members/replace",
            put(roster_routes::replace_active_member),
        )
        .route(
            "/api/campaigns/{id}/members/{character_id}/bench",
            put(roster_routes::set_bench_state),
        )
        .route(
            "/api/campaigns/{id}/members/{character_id}",
            delete(roster_routes::remove_member),
        )
        .route(
            "/api/campaigns/{id}/leader/{character_id}",
            put(roster_routes::set_leader),
        )
        .route(
            "/api/campaigns/{id}/leader",
            delete(roster_routes::clear_leader),
        )
        // Content and progress routes
        .route("/api/kingdoms", get(progress_routes::list_kingdoms))
        .route(
            "/api/kingdoms/{kingdom_id}/stage",
            get(progress_routes::get_kingdom_stage),
        )
        .route(
            "/api/campaigns/{id}/kingdoms/{kingdom_id}/progress/single-attempt",
            post(progress_routes::record_single_attempt),
        )
        .route(
            "/api/campaigns/{id}/kingdoms/{kingdom_id}/progress/delta",
            post(progress_routes::add_progress_delta),
        )
        .route(
            "/api/campaigns/{id}/members/{character_id}/advance-chapter",
            post(progress_routes::advance_member_chapter),
        )
        .route(
            "/api/campaigns/{id}/kingdoms/{kingdom_id}/adventures",
            get(progress_routes::list_adventures),
        )
        .route(
            "/api/campaigns/{id}/kingdoms/{kingdom_id}/contracts",
            get(progress_routes::list_contracts),
        )
        .route(
            "/api/campaigns/{id}/kingdoms/{kingdom_id}/stage/{character_id}",
            get(progress_routes::get_member_stage),
        )
        // Expedition routes
        .route(
            "/api/campaigns/{id}/expedition",
            post(expedition_routes::begin_expedition),
        )
        .route(
            "/api/campaigns/{id}/expedition",
            delete(expedition_routes::end_expedition),
        )
        .route(
            "/api/campaigns/{id}/expedition/destination",
            put(expedition_routes::set_destination),
        )
        .route(
            "/api/campaigns/{id}/expedition/choices",
            post(expedition_routes::set_choice),
        )
        .route(
            "/api/campaigns/{id}/expedition/choices/status",
            put(expedition_routes::set_choice_status),
        )
        .route(
            "/api/campaigns/{id}/expedition/advance",
            post(expedition_routes::advance_phase),
        )
        .route(
            "/api/campaigns/{id}/expedition/stage",
            get(expedition_routes::get_expedition_stage),
        )
}
