//! Handlers for the flush jackpot promotion.
//!
//! Badge awards resolve the active session from the local wall clock; the
//! completion check and jackpot payout are claimed atomically so a race on
//! the final badge pays out exactly once.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Local, Utc};
use pitboss_core::audit::{action_kinds, flush_action_kind};
use pitboss_core::error::CoreError;
use pitboss_core::flush::{resolve_session, FlushSession, Suit};
use pitboss_core::types::DbId;
use pitboss_events::{topics, FloorEvent};
use serde::{Deserialize, Serialize};

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::models::flush::FlushProgress;
use pitboss_db::repositories::{ActivityLogRepo, FlushJackpotRepo, FlushProgressRepo, PlayerRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AwardSuitRequest {
    pub suit: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    /// Restrict the reset to one session type; both when absent.
    pub session: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardRow {
    pub id: DbId,
    pub name: Option<String>,
    pub card_number: Option<String>,
    pub suits: Vec<&'static str>,
    pub count: usize,
    pub score: String,
}

impl From<&FlushProgress> for LeaderboardRow {
    fn from(p: &FlushProgress) -> Self {
        let badges = p.badges();
        let suits: Vec<&'static str> = badges.collected().iter().map(|s| s.letter()).collect();
        let count = badges.count();
        Self {
            id: p.player_id,
            name: p.player_name.clone(),
            card_number: p.card_number.clone(),
            suits,
            count,
            score: format!("{count}/4"),
        }
    }
}

fn publish_flush_updated(state: &AppState) {
    state
        .event_bus
        .publish(FloorEvent::new(topics::FLUSH_DISPLAY, "flush:updated"));
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /flush/leaderboard -- badge standings for the active session.
pub async fn leaderboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let resolved = resolve_session(Local::now().naive_local());

    let leaders = match resolved {
        Some((session, session_date)) => {
            let progress = FlushProgressRepo::leaderboard(&state.pool, session, session_date).await?;
            progress.iter().map(LeaderboardRow::from).collect()
        }
        None => Vec::new(),
    };

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "session": resolved.map(|(session, _)| session),
            "leaders": leaders,
        }),
    }))
}

/// GET /flush/jackpots -- current pool amounts.
pub async fn jackpots(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let jackpots = FlushJackpotRepo::list_all(&state.pool).await?;
    let active = resolve_session(Local::now().naive_local()).map(|(session, _)| session);

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "jackpots": jackpots,
            "active_session": active,
        }),
    }))
}

// ---------------------------------------------------------------------------
// Badge award
// ---------------------------------------------------------------------------

/// POST /flush/{player_id}/suit -- award one suit badge.
///
/// Fails with `NoActiveSession` outside both windows. Setting a badge
/// that is already set is a no-op. When the fourth badge lands, the
/// completion is claimed, the matching jackpot resets to its base amount,
/// and the win is recorded.
pub async fn award_suit(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(player_id): Path<DbId>,
    Json(req): Json<AwardSuitRequest>,
) -> AppResult<impl IntoResponse> {
    let suit = Suit::parse(&req.suit)?;

    let (session, session_date) = resolve_session(Local::now().naive_local())
        .ok_or(AppError::Core(CoreError::NoActiveSession))?;

    let player = PlayerRepo::find_by_id(&state.pool, player_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Player", player_id)))?;
    let player_name = player.name();

    let progress = FlushProgressRepo::find_or_create(
        &state.pool,
        player.id,
        &player_name,
        &player.card_number,
        session,
        session_date,
    )
    .await?;

    let progress = FlushProgressRepo::award_suit(&state.pool, progress.id, suit).await?;

    if progress.badges().is_complete() && progress.completed_at.is_none() {
        // Claim the completion; at most one concurrent award wins this.
        if FlushProgressRepo::mark_completed(&state.pool, progress.id, Utc::now())
            .await?
            .is_some()
        {
            record_win(&state, &staff.name, player.id, &player_name, session).await?;
        }
    }

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: flush_action_kind(suit),
            player_id: Some(player.id),
            player_name: Some(player_name.clone()),
            staff_id: Some(staff.id),
            staff_name: Some(staff.name.clone()),
            details: Some(format!("Awarded {} flush", suit.symbol())),
            ..Default::default()
        },
    )
    .await?;

    publish_flush_updated(&state);

    let badges = progress.badges();
    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": "Suit awarded",
            "suits": badges.collected().iter().map(|s| s.letter()).collect::<Vec<_>>(),
            "count": badges.count(),
        }),
    }))
}

/// Reset the session's jackpot to its base amount and record the win.
async fn record_win(
    state: &AppState,
    staff_name: &str,
    player_id: DbId,
    player_name: &str,
    session: FlushSession,
) -> AppResult<()> {
    let Some(jackpot) =
        FlushJackpotRepo::reset_to_base(&state.pool, session, player_id, Utc::now()).await?
    else {
        tracing::error!(session = session.as_str(), "No jackpot pool for session");
        return Ok(());
    };

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::FLUSH_WINNER,
            player_id: Some(player_id),
            player_name: Some(player_name.to_string()),
            staff_name: Some(staff_name.to_string()),
            details: Some(format!("WON THE FLUSH JACKPOT! ${}", jackpot.amount)),
            ..Default::default()
        },
    )
    .await?;

    state.event_bus.publish(
        FloorEvent::new(topics::FLUSH_DISPLAY, "flush:winner").with_payload(serde_json::json!({
            "player_id": player_id,
            "amount": jackpot.amount,
        })),
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// DELETE /flush/reset -- staff reset of incomplete progress records.
///
/// Completed records are immune; they persist for leaderboard history.
pub async fn reset(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Query(query): Query<ResetQuery>,
) -> AppResult<impl IntoResponse> {
    let sessions = match query.session.as_deref() {
        Some(s) => vec![FlushSession::parse(s)?],
        None => vec![FlushSession::Afternoon, FlushSession::LateNight],
    };

    let mut deleted = 0u64;
    for session in &sessions {
        deleted += FlushProgressRepo::reset_incomplete(&state.pool, *session).await?;
    }

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::FLUSH_RESET,
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            details: Some(format!("Flush progress reset ({deleted} records)")),
            ..Default::default()
        },
    )
    .await?;

    publish_flush_updated(&state);

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": "Flush progress reset",
            "deleted": deleted,
        }),
    }))
}
