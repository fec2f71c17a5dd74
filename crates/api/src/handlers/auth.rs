//! Handlers for player and staff authentication.
//!
//! Both login routes sit behind the failed-attempt rate limiter: a blocked
//! source gets 429 before any credential lookup, and the failure that
//! trips the threshold returns 429 instead of 401.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pitboss_core::audit::action_kinds;
use pitboss_core::card::generate_card_number;
use pitboss_core::error::CoreError;
use serde::{Deserialize, Serialize};

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::models::player::CreatePlayer;
use pitboss_db::repositories::{ActivityLogRepo, PlayerRepo, StaffRepo};

use crate::auth::jwt::{generate_player_token, generate_staff_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::rate_limit::{check_blocked, record_failure, record_success, ClientIp};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PlayerLoginRequest {
    pub card_number: String,
    pub credential: String,
    /// `"pin"` (default) or `"phone"` for last-four verification.
    pub method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerRegisterRequest {
    pub first_name: String,
    pub last_initial: String,
    pub phone: String,
    pub email: Option<String>,
    pub pin: String,
}

#[derive(Debug, Deserialize)]
pub struct StaffLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerAuthView {
    pub id: i64,
    pub card_number: String,
    pub name: String,
    pub points: i64,
    pub rank: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PlayerLoginResponse {
    pub token: String,
    pub player: PlayerAuthView,
}

#[derive(Debug, Serialize)]
pub struct StaffAuthView {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct StaffLoginResponse {
    pub token: String,
    pub staff: StaffAuthView,
}

// ---------------------------------------------------------------------------
// Player login
// ---------------------------------------------------------------------------

/// POST /auth/player/login
pub async fn player_login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(req): Json<PlayerLoginRequest>,
) -> AppResult<impl IntoResponse> {
    check_blocked(&state, &ip).await?;

    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid card number or credentials".into()));

    let Some(player) = PlayerRepo::find_by_card(&state.pool, &req.card_number).await? else {
        if let Some(blocked) = record_failure(&state, &ip).await {
            return Err(blocked);
        }
        return Err(invalid());
    };

    let is_valid = match req.method.as_deref() {
        Some("phone") => player.phone_last4 == req.credential,
        _ => verify_password(&req.credential, &player.pin_hash),
    };

    if !is_valid {
        if let Some(blocked) = record_failure(&state, &ip).await {
            return Err(blocked);
        }
        return Err(invalid());
    }

    record_success(&state, &ip).await;

    let name = player.name();
    let token = generate_player_token(player.id, &player.card_number, &name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::PLAYER_LOGIN,
            player_id: Some(player.id),
            player_name: Some(name.clone()),
            details: Some("Player logged in".into()),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: PlayerLoginResponse {
            token,
            player: PlayerAuthView {
                id: player.id,
                card_number: player.card_number.clone(),
                name,
                points: player.points_balance,
                rank: player.rank,
            },
        },
    }))
}

// ---------------------------------------------------------------------------
// Player registration
// ---------------------------------------------------------------------------

/// POST /auth/player/register
pub async fn player_register(
    State(state): State<AppState>,
    Json(req): Json<PlayerRegisterRequest>,
) -> AppResult<impl IntoResponse> {
    if PlayerRepo::find_by_phone(&state.pool, &req.phone).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Phone number already registered".into(),
        )));
    }

    // Card numbers are random five-digit strings; retry on collision.
    let mut card_number = generate_card_number();
    while PlayerRepo::find_by_card(&state.pool, &card_number).await?.is_some() {
        card_number = generate_card_number();
    }

    let pin_hash = hash_password(&req.pin)
        .map_err(|e| AppError::InternalError(format!("PIN hashing failed: {e}")))?;

    let phone_last4 = req.phone.chars().rev().take(4).collect::<Vec<_>>();
    let phone_last4: String = phone_last4.into_iter().rev().collect();

    let player = PlayerRepo::create(
        &state.pool,
        &CreatePlayer {
            card_number,
            first_name: req.first_name,
            last_initial: req.last_initial.to_uppercase(),
            phone: req.phone,
            phone_last4,
            email: req.email,
            pin_hash,
        },
    )
    .await?;

    let name = player.name();
    let token = generate_player_token(player.id, &player.card_number, &name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::PLAYER_REGISTER,
            player_id: Some(player.id),
            player_name: Some(name.clone()),
            details: Some("New player registered".into()),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: PlayerLoginResponse {
            token,
            player: PlayerAuthView {
                id: player.id,
                card_number: player.card_number.clone(),
                name,
                points: 0,
                rank: None,
            },
        },
    }))
}

// ---------------------------------------------------------------------------
// Staff login
// ---------------------------------------------------------------------------

/// POST /auth/staff/login
pub async fn staff_login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(req): Json<StaffLoginRequest>,
) -> AppResult<impl IntoResponse> {
    check_blocked(&state, &ip).await?;

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    let Some(staff) = StaffRepo::find_by_username(&state.pool, &req.username).await? else {
        if let Some(blocked) = record_failure(&state, &ip).await {
            return Err(blocked);
        }
        return Err(invalid());
    };

    if !verify_password(&req.password, &staff.password_hash) {
        if let Some(blocked) = record_failure(&state, &ip).await {
            return Err(blocked);
        }
        return Err(invalid());
    }

    record_success(&state, &ip).await;

    let token = generate_staff_token(staff.id, &staff.name, &staff.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::STAFF_LOGIN,
            staff_id: Some(staff.id),
            staff_name: Some(staff.name.clone()),
            details: Some("Staff logged in".into()),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: StaffLoginResponse {
            token,
            staff: StaffAuthView {
                id: staff.id,
                username: staff.username,
                name: staff.name,
                role: staff.role,
            },
        },
    }))
}

// ---------------------------------------------------------------------------
// Current principal
// ---------------------------------------------------------------------------

/// GET /auth/me
pub async fn me(principal: AuthPrincipal) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: serde_json::json!({
            "id": principal.id,
            "kind": principal.kind,
            "name": principal.name,
            "role": principal.role,
            "card_number": principal.card_number,
        }),
    }))
}
