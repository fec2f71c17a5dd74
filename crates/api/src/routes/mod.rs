//! Route tree assembly.

pub mod health;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket (live displays)
///
/// /auth/player/register                register (public)
/// /auth/player/login                   login (public, rate limited)
/// /auth/staff/login                    login (public, rate limited)
/// /auth/me                             current principal (requires auth)
///
/// /players                             list/search
/// /players/{id}                        get
/// /players/card/{card_number}          get by card
/// /players/{id}/checkin                check in (staff)
/// /players/{id}/checkout               check out + points (staff)
///
/// /points/leaderboard                  ranked standings
/// /points/top30                        qualifying cutoff
/// /points/award                        manual award (staff)
///
/// /waitlist                            all queues / join
/// /waitlist/{game_key}                 one game's queue
/// /waitlist/player/{card_number}       a player's entries
/// /waitlist/{id}/call                  page player (staff)
/// /waitlist/{id}/seat                  seat player (staff)
/// /waitlist/{id}                       remove (staff)
///
/// /tables                              list with seats / open (staff)
/// /tables/{n}                          get / close (staff)
/// /tables/{n}/seats/{s}                assign / vacate (staff)
///
/// /flush/leaderboard                   badge standings
/// /flush/jackpots                      pool amounts
/// /flush/{player_id}/suit              award badge (staff)
/// /flush/reset                         reset incomplete (staff)
///
/// /games                               list / create (admin)
/// /games/{id}                          update / deactivate (admin)
///
/// /tournaments                         list / create (staff)
/// /tournaments/{id}                    detail
/// /tournaments/{id}/register           register (public)
///
/// /orders                              queue / place
/// /orders/{id}/start                   start (staff)
/// /orders/{id}/complete                complete (staff)
/// /orders/{id}                         cancel (staff)
///
/// /activity                            audit feed (staff)
/// /activity/export/csv                 CSV export (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::handler::ws_handler))
        // --- Auth ---
        .route("/auth/player/register", post(handlers::auth::player_register))
        .route("/auth/player/login", post(handlers::auth::player_login))
        .route("/auth/staff/login", post(handlers::auth::staff_login))
        .route("/auth/me", get(handlers::auth::me))
        // --- Players ---
        .route("/players", get(handlers::players::list_players))
        .route("/players/{id}", get(handlers::players::get_player))
        .route(
            "/players/card/{card_number}",
            get(handlers::players::get_player_by_card),
        )
        .route("/players/{id}/checkin", post(handlers::players::checkin))
        .route("/players/{id}/checkout", post(handlers::players::checkout))
        // --- Points ---
        .route("/points/leaderboard", get(handlers::points::leaderboard))
        .route("/points/top30", get(handlers::points::top30))
        .route("/points/award", post(handlers::points::award))
        // --- Waitlist ---
        .route(
            "/waitlist",
            get(handlers::waitlist::list_waitlists).post(handlers::waitlist::join),
        )
        .route(
            "/waitlist/player/{card_number}",
            get(handlers::waitlist::list_for_player),
        )
        // GET takes a game key, DELETE an entry id; one registration
        // because the params share a position.
        .route(
            "/waitlist/{key}",
            get(handlers::waitlist::list_for_game).delete(handlers::waitlist::remove),
        )
        .route("/waitlist/{key}/call", put(handlers::waitlist::call))
        .route("/waitlist/{key}/seat", put(handlers::waitlist::seat))
        // --- Tables & seats ---
        .route(
            "/tables",
            get(handlers::tables::list_tables).post(handlers::tables::open_table),
        )
        .route(
            "/tables/{table_number}",
            get(handlers::tables::get_table).delete(handlers::tables::close_table),
        )
        .route(
            "/tables/{table_number}/seats/{seat_number}",
            post(handlers::tables::assign_seat).delete(handlers::tables::vacate_seat),
        )
        // --- Flush promotion ---
        .route("/flush/leaderboard", get(handlers::flush::leaderboard))
        .route("/flush/jackpots", get(handlers::flush::jackpots))
        .route("/flush/reset", delete(handlers::flush::reset))
        .route("/flush/{player_id}/suit", post(handlers::flush::award_suit))
        // --- Games ---
        .route(
            "/games",
            get(handlers::games::list_games).post(handlers::games::create_game),
        )
        .route(
            "/games/{id}",
            put(handlers::games::update_game).delete(handlers::games::delete_game),
        )
        // --- Tournaments ---
        .route(
            "/tournaments",
            get(handlers::tournaments::list_tournaments)
                .post(handlers::tournaments::create_tournament),
        )
        .route("/tournaments/{id}", get(handlers::tournaments::get_tournament))
        .route(
            "/tournaments/{id}/register",
            post(handlers::tournaments::register),
        )
        // --- Food orders ---
        .route(
            "/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/orders/{id}/start", put(handlers::orders::start_order))
        .route("/orders/{id}/complete", put(handlers::orders::complete_order))
        .route("/orders/{id}", delete(handlers::orders::cancel_order))
        // --- Activity feed ---
        .route("/activity", get(handlers::activity::list_activity))
        .route("/activity/export/csv", get(handlers::activity::export_csv))
}
