//! Wall-clock scheduled jobs for the flush promotion.
//!
//! Three jobs keyed to local time:
//!
//! - **midnight** -- add each jackpot pool's configured daily increment;
//! - **20:00** -- delete incomplete afternoon progress (the window just
//!   closed);
//! - **02:00** -- delete incomplete late-night progress.
//!
//! The loop ticks once a minute and fires a job the first tick at or after
//! its boundary hour, guarded by the last-run date so a job runs at most
//! once per calendar day and a missed minute (restart, clock skew) is
//! caught by the next tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, Timelike};
use pitboss_core::flush::{FlushSession, AFTERNOON_START_HOUR, LATE_NIGHT_END_HOUR, LATE_NIGHT_START_HOUR};
use pitboss_events::{topics, FloorEvent};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use pitboss_db::repositories::{FlushJackpotRepo, FlushProgressRepo};

/// How often the scheduler checks the wall clock.
const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Last-run dates for each job, so boundaries fire once per day.
#[derive(Default)]
struct LastRun {
    increment: Option<NaiveDate>,
    afternoon_reset: Option<NaiveDate>,
    late_night_reset: Option<NaiveDate>,
}

/// Run the daily scheduler loop until `cancel` is triggered.
pub async fn run(pool: PgPool, event_bus: Arc<pitboss_events::EventBus>, cancel: CancellationToken) {
    tracing::info!("Daily flush scheduler started");

    let mut interval = tokio::time::interval(TICK_INTERVAL);
    let mut last = LastRun::default();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Daily flush scheduler stopping");
                break;
            }
            _ = interval.tick() => {
                tick(&pool, &event_bus, &mut last).await;
            }
        }
    }
}

/// One scheduler tick: fire any job whose boundary has passed today.
async fn tick(pool: &PgPool, event_bus: &pitboss_events::EventBus, last: &mut LastRun) {
    let now = Local::now().naive_local();
    let today = now.date();
    let hour = now.hour();

    // Midnight: jackpots grow by their daily increment. Restricted to the
    // first hour so a daytime restart does not double-apply it; a process
    // down for the whole hour skips that day, same as the cron it
    // replaces.
    if hour == 0 && last.increment != Some(today) {
        match FlushJackpotRepo::increment_daily(pool).await {
            Ok(updated) => {
                last.increment = Some(today);
                tracing::info!(updated, "Jackpots incremented");
            }
            Err(e) => tracing::error!(error = %e, "Jackpot increment failed"),
        }
    }

    // 20:00: the afternoon window just closed; clear incomplete progress.
    if hour >= LATE_NIGHT_START_HOUR && last.afternoon_reset != Some(today) {
        match FlushProgressRepo::reset_incomplete(pool, FlushSession::Afternoon).await {
            Ok(deleted) => {
                last.afternoon_reset = Some(today);
                tracing::info!(deleted, "Afternoon flush progress reset");
                event_bus.publish(FloorEvent::new(topics::FLUSH_DISPLAY, "flush:updated"));
            }
            Err(e) => tracing::error!(error = %e, "Afternoon flush reset failed"),
        }
    }

    // 02:00: the late-night window just closed; clear incomplete progress.
    // Guard the upper bound so a reset missed at 02:xx does not fire in the
    // evening after the next window opened.
    if hour >= LATE_NIGHT_END_HOUR
        && hour < AFTERNOON_START_HOUR
        && last.late_night_reset != Some(today)
    {
        match FlushProgressRepo::reset_incomplete(pool, FlushSession::LateNight).await {
            Ok(deleted) => {
                last.late_night_reset = Some(today);
                tracing::info!(deleted, "Late-night flush progress reset");
                event_bus.publish(FloorEvent::new(topics::FLUSH_DISPLAY, "flush:updated"));
            }
            Err(e) => tracing::error!(error = %e, "Late-night flush reset failed"),
        }
    }
}
