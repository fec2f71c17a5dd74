//! Periodic sweep of lapsed waitlist calls.
//!
//! A called player has a 30-minute grace period; this task transitions
//! every `called` entry whose `expires_at` has passed to `removed`, with
//! the same queue renumbering as a staff removal, and notifies the queue
//! displays.

use std::time::Duration;

use chrono::Utc;
use pitboss_core::audit::action_kinds;
use pitboss_events::{topics, FloorEvent};
use sqlx::PgPool;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::repositories::{ActivityLogRepo, WaitlistRepo};

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the expiry sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, event_bus: Arc<pitboss_events::EventBus>, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Waitlist expiry sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Waitlist expiry sweep stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = sweep(&pool, &event_bus).await {
                    tracing::error!(error = %e, "Waitlist expiry sweep failed");
                }
            }
        }
    }
}

/// One sweep pass: expire every lapsed call.
async fn sweep(
    pool: &PgPool,
    event_bus: &pitboss_events::EventBus,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    let expired = WaitlistRepo::find_expired(pool, now).await?;

    for entry in expired {
        // The conditional transition tolerates a concurrent seat/remove
        // that beat the sweep to this entry.
        let Some(removed) = WaitlistRepo::remove(pool, entry.id, now).await? else {
            continue;
        };

        tracing::info!(
            entry_id = removed.id,
            player = %removed.player_name,
            game = %removed.game_key,
            "Waitlist entry expired"
        );

        ActivityLogRepo::insert(
            pool,
            &CreateActivityLog {
                action_kind: action_kinds::REMOVED,
                player_id: removed.player_id,
                player_name: Some(removed.player_name.clone()),
                details: Some("Waitlist call expired".into()),
                ..Default::default()
            },
        )
        .await?;

        event_bus.publish(
            FloorEvent::new(topics::WAITLIST, "waitlist:updated")
                .with_payload(serde_json::json!({ "game_key": removed.game_key })),
        );
    }

    Ok(())
}
