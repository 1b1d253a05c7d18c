use crate::{Data, Error};
use poise::serenity_prelude as serenity;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::info;

/// Delay between Ready and the bulk vanity sweep, giving the gateway cache
/// time to fill with members and presences.
const SCAN_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Dispatcher for non-command gateway events.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot, .. } => {
            info!("Logged in as {}", data_about_bot.user.name);

            if data.config.vanity.enabled && !data.scan_started.swap(true, Ordering::SeqCst) {
                info!("Vanity: auto-assignment enabled, scheduling startup member sweep");
                let ctx = ctx.clone();
                let vanity = data.vanity.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(SCAN_SETTLE_DELAY).await;
                    vanity.scan_all(&ctx).await;
                });
            } else if !data.config.vanity.enabled {
                info!("Vanity: auto-assignment is disabled");
            }
        }
        serenity::FullEvent::PresenceUpdate { new_data, .. } => {
            if !data.config.vanity.enabled {
                return Ok(());
            }
            // Reconciliation may hit the REST API; run it detached so a
            // slow call never holds up event dispatch.
            let ctx = ctx.clone();
            let vanity = data.vanity.clone();
            let presence = new_data.clone();
            tokio::spawn(async move {
                vanity.handle_presence_update(&ctx, presence).await;
            });
        }
        serenity::FullEvent::Message { new_message, .. } => {
            crate::modules::nickname::handle_auto_nick(ctx, data, new_message).await;
        }
        serenity::FullEvent::GuildCreate { guild, is_new, .. } => {
            if is_new.unwrap_or(false) {
                info!("Joined new guild: {} ({})", guild.name, guild.id);
            }
        }
        serenity::FullEvent::GuildDelete { incomplete, .. } => {
            info!("Left guild: {}", incomplete.id);
        }
        _ => {}
    }
    Ok(())
}
