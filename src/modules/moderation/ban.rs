use crate::modules::moderation::check_and_record;
use crate::services::permissions::{self, StaffRank};
use crate::services::rate_limit::ModActionKind;
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::error;

/// Ban a user from the server
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "User to ban"] user: serenity::User,
    #[description = "Reason for the ban"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().unwrap();

    let Some(rank) = permissions::require_rank(&ctx, StaffRank::Mod).await? else {
        return Ok(());
    };
    if !check_and_record(&ctx, rank, ModActionKind::Ban).await? {
        return Ok(());
    }

    let reason_text = reason
        .clone()
        .unwrap_or_else(|| "No reason provided".to_string());

    if let Err(e) = guild_id
        .ban_with_reason(ctx.http(), user.id, 0, &reason_text)
        .await
    {
        error!("Failed to ban user {}: {e:?}", user.id);
        ctx.say("❌ Failed to ban user.").await?;
        return Ok(());
    }

    ctx.say(format!(
        "✅ User {} has been banned. Reason: {}",
        user.id.mention(),
        reason_text
    ))
    .await?;

    ctx.data()
        .action_log
        .log_action(
            ctx.http(),
            "🔨 **Ban**",
            ctx.author().id,
            user.id,
            reason.as_deref(),
        )
        .await;

    Ok(())
}
