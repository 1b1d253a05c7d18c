use crate::modules::moderation::check_and_record;
use crate::services::permissions::{self, StaffRank};
use crate::services::rate_limit::ModActionKind;
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::error;

/// Mute a user by assigning the configured mute role
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "User to mute"] user: serenity::User,
    #[description = "Reason for the mute"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().unwrap();

    let Some(rank) = permissions::require_rank(&ctx, StaffRank::Mod).await? else {
        return Ok(());
    };
    if !check_and_record(&ctx, rank, ModActionKind::Mute).await? {
        return Ok(());
    }

    let Some(mute_role) = ctx.data().config.mute_role_id else {
        ctx.say("❌ Mute role not configured.").await?;
        return Ok(());
    };

    let reason_text = reason
        .clone()
        .unwrap_or_else(|| "No reason provided".to_string());

    if let Err(e) = ctx
        .http()
        .add_member_role(guild_id, user.id, mute_role, Some(&reason_text))
        .await
    {
        error!("Failed to mute user {}: {e:?}", user.id);
        ctx.say(
            "❌ Failed to mute user. Check that the bot has Manage Roles \
             and that its role sits above the mute role.",
        )
        .await?;
        return Ok(());
    }

    ctx.say(format!(
        "✅ User {} has been muted. Reason: {}",
        user.id.mention(),
        reason_text
    ))
    .await?;

    ctx.data()
        .action_log
        .log_action(
            ctx.http(),
            "🔇 **Mute**",
            ctx.author().id,
            user.id,
            reason.as_deref(),
        )
        .await;

    Ok(())
}
