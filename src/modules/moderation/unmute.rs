use crate::modules::moderation::check_and_record;
use crate::services::permissions::{self, StaffRank};
use crate::services::rate_limit::ModActionKind;
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::error;

/// Remove the mute role from a user
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "User to unmute"] user: serenity::User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().unwrap();

    let Some(rank) = permissions::require_rank(&ctx, StaffRank::Mod).await? else {
        return Ok(());
    };
    if !check_and_record(&ctx, rank, ModActionKind::Unmute).await? {
        return Ok(());
    }

    let Some(mute_role) = ctx.data().config.mute_role_id else {
        ctx.say("❌ Mute role not configured.").await?;
        return Ok(());
    };

    if let Err(e) = ctx
        .http()
        .remove_member_role(guild_id, user.id, mute_role, Some("Unmuted"))
        .await
    {
        error!("Failed to unmute user {}: {e:?}", user.id);
        ctx.say(
            "❌ Failed to unmute user. Check that the bot has Manage Roles \
             and that its role sits above the mute role.",
        )
        .await?;
        return Ok(());
    }

    ctx.say(format!("✅ User {} has been unmuted.", user.id.mention()))
        .await?;

    ctx.data()
        .action_log
        .log_action(ctx.http(), "🔊 **Unmute**", ctx.author().id, user.id, None)
        .await;

    Ok(())
}
