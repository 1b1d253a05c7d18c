use crate::modules::moderation::check_and_record;
use crate::services::permissions::{self, StaffRank};
use crate::services::rate_limit::ModActionKind;
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::error;

/// Remove a ban, by user ID or mention
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "User to unban"] user: serenity::UserId,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().unwrap();

    let Some(rank) = permissions::require_rank(&ctx, StaffRank::Staff).await? else {
        return Ok(());
    };
    if !check_and_record(&ctx, rank, ModActionKind::Unban).await? {
        return Ok(());
    }

    match guild_id.unban(ctx.http(), user).await {
        Ok(()) => {}
        Err(serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(resp)))
            if resp.status_code.as_u16() == 404 =>
        {
            ctx.say(format!(
                "❌ User {} is not banned or doesn't exist.",
                user.mention()
            ))
            .await?;
            return Ok(());
        }
        Err(serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(resp)))
            if resp.status_code.as_u16() == 403 =>
        {
            ctx.say("❌ Bot doesn't have permission to unban users.")
                .await?;
            return Ok(());
        }
        Err(e) => {
            error!("Failed to unban user {user}: {e:?}");
            ctx.say("❌ Failed to unban user.").await?;
            return Ok(());
        }
    }

    ctx.say(format!("✅ User {} has been unbanned.", user.mention()))
        .await?;

    ctx.data()
        .action_log
        .log_action(ctx.http(), "✅ **Unban**", ctx.author().id, user, None)
        .await;

    Ok(())
}
