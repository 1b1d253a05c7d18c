use crate::modules::roles::{edit_member_role, RoleEdit};
use crate::services::permissions::{self, StaffRank};
use crate::services::vanity::scan::{GatewayStore, PresenceStore};
use crate::services::vanity::status::custom_status_text;
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use serenity::Mentionable;

/// Manage the vanity role by hand
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    subcommands("add", "remove", "check")
)]
pub async fn vanity(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = &ctx.data().config.prefix;
    ctx.say(format!(
        "Usage: `{prefix}vanity add <@user>`, `{prefix}vanity remove <@user>` or `{prefix}vanity check <@user>`"
    ))
    .await?;
    Ok(())
}

/// Grant the vanity role to a user
#[poise::command(prefix_command, slash_command, guild_only)]
async fn add(
    ctx: Context<'_>,
    #[description = "User to grant the role to"] user: serenity::User,
) -> Result<(), Error> {
    let Some(_) = permissions::require_rank(&ctx, StaffRank::Staff).await? else {
        return Ok(());
    };
    let Some(role_id) = ctx.data().config.vanity.role_id else {
        ctx.say("❌ Vanity role not configured.").await?;
        return Ok(());
    };
    edit_member_role(
        &ctx,
        &user,
        role_id,
        RoleEdit::Add,
        "vanity role",
        "⭐ **Vanity Role Added**",
    )
    .await
}

/// Remove the vanity role from a user
#[poise::command(prefix_command, slash_command, guild_only)]
async fn remove(
    ctx: Context<'_>,
    #[description = "User to revoke the role from"] user: serenity::User,
) -> Result<(), Error> {
    let Some(_) = permissions::require_rank(&ctx, StaffRank::Staff).await? else {
        return Ok(());
    };
    let Some(role_id) = ctx.data().config.vanity.role_id else {
        ctx.say("❌ Vanity role not configured.").await?;
        return Ok(());
    };
    edit_member_role(
        &ctx,
        &user,
        role_id,
        RoleEdit::Remove,
        "vanity role",
        "⭐ **Vanity Role Removed**",
    )
    .await
}

/// Show what the vanity engine currently sees for a user
#[poise::command(prefix_command, slash_command, guild_only)]
async fn check(
    ctx: Context<'_>,
    #[description = "User to inspect"] user: serenity::User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().unwrap();

    let Some(_) = permissions::require_rank(&ctx, StaffRank::Staff).await? else {
        return Ok(());
    };

    let member = match guild_id.member(ctx.serenity_context(), user.id).await {
        Ok(member) => member,
        Err(e) => {
            ctx.say(format!("❌ Error getting member: {e}")).await?;
            return Ok(());
        }
    };

    let config = &ctx.data().config;
    let store = GatewayStore(ctx.serenity_context().cache.clone());
    let status_text = store
        .presence(guild_id, user.id)
        .as_ref()
        .and_then(custom_status_text)
        .unwrap_or_default();

    let has_marker = !status_text.is_empty() && status_text.contains(&config.vanity.marker);
    let has_role = config
        .vanity
        .role_id
        .is_some_and(|id| member.roles.contains(&id));

    ctx.say(format!(
        "**Vanity check for {}:**\n\
         Status: `{status_text}`\n\
         Looking for: `{}`\n\
         Has vanity string: `{has_marker}`\n\
         Has role: `{has_role}`\n\
         Should have role: `{}`",
        user.id.mention(),
        config.vanity.marker,
        has_marker && !has_role,
    ))
    .await?;

    Ok(())
}
