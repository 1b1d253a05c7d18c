use crate::modules::roles::{edit_member_role, RoleEdit};
use crate::services::permissions::{self, StaffRank};
use crate::{Context, Error};
use poise::serenity_prelude as serenity;

/// Manage the moderator role
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "mod",
    subcommands("add", "remove")
)]
pub async fn moderator(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = &ctx.data().config.prefix;
    ctx.say(format!(
        "Usage: `{prefix}mod add <@user>` or `{prefix}mod remove <@user>`"
    ))
    .await?;
    Ok(())
}

/// Grant the moderator role to a user
#[poise::command(prefix_command, slash_command, guild_only)]
async fn add(
    ctx: Context<'_>,
    #[description = "User to promote"] user: serenity::User,
) -> Result<(), Error> {
    let Some(_) = permissions::require_rank(&ctx, StaffRank::Staff).await? else {
        return Ok(());
    };
    let Some(role_id) = ctx.data().config.mod_role_id else {
        ctx.say("❌ Mod role not configured.").await?;
        return Ok(());
    };
    edit_member_role(
        &ctx,
        &user,
        role_id,
        RoleEdit::Add,
        "mod role",
        "👤 **Mod Role Added**",
    )
    .await
}

/// Remove the moderator role from a user
#[poise::command(prefix_command, slash_command, guild_only)]
async fn remove(
    ctx: Context<'_>,
    #[description = "User to demote"] user: serenity::User,
) -> Result<(), Error> {
    let Some(_) = permissions::require_rank(&ctx, StaffRank::Staff).await? else {
        return Ok(());
    };
    let Some(role_id) = ctx.data().config.mod_role_id else {
        ctx.say("❌ Mod role not configured.").await?;
        return Ok(());
    };
    edit_member_role(
        &ctx,
        &user,
        role_id,
        RoleEdit::Remove,
        "mod role",
        "👤 **Mod Role Removed**",
    )
    .await
}
