use crate::modules::roles::{edit_member_role, RoleEdit};
use crate::services::permissions::{self, StaffRank};
use crate::{Context, Error};
use poise::serenity_prelude as serenity;

/// Manage the staff role
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    subcommands("add", "remove")
)]
pub async fn staffs(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = &ctx.data().config.prefix;
    ctx.say(format!(
        "Usage: `{prefix}staffs add <@user>` or `{prefix}staffs remove <@user>`"
    ))
    .await?;
    Ok(())
}

/// Grant the staff role to a user
#[poise::command(prefix_command, slash_command, guild_only)]
async fn add(
    ctx: Context<'_>,
    #[description = "User to promote"] user: serenity::User,
) -> Result<(), Error> {
    let Some(_) = permissions::require_rank(&ctx, StaffRank::Mod).await? else {
        return Ok(());
    };
    let Some(role_id) = ctx.data().config.staff_role_id else {
        ctx.say("❌ Staff role not configured.").await?;
        return Ok(());
    };
    edit_member_role(
        &ctx,
        &user,
        role_id,
        RoleEdit::Add,
        "staff role",
        "👥 **Staff Role Added**",
    )
    .await
}

/// Remove the staff role from a user
#[poise::command(prefix_command, slash_command, guild_only)]
async fn remove(
    ctx: Context<'_>,
    #[description = "User to demote"] user: serenity::User,
) -> Result<(), Error> {
    let Some(_) = permissions::require_rank(&ctx, StaffRank::Mod).await? else {
        return Ok(());
    };
    let Some(role_id) = ctx.data().config.staff_role_id else {
        ctx.say("❌ Staff role not configured.").await?;
        return Ok(());
    };
    edit_member_role(
        &ctx,
        &user,
        role_id,
        RoleEdit::Remove,
        "staff role",
        "👥 **Staff Role Removed**",
    )
    .await
}
