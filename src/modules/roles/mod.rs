mod moderator;
mod staff;
mod vanity;

use crate::{Context, Data, Error};
use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::error;

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![moderator::moderator(), staff::staffs(), vanity::vanity()]
}

#[derive(Clone, Copy)]
pub(crate) enum RoleEdit {
    Add,
    Remove,
}

/// Shared grant/revoke path for the managed role commands: performs the
/// API call, replies, and reports to the action log.
pub(crate) async fn edit_member_role(
    ctx: &Context<'_>,
    user: &serenity::User,
    role_id: serenity::RoleId,
    edit: RoleEdit,
    label: &str,
    log_title: &str,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().unwrap();

    let result = match edit {
        RoleEdit::Add => {
            ctx.http()
                .add_member_role(guild_id, user.id, role_id, None)
                .await
        }
        RoleEdit::Remove => {
            ctx.http()
                .remove_member_role(guild_id, user.id, role_id, None)
                .await
        }
    };

    if let Err(e) = result {
        error!("Failed to manage {label} for {}: {e:?}", user.id);
        ctx.say(format!("❌ Failed to manage {label}.")).await?;
        return Ok(());
    }

    let reply = match edit {
        RoleEdit::Add => format!("✅ Added {} to {label}.", user.id.mention()),
        RoleEdit::Remove => format!("✅ Removed {} from {label}.", user.id.mention()),
    };
    ctx.say(reply).await?;

    ctx.data()
        .action_log
        .log_action(ctx.http(), log_title, ctx.author().id, user.id, None)
        .await;

    Ok(())
}
