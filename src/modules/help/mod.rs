use crate::{Context, Error};
use poise::serenity_prelude as serenity;

/// Show all available commands
#[poise::command(prefix_command, slash_command, aliases("commands"))]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let config = &ctx.data().config;
    let p = &config.prefix;
    let limit = config.mod_action_daily_limit;

    let mut embed = serenity::CreateEmbed::new()
        .title("🤖 Bot Commands Help")
        .description(format!("Prefix: `{p}`\n\nUse `{p}help` to view this menu."))
        .colour(0x5865F2)
        .field(
            "🔨 Ban",
            format!("`{p}ban @user [reason]`\nAdmin/Staff unlimited, Mod {limit}/day"),
            false,
        )
        .field(
            "👢 Kick",
            format!("`{p}kick @user [reason]`\nAdmin/Staff unlimited, Mod {limit}/day"),
            false,
        )
        .field(
            "🔇 Mute / 🔊 Unmute",
            format!("`{p}mute @user [reason]`, `{p}unmute @user`\nAdmin/Mod/Staff"),
            false,
        )
        .field(
            "✅ Unban",
            format!("`{p}unban <user id>`\nAdmin/Staff only"),
            false,
        )
        .field(
            "👤 Mod Role",
            format!("`{p}mod add @user`, `{p}mod remove @user`\nAdmin/Staff"),
            false,
        )
        .field(
            "👥 Staff Role",
            format!("`{p}staffs add @user`, `{p}staffs remove @user`\nAdmin/Mod/Staff"),
            false,
        )
        .field(
            "⭐ Vanity Role",
            format!(
                "`{p}vanity add @user`, `{p}vanity remove @user`, `{p}vanity check @user`\nAdmin/Staff"
            ),
            false,
        )
        .field(
            "📝 Nickname",
            format!("`{p}nick <new nickname>`\n1-32 characters, no @ or #"),
            false,
        );

    if let Some(channel_id) = config.auto_nick_channel_id {
        embed = embed.field(
            "💬 Auto-Nickname Channel",
            format!("Send a message in <#{channel_id}> to change your nickname automatically."),
            false,
        );
    }

    if config.vanity.enabled {
        embed = embed.field(
            "✨ Vanity Auto-System",
            format!(
                "Put `{}` in your custom status to receive the vanity role automatically.\nCooldown: {} seconds",
                config.vanity.marker,
                config.vanity.cooldown.as_secs()
            ),
            false,
        );
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
