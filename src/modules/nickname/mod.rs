use crate::services::permissions;
use crate::{Context, Data, Error};
use poise::serenity_prelude as serenity;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Discord caps nicknames at 32 characters.
const MAX_NICKNAME_LEN: usize = 32;

fn url_pattern() -> &'static Regex {
    static URL_PATTERN: OnceLock<Regex> = OnceLock::new();
    URL_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(https?://|www\.|discord\.gg/|discord\.com/|discordapp\.com/)").unwrap()
    })
}

pub(crate) fn validate_nickname(nick: &str) -> Result<(), &'static str> {
    if nick.is_empty() {
        return Err("Nickname cannot be empty.");
    }
    if nick.chars().count() > MAX_NICKNAME_LEN {
        return Err("Nickname is too long! Maximum length is 32 characters.");
    }
    if nick.contains('@') || nick.contains('#') {
        return Err("Nickname cannot contain @ or # symbols.");
    }
    Ok(())
}

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![nick()]
}

/// Change your own nickname
#[poise::command(prefix_command, slash_command, guild_only, aliases("nickname"))]
pub async fn nick(
    ctx: Context<'_>,
    #[description = "New nickname"]
    #[rest]
    nickname: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().unwrap();
    let nickname = nickname.trim();

    if let Err(reason) = validate_nickname(nickname) {
        ctx.say(format!("❌ {reason}")).await?;
        return Ok(());
    }

    let member = guild_id
        .member(ctx.serenity_context(), ctx.author().id)
        .await?;
    let allowed = permissions::rank_of(&ctx.data().config, &member.roles).is_some()
        || can_change_nickname(ctx.serenity_context(), guild_id, &member).await;
    if !allowed {
        ctx.say(
            "❌ You don't have permission to change your nickname. \
             Required: Change Nickname permission or a staff role.",
        )
        .await?;
        return Ok(());
    }

    if let Err(e) = apply_nickname(ctx.serenity_context(), guild_id, ctx.author().id, nickname).await
    {
        warn!("Failed to change nickname for {}: {e:?}", ctx.author().id);
        ctx.say(
            "❌ Failed to change nickname. Check that the bot has Manage \
             Nicknames and that its role sits above yours.",
        )
        .await?;
        return Ok(());
    }

    ctx.say(format!("✅ Nickname changed to `{nickname}`.")).await?;

    let reason = format!("New nickname: {nickname}");
    ctx.data()
        .action_log
        .log_action(
            ctx.http(),
            "📝 **Nickname Changed**",
            ctx.author().id,
            ctx.author().id,
            Some(&reason),
        )
        .await;

    Ok(())
}

/// Messages in the configured auto-nick channel are treated as nickname
/// requests: plain text only, `reset` restores the default, success is
/// confirmed with a reaction instead of a reply.
pub async fn handle_auto_nick(ctx: &serenity::Context, data: &Data, message: &serenity::Message) {
    let Some(channel_id) = data.config.auto_nick_channel_id else {
        return;
    };
    if message.channel_id != channel_id || message.author.bot {
        return;
    }
    let Some(guild_id) = message.guild_id else {
        return;
    };

    if !message.attachments.is_empty() || !message.embeds.is_empty() {
        return;
    }

    let text = message.content.trim();
    if text.is_empty() || text.starts_with(&data.config.prefix) {
        return;
    }
    if url_pattern().is_match(text) {
        return;
    }

    // An empty nickname resets to the default username.
    let nick = if text.eq_ignore_ascii_case("reset") { "" } else { text };
    if !nick.is_empty() {
        if let Err(reason) = validate_nickname(nick) {
            let _ = message.channel_id.say(&ctx.http, format!("❌ {reason}")).await;
            return;
        }
    }

    match apply_nickname(ctx, guild_id, message.author.id, nick).await {
        Ok(()) => {
            info!("Auto-nick: updated nickname for {}", message.author.name);
            let _ = message
                .react(&ctx.http, serenity::ReactionType::Unicode("✅".to_string()))
                .await;

            let (title, reason) = if nick.is_empty() {
                ("📝 **Nickname Reset**", "Reset to default username".to_string())
            } else {
                ("📝 **Nickname Changed**", format!("New nickname: {nick}"))
            };
            data.action_log
                .log_action(&ctx.http, title, message.author.id, message.author.id, Some(&reason))
                .await;
        }
        Err(e) => {
            warn!("Auto-nick: failed to update {}: {e:?}", message.author.name);
            let _ = message
                .channel_id
                .say(
                    &ctx.http,
                    "❌ Failed to change nickname. Check that the bot has Manage \
                     Nicknames and that its role sits above yours.",
                )
                .await;
        }
    }
}

async fn apply_nickname(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
    nick: &str,
) -> Result<(), serenity::Error> {
    guild_id
        .edit_member(&ctx.http, user_id, serenity::EditMember::new().nickname(nick))
        .await
        .map(|_| ())
}

/// Whether the member may rename themselves without holding a staff role:
/// guild owner, or CHANGE_NICKNAME/ADMINISTRATOR through their role set.
async fn can_change_nickname(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    member: &serenity::Member,
) -> bool {
    let cached = ctx
        .cache
        .guild(guild_id)
        .map(|guild| (guild.owner_id, guild.roles.clone()));
    let (owner_id, roles) = match cached {
        Some(found) => found,
        None => match ctx.http.get_guild(guild_id).await {
            Ok(guild) => (guild.owner_id, guild.roles),
            Err(e) => {
                warn!("Nickname: failed to fetch guild {guild_id}: {e:?}");
                return false;
            }
        },
    };

    if owner_id == member.user.id {
        return true;
    }

    let permissions = member
        .roles
        .iter()
        .filter_map(|id| roles.get(id))
        .fold(serenity::Permissions::empty(), |acc, role| {
            acc | role.permissions
        });
    permissions.contains(serenity::Permissions::CHANGE_NICKNAME)
        || permissions.contains(serenity::Permissions::ADMINISTRATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass() {
        assert!(validate_nickname("John Doe").is_ok());
        assert!(validate_nickname(&"x".repeat(32)).is_ok());
    }

    #[test]
    fn length_limits_are_enforced() {
        assert!(validate_nickname("").is_err());
        assert!(validate_nickname(&"x".repeat(33)).is_err());
    }

    #[test]
    fn mention_characters_are_rejected() {
        assert!(validate_nickname("hi@there").is_err());
        assert!(validate_nickname("chan#nel").is_err());
    }

    #[test]
    fn url_pattern_catches_links() {
        assert!(url_pattern().is_match("https://example.com"));
        assert!(url_pattern().is_match("WWW.example.com"));
        assert!(url_pattern().is_match("discord.gg/abc"));
        assert!(!url_pattern().is_match("just a name"));
    }
}
