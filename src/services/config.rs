use anyhow::{bail, Context as _};
use poise::serenity_prelude as serenity;
use std::env;
use std::time::Duration;

pub const DEFAULT_MOD_ACTION_DAILY_LIMIT: u32 = 10;

/// Runtime configuration, read once from the environment at startup.
/// Missing required identifiers abort the process before any connection
/// is attempted; everything else is optional and disables the feature
/// that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub guild_id: serenity::GuildId,
    pub prefix: String,
    pub admin_role_id: Option<serenity::RoleId>,
    pub mod_role_id: Option<serenity::RoleId>,
    pub staff_role_id: Option<serenity::RoleId>,
    pub mute_role_id: Option<serenity::RoleId>,
    pub log_channel_id: Option<serenity::ChannelId>,
    pub auto_nick_channel_id: Option<serenity::ChannelId>,
    pub mod_action_daily_limit: u32,
    pub vanity: VanityConfig,
}

#[derive(Debug, Clone)]
pub struct VanityConfig {
    pub enabled: bool,
    /// Marker substring, stored lowercased; status text is lowercased by
    /// the extractor so the comparison is case-insensitive.
    pub marker: String,
    pub role_id: Option<serenity::RoleId>,
    pub role_name: Option<String>,
    /// Zero disables cooldown gating entirely.
    pub cooldown: Duration,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let bot_token = required("BOT_TOKEN")?;
        let guild_id = serenity::GuildId::new(
            required("GUILD_ID")?
                .parse()
                .context("GUILD_ID must be a numeric guild ID")?,
        );

        let vanity = VanityConfig {
            enabled: optional("VANITY_AUTO_ENABLED")
                .map(|v| v.parse().unwrap_or(false))
                .unwrap_or(false),
            marker: optional("VANITY_STRING").unwrap_or_default().to_lowercase(),
            role_id: role_id("VANITY_ROLE_ID")?,
            role_name: optional("VANITY_ROLE_NAME"),
            cooldown: Duration::from_secs(parsed("VANITY_COOLDOWN")?.unwrap_or(0)),
        };

        if vanity.enabled && vanity.marker.is_empty() {
            bail!("VANITY_STRING is required when VANITY_AUTO_ENABLED is set");
        }

        Ok(Self {
            bot_token,
            guild_id,
            prefix: optional("PREFIX").unwrap_or_else(|| "!".to_string()),
            admin_role_id: role_id("ADMIN_ROLE_ID")?,
            mod_role_id: role_id("MOD_ROLE_ID")?,
            staff_role_id: role_id("STAFF_ROLE_ID")?,
            mute_role_id: role_id("MUTE_ROLE_ID")?,
            log_channel_id: channel_id("DISCORD_LOG_CHANNEL_ID")?,
            auto_nick_channel_id: channel_id("AUTO_NICK_CHANNEL_ID")?,
            mod_action_daily_limit: parsed("MOD_ACTION_DAILY_LIMIT")?
                .unwrap_or(DEFAULT_MOD_ACTION_DAILY_LIMIT),
            vanity,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn required(key: &str) -> anyhow::Result<String> {
    match optional(key) {
        Some(value) => Ok(value),
        None => bail!("{key} is required"),
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional(key)
        .map(|v| {
            v.parse()
                .with_context(|| format!("{key} has an invalid value"))
        })
        .transpose()
}

fn role_id(key: &str) -> anyhow::Result<Option<serenity::RoleId>> {
    Ok(parsed::<u64>(key)?.map(serenity::RoleId::new))
}

fn channel_id(key: &str) -> anyhow::Result<Option<serenity::ChannelId>> {
    Ok(parsed::<u64>(key)?.map(serenity::ChannelId::new))
}
