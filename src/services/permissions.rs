use crate::services::config::Config;
use crate::Context;
use poise::serenity_prelude as serenity;
use tracing::debug;

/// Staff tiers resolved from the configured role IDs. Ordering matters:
/// admins outrank staff, staff outrank moderators. Moderators are the only
/// tier subject to the daily action ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StaffRank {
    Mod,
    Staff,
    Admin,
}

/// Highest configured rank among the given role set, if any. Unconfigured
/// tiers simply never match.
pub fn rank_of(config: &Config, roles: &[serenity::RoleId]) -> Option<StaffRank> {
    let holds = |id: Option<serenity::RoleId>| id.is_some_and(|id| roles.contains(&id));
    if holds(config.admin_role_id) {
        Some(StaffRank::Admin)
    } else if holds(config.staff_role_id) {
        Some(StaffRank::Staff)
    } else if holds(config.mod_role_id) {
        Some(StaffRank::Mod)
    } else {
        None
    }
}

/// Rank of the invoking member, via a cache-first member lookup.
pub async fn invoker_rank(ctx: &Context<'_>) -> Option<StaffRank> {
    let guild_id = ctx.guild_id()?;
    let member = match guild_id.member(ctx.serenity_context(), ctx.author().id).await {
        Ok(member) => member,
        Err(e) => {
            debug!("Permission check: member lookup failed for {}: {e:?}", ctx.author().id);
            return None;
        }
    };
    rank_of(&ctx.data().config, &member.roles)
}

/// Resolves the invoker's rank and replies with a permission error when it
/// falls short. Returns the rank so callers can apply tier-specific rules.
pub async fn require_rank(
    ctx: &Context<'_>,
    minimum: StaffRank,
) -> Result<Option<StaffRank>, crate::Error> {
    match invoker_rank(ctx).await {
        Some(rank) if rank >= minimum => Ok(Some(rank)),
        _ => {
            ctx.say("❌ You don't have permission to use this command.")
                .await?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::VanityConfig;
    use std::time::Duration;

    fn test_config() -> Config {
        Config {
            bot_token: "token".into(),
            guild_id: serenity::GuildId::new(1),
            prefix: "!".into(),
            admin_role_id: Some(serenity::RoleId::new(10)),
            mod_role_id: Some(serenity::RoleId::new(11)),
            staff_role_id: Some(serenity::RoleId::new(12)),
            mute_role_id: None,
            log_channel_id: None,
            auto_nick_channel_id: None,
            mod_action_daily_limit: 10,
            vanity: VanityConfig {
                enabled: false,
                marker: String::new(),
                role_id: None,
                role_name: None,
                cooldown: Duration::ZERO,
            },
        }
    }

    #[test]
    fn highest_configured_rank_wins() {
        let config = test_config();
        let roles = [serenity::RoleId::new(11), serenity::RoleId::new(10)];
        assert_eq!(rank_of(&config, &roles), Some(StaffRank::Admin));
        assert_eq!(
            rank_of(&config, &[serenity::RoleId::new(12)]),
            Some(StaffRank::Staff)
        );
        assert_eq!(
            rank_of(&config, &[serenity::RoleId::new(11)]),
            Some(StaffRank::Mod)
        );
    }

    #[test]
    fn unrelated_roles_grant_nothing() {
        let config = test_config();
        assert_eq!(rank_of(&config, &[serenity::RoleId::new(99)]), None);
        assert_eq!(rank_of(&config, &[]), None);
    }

    #[test]
    fn unconfigured_tier_never_matches() {
        let mut config = test_config();
        config.admin_role_id = None;
        assert_eq!(rank_of(&config, &[serenity::RoleId::new(10)]), None);
    }

    #[test]
    fn ranks_order_mod_below_staff_below_admin() {
        assert!(StaffRank::Mod < StaffRank::Staff);
        assert!(StaffRank::Staff < StaffRank::Admin);
    }
}
