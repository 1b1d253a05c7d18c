pub mod safety;
pub mod scan;
pub mod status;

use crate::services::config::Config;
use crate::services::cooldown::CooldownLedger;
use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What to do about one member's vanity role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoleAction {
    Grant,
    Revoke,
    Keep,
}

/// Decision table driving role membership toward agreement with the
/// member's status text. An empty status counts as a missing marker, so a
/// held role is revoked when the status is cleared.
pub(crate) fn decide(has_marker: bool, has_role: bool) -> RoleAction {
    match (has_marker, has_role) {
        (true, false) => RoleAction::Grant,
        (false, true) => RoleAction::Revoke,
        _ => RoleAction::Keep,
    }
}

/// Presence-driven role assignment engine. Watches custom-status text for
/// the configured marker and grants or revokes the managed role so that
/// role membership always tracks the status, unless the role itself fails
/// the safety check.
pub struct VanityService {
    config: Arc<Config>,
    cooldowns: CooldownLedger,
}

impl VanityService {
    pub fn new(config: Arc<Config>) -> Self {
        let cooldowns = CooldownLedger::new(config.vanity.cooldown);
        Self { config, cooldowns }
    }

    /// Handles one presence update end to end: guild filter, member lookup,
    /// reconciliation. Runs as a detached task per event.
    pub async fn handle_presence_update(
        &self,
        ctx: &serenity::Context,
        presence: serenity::Presence,
    ) {
        if !self.config.vanity.enabled {
            return;
        }
        let Some(guild_id) = presence.guild_id else {
            debug!("Vanity: presence update without a guild, ignoring");
            return;
        };
        if guild_id != self.config.guild_id {
            return;
        }

        let member = match guild_id.member(ctx, presence.user.id).await {
            Ok(member) => member,
            Err(e) => {
                debug!("Vanity: member lookup failed for {}: {e:?}", presence.user.id);
                return;
            }
        };

        self.reconcile(ctx, &member, &presence).await;
    }

    /// Drives one member's role membership toward agreement with their
    /// status text. Cooldown is recorded before the status is evaluated so
    /// a burst of updates for one member runs the full check at most once
    /// per window.
    pub async fn reconcile(
        &self,
        ctx: &serenity::Context,
        member: &serenity::Member,
        presence: &serenity::Presence,
    ) {
        if !self.config.vanity.enabled {
            return;
        }
        if member.guild_id != self.config.guild_id {
            return;
        }

        if self.cooldowns.is_on_cooldown(member.user.id) {
            return;
        }
        self.cooldowns.record_use(member.user.id);

        let Some(role) = self.resolve_role(ctx).await else {
            return;
        };
        if !safety::is_role_safe(&role) {
            warn!(
                "Vanity: role {} carries dangerous permissions, refusing to manage it",
                role.name
            );
            return;
        }

        let status = status::custom_status_text(presence);
        let has_marker = status
            .as_deref()
            .is_some_and(|s| s.contains(&self.config.vanity.marker));
        let has_role = member.roles.contains(&role.id);

        self.apply(ctx, member, &role, decide(has_marker, has_role))
            .await;
    }

    /// Resolves the managed role from the gateway cache, falling back to
    /// HTTP. The configured ID wins over the configured name.
    pub(crate) async fn resolve_role(&self, ctx: &serenity::Context) -> Option<serenity::Role> {
        let guild_id = self.config.guild_id;
        let cached = ctx.cache.guild(guild_id).map(|guild| guild.roles.clone());
        let roles = match cached {
            Some(roles) => roles,
            None => match guild_id.roles(&ctx.http).await {
                Ok(roles) => roles,
                Err(e) => {
                    warn!("Vanity: failed to fetch guild roles: {e:?}");
                    return None;
                }
            },
        };

        if let Some(id) = self.config.vanity.role_id {
            if let Some(role) = roles.get(&id) {
                return Some(role.clone());
            }
        }
        if let Some(name) = self.config.vanity.role_name.as_deref() {
            if let Some(role) = roles.values().find(|role| role.name == name) {
                return Some(role.clone());
            }
        }

        warn!(
            "Vanity: role not found (id: {:?}, name: {:?})",
            self.config.vanity.role_id, self.config.vanity.role_name
        );
        None
    }

    pub(crate) async fn apply(
        &self,
        ctx: &serenity::Context,
        member: &serenity::Member,
        role: &serenity::Role,
        action: RoleAction,
    ) -> bool {
        // The configured guild ID is the trusted one for mutation calls;
        // reconcile has already rejected members from any other guild.
        let guild_id = self.config.guild_id;
        match action {
            RoleAction::Grant => {
                if let Err(e) = ctx
                    .http
                    .add_member_role(guild_id, member.user.id, role.id, Some("Vanity status marker present"))
                    .await
                {
                    error!(
                        "Vanity: failed to add role {} to {}: {e:?}",
                        role.name, member.user.name
                    );
                    return false;
                }
                info!("Vanity: added role {} to {}", role.name, member.user.name);
                self.announce(ctx, member, role).await;
                true
            }
            RoleAction::Revoke => {
                if let Err(e) = ctx
                    .http
                    .remove_member_role(guild_id, member.user.id, role.id, Some("Vanity status marker removed"))
                    .await
                {
                    error!(
                        "Vanity: failed to remove role {} from {}: {e:?}",
                        role.name, member.user.name
                    );
                    return false;
                }
                info!(
                    "Vanity: removed role {} from {}",
                    role.name, member.user.name
                );
                true
            }
            RoleAction::Keep => false,
        }
    }

    /// Thank-you embed in the log channel after a successful grant. Never
    /// sent on failure or veto; absence of the channel suppresses it.
    async fn announce(
        &self,
        ctx: &serenity::Context,
        member: &serenity::Member,
        role: &serenity::Role,
    ) {
        let Some(channel_id) = self.config.log_channel_id else {
            return;
        };
        let embed = serenity::CreateEmbed::new()
            .description(format!(
                "🩷 {} thanks for putting our vanity in your status, keep supporting!",
                role.mention()
            ))
            .colour(0xFFC0CB);
        let message = serenity::CreateMessage::new()
            .content(member.user.id.mention().to_string())
            .embed(embed);
        if let Err(e) = channel_id.send_message(&ctx.http, message).await {
            warn!("Vanity: failed to send announcement: {e:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_table_is_exhaustive() {
        assert_eq!(decide(true, false), RoleAction::Grant);
        assert_eq!(decide(false, true), RoleAction::Revoke);
        assert_eq!(decide(true, true), RoleAction::Keep);
        assert_eq!(decide(false, false), RoleAction::Keep);
    }

    #[test]
    fn marker_matching_survives_surrounding_text() {
        let status = "supporting the project 🩷";
        let marker = "supporting the project";
        assert!(status.contains(marker));
        assert_eq!(decide(status.contains(marker), false), RoleAction::Grant);
    }

    #[test]
    fn cleared_status_revokes_a_held_role() {
        let status: Option<&str> = None;
        let has_marker = status.is_some_and(|s| s.contains("marker"));
        assert_eq!(decide(has_marker, true), RoleAction::Revoke);
    }
}
