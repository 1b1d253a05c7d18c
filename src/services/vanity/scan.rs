use super::{decide, safety, status, RoleAction, VanityService};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Delay after every state-mutating call, to stay under the REST rate
/// limit during the sweep.
const PACING_DELAY: Duration = Duration::from_millis(50);

/// Members between progress log lines.
const PROGRESS_EVERY: usize = 100;

/// Page size for the member list fetch. Communities larger than this need
/// pagination here.
const MEMBER_FETCH_LIMIT: u64 = 1000;

/// Read access to the gateway's local member/presence snapshot. Injected
/// so the sweep can be exercised against fixtures instead of a live
/// connection.
pub trait PresenceStore: Send + Sync {
    fn presence(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Option<serenity::Presence>;

    fn members(&self, guild_id: serenity::GuildId) -> Vec<serenity::Member>;
}

/// Production store backed by the serenity gateway cache.
pub struct GatewayStore(pub Arc<serenity::Cache>);

impl PresenceStore for GatewayStore {
    fn presence(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Option<serenity::Presence> {
        self.0
            .guild(guild_id)
            .and_then(|guild| guild.presences.get(&user_id).cloned())
    }

    fn members(&self, guild_id: serenity::GuildId) -> Vec<serenity::Member> {
        self.0
            .guild(guild_id)
            .map(|guild| guild.members.values().cloned().collect())
            .unwrap_or_default()
    }
}

/// Bulk-sweep variant of the decision table: a member with no status at
/// all counts as a missing marker, so an existing role is still revoked.
fn sweep_decision(status_text: Option<&str>, marker: &str, has_role: bool) -> RoleAction {
    match status_text {
        None => {
            if has_role {
                RoleAction::Revoke
            } else {
                RoleAction::Keep
            }
        }
        Some(text) => decide(text.contains(marker), has_role),
    }
}

#[derive(Debug, Default)]
struct ScanReport {
    checked: usize,
    added: usize,
    removed: usize,
    skipped: usize,
}

impl VanityService {
    /// One-time reconciliation sweep over the whole member list, run once
    /// at startup after the gateway cache has settled. No per-member
    /// cooldown gating here; member-level failures are logged and the
    /// sweep carries on.
    pub async fn scan_all(&self, ctx: &serenity::Context) {
        let store = GatewayStore(ctx.cache.clone());
        self.scan_with_store(ctx, &store).await;
    }

    async fn scan_with_store(&self, ctx: &serenity::Context, store: &dyn PresenceStore) {
        if !self.config.vanity.enabled {
            return;
        }
        let guild_id = self.config.guild_id;

        let Some(role) = self.resolve_role(ctx).await else {
            return;
        };
        if !safety::is_role_safe(&role) {
            warn!(
                "Vanity scan: role {} carries dangerous permissions, sweep aborted",
                role.name
            );
            return;
        }

        let members = match guild_id
            .members(&ctx.http, Some(MEMBER_FETCH_LIMIT), None)
            .await
        {
            Ok(members) => members,
            Err(e) => {
                warn!("Vanity scan: member fetch failed ({e:?}), falling back to cached members");
                let cached = store.members(guild_id);
                if cached.is_empty() {
                    error!("Vanity scan: no members available, cached or fetched");
                    return;
                }
                cached
            }
        };

        info!("Vanity scan: checking {} members", members.len());
        let mut report = ScanReport::default();

        for (i, member) in members.iter().enumerate() {
            let has_role = member.roles.contains(&role.id);
            let status_text = store
                .presence(guild_id, member.user.id)
                .as_ref()
                .and_then(status::custom_status_text);

            match status_text {
                None => report.skipped += 1,
                Some(_) => report.checked += 1,
            }

            let action = sweep_decision(status_text.as_deref(), &self.config.vanity.marker, has_role);
            if action != RoleAction::Keep {
                let applied = self.apply(ctx, member, &role, action).await;
                if applied {
                    match action {
                        RoleAction::Grant => report.added += 1,
                        RoleAction::Revoke => report.removed += 1,
                        RoleAction::Keep => {}
                    }
                }
                sleep(PACING_DELAY).await;
            }

            if (i + 1) % PROGRESS_EVERY == 0 {
                info!(
                    "Vanity scan: progress {}/{} (added {}, removed {})",
                    i + 1,
                    members.len(),
                    report.added,
                    report.removed
                );
            }
        }

        info!(
            "Vanity scan: finished (checked {}, added {}, removed {}, skipped {})",
            report.checked, report.added, report.removed, report.skipped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "discord.gg/example";

    #[test]
    fn missing_status_revokes_a_held_role() {
        assert_eq!(sweep_decision(None, MARKER, true), RoleAction::Revoke);
        assert_eq!(sweep_decision(None, MARKER, false), RoleAction::Keep);
    }

    #[test]
    fn marker_in_status_grants_a_missing_role() {
        let status = Some("join discord.gg/example today");
        assert_eq!(sweep_decision(status, MARKER, false), RoleAction::Grant);
        assert_eq!(sweep_decision(status, MARKER, true), RoleAction::Keep);
    }

    #[test]
    fn unrelated_status_revokes_a_held_role() {
        assert_eq!(
            sweep_decision(Some("something else"), MARKER, true),
            RoleAction::Revoke
        );
        assert_eq!(
            sweep_decision(Some("something else"), MARKER, false),
            RoleAction::Keep
        );
    }
}
