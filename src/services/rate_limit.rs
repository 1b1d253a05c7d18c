use chrono::{NaiveDate, Utc};
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::time::sleep;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModActionKind {
    Ban,
    Kick,
    Mute,
    Unmute,
    Unban,
}

impl ModActionKind {
    /// Only bans and kicks count against the daily ledger; every other
    /// action passes the limiter unconditionally.
    pub fn is_rate_limited(self) -> bool {
        matches!(self, Self::Ban | Self::Kick)
    }

    pub fn verb(self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Kick => "kick",
            Self::Mute => "mute",
            Self::Unmute => "unmute",
            Self::Unban => "unban",
        }
    }
}

/// Per-moderator daily action counter for ban/kick throttling. Counts are
/// keyed by calendar date so the quota resets at UTC midnight without any
/// bookkeeping; stale dates are swept by the purge runner.
pub struct ModRateLimiter {
    daily_limit: u32,
    counts: RwLock<HashMap<(serenity::UserId, ModActionKind), HashMap<NaiveDate, u32>>>,
}

impl ModRateLimiter {
    pub fn new(daily_limit: u32) -> Self {
        Self {
            daily_limit,
            counts: RwLock::new(HashMap::new()),
        }
    }

    pub fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    pub fn may_act(&self, moderator: serenity::UserId, kind: ModActionKind) -> bool {
        self.may_act_on(moderator, kind, Utc::now().date_naive())
    }

    pub fn record(&self, moderator: serenity::UserId, kind: ModActionKind) {
        self.record_on(moderator, kind, Utc::now().date_naive());
    }

    /// Drops every date entry that is not today, then every moderator key
    /// left without dates.
    pub fn purge_stale(&self) {
        self.purge_stale_on(Utc::now().date_naive());
    }

    fn may_act_on(&self, moderator: serenity::UserId, kind: ModActionKind, date: NaiveDate) -> bool {
        if !kind.is_rate_limited() {
            return true;
        }
        let counts = self.counts.read().expect("rate limiter poisoned");
        let used = counts
            .get(&(moderator, kind))
            .and_then(|dates| dates.get(&date))
            .copied()
            .unwrap_or(0);
        used < self.daily_limit
    }

    fn record_on(&self, moderator: serenity::UserId, kind: ModActionKind, date: NaiveDate) {
        if !kind.is_rate_limited() {
            return;
        }
        let mut counts = self.counts.write().expect("rate limiter poisoned");
        *counts
            .entry((moderator, kind))
            .or_default()
            .entry(date)
            .or_insert(0) += 1;
    }

    fn purge_stale_on(&self, today: NaiveDate) {
        let mut counts = self.counts.write().expect("rate limiter poisoned");
        counts.retain(|_, dates| {
            dates.retain(|date, _| *date == today);
            !dates.is_empty()
        });
    }

    /// Starts the background task that sweeps stale date entries once an
    /// hour, keeping the ledger bounded by the active moderator count.
    pub fn start_purge_runner(self: Arc<Self>) {
        tokio::spawn(async move {
            info!("Rate-limit purge runner started.");
            loop {
                sleep(std::time::Duration::from_secs(3600)).await;
                self.purge_stale();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOD: serenity::UserId = serenity::UserId::new(7);

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn allows_up_to_the_daily_limit() {
        let limiter = ModRateLimiter::new(10);
        let today = date("2025-06-01");
        for _ in 0..9 {
            limiter.record_on(MOD, ModActionKind::Ban, today);
        }
        assert!(limiter.may_act_on(MOD, ModActionKind::Ban, today));
        limiter.record_on(MOD, ModActionKind::Ban, today);
        assert!(!limiter.may_act_on(MOD, ModActionKind::Ban, today));
    }

    #[test]
    fn kinds_are_counted_independently() {
        let limiter = ModRateLimiter::new(10);
        let today = date("2025-06-01");
        for _ in 0..10 {
            limiter.record_on(MOD, ModActionKind::Ban, today);
        }
        assert!(!limiter.may_act_on(MOD, ModActionKind::Ban, today));
        assert!(limiter.may_act_on(MOD, ModActionKind::Kick, today));
    }

    #[test]
    fn quota_resets_with_the_date() {
        let limiter = ModRateLimiter::new(1);
        limiter.record_on(MOD, ModActionKind::Kick, date("2025-06-01"));
        assert!(!limiter.may_act_on(MOD, ModActionKind::Kick, date("2025-06-01")));
        assert!(limiter.may_act_on(MOD, ModActionKind::Kick, date("2025-06-02")));
    }

    #[test]
    fn unlimited_kinds_bypass_the_ledger() {
        let limiter = ModRateLimiter::new(1);
        let today = date("2025-06-01");
        for _ in 0..5 {
            limiter.record_on(MOD, ModActionKind::Mute, today);
        }
        assert!(limiter.may_act_on(MOD, ModActionKind::Mute, today));
        assert!(limiter.may_act_on(MOD, ModActionKind::Unban, today));
        // Nothing was written for the bypassed kinds.
        assert!(limiter.counts.read().unwrap().is_empty());
    }

    #[test]
    fn purge_drops_stale_dates_and_empty_moderators() {
        let limiter = ModRateLimiter::new(10);
        let today = date("2025-06-02");
        let yesterday = date("2025-06-01");
        let other = serenity::UserId::new(8);

        limiter.record_on(MOD, ModActionKind::Ban, yesterday);
        limiter.record_on(MOD, ModActionKind::Ban, today);
        limiter.record_on(other, ModActionKind::Kick, yesterday);

        limiter.purge_stale_on(today);

        let counts = limiter.counts.read().unwrap();
        let mod_dates = counts.get(&(MOD, ModActionKind::Ban)).unwrap();
        assert_eq!(mod_dates.len(), 1);
        assert_eq!(mod_dates.get(&today), Some(&1));
        // The moderator whose only entry was stale is gone entirely.
        assert!(!counts.contains_key(&(other, ModActionKind::Kick)));
    }
}
