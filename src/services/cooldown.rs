use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-member timestamp store gating how often presence reconciliation may
/// run for a single member. Entries are overwritten on every recorded use
/// and never expire; the map is bounded by the server's member count.
///
/// Reads take the shared lock so concurrent presence events for different
/// members don't serialize on each other; writes are exclusive.
pub struct CooldownLedger {
    window: Duration,
    last_use: RwLock<HashMap<serenity::UserId, Instant>>,
}

impl CooldownLedger {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_use: RwLock::new(HashMap::new()),
        }
    }

    /// A zero window disables cooldown tracking entirely.
    pub fn is_enabled(&self) -> bool {
        !self.window.is_zero()
    }

    pub fn is_on_cooldown(&self, user_id: serenity::UserId) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let last_use = self.last_use.read().expect("cooldown ledger poisoned");
        match last_use.get(&user_id) {
            Some(stamp) => stamp.elapsed() < self.window,
            None => false,
        }
    }

    pub fn record_use(&self, user_id: serenity::UserId) {
        if !self.is_enabled() {
            return;
        }
        self.last_use
            .write()
            .expect("cooldown ledger poisoned")
            .insert(user_id, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: serenity::UserId = serenity::UserId::new(42);

    #[test]
    fn fresh_member_is_not_on_cooldown() {
        let ledger = CooldownLedger::new(Duration::from_secs(30));
        assert!(!ledger.is_on_cooldown(USER));
    }

    #[test]
    fn recorded_use_puts_member_on_cooldown() {
        let ledger = CooldownLedger::new(Duration::from_secs(30));
        ledger.record_use(USER);
        assert!(ledger.is_on_cooldown(USER));
        // Only the recorded member is gated.
        assert!(!ledger.is_on_cooldown(serenity::UserId::new(43)));
    }

    #[test]
    fn zero_window_bypasses_cooldown() {
        let ledger = CooldownLedger::new(Duration::ZERO);
        ledger.record_use(USER);
        assert!(!ledger.is_on_cooldown(USER));
        // A disabled ledger records nothing.
        assert!(ledger.last_use.read().unwrap().is_empty());
    }

    #[test]
    fn expired_window_releases_member() {
        let ledger = CooldownLedger::new(Duration::from_nanos(1));
        ledger.record_use(USER);
        std::thread::sleep(Duration::from_millis(1));
        assert!(!ledger.is_on_cooldown(USER));
    }
}
