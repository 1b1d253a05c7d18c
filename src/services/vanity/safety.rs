use poise::serenity_prelude as serenity;

/// Permissions that must never appear on an auto-managed role. Granting a
/// role carrying any of these based on status text alone would hand out
/// privilege escalation.
pub const DANGEROUS_PERMISSIONS: serenity::Permissions = serenity::Permissions::ADMINISTRATOR
    .union(serenity::Permissions::MANAGE_GUILD)
    .union(serenity::Permissions::MANAGE_ROLES)
    .union(serenity::Permissions::BAN_MEMBERS)
    .union(serenity::Permissions::KICK_MEMBERS)
    .union(serenity::Permissions::MANAGE_CHANNELS)
    .union(serenity::Permissions::MANAGE_WEBHOOKS)
    .union(serenity::Permissions::MENTION_EVERYONE);

pub fn is_safe(permissions: serenity::Permissions) -> bool {
    !permissions.intersects(DANGEROUS_PERMISSIONS)
}

pub fn is_role_safe(role: &serenity::Role) -> bool {
    is_safe(role.permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::Permissions;

    #[test]
    fn harmless_permissions_are_safe() {
        assert!(is_safe(Permissions::empty()));
        assert!(is_safe(
            Permissions::SEND_MESSAGES | Permissions::ADD_REACTIONS | Permissions::CONNECT
        ));
    }

    #[test]
    fn each_dangerous_bit_alone_is_unsafe() {
        for bit in DANGEROUS_PERMISSIONS.iter() {
            assert!(!is_safe(bit), "{bit:?} should be rejected");
        }
    }

    #[test]
    fn one_dangerous_bit_taints_a_harmless_set() {
        let perms = Permissions::SEND_MESSAGES | Permissions::MANAGE_ROLES;
        assert!(!is_safe(perms));
    }

    #[test]
    fn intersection_decides_regardless_of_other_bits() {
        let perms = Permissions::all();
        assert!(!is_safe(perms));
        assert!(is_safe(perms.difference(DANGEROUS_PERMISSIONS)));
    }
}
