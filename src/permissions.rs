//! Guild permission bits.

use bitflags::bitflags;

bitflags! {
    /// Effective permissions of a member in a channel.
    ///
    /// Bit positions follow the Discord permission integer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE = 1 << 0;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const ADD_REACTIONS = 1 << 6;
        const VIEW_AUDIT_LOG = 1 << 7;
        const PRIORITY_SPEAKER = 1 << 8;
        const STREAM = 1 << 9;
        const VIEW_CHANNEL = 1 << 10;
        const SEND_MESSAGES = 1 << 11;
        const SEND_TTS_MESSAGES = 1 << 12;
        const MANAGE_MESSAGES = 1 << 13;
        const EMBED_LINKS = 1 << 14;
        const ATTACH_FILES = 1 << 15;
        const READ_MESSAGE_HISTORY = 1 << 16;
        const MENTION_EVERYONE = 1 << 17;
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        const VIEW_GUILD_INSIGHTS = 1 << 19;
        const CONNECT = 1 << 20;
        const SPEAK = 1 << 21;
        const MUTE_MEMBERS = 1 << 22;
        const DEAFEN_MEMBERS = 1 << 23;
        const MOVE_MEMBERS = 1 << 24;
        const USE_VAD = 1 << 25;
        const CHANGE_NICKNAME = 1 << 26;
        const MANAGE_NICKNAMES = 1 << 27;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
        const MANAGE_EMOJIS = 1 << 30;
    }
}

impl Permissions {
    /// Whether `self` is a superset of `required`.
    pub fn satisfies(self, required: Permissions) -> bool {
        self.contains(required)
    }

    /// Flag names, e.g. `["KICK_MEMBERS", "SEND_MESSAGES"]`.
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superset_satisfies() {
        let have = Permissions::SEND_MESSAGES | Permissions::KICK_MEMBERS;
        assert!(have.satisfies(Permissions::SEND_MESSAGES));
        assert!(have.satisfies(Permissions::empty()));
        assert!(!have.satisfies(Permissions::SEND_MESSAGES | Permissions::BAN_MEMBERS));
    }

    #[test]
    fn administrator_is_just_another_bit() {
        assert!(!Permissions::ADMINISTRATOR.satisfies(Permissions::SEND_MESSAGES));
    }

    #[test]
    fn names_in_bit_order() {
        let perms = Permissions::SEND_MESSAGES | Permissions::KICK_MEMBERS;
        assert_eq!(perms.names(), vec!["KICK_MEMBERS", "SEND_MESSAGES"]);
    }
}
