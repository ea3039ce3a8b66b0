//! Ticket channel logic.
//!
//! Everything about a ticket that does not need a live Discord connection: the
//! channel name, who may see the channel, and the custom IDs that route the
//! persistent panel components back to their handlers.

use rand::Rng;
use std::fmt;

/// Prefix of every ticket channel name
pub const TICKET_CHANNEL_PREFIX: &str = "ticket-";
/// Longest username fragment kept in a channel name
const MAX_USERNAME_CHARS: usize = 80;

/// Builds `ticket-<username>-<1000..=9999>` with the username reduced to characters
/// Discord keeps in text channel names.
pub fn ticket_channel_name<R: Rng + ?Sized>(username: &str, rng: &mut R) -> String {
    let suffix: u16 = rng.random_range(1000..=9999);
    format!(
        "{TICKET_CHANNEL_PREFIX}{}-{suffix}",
        sanitize_channel_fragment(username)
    )
}

/// Lowercases, maps everything outside `[a-z0-9_-]` to `-`, collapses dash runs and
/// trims dashes at the ends. Falls back to `user` when nothing is left.
#[must_use]
pub fn sanitize_channel_fragment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            c
        } else {
            '-'
        };
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
        if out.len() >= MAX_USERNAME_CHARS {
            break;
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "user".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Channel permissions relevant to tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Access {
    /// See the channel
    pub view: bool,
    /// Post messages
    pub send: bool,
    /// Upload files
    pub attach: bool,
}

impl Access {
    /// No permissions
    pub const NONE: Self = Self {
        view: false,
        send: false,
        attach: false,
    };
    /// View only
    pub const VIEW: Self = Self {
        view: true,
        send: false,
        attach: false,
    };
    /// View and send
    pub const VIEW_SEND: Self = Self {
        view: true,
        send: true,
        attach: false,
    };
    /// View, send and attach
    pub const FULL: Self = Self {
        view: true,
        send: true,
        attach: true,
    };
}

/// Who a grant applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantTarget {
    /// A role, including `@everyone` (whose ID equals the guild ID)
    Role(u64),
    /// A single member
    Member(u64),
}

/// One permission overwrite of a ticket channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGrant {
    /// Role or member the overwrite targets
    pub target: GrantTarget,
    /// Explicitly allowed
    pub allow: Access,
    /// Explicitly denied
    pub deny: Access,
}

/// The overwrites a new ticket channel is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketAccessPlan {
    /// Overwrites in application order
    pub grants: Vec<AccessGrant>,
}

impl TicketAccessPlan {
    /// Private channel: hidden from `@everyone`, open to the opener, the bot and every
    /// administrator role.
    #[must_use]
    pub fn build(guild_id: u64, opener_id: u64, bot_id: u64, admin_role_ids: &[u64]) -> Self {
        let mut grants = vec![
            AccessGrant {
                target: GrantTarget::Role(guild_id),
                allow: Access::NONE,
                deny: Access::VIEW,
            },
            AccessGrant {
                target: GrantTarget::Member(opener_id),
                allow: Access::FULL,
                deny: Access::NONE,
            },
            AccessGrant {
                target: GrantTarget::Member(bot_id),
                allow: Access::VIEW,
                deny: Access::NONE,
            },
        ];
        grants.extend(
            admin_role_ids
                .iter()
                .filter(|&&role| role != guild_id)
                .map(|&role| AccessGrant {
                    target: GrantTarget::Role(role),
                    allow: Access::VIEW_SEND,
                    deny: Access::NONE,
                }),
        );
        Self { grants }
    }
}

/// What a persistent component on a panel message does when used.
///
/// The variant is encoded in the component's custom ID so the handler can be found
/// again after a restart, without keeping any view state in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    /// Category select on a ticket panel
    OpenTicket,
    /// Delete button inside a ticket channel
    CloseTicket,
    /// Self-assign button on a verify panel
    GrantRole {
        /// Role handed out by the button
        role_id: u64,
    },
}

impl ComponentAction {
    /// Parses a custom ID; `None` for IDs this bot does not own or that are malformed.
    #[must_use]
    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split(':');
        let action = match (parts.next()?, parts.next()?) {
            ("ticket", "open") => Self::OpenTicket,
            ("ticket", "close") => Self::CloseTicket,
            ("role", "grant") => Self::GrantRole {
                role_id: parts.next()?.parse().ok().filter(|&id| id != 0)?,
            },
            _ => return None,
        };
        parts.next().is_none().then_some(action)
    }

    /// Custom ID to attach to the component.
    #[must_use]
    pub fn custom_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ComponentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenTicket => f.write_str("ticket:open"),
            Self::CloseTicket => f.write_str("ticket:close"),
            Self::GrantRole { role_id } => write!(f, "role:grant:{role_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::seeded_rng;

    #[test]
    fn test_ticket_channel_name_shape() {
        let mut rng = seeded_rng();
        for _ in 0..50 {
            let name = ticket_channel_name("Alice", &mut rng);
            let suffix = name.strip_prefix("ticket-alice-").unwrap_or_default();
            let number: u16 = suffix.parse().unwrap_or_default();
            assert!((1000..=9999).contains(&number), "bad name {name}");
        }
    }

    #[test]
    fn test_sanitize_channel_fragment() {
        assert_eq!(sanitize_channel_fragment("Alice"), "alice");
        assert_eq!(sanitize_channel_fragment("john.doe"), "john-doe");
        assert_eq!(sanitize_channel_fragment("__x__"), "__x__");
        assert_eq!(sanitize_channel_fragment("a  ..b"), "a-b");
        assert_eq!(sanitize_channel_fragment("..trail.."), "trail");
        assert_eq!(sanitize_channel_fragment("たろう"), "user");
        assert_eq!(sanitize_channel_fragment(""), "user");
        assert!(sanitize_channel_fragment(&"z".repeat(500)).len() <= MAX_USERNAME_CHARS);
    }

    #[test]
    fn test_access_plan_order_and_contents() {
        let plan = TicketAccessPlan::build(1, 2, 3, &[10, 11]);
        assert_eq!(
            plan.grants,
            vec![
                AccessGrant {
                    target: GrantTarget::Role(1),
                    allow: Access::NONE,
                    deny: Access::VIEW,
                },
                AccessGrant {
                    target: GrantTarget::Member(2),
                    allow: Access::FULL,
                    deny: Access::NONE,
                },
                AccessGrant {
                    target: GrantTarget::Member(3),
                    allow: Access::VIEW,
                    deny: Access::NONE,
                },
                AccessGrant {
                    target: GrantTarget::Role(10),
                    allow: Access::VIEW_SEND,
                    deny: Access::NONE,
                },
                AccessGrant {
                    target: GrantTarget::Role(11),
                    allow: Access::VIEW_SEND,
                    deny: Access::NONE,
                },
            ]
        );
    }

    #[test]
    fn test_access_plan_never_reopens_everyone() {
        // An administrator @everyone role must not undo the deny
        let plan = TicketAccessPlan::build(1, 2, 3, &[1]);
        assert_eq!(plan.grants.len(), 3);
    }

    #[test]
    fn test_component_action_custom_ids() {
        assert_eq!(ComponentAction::OpenTicket.custom_id(), "ticket:open");
        assert_eq!(ComponentAction::CloseTicket.custom_id(), "ticket:close");
        assert_eq!(
            ComponentAction::GrantRole { role_id: 42 }.custom_id(),
            "role:grant:42"
        );

        for action in [
            ComponentAction::OpenTicket,
            ComponentAction::CloseTicket,
            ComponentAction::GrantRole { role_id: u64::MAX },
        ] {
            assert_eq!(ComponentAction::parse(&action.custom_id()), Some(action));
        }
    }

    #[test]
    fn test_component_action_rejects_foreign_ids() {
        for id in [
            "",
            "ticket",
            "ticket:reopen",
            "ticket:open:extra",
            "role:grant",
            "role:grant:abc",
            "role:grant:0",
            "role:grant:1:2",
            "12345:category_delete",
        ] {
            assert_eq!(ComponentAction::parse(id), None, "parsed {id:?}");
        }
    }
}
