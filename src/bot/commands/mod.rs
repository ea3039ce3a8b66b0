//! Discord command implementations organized by feature.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Achievement channel, posting and template panel
pub mod achievement;

/// Ticket category management
pub mod category;

/// General utility commands
pub mod general;

/// Verify panels and free-form embeds
pub mod panel;

/// Ticket panels and ticket access
pub mod ticket;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use achievement::*;
pub use category::*;
pub use general::*;
pub use panel::*;
pub use ticket::*;

/// Every command the bot registers, in help order.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        achievement_channel(),
        write_achievement(),
        achievement_panel(),
        create_category(),
        delete_category(),
        ticket_panel(),
        ticket_invite(),
        verify(),
        send_embed(),
        nitropresent(),
        ping(),
        help(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registered_command_names() {
        let names: Vec<String> = all().into_iter().map(|c| c.name).collect();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len(), "duplicate command names");

        for expected in [
            "achievement_channel",
            "write_achievement",
            "achievement_panel",
            "create_category",
            "delete_category",
            "ticket_panel",
            "discordacounts",
            "verify",
            "send_embed",
            "nitropresent",
            "ping",
            "help",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing /{expected}");
        }
    }

    #[test]
    fn test_every_command_is_a_slash_command() {
        for command in all() {
            assert!(
                command.slash_action.is_some(),
                "/{} is not a slash command",
                command.name
            );
        }
    }
}
