//! Unified error types for ticket-buddy.
//!
//! Domain failures (unknown category, bad input) are distinct variants so command
//! handlers can turn them into friendly replies, while infrastructure failures
//! (database, filesystem, Discord API) bubble up to the framework error handler.

use thiserror::Error;

/// Every error the bot can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Failure reported by the `SQLite` backend
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure in the JSON backend or config loader
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error, boxed to keep `Error` small
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    /// No category with this name exists in the guild
    #[error("Category '{name}' not found")]
    CategoryNotFound {
        /// Name that was looked up
        name: String,
    },

    /// Category name or emoji failed validation
    #[error("Invalid category: {message}")]
    InvalidCategory {
        /// Which rule was violated
        message: String,
    },

    /// The guild already has the maximum number of categories
    #[error("Category limit of {limit} reached")]
    CategoryLimit {
        /// Maximum categories allowed per guild
        limit: usize,
    },

    /// A user ID argument was not a decimal number
    #[error("Invalid user ID: {value}")]
    InvalidUserId {
        /// The rejected input
        value: String,
    },

    /// Rating outside 1..=5
    #[error("Invalid rating: {rating}")]
    InvalidRating {
        /// The rejected rating
        rating: i64,
    },

    /// The guild has no announcement channel configured
    #[error("No achievement channel configured for guild {guild_id}")]
    AnnouncementChannelNotSet {
        /// Guild the lookup was made for
        guild_id: u64,
    },

    /// A guild-only operation was invoked outside a guild
    #[error("This operation is only available inside a server")]
    GuildOnly,

    /// Stored document carries a schema version newer than this build understands
    #[error("Unsupported schema version {version} in {file}")]
    UnsupportedSchema {
        /// Version found on disk
        version: u32,
        /// File that carried it
        file: String,
    },
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_messages() {
        let err = Error::CategoryNotFound {
            name: "Support".to_string(),
        };
        assert_eq!(err.to_string(), "Category 'Support' not found");

        let err = Error::InvalidRating { rating: 7 };
        assert_eq!(err.to_string(), "Invalid rating: 7");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
