//! Core business logic - framework-agnostic operations behind the bot commands.

/// Achievement records and announcement channel lookup
pub mod achievement;
/// Category validation, limits and persistence
pub mod category;
/// Embed title helpers
pub mod embed;
/// Random member draws
pub mod lottery;
/// Ticket channel naming, access plans and component routing IDs
pub mod ticket;
