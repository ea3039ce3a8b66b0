//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete and
//! the select menus and buttons attached to panel messages.

/// Autocomplete handlers for category names
pub mod autocomplete;
/// Persistent component router (ticket panel, ticket close, role buttons)
pub mod components;
