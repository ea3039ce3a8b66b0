//! Title helpers for free-form embeds.

/// Prefixes `title` with the comma-separated emoji list, space-joined.
///
/// Blank entries are dropped and the result is trimmed, so `None`, `""` and `" , "`
/// all leave the title untouched.
#[must_use]
pub fn emoji_prefixed_title(emojis: Option<&str>, title: &str) -> String {
    let emoji_text = emojis
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{emoji_text} {title}").trim().to_string()
}

/// Title of a verify panel: `"<emoji> <title>"` when an emoji is given.
#[must_use]
pub fn verify_title(title: &str, emoji: Option<&str>) -> String {
    match emoji.map(str::trim).filter(|e| !e.is_empty()) {
        Some(emoji) => format!("{emoji} {title}"),
        None => title.to_string(),
    }
}
