//! Random member ID draw for the "nitro present" command.

use rand::{Rng, seq::SliceRandom};

/// Most IDs shown in one draw
pub const MAX_DRAW: usize = 25;

/// Shuffles `member_ids` and keeps at most `limit` of them.
pub fn pick_member_ids<R: Rng + ?Sized>(
    mut member_ids: Vec<u64>,
    limit: usize,
    rng: &mut R,
) -> Vec<u64> {
    member_ids.shuffle(rng);
    member_ids.truncate(limit);
    member_ids
}

/// One backtick-quoted ID per line.
#[must_use]
pub fn format_member_ids(member_ids: &[u64]) -> String {
    member_ids
        .iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join("\n")
}
