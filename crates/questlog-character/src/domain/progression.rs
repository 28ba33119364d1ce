//! Experience thresholds.

/// Highest attainable level.
pub const MAX_LEVEL: u32 = 10;

/// Total XP needed to reach each level, starting at level 1.
pub const XP_THRESHOLDS: [u32; MAX_LEVEL as usize] =
    [0, 100, 250, 450, 700, 1000, 1350, 1750, 2200, 2700];

/// Level reached with `xp` total experience.
#[must_use]
pub fn level_for_xp(xp: u32) -> u32 {
    let reached = XP_THRESHOLDS.iter().filter(|&&needed| xp >= needed).count();
    u32::try_from(reached).unwrap_or(MAX_LEVEL).max(1)
}

/// Total XP needed for the level after `level`, or `None` at the cap.
#[must_use]
pub fn xp_for_next_level(level: u32) -> Option<u32> {
    usize::try_from(level)
        .ok()
        .and_then(|next_index| XP_THRESHOLDS.get(next_index))
        .copied()
}
