//! Scoring, leveling, and gravity curves.
//!
//! Pure functions for calculating line-clear points, the level derived
//! from cumulative lines, and the gravity interval derived from the level.
//! No global state; fully testable.

use blockfall_types::{BASE_DROP_MS, DROP_MS_PER_LEVEL, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS};

/// Points awarded for clearing `lines` rows at once on level `level`.
///
/// Uses the classic single/double/triple/quad table multiplied by the
/// level in effect when the rows cleared. Zero rows scores zero.
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    match lines {
        1..=4 => LINE_SCORES[lines as usize].saturating_mul(level),
        _ => 0,
    }
}

/// Level derived from cumulative lines cleared: one level per ten lines,
/// starting at level 1.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval in milliseconds for a level.
///
/// Starts at one row per second and speeds up by 100ms per level, with a
/// 100ms floor from level 10 on.
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_MS_PER_LEVEL);
    BASE_DROP_MS.saturating_sub(speedup).max(MIN_DROP_MS)
}
