//! Compile-time game settings. The board size is fixed; nothing here is read
//! from the environment.

/// Largest valid column. The playing field spans `0..=AREA_X`.
pub const AREA_X: i32 = 30;

/// Largest valid row. The playing field spans `0..=AREA_Z`.
pub const AREA_Z: i32 = 15;

/// Starting body, tail first.
pub const INITIAL_BODY: [(i32, i32); 4] = [(2, 2), (3, 2), (4, 2), (5, 2)];

pub const LOG_FILE: &str = "snake.log";
