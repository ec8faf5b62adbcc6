//! Constants for board geometry and search parameters.
//!
//! The board is a flat array of 12 fields. Player A owns indices 0-5,
//! player B owns indices 6-11, and sowing runs in increasing index order.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of fields on the board.
pub const FIELDS: usize = 12;

/// Number of fields in each player's row (and number of candidate moves).
pub const FIELDS_PER_ROW: usize = 6;

/// Seeds placed in every field at the start of a game.
pub const INITIAL_SEEDS: u8 = 4;

/// Total number of seeds in play (on the board plus captured).
pub const TOTAL_SEEDS: u32 = FIELDS as u32 * INITIAL_SEEDS as u32;

// =============================================================================
// Capture Rule
// =============================================================================

/// Smallest seed count that can be captured.
pub const CAPTURE_MIN: u8 = 2;

/// Largest seed count that can be captured.
pub const CAPTURE_MAX: u8 = 3;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth (in plies) of the driver.
pub const SEARCH_DEPTH: u32 = 7;

/// Score reported by a node where no move can be played.
///
/// Scores are capture differences, so they lie in `[-TOTAL_SEEDS, TOTAL_SEEDS]`.
/// This value sits one below that range and can still be negated safely.
pub const NO_MOVES_SCORE: i32 = -(TOTAL_SEEDS as i32) - 1;
