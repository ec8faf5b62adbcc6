//! Oware board state and move execution.
//!
//! A [`Board`] is an immutable game position: twelve fields of seeds, the
//! seeds each player has captured so far, and the player to move.
//! [`Board::execute_move`] never mutates its receiver; it returns a new
//! board or the reason the move cannot be played.
//!
//! Moves are addressed relative to the mover: move `m` sows field `m` for
//! player A and field `m + 6` for player B.

use std::fmt;

use thiserror::Error;

use crate::constants::{
    CAPTURE_MAX, CAPTURE_MIN, FIELDS, FIELDS_PER_ROW, INITIAL_SEEDS, TOTAL_SEEDS,
};

/// Index of one of the mover's six home fields, in `0..6`.
pub type Move = usize;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Index of the first field in this player's row.
    pub fn row_start(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => FIELDS_PER_ROW,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// Whether this player may capture from `field`.
    ///
    /// Field 6 passes the test for both players: A captures from
    /// `field >= 6` while B captures from `field <= 6`.
    fn captures_from(self, field: usize) -> bool {
        match self {
            Player::A => field >= FIELDS_PER_ROW,
            Player::B => field <= FIELDS_PER_ROW,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The selected field is empty.
    #[error("illegal move: field {field} has no seeds to sow")]
    NoSeedsToSow { field: usize },
    /// The move does not address one of the mover's six fields.
    #[error("illegal move: {mv} is out of range (must be 0-5)")]
    OutOfRange { mv: Move },
}

/// Reason a position was refused by [`Board::from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// Seeds on the board plus captured seeds do not add up to 48.
    #[error("invalid position: {found} seeds in play (must be 48)")]
    SeedCount { found: u64 },
}

/// An Oware position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    current_player: Player,
    /// Seeds captured so far, indexed by player (A, B).
    captures: [u8; 2],
    fields: [u8; FIELDS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The initial position: four seeds in every field, no captures, A to move.
    pub fn new() -> Self {
        Self {
            current_player: Player::A,
            captures: [0, 0],
            fields: [INITIAL_SEEDS; FIELDS],
        }
    }

    /// Build an arbitrary position. `captures` holds the totals of A and B.
    ///
    /// # Errors
    /// [`PositionError::SeedCount`] unless the fields and captures together
    /// hold exactly 48 seeds.
    pub fn from_parts(
        current_player: Player,
        captures: [u32; 2],
        fields: [u8; FIELDS],
    ) -> Result<Self, PositionError> {
        let found = fields.iter().map(|&s| u64::from(s)).sum::<u64>()
            + captures.iter().map(|&c| u64::from(c)).sum::<u64>();
        if found != u64::from(TOTAL_SEEDS) {
            return Err(PositionError::SeedCount { found });
        }
        // Both totals are at most 48 here
        let (Ok(a), Ok(b)) = (u8::try_from(captures[0]), u8::try_from(captures[1])) else {
            return Err(PositionError::SeedCount { found });
        };
        Ok(Self {
            current_player,
            captures: [a, b],
            fields,
        })
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Seeds captured by `player` so far.
    pub fn captures(&self, player: Player) -> u32 {
        u32::from(self.captures[player.index()])
    }

    pub fn fields(&self) -> &[u8; FIELDS] {
        &self.fields
    }

    /// Seed count of a single field.
    ///
    /// # Panics
    /// Panics if `field >= 12`.
    pub fn field(&self, field: usize) -> u8 {
        self.fields[field]
    }

    /// Seeds still on the board.
    pub fn seeds_on_board(&self) -> u32 {
        self.fields.iter().map(|&s| u32::from(s)).sum()
    }

    /// Capture difference from the perspective of the player to move.
    pub fn score(&self) -> i32 {
        let own = i32::from(self.captures[self.current_player.index()]);
        let other = i32::from(self.captures[self.current_player.opponent().index()]);
        own - other
    }

    /// Moves the player to move can play, in increasing order.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        let start = self.current_player.row_start();
        (0..FIELDS_PER_ROW).filter(move |&mv| self.fields[start + mv] > 0)
    }

    /// Play `mv` for the player to move and return the resulting position.
    ///
    /// Sows every seed of the selected field forward, skipping the field
    /// itself, then captures backward from the last sown field while fields
    /// hold two or three seeds on the capturable side. The turn always
    /// passes to the opponent; whether the opponent has seeds left is not
    /// checked.
    ///
    /// # Errors
    /// - [`MoveError::OutOfRange`] if `mv` is not in `0..6`
    /// - [`MoveError::NoSeedsToSow`] if the selected field is empty
    pub fn execute_move(&self, mv: Move) -> Result<Board, MoveError> {
        if mv >= FIELDS_PER_ROW {
            return Err(MoveError::OutOfRange { mv });
        }
        let start = self.current_player.row_start() + mv;
        if self.fields[start] == 0 {
            return Err(MoveError::NoSeedsToSow { field: start });
        }

        let mut next = self.clone();
        let last = next.sow(start);
        next.capture(last);
        next.current_player = self.current_player.opponent();
        Ok(next)
    }

    /// Empty `start` and sow its seeds forward. Returns the last field sown.
    fn sow(&mut self, start: usize) -> usize {
        let mut seeds = self.fields[start];
        self.fields[start] = 0;
        let mut field = start;
        while seeds > 0 {
            field = next_field(field);
            if field == start {
                continue;
            }
            self.fields[field] += 1;
            seeds -= 1;
        }
        field
    }

    /// Capture for the player to move, walking backward from `field`.
    fn capture(&mut self, mut field: usize) {
        let mover = self.current_player;
        while self.is_capturable(field) {
            self.captures[mover.index()] += self.fields[field];
            self.fields[field] = 0;
            field = previous_field(field);
        }
    }

    fn is_capturable(&self, field: usize) -> bool {
        let seeds = self.fields[field];
        (CAPTURE_MIN..=CAPTURE_MAX).contains(&seeds) && self.current_player.captures_from(field)
    }
}

#[inline]
fn next_field(field: usize) -> usize {
    (field + 1) % FIELDS
}

#[inline]
fn previous_field(field: usize) -> usize {
    (field + FIELDS - 1) % FIELDS
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "captures player A: {}", self.captures(Player::A))?;
        writeln!(f, "captures player B: {}", self.captures(Player::B))?;
        writeln!(f, "current player: {}", self.current_player)?;
        for row in self.fields.chunks(FIELDS_PER_ROW) {
            for seeds in row {
                write!(f, "{seeds}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.fields(), &[4; FIELDS]);
        assert_eq!(board.captures(Player::A), 0);
        assert_eq!(board.captures(Player::B), 0);
        assert_eq!(board.current_player(), Player::A);
        assert_eq!(board.seeds_on_board(), TOTAL_SEEDS);
    }

    #[test]
    fn test_first_move_sows_forward() {
        let next = Board::new().execute_move(0).unwrap();
        assert_eq!(next.fields(), &[0, 5, 5, 5, 5, 4, 4, 4, 4, 4, 4, 4]);
        assert_eq!(next.captures(Player::A), 0);
        assert_eq!(next.captures(Player::B), 0);
        assert_eq!(next.current_player(), Player::B);
    }

    #[test]
    fn test_player_b_sows_from_own_row() {
        let board = Board::from_parts(Player::B, [0, 0], [4; FIELDS]).unwrap();
        let next = board.execute_move(5).unwrap();
        // Field 11 wraps around into A's row
        assert_eq!(next.fields(), &[5, 5, 5, 5, 4, 4, 4, 4, 4, 4, 4, 0]);
        assert_eq!(next.current_player(), Player::A);
    }

    #[test]
    fn test_empty_field_rejected() {
        let fields = [4, 4, 0, 5, 5, 5, 0, 4, 4, 4, 4, 4];
        assert_eq!(
            Board::from_parts(Player::A, [5, 4], fields)
                .unwrap()
                .execute_move(2),
            Err(MoveError::NoSeedsToSow { field: 2 })
        );
        let board = Board::from_parts(Player::B, [5, 4], fields).unwrap();
        assert_eq!(
            board.execute_move(0),
            Err(MoveError::NoSeedsToSow { field: 6 })
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let board = Board::new();
        assert_eq!(board.execute_move(6), Err(MoveError::OutOfRange { mv: 6 }));
        assert_eq!(
            board.execute_move(usize::MAX),
            Err(MoveError::OutOfRange { mv: usize::MAX })
        );
    }

    #[test]
    fn test_start_field_skipped_on_lap() {
        let mut fields = [0; FIELDS];
        fields[0] = 12;
        let next = Board::from_parts(Player::A, [18, 18], fields)
            .unwrap()
            .execute_move(0)
            .unwrap();
        assert_eq!(next.fields(), &[0, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(next.captures(Player::A), 18);
    }

    #[test]
    fn test_start_field_skipped_from_last_field() {
        let mut fields = [0; FIELDS];
        fields[11] = 13;
        let next = Board::from_parts(Player::B, [0, 35], fields)
            .unwrap()
            .execute_move(5)
            .unwrap();
        assert_eq!(next.field(11), 0);
        // Lands on field 1, capturing fields 1 and 0 (two seeds each)
        assert_eq!(next.captures(Player::B), 39);
        assert_eq!(
            next.seeds_on_board() + next.captures(Player::A) + next.captures(Player::B),
            TOTAL_SEEDS
        );
    }

    #[test]
    fn test_single_capture() {
        let fields = [0, 0, 0, 0, 0, 2, 4, 1, 4, 4, 4, 4];
        let next = Board::from_parts(Player::A, [12, 13], fields)
            .unwrap()
            .execute_move(5)
            .unwrap();
        assert_eq!(next.captures(Player::A), 14);
        assert_eq!(next.captures(Player::B), 13);
        assert_eq!(next.field(7), 0);
        assert_eq!(next.field(6), 5);
        assert_eq!(next.fields(), &[0, 0, 0, 0, 0, 0, 5, 0, 4, 4, 4, 4]);
    }

    #[test]
    fn test_capture_chains_backward() {
        let fields = [0, 0, 0, 0, 0, 2, 1, 2, 4, 4, 4, 4];
        let next = Board::from_parts(Player::A, [13, 14], fields)
            .unwrap()
            .execute_move(5)
            .unwrap();
        assert_eq!(next.captures(Player::A), 18);
        assert_eq!(next.field(6), 0);
        assert_eq!(next.field(7), 0);
    }

    #[test]
    fn test_no_capture_on_own_row() {
        // A lands on its own field 4 which ends up with 2 seeds
        let fields = [0, 0, 0, 1, 1, 0, 4, 4, 4, 4, 4, 4];
        let next = Board::from_parts(Player::A, [11, 11], fields)
            .unwrap()
            .execute_move(3)
            .unwrap();
        assert_eq!(next.field(4), 2);
        assert_eq!(next.captures(Player::A), 11);
    }

    #[test]
    fn test_capture_chain_wraps_for_b() {
        let fields = [1, 2, 0, 0, 0, 0, 4, 4, 4, 4, 4, 2];
        let next = Board::from_parts(Player::B, [11, 12], fields)
            .unwrap()
            .execute_move(5)
            .unwrap();
        // Lands on field 1 (3 seeds), then field 0 (2 seeds), stops at emptied 11
        assert_eq!(next.captures(Player::B), 17);
        assert_eq!(next.field(0), 0);
        assert_eq!(next.field(1), 0);
        assert_eq!(next.field(11), 0);
    }

    #[test]
    fn test_b_captures_boundary_field() {
        let fields = [0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 7];
        let next = Board::from_parts(Player::B, [20, 20], fields)
            .unwrap()
            .execute_move(5)
            .unwrap();
        assert_eq!(next.captures(Player::B), 22);
        assert_eq!(next.field(6), 0);
        assert_eq!(&next.fields()[..6], &[1u8; 6]);
    }

    #[test]
    fn test_score_is_relative_to_mover() {
        let fields = [4, 4, 4, 4, 4, 4, 4, 4, 4, 2, 0, 0];
        let a = Board::from_parts(Player::A, [7, 3], fields).unwrap();
        let b = Board::from_parts(Player::B, [7, 3], fields).unwrap();
        assert_eq!(a.score(), 4);
        assert_eq!(b.score(), -4);
        assert_eq!(a.score(), -b.score());
    }

    #[test]
    fn test_from_parts_rejects_wrong_seed_count() {
        let mut fields = [0; FIELDS];
        fields[0] = 12;
        fields[1] = 255;
        assert_eq!(
            Board::from_parts(Player::A, [0, 0], fields),
            Err(PositionError::SeedCount { found: 267 })
        );
        assert_eq!(
            Board::from_parts(Player::A, [u32::MAX, 0], [4; FIELDS]),
            Err(PositionError::SeedCount {
                found: u64::from(u32::MAX) + 48
            })
        );
        assert_eq!(
            Board::from_parts(Player::B, [0, 0], [3; FIELDS]),
            Err(PositionError::SeedCount { found: 36 })
        );
    }

    #[test]
    fn test_from_parts_accepts_full_count() {
        let board = Board::from_parts(Player::B, [20, 4], [2; FIELDS]).unwrap();
        assert_eq!(board.captures(Player::A), 20);
        assert_eq!(board.captures(Player::B), 4);
        assert_eq!(board.score(), -16);
    }

    #[test]
    fn test_legal_moves() {
        let fields = [0, 3, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0];
        let a = Board::from_parts(Player::A, [21, 21], fields).unwrap();
        assert_eq!(a.legal_moves().collect::<Vec<_>>(), vec![1, 4]);
        let b = Board::from_parts(Player::B, [21, 21], fields).unwrap();
        assert_eq!(b.legal_moves().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_execute_move_leaves_receiver_untouched() {
        let board = Board::new();
        let _ = board.execute_move(3).unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display() {
        let text = Board::new().execute_move(0).unwrap().to_string();
        let expected = "captures player A: 0\n\
                        captures player B: 0\n\
                        current player: B\n\
                        0\t5\t5\t5\t5\t4\t\n\
                        4\t4\t4\t4\t4\t4\t\n";
        assert_eq!(text, expected);
    }
}
