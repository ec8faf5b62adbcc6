//! Fixed-depth negamax search over a lazily expanded game tree.
//!
//! Each [`GameTree`] node owns one [`Board`] for its whole life and caches two
//! things about it:
//! - its one-ply expansion, built on the first call to
//!   [`GameTree::generate_moves`] and never rebuilt
//! - the result of the most recent [`GameTree::min_max`] call, overwritten by
//!   every later search regardless of depth
//!
//! Scores follow the negamax convention: a node's score is from the
//! perspective of its player to move, and a parent negates its children's
//! scores before maximizing.

use std::fmt;

use tracing::{debug, trace};

use crate::board::{Board, Move, MoveError};
use crate::constants::{FIELDS_PER_ROW, NO_MOVES_SCORE};

/// What a candidate move leads to.
#[derive(Debug)]
pub enum MoveOutcome {
    /// The move is legal; the child node holds the resulting position.
    Played(GameTree),
    /// The move was rejected and has no child.
    Rejected(MoveError),
}

impl MoveOutcome {
    pub fn child(&self) -> Option<&GameTree> {
        match self {
            MoveOutcome::Played(child) => Some(child),
            MoveOutcome::Rejected(_) => None,
        }
    }

    pub fn child_mut(&mut self) -> Option<&mut GameTree> {
        match self {
            MoveOutcome::Played(child) => Some(child),
            MoveOutcome::Rejected(_) => None,
        }
    }

    pub fn is_played(&self) -> bool {
        matches!(self, MoveOutcome::Played(_))
    }
}

/// Result of a search, tagged with the depth it was run at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub depth: u32,
    pub score: i32,
    /// Lowest-numbered move reaching `score`; `None` if no move was playable.
    pub best_move: Option<Move>,
}

/// A node in the search tree.
#[derive(Debug)]
pub struct GameTree {
    board: Board,
    /// One entry per move in `0..6`, populated once.
    moves: Option<Vec<MoveOutcome>>,
    last_search: Option<SearchResult>,
}

impl GameTree {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            moves: None,
            last_search: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the one-ply expansion has been built.
    pub fn is_expanded(&self) -> bool {
        self.moves.is_some()
    }

    /// The cached expansion, if any, without building it.
    pub fn moves(&self) -> Option<&[MoveOutcome]> {
        self.moves.as_deref()
    }

    /// Child reached by `mv`, if the node is expanded and the move is legal.
    pub fn child(&self, mv: Move) -> Option<&GameTree> {
        self.moves.as_ref()?.get(mv)?.child()
    }

    /// Expand this node by one ply, or return the cached expansion.
    ///
    /// The returned slice has one entry per move in `0..6`. Rejected moves
    /// are stored with their reason and get no child node.
    pub fn generate_moves(&mut self) -> &[MoveOutcome] {
        self.moves_mut()
    }

    fn moves_mut(&mut self) -> &mut Vec<MoveOutcome> {
        let board = &self.board;
        self.moves.get_or_insert_with(|| expand(board))
    }

    /// Search `depth` plies and return the best achievable score for the
    /// player to move.
    ///
    /// Depth 0 returns [`Board::score`] directly, without expanding the node
    /// or touching the cached result. Otherwise the result replaces whatever
    /// an earlier search stored here. A node with no legal move scores
    /// [`NO_MOVES_SCORE`].
    pub fn min_max(&mut self, depth: u32) -> i32 {
        if depth == 0 {
            return self.board.score();
        }

        let mut score = NO_MOVES_SCORE;
        let mut best_move = None;
        for (mv, outcome) in self.moves_mut().iter_mut().enumerate() {
            if let Some(child) = outcome.child_mut() {
                let child_score = -child.min_max(depth - 1);
                if best_move.is_none() || child_score > score {
                    score = child_score;
                    best_move = Some(mv);
                }
            }
        }

        trace!(depth, score, ?best_move, "searched node");
        self.last_search = Some(SearchResult {
            depth,
            score,
            best_move,
        });
        score
    }

    /// Result of the most recent search with non-zero depth.
    pub fn last_search(&self) -> Option<SearchResult> {
        self.last_search
    }

    /// Score of the most recent search with non-zero depth.
    pub fn max_score(&self) -> Option<i32> {
        self.last_search.map(|r| r.score)
    }

    /// Best move found by the most recent search.
    pub fn best_move(&self) -> Option<Move> {
        self.last_search.and_then(|r| r.best_move)
    }

    /// Expected line of play from this node.
    ///
    /// Follows best moves through cached children while they carry a search
    /// result one ply shallower than their parent's. A child holding an older
    /// result from a different depth ends the line.
    pub fn principal_variation(&self) -> Vec<Move> {
        let mut line = Vec::new();
        let mut node = self;
        let mut expected = self.last_search.map(|r| r.depth);
        while let (Some(result), Some(depth)) = (node.last_search, expected) {
            if result.depth != depth {
                break;
            }
            let Some(mv) = result.best_move else {
                break;
            };
            line.push(mv);
            let Some(child) = node.child(mv) else {
                break;
            };
            node = child;
            expected = depth.checked_sub(1);
        }
        line
    }

    /// Number of nodes currently held by this subtree, including itself and
    /// children that have not been expanded yet.
    pub fn expanded_nodes(&self) -> usize {
        1 + self
            .moves
            .iter()
            .flatten()
            .filter_map(MoveOutcome::child)
            .map(GameTree::expanded_nodes)
            .sum::<usize>()
    }
}

/// Build the one-ply expansion of `board`.
fn expand(board: &Board) -> Vec<MoveOutcome> {
    (0..FIELDS_PER_ROW)
        .map(|mv| match board.execute_move(mv) {
            Ok(next) => MoveOutcome::Played(GameTree::new(next)),
            Err(reason) => {
                trace!(mv, %reason, "pruned move");
                MoveOutcome::Rejected(reason)
            }
        })
        .collect()
}

/// Run a search of `depth` plies from `root` and return the best move.
///
/// Returns `None` when the player to move has no legal move or `depth` is 0.
pub fn tree_search(root: &mut GameTree, depth: u32) -> Option<Move> {
    let score = root.min_max(depth);
    let best = if depth == 0 { None } else { root.best_move() };
    debug!(
        depth,
        score,
        ?best,
        nodes = root.expanded_nodes(),
        "search finished"
    );
    best
}

impl fmt::Display for GameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.max_score() {
            Some(score) => write!(f, "max score: {score}"),
            None => write!(f, "max score: none"),
        }
    }
}
