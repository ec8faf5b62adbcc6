//! Oware-Rust: an Oware board engine with a fixed-depth negamax search.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and search parameters
//! - [`board`] - Board state, sowing and capture rules
//! - [`game_tree`] - Lazily expanded search tree and negamax scoring
//!
//! ## Example
//!
//! ```
//! use oware_rust::board::Board;
//! use oware_rust::game_tree::{GameTree, tree_search};
//!
//! // Play the first move of the game
//! let board = Board::new().execute_move(0).unwrap();
//!
//! // Search the reply four plies deep
//! let mut root = GameTree::new(board);
//! let best = tree_search(&mut root, 4);
//! println!("Best move: {:?}", best);
//! println!("{root}");
//! ```

pub mod board;
pub mod constants;
pub mod game_tree;
