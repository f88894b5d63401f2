//! A rules-accurate Go board core: stones, groups, liberties, captures,
//! suicide, simple ko, and eye classification, reimplemented from the
//! layered `GridPoint` / `BoardGrid` / `GroupArena` / `PosGroup` / `Board`
//! design this crate is built around.
//!
//! ## Modules
//!
//! - [`point`] - grid coordinates and their bounded-grid navigation
//! - [`grid`] - dense point -> stone-state map with an incremental Zobrist hash
//! - [`group`] - group metadata and the stable-handle slot arena that owns it
//! - [`posgroup`] - dense point -> group-handle map with union-find-by-rewrite
//! - [`error`] - the `PosStatus`/`BoardError` taxonomy
//! - [`request`] - training feature extraction
//! - [`board`] - the state machine tying the above together: placement,
//!   capture, suicide, ko, legality, and eye classification
//!
//! ## Example
//!
//! ```
//! use michi_rust::board::Board;
//! use michi_rust::grid::Player;
//! use michi_rust::point::GridPoint;
//!
//! let mut board = Board::new_square(19);
//! board.try_place(GridPoint::new(3, 3), Player::Black).unwrap();
//! assert_eq!(board.all_valid_positions(Player::White).len(), 360);
//! ```

pub mod board;
pub mod error;
pub mod grid;
pub mod group;
pub mod point;
pub mod posgroup;
pub mod request;
