//! Reference domains for exercising the generic engine.
//!
//! These are intentionally small, solved games used by tests and
//! examples; real domains live in downstream crates.

mod tictactoe;

pub use tictactoe::{Player, TicTacToeState};
