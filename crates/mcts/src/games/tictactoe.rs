//! Tic-tac-toe expressed against the abstract state contract.
//!
//! Tic-tac-toe is a solved game where perfect play always results in a
//! draw, which makes it ideal for validating search correctness: from a
//! position with a forced win the engine must find the winning move,
//! and no search should ever walk into a lost position.
//!
//! Rewards are reported from X's perspective: +1.0 for an X win, -1.0
//! for an O win, 0.0 for a draw. A session searching on O's behalf sets
//! `invert_reward` on its config.

use std::fmt;

use canopy_core::{Result, State};

/// Tic-tac-toe player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Tic-tac-toe board state.
///
/// Cells are indexed 0-8 row-major:
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    board: [Option<Player>; 9],
    current: Player,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

impl TicTacToeState {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Player::X,
        }
    }

    /// Get the current player to move.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        for line in LINES {
            if let Some(player) = self.board[line[0]] {
                if self.board[line[1]] == Some(player) && self.board[line[2]] == Some(player) {
                    return Some(player);
                }
            }
        }
        None
    }

    /// The state after the current player plays `cell`.
    pub fn play(&self, cell: usize) -> Self {
        let mut next = self.clone();
        next.board[cell] = Some(self.current);
        next.current = self.current.opposite();
        next
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for TicTacToeState {
    fn next_states(&self) -> Vec<Self> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(cell, _)| self.play(cell))
            .collect()
    }

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    fn reward(&self) -> Result<f64> {
        self.require_terminal()?;
        Ok(match self.winner() {
            Some(Player::X) => 1.0,
            Some(Player::O) => -1.0,
            None => 0.0,
        })
    }
}

/// Parse a board from 9 cell characters (`X`, `O`, `.`), row-major.
///
/// The side to move is inferred from the piece counts: X moves when the
/// counts are equal, O when X is one ahead. Any other count balance, a
/// wrong length, or a stray character is rejected.
impl TryFrom<&str> for TicTacToeState {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let cells: Vec<char> = s.chars().collect();
        if cells.len() != 9 {
            return Err(format!("expected 9 cells, got {}", cells.len()));
        }

        let mut board = [None; 9];
        for (ix, &ch) in cells.iter().enumerate() {
            board[ix] = match ch {
                'X' => Some(Player::X),
                'O' => Some(Player::O),
                '.' => None,
                other => return Err(format!("invalid cell character {other:?}")),
            };
        }

        let xs = board.iter().filter(|c| **c == Some(Player::X)).count();
        let os = board.iter().filter(|c| **c == Some(Player::O)).count();
        let current = if xs == os {
            Player::X
        } else if xs == os + 1 {
            Player::O
        } else {
            return Err(format!("impossible piece counts: {xs} X vs {os} O"));
        };

        Ok(Self { board, current })
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, " | ")?;
                }
                match self.board[row * 3 + col] {
                    Some(Player::X) => write!(f, " X ")?,
                    Some(Player::O) => write!(f, " O ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
