//! Engine adapter contract
//!
//! The session drives an external analysis engine through this trait.
//! Implementations own the engine's lifecycle (typically a UCI child
//! process); the session only ever hands them a position and a search
//! budget and reads back a move or an evaluation.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// A position expressed as the move sequence from the standard start
///
/// Moves are in UCI notation (`e2e4`, `e7e8q`). This is the exact shape
/// a UCI `position startpos moves ...` command wants, and it keeps
/// adapters from ever inspecting session internals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionSpec {
    pub uci_moves: Vec<String>,
}

impl PositionSpec {
    pub fn new(uci_moves: Vec<String>) -> Self {
        Self { uci_moves }
    }
}

/// Search budget for a single engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Wall-clock limit per search
    MoveTime(Duration),
    /// Fixed search depth in plies
    Depth(u32),
}

/// Engine verdict on a position, relative to the side to move
///
/// UCI engines report scores from the mover's point of view; converting
/// to absolute (white, black) terms is the probability model's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Forced mate in the given number of plies; positive means the side
    /// to move delivers it, negative means it is delivered against them.
    /// Zero means the position is already decided against the mover.
    Mate(i32),
    /// Centipawn score, positive favoring the side to move
    Centipawns(i32),
    /// No usable score (drawn, insufficient material, engine declined)
    NoScore,
}

/// External engine the session queries for replies and evaluations
///
/// Both calls are the session's only suspension points. A failed call is
/// recoverable: implementations must not poison their own state on error.
#[async_trait]
pub trait ChessEngine: Send {
    /// Best move for the given position under the budget, in UCI notation
    async fn best_move(
        &mut self,
        position: &PositionSpec,
        budget: SearchBudget,
    ) -> EngineResult<String>;

    /// Score for the given position under the budget
    async fn evaluate(
        &mut self,
        position: &PositionSpec,
        budget: SearchBudget,
    ) -> EngineResult<Evaluation>;

    /// Hint that a fresh game is starting; state reset is best-effort
    async fn new_game(&mut self) -> EngineResult<()> {
        Ok(())
    }
}

/// Opponent strength presets
///
/// Difficulty maps to the engine's time budget per move. More time means
/// deeper search and stronger play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 100ms per move, shallow tactics only
    #[default]
    Easy,
    /// 500ms per move
    Medium,
    /// 1.5s per move
    Hard,
}

impl Difficulty {
    /// Time allocation for this difficulty level
    pub fn budget(self) -> SearchBudget {
        let millis = match self {
            Difficulty::Easy => 100,
            Difficulty::Medium => 500,
            Difficulty::Hard => 1500,
        };
        SearchBudget::MoveTime(Duration::from_millis(millis))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty {other:?}, expected easy, medium or hard"
            )),
        }
    }
}
