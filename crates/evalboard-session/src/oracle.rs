//! Position oracle - the authority on chess rules
//!
//! Wraps `shakmaty` as the single source of truth for legality,
//! application and termination queries, and owns the board state on the
//! session's behalf. Positions in `shakmaty` are immutable values, so
//! undo works by keeping a snapshot of every prior position; the stack
//! depth always equals the number of applied half-moves.

use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, Move, Position};
use thiserror::Error;

use crate::engine::PositionSpec;

/// Why the oracle refused a candidate move
#[derive(Debug, Error)]
pub enum MoveReject {
    /// The text does not parse as a move in the expected notation
    #[error("not a move in standard algebraic notation: {0}")]
    Syntax(String),

    /// The move parses but is not legal in the current position
    #[error("not a legal move in this position")]
    Illegal,
}

/// A move the oracle accepted and applied
///
/// Carries both notations: SAN is what the user sees in the history,
/// UCI is what gets replayed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub san: String,
    pub uci: String,
}

/// Terminal state of the game, derived on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    /// Neither side retains mating material
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Rules authority and board-state owner
///
/// All mutation of the position goes through `apply_san` / `apply_uci` /
/// `undo_last` / `reset`; callers only ever receive read-only snapshots.
#[derive(Debug, Clone)]
pub struct BoardOracle {
    position: Chess,
    snapshots: Vec<Chess>,
    uci_history: Vec<String>,
}

impl Default for BoardOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardOracle {
    /// Oracle at the standard starting position
    pub fn new() -> Self {
        Self {
            position: Chess::default(),
            snapshots: Vec::new(),
            uci_history: Vec::new(),
        }
    }

    /// Whether `text` is a legal SAN move here, without applying it
    pub fn is_legal(&self, text: &str) -> bool {
        text.parse::<San>()
            .ok()
            .and_then(|san| san.to_move(&self.position).ok())
            .is_some()
    }

    /// Validate and apply a move given in standard algebraic notation
    pub fn apply_san(&mut self, text: &str) -> Result<AppliedMove, MoveReject> {
        let san: San = text
            .parse()
            .map_err(|err| MoveReject::Syntax(format!("{err}")))?;
        let m = san.to_move(&self.position).map_err(|_| MoveReject::Illegal)?;
        self.apply(m)
    }

    /// Validate and apply a move given in UCI notation (engine replies)
    pub fn apply_uci(&mut self, text: &str) -> Result<AppliedMove, MoveReject> {
        let uci: UciMove = text
            .parse()
            .map_err(|err| MoveReject::Syntax(format!("{err}")))?;
        let m = uci.to_move(&self.position).map_err(|_| MoveReject::Illegal)?;
        self.apply(m)
    }

    fn apply(&mut self, m: Move) -> Result<AppliedMove, MoveReject> {
        // SAN must be derived before the move is played; the suffix
        // (+/#) comes from the position after it.
        let san = SanPlus::from_move(self.position.clone(), &m).to_string();
        let uci = m.to_uci(CastlingMode::Standard).to_string();

        let next = self
            .position
            .clone()
            .play(&m)
            .map_err(|_| MoveReject::Illegal)?;

        self.snapshots
            .push(std::mem::replace(&mut self.position, next));
        self.uci_history.push(uci.clone());

        Ok(AppliedMove { san, uci })
    }

    /// Roll back the most recent half-move
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo_last(&mut self) -> bool {
        match self.snapshots.pop() {
            Some(prev) => {
                self.position = prev;
                self.uci_history.pop();
                true
            }
            None => false,
        }
    }

    /// Back to the starting position with empty history
    pub fn reset(&mut self) {
        self.position = Chess::default();
        self.snapshots.clear();
        self.uci_history.clear();
    }

    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    /// Terminal status of the current position
    pub fn status(&self) -> GameStatus {
        if self.position.is_checkmate() {
            GameStatus::Checkmate {
                winner: self.position.turn().other(),
            }
        } else if self.position.is_stalemate() {
            GameStatus::Stalemate
        } else if self.position.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    /// Number of applied half-moves
    pub fn ply(&self) -> usize {
        self.snapshots.len()
    }

    /// Read-only piece placement for rendering
    pub fn board(&self) -> shakmaty::Board {
        self.position.board().clone()
    }

    /// The move sequence in the shape engine adapters consume
    pub fn position_spec(&self) -> PositionSpec {
        PositionSpec::new(self.uci_history.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_oracle_is_startpos() {
        let oracle = BoardOracle::new();
        assert_eq!(oracle.ply(), 0);
        assert_eq!(oracle.side_to_move(), Color::White);
        assert!(!oracle.is_game_over());
        assert_eq!(oracle.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_apply_san_legal_opening() {
        let mut oracle = BoardOracle::new();
        let applied = oracle.apply_san("e4").expect("e4 is legal from start");

        assert_eq!(applied.san, "e4");
        assert_eq!(applied.uci, "e2e4");
        assert_eq!(oracle.ply(), 1);
        assert_eq!(oracle.side_to_move(), Color::Black);
    }

    #[test]
    fn test_apply_san_rejects_nonsense_square() {
        let mut oracle = BoardOracle::new();
        let before = oracle.board();

        assert!(oracle.apply_san("e9").is_err());
        assert_eq!(oracle.ply(), 0, "rejected move must not advance the board");
        assert_eq!(oracle.board(), before);
    }

    #[test]
    fn test_apply_san_rejects_illegal_but_wellformed() {
        let mut oracle = BoardOracle::new();
        // Ke2 parses fine but the king cannot move at the start.
        let err = oracle.apply_san("Ke2").unwrap_err();
        assert!(matches!(err, MoveReject::Illegal | MoveReject::Syntax(_)));
        assert_eq!(oracle.ply(), 0);
    }

    #[test]
    fn test_apply_uci_accepts_engine_coordinates() {
        let mut oracle = BoardOracle::new();
        let applied = oracle.apply_uci("e2e4").expect("engine reply notation");
        // Recorded in SAN so the history stays in one dialect.
        assert_eq!(applied.san, "e4");
        assert!(oracle.apply_uci("e7e9").is_err());
    }

    #[test]
    fn test_is_legal_does_not_mutate() {
        let oracle = BoardOracle::new();
        assert!(oracle.is_legal("Nf3"));
        assert!(!oracle.is_legal("Nf6"));
        assert_eq!(oracle.ply(), 0);
    }

    #[test]
    fn test_undo_restores_previous_position() {
        let mut oracle = BoardOracle::new();
        let before = oracle.board();

        oracle.apply_san("e4").unwrap();
        assert!(oracle.undo_last());

        assert_eq!(oracle.ply(), 0);
        assert_eq!(oracle.side_to_move(), Color::White);
        assert_eq!(oracle.board(), before);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut oracle = BoardOracle::new();
        assert!(!oracle.undo_last());
        assert_eq!(oracle.ply(), 0);
    }

    #[test]
    fn test_position_spec_tracks_uci_history() {
        let mut oracle = BoardOracle::new();
        oracle.apply_san("e4").unwrap();
        oracle.apply_san("e5").unwrap();
        oracle.apply_san("Nf3").unwrap();

        assert_eq!(
            oracle.position_spec().uci_moves,
            vec!["e2e4", "e7e5", "g1f3"]
        );

        oracle.undo_last();
        assert_eq!(oracle.position_spec().uci_moves, vec!["e2e4", "e7e5"]);
    }

    #[test]
    fn test_fools_mate_is_checkmate_for_black() {
        let mut oracle = BoardOracle::new();
        for san in ["f3", "e5", "g4", "Qh4#"] {
            oracle.apply_san(san).unwrap();
        }

        assert!(oracle.is_game_over());
        assert_eq!(
            oracle.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
    }

    #[test]
    fn test_san_records_check_suffix() {
        let mut oracle = BoardOracle::new();
        for san in ["f3", "e5", "g4"] {
            oracle.apply_san(san).unwrap();
        }
        let applied = oracle.apply_san("Qh4").expect("mating move is legal");
        assert_eq!(applied.san, "Qh4#", "SAN carries the mate suffix");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut oracle = BoardOracle::new();
        oracle.apply_san("e4").unwrap();
        oracle.apply_san("c5").unwrap();

        oracle.reset();

        assert_eq!(oracle.ply(), 0);
        assert!(oracle.position_spec().uci_moves.is_empty());
        assert_eq!(oracle.board(), BoardOracle::new().board());
    }

    #[test]
    fn test_castling_uci_is_standard_notation() {
        let mut oracle = BoardOracle::new();
        for san in ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"] {
            oracle.apply_san(san).unwrap();
        }
        let applied = oracle.apply_san("O-O").expect("castling is legal");
        assert_eq!(applied.uci, "e1g1");
    }
}
