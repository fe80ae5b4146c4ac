//! Game session - the authoritative state manager
//!
//! Owns the board (through the position oracle), the move log, the
//! probability series and the session clock, and orchestrates the full
//! move cycle against the engine adapter:
//!
//! validate -> apply player move -> engine reply -> apply reply ->
//! evaluate -> append probabilities
//!
//! Commands are atomic from the caller's perspective. A rejected move
//! leaves every piece of state untouched. The one documented exception
//! is an engine failure after the player's move landed: the player's
//! half-move stays applied and the error says so distinctly.

use std::time::Duration;

use shakmaty::Color;
use tracing::{debug, info, warn};

use crate::clock::SessionClock;
use crate::engine::{ChessEngine, Difficulty, Evaluation, SearchBudget};
use crate::error::{EngineError, SessionError, SessionResult};
use crate::oracle::{BoardOracle, GameStatus};
use crate::probability::{win_probability, WinChances};
use crate::record::{MoveLog, MoveRecord, Mover};
use crate::series::ProbabilitySeries;

/// What a completed (or game-ending) move cycle reports back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Terminal status after the cycle
    pub status: GameStatus,
    /// The player's move as recorded, SAN
    pub player_san: String,
    /// The engine's reply, SAN; absent when the game ended on the
    /// player's move
    pub engine_san: Option<String>,
}

/// A single game of human versus engine
///
/// The session exclusively owns its board state, move log and series;
/// collaborators only ever see read-only snapshots. One command runs at
/// a time; the engine call inside `apply_player_move` is the only await
/// point.
pub struct GameSession<E: ChessEngine> {
    oracle: BoardOracle,
    engine: E,
    log: MoveLog,
    series: ProbabilitySeries,
    clock: SessionClock,
    budget: SearchBudget,
}

impl<E: ChessEngine> GameSession<E> {
    /// Fresh session at the starting position
    ///
    /// The engine is expected to be acquired and handshaken already;
    /// failing fast at startup beats failing on the first move.
    pub fn new(engine: E, difficulty: Difficulty) -> Self {
        Self {
            oracle: BoardOracle::new(),
            engine,
            log: MoveLog::default(),
            series: ProbabilitySeries::default(),
            clock: SessionClock::start(),
            budget: difficulty.budget(),
        }
    }

    /// Run one full move cycle for the player's move text
    ///
    /// Failure modes, in order of occurrence:
    /// - empty input: `EmptyMove`, nothing changed;
    /// - oracle rejection: `IllegalMove`, nothing changed;
    /// - engine failure after the player's move was applied:
    ///   `EngineUnavailable`, the player's half-move stays on the board
    ///   and in the log, no series entry is appended.
    ///
    /// When the player's move ends the game no engine reply is requested
    /// and no series entry is appended: a finished game has no fresh
    /// evaluation cycle, so the chart intentionally lags that final
    /// half-move.
    pub async fn apply_player_move(&mut self, text: &str) -> SessionResult<MoveReport> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyMove);
        }

        let player_move =
            self.oracle
                .apply_san(trimmed)
                .map_err(|reject| SessionError::IllegalMove {
                    input: trimmed.to_string(),
                    reason: reject.to_string(),
                })?;
        debug!(san = %player_move.san, uci = %player_move.uci, "player move applied");
        self.log.push(MoveRecord::player(player_move.san.clone()));

        if self.oracle.is_game_over() {
            let status = self.oracle.status();
            info!(?status, "game over on player move, no engine reply");
            return Ok(MoveReport {
                status,
                player_san: player_move.san,
                engine_san: None,
            });
        }

        let spec = self.oracle.position_spec();
        let reply_uci = self.engine.best_move(&spec, self.budget).await?;

        let reply = self
            .oracle
            .apply_uci(&reply_uci)
            .map_err(|reject| EngineError::Protocol {
                message: format!("engine suggested unplayable move {reply_uci:?}: {reject}"),
            })?;
        debug!(san = %reply.san, uci = %reply.uci, "engine reply applied");
        self.log.push(MoveRecord::engine(reply.san.clone()));

        let status = self.oracle.status();
        let chances = self.evaluate_position(status).await?;
        self.series.push(chances);

        Ok(MoveReport {
            status,
            player_san: player_move.san,
            engine_san: Some(reply.san),
        })
    }

    /// Score the position reached after the engine's reply
    ///
    /// Terminal positions are scored locally: engines cannot search a
    /// finished game, and the result is already known exactly.
    async fn evaluate_position(&mut self, status: GameStatus) -> SessionResult<WinChances> {
        let side_to_move = self.oracle.side_to_move();
        let eval = match status {
            GameStatus::Checkmate { .. } => Evaluation::Mate(0),
            GameStatus::Stalemate | GameStatus::InsufficientMaterial => Evaluation::NoScore,
            GameStatus::Ongoing => {
                let spec = self.oracle.position_spec();
                self.engine.evaluate(&spec, self.budget).await?
            }
        };
        Ok(win_probability(eval, side_to_move))
    }

    /// Roll back the most recent turn
    ///
    /// A no-op on an empty history. With an engine reply on top the
    /// whole pair is removed, engine half first so the oracle unwinds in
    /// reverse order of application. With a lone player move on top
    /// (the game ended before the engine could reply) exactly that one
    /// half-move is removed and the series stays as it is, because no
    /// entry was appended for the unfinished pair.
    pub fn undo(&mut self) {
        match self.log.last().map(|record| record.mover) {
            None => {
                debug!("undo on empty history, nothing to do");
            }
            Some(Mover::Engine) => {
                // The pair may lack a series entry when the evaluation
                // step failed; only pop one that actually belongs to it.
                let pair_was_scored = self.series.len() == self.log.engine_replies();

                self.log.pop();
                self.oracle.undo_last();
                self.log.pop();
                self.oracle.undo_last();

                if pair_was_scored {
                    self.series.pop();
                }
            }
            Some(Mover::Player) => {
                self.log.pop();
                self.oracle.undo_last();
            }
        }
    }

    /// Clear everything back to a fresh game
    ///
    /// Always succeeds. The engine is told a new game is starting, but a
    /// failure there only costs its internal caches, not our state.
    pub async fn reset(&mut self) {
        self.oracle.reset();
        self.log.clear();
        self.series.clear();
        self.clock.restart();

        if let Err(err) = self.engine.new_game().await {
            warn!(%err, "engine did not acknowledge new game");
        }
    }

    /// Time since session creation or the last reset
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Terminal status of the current position
    pub fn status(&self) -> GameStatus {
        self.oracle.status()
    }

    pub fn side_to_move(&self) -> Color {
        self.oracle.side_to_move()
    }

    /// Read-only piece placement for rendering
    pub fn board(&self) -> shakmaty::Board {
        self.oracle.board()
    }

    /// The score sheet, oldest first
    pub fn history(&self) -> &[MoveRecord] {
        self.log.as_slice()
    }

    /// White's probability trace, one entry per completed turn pair
    pub fn white_series(&self) -> &[f64] {
        self.series.white()
    }

    /// Black's probability trace, aligned with `white_series`
    pub fn black_series(&self) -> &[f64] {
        self.series.black()
    }

    /// Number of completed turn pairs
    pub fn completed_pairs(&self) -> usize {
        self.series.len()
    }

    /// Give the engine back for teardown
    pub fn into_engine(self) -> E {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineResult;
    use crate::engine::PositionSpec;
    use async_trait::async_trait;

    /// Engine that must never be called
    struct UnreachableEngine;

    #[async_trait]
    impl ChessEngine for UnreachableEngine {
        async fn best_move(
            &mut self,
            _position: &PositionSpec,
            _budget: SearchBudget,
        ) -> EngineResult<String> {
            panic!("engine must not be consulted");
        }

        async fn evaluate(
            &mut self,
            _position: &PositionSpec,
            _budget: SearchBudget,
        ) -> EngineResult<Evaluation> {
            panic!("engine must not be consulted");
        }
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected_without_engine_call() {
        let mut session = GameSession::new(UnreachableEngine, Difficulty::Easy);

        for input in ["", "   ", "\t\n"] {
            let err = session.apply_player_move(input).await.unwrap_err();
            assert!(matches!(err, SessionError::EmptyMove));
        }
        assert!(session.history().is_empty());
        assert_eq!(session.completed_pairs(), 0);
    }

    #[tokio::test]
    async fn test_illegal_move_is_rejected_without_engine_call() {
        let mut session = GameSession::new(UnreachableEngine, Difficulty::Easy);
        let before = session.board();

        let err = session.apply_player_move("e9").await.unwrap_err();
        assert!(matches!(err, SessionError::IllegalMove { .. }));
        assert!(session.history().is_empty());
        assert_eq!(session.board(), before);
    }

    #[test]
    fn test_undo_on_fresh_session_is_noop() {
        let mut session = GameSession::new(UnreachableEngine, Difficulty::Easy);
        session.undo();
        assert!(session.history().is_empty());
        assert_eq!(session.status(), GameStatus::Ongoing);
    }
}
