//! Error types for the session crate
//!
//! Provides custom error types for move validation, engine availability,
//! and the engine adapter boundary.

use thiserror::Error;

/// Errors reported by the engine adapter boundary
///
/// Every failure mode of an external engine surfaces as one of these
/// variants. They are recoverable per call: the session stays usable and
/// the next command may succeed if the engine comes back.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine process could not be launched or failed its handshake
    #[error("engine failed to start: {message}")]
    Launch { message: String },

    /// Engine produced output the adapter could not interpret
    #[error("engine protocol error: {message}")]
    Protocol { message: String },

    /// Engine stopped responding within the allotted time
    #[error("engine timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O failure on the engine's stdin/stdout pipes
    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine adapter operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that a session command can report to its caller
#[derive(Debug, Error)]
pub enum SessionError {
    /// No move text was supplied
    #[error("no move supplied")]
    EmptyMove,

    /// The position oracle rejected the move (bad syntax or illegal)
    ///
    /// Session state is untouched when this is returned.
    #[error("invalid move {input:?}: {reason}")]
    IllegalMove { input: String, reason: String },

    /// The engine adapter failed mid-cycle
    ///
    /// The player's half-move has already been applied when this is
    /// returned from the move cycle; see `GameSession::apply_player_move`.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(#[from] EngineError),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
