//! Game session core for evalboard
//!
//! Everything stateful about a human-versus-engine game lives here: the
//! board authority, the move log, the probability series, the clock and
//! the orchestration that ties them to an external engine. The crate
//! does no I/O itself; engine processes and rendering belong to the
//! adapter crates.

pub mod clock;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod probability;
pub mod record;
pub mod series;
pub mod session;

pub use engine::{ChessEngine, Difficulty, Evaluation, PositionSpec, SearchBudget};
pub use error::{EngineError, EngineResult, SessionError, SessionResult};
pub use oracle::{AppliedMove, BoardOracle, GameStatus, MoveReject};
pub use probability::{win_probability, WinChances, CP_SCALE};
pub use record::{MoveLog, MoveRecord, Mover};
pub use session::{GameSession, MoveReport};
