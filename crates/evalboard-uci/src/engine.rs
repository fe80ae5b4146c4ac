//! UCI engine child process
//!
//! Owns a single engine process for the lifetime of a session: spawned
//! and handshaken once at startup (so a missing or broken engine binary
//! fails fast, before any move is played), driven per search, told
//! `quit` at teardown. A per-call failure leaves the adapter usable for
//! the next call whenever the process itself survived.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, trace};

use evalboard_session::{
    ChessEngine, EngineError, EngineResult, Evaluation, PositionSpec, SearchBudget,
};

use crate::protocol::{parse_line, EngineMessage};

/// Budget for the `uci`/`isready` handshake at startup
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Slack on top of a movetime budget before a search counts as hung
pub const SEARCH_GRACE: Duration = Duration::from_secs(2);

/// Per-line budget for depth-limited searches, which carry no time bound
const DEPTH_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

const QUIT_TIMEOUT: Duration = Duration::from_secs(2);

/// What one `go` run produced
struct SearchOutcome {
    best: String,
    score: Option<Evaluation>,
}

/// A UCI engine behind piped stdio
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    path: PathBuf,
}

impl UciEngine {
    /// Spawn the engine binary and complete the UCI handshake
    pub async fn launch(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();

        let mut child = Command::new(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| EngineError::Launch {
                message: format!("could not spawn {}: {err}", path.display()),
            })?;

        let stdin = child.stdin.take().ok_or_else(|| EngineError::Launch {
            message: "engine stdin was not captured".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| EngineError::Launch {
            message: "engine stdout was not captured".to_string(),
        })?;

        let mut engine = Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            path,
        };
        engine.handshake().await?;
        debug!(path = %engine.path.display(), "engine ready");
        Ok(engine)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ask the engine to exit, falling back to the kill-on-drop guard
    pub async fn quit(mut self) {
        if self.send("quit").await.is_ok() {
            let _ = timeout(QUIT_TIMEOUT, self.child.wait()).await;
        }
    }

    async fn handshake(&mut self) -> EngineResult<()> {
        self.send("uci").await?;
        self.expect(HANDSHAKE_TIMEOUT, |msg| matches!(msg, EngineMessage::UciOk))
            .await?;
        self.sync().await
    }

    /// `isready` round trip, draining whatever the engine was emitting
    async fn sync(&mut self) -> EngineResult<()> {
        self.send("isready").await?;
        self.expect(HANDSHAKE_TIMEOUT, |msg| {
            matches!(msg, EngineMessage::ReadyOk)
        })
        .await
    }

    async fn send(&mut self, command: &str) -> EngineResult<()> {
        trace!(%command, "-> engine");
        self.stdin.write_all(command.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Next parsed line of engine output, bounded per line
    async fn next_message(&mut self, deadline: Duration) -> EngineResult<EngineMessage> {
        let line = timeout(deadline, self.stdout.next_line())
            .await
            .map_err(|_| EngineError::Timeout(deadline))??
            .ok_or_else(|| EngineError::Protocol {
                message: "engine closed its output stream".to_string(),
            })?;
        trace!(line = %line, "<- engine");
        Ok(parse_line(&line))
    }

    async fn expect(
        &mut self,
        deadline: Duration,
        want: impl Fn(&EngineMessage) -> bool + Send,
    ) -> EngineResult<()> {
        loop {
            if want(&self.next_message(deadline).await?) {
                return Ok(());
            }
        }
    }

    fn position_command(position: &PositionSpec) -> String {
        if position.uci_moves.is_empty() {
            "position startpos".to_string()
        } else {
            format!("position startpos moves {}", position.uci_moves.join(" "))
        }
    }

    fn go_command(budget: SearchBudget) -> (String, Duration) {
        match budget {
            SearchBudget::MoveTime(limit) => (
                format!("go movetime {}", limit.as_millis()),
                limit + SEARCH_GRACE,
            ),
            SearchBudget::Depth(depth) => (format!("go depth {depth}"), DEPTH_SEARCH_TIMEOUT),
        }
    }

    /// Run one search, collecting the final score and the chosen move
    async fn search(
        &mut self,
        position: &PositionSpec,
        budget: SearchBudget,
    ) -> EngineResult<SearchOutcome> {
        self.send(&Self::position_command(position)).await?;
        let (go, deadline) = Self::go_command(budget);
        self.send(&go).await?;

        let mut last_score = None;
        loop {
            match self.next_message(deadline).await? {
                EngineMessage::Info {
                    score: Some(score), ..
                } => last_score = Some(score),
                EngineMessage::BestMove { uci, .. } => {
                    return Ok(SearchOutcome {
                        best: uci,
                        score: last_score,
                    });
                }
                _ => {}
            }
        }
    }
}

#[async_trait]
impl ChessEngine for UciEngine {
    async fn best_move(
        &mut self,
        position: &PositionSpec,
        budget: SearchBudget,
    ) -> EngineResult<String> {
        let outcome = self.search(position, budget).await?;
        // Engines answer `bestmove (none)` (or `0000`) when asked to
        // search a finished position.
        if outcome.best == "(none)" || outcome.best == "0000" {
            return Err(EngineError::Protocol {
                message: "engine had no move to play".to_string(),
            });
        }
        Ok(outcome.best)
    }

    async fn evaluate(
        &mut self,
        position: &PositionSpec,
        budget: SearchBudget,
    ) -> EngineResult<Evaluation> {
        let outcome = self.search(position, budget).await?;
        Ok(outcome.score.unwrap_or(Evaluation::NoScore))
    }

    async fn new_game(&mut self) -> EngineResult<()> {
        self.send("ucinewgame").await?;
        self.sync().await
    }
}
