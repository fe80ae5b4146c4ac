//! Move history tracking
//!
//! Maintains the chronological record of all applied moves, each tagged
//! with who made it. The log is what undo walks backwards through and
//! what the UI shows as the game score sheet.

use serde::{Deserialize, Serialize};

/// Who played a recorded move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mover {
    Player,
    Engine,
}

/// One applied half-move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mover: Mover,
    /// Standard algebraic notation, exactly as shown to the user
    pub san: String,
}

impl MoveRecord {
    pub fn player(san: impl Into<String>) -> Self {
        Self {
            mover: Mover::Player,
            san: san.into(),
        }
    }

    pub fn engine(san: impl Into<String>) -> Self {
        Self {
            mover: Mover::Engine,
            san: san.into(),
        }
    }
}

/// Chronological list of all moves made in the game
#[derive(Debug, Default, Clone)]
pub struct MoveLog {
    moves: Vec<MoveRecord>,
}

impl MoveLog {
    pub fn push(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    /// Remove and return the most recent record, if any
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.moves.pop()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// How many engine replies the log holds
    ///
    /// This equals the number of turn pairs present in the history and
    /// is the reference point for the probability series length.
    pub fn engine_replies(&self) -> usize {
        self.moves
            .iter()
            .filter(|r| r.mover == Mover::Engine)
            .count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[MoveRecord] {
        &self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_log_starts_empty() {
        let log = MoveLog::default();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.last().is_none());
        assert_eq!(log.engine_replies(), 0);
    }

    #[test]
    fn test_push_and_last() {
        let mut log = MoveLog::default();
        log.push(MoveRecord::player("e4"));
        log.push(MoveRecord::engine("e5"));

        assert_eq!(log.len(), 2);
        let last = log.last().unwrap();
        assert_eq!(last.mover, Mover::Engine);
        assert_eq!(last.san, "e5");
    }

    #[test]
    fn test_engine_replies_counts_pairs() {
        let mut log = MoveLog::default();
        log.push(MoveRecord::player("e4"));
        log.push(MoveRecord::engine("e5"));
        log.push(MoveRecord::player("Nf3"));

        // Two player moves but only one completed pair.
        assert_eq!(log.engine_replies(), 1);
    }

    #[test]
    fn test_pop_returns_most_recent() {
        let mut log = MoveLog::default();
        log.push(MoveRecord::player("d4"));
        log.push(MoveRecord::engine("d5"));

        let popped = log.pop().unwrap();
        assert_eq!(popped.mover, Mover::Engine);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_clear_removes_all_moves() {
        let mut log = MoveLog::default();
        for _ in 0..3 {
            log.push(MoveRecord::player("e4"));
        }
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_record_serialization_tags_mover() {
        let record = MoveRecord::engine("Nf6");
        let json = serde_json::to_string(&record).expect("record serializes");
        assert!(json.contains("\"engine\""));
        assert!(json.contains("Nf6"));
    }
}
