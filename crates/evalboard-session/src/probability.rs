//! Evaluation to win-probability conversion
//!
//! Engines score positions relative to the side to move; the chart wants
//! absolute per-color probabilities. This module is the pure bridge
//! between the two. Centipawn scores go through a logistic curve, mate
//! scores saturate to certainty, and scoreless positions split evenly.

use shakmaty::Color;

use crate::engine::Evaluation;

/// Logistic steepness for the centipawn curve
///
/// At 0.004, a one-pawn advantage (100cp) gives the mover roughly a 60%
/// chance and +500cp about 88%. Raising the constant makes the chart
/// saturate faster on material swings.
pub const CP_SCALE: f64 = 0.004;

/// Absolute win probabilities, one per color, summing to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinChances {
    pub white: f64,
    pub black: f64,
}

impl WinChances {
    fn for_mover(p: f64, side_to_move: Color) -> Self {
        match side_to_move {
            Color::White => Self {
                white: p,
                black: 1.0 - p,
            },
            Color::Black => Self {
                white: 1.0 - p,
                black: p,
            },
        }
    }
}

/// Convert an engine evaluation into absolute win probabilities
///
/// `side_to_move` is the color the evaluation is relative to. Pure and
/// deterministic: equal inputs always produce equal outputs.
pub fn win_probability(eval: Evaluation, side_to_move: Color) -> WinChances {
    let p = match eval {
        // A mate score of zero arrives from positions already decided
        // against the mover.
        Evaluation::Mate(plies) if plies > 0 => 1.0,
        Evaluation::Mate(_) => 0.0,
        Evaluation::Centipawns(cp) => logistic(f64::from(cp)),
        Evaluation::NoScore => 0.5,
    };
    WinChances::for_mover(p, side_to_move)
}

fn logistic(cp: f64) -> f64 {
    1.0 / (1.0 + (-CP_SCALE * cp).exp())
}
