//! SVG presentation adapter for evalboard
//!
//! Turns read-only session snapshots into standalone SVG artifacts: the
//! board position and the win-probability chart. Nothing here mutates
//! or re-derives game state; the session hands over a snapshot and gets
//! markup back.

pub mod board;
pub mod chart;
pub mod theme;

pub use board::render_board;
pub use chart::render_chart;
