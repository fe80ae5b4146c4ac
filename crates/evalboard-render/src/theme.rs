//! Shared color theme for the rendered artifacts
//!
//! One place for every color the SVG output uses, so the board and the
//! chart stay visually consistent.

/// Light board squares
pub const SQUARE_LIGHT: &str = "#eeeed2";

/// Dark board squares
pub const SQUARE_DARK: &str = "#769656";

/// White piece glyph fill
pub const PIECE_WHITE: &str = "#ebebe6";

/// Black piece glyph fill
pub const PIECE_BLACK: &str = "#2d2d32";

/// Outline that keeps white glyphs visible on light squares
pub const PIECE_OUTLINE: &str = "#3c3c41";

/// Chart panel background
pub const CHART_SURFACE: &str = "#f7f7f2";

/// Grid lines and axis ink
pub const CHART_GRID: &str = "#c8c8cd";

/// Axis and legend text
pub const CHART_TEXT: &str = "#46464b";

/// White's probability trace, a gold dark enough to read on the light
/// surface
pub const WHITE_TRACE: &str = "#b8860b";

/// Black's probability trace
pub const BLACK_TRACE: &str = "#2d2d32";
