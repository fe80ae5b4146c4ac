//! Board position to SVG
//!
//! Renders the familiar 8x8 view from White's perspective with file and
//! rank labels and Unicode piece glyphs.

use std::fmt::Write;

use shakmaty::{Board, Color, File, Rank, Role, Square};

use crate::theme;

/// Square edge length in user units
const SQUARE: u32 = 45;

/// Margin holding the coordinate labels
const MARGIN: u32 = 20;

const BOARD_EDGE: u32 = SQUARE * 8;
const VIEW: u32 = BOARD_EDGE + MARGIN * 2;

/// Render a piece placement as a standalone SVG document
pub fn render_board(board: &Board) -> String {
    let mut svg = String::with_capacity(16 * 1024);

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {VIEW} {VIEW}" width="400" height="400">"#
    );

    // Squares, rank 8 at the top.
    for rank_row in 0..8u32 {
        for file_col in 0..8u32 {
            let x = MARGIN + file_col * SQUARE;
            let y = MARGIN + rank_row * SQUARE;
            let fill = if (rank_row + file_col) % 2 == 0 {
                theme::SQUARE_LIGHT
            } else {
                theme::SQUARE_DARK
            };
            let _ = write!(
                svg,
                r#"<rect x="{x}" y="{y}" width="{SQUARE}" height="{SQUARE}" fill="{fill}"/>"#
            );
        }
    }

    // Coordinates along the left and bottom edges.
    for (i, file) in File::ALL.iter().enumerate() {
        let x = MARGIN + i as u32 * SQUARE + SQUARE / 2;
        let y = MARGIN + BOARD_EDGE + 14;
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" font-size="12" text-anchor="middle" fill="{}">{}</text>"#,
            theme::CHART_TEXT,
            file.char()
        );
    }
    for (i, rank) in Rank::ALL.iter().enumerate() {
        let x = MARGIN - 8;
        let y = MARGIN + (7 - i) as u32 * SQUARE + SQUARE / 2 + 4;
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" font-size="12" text-anchor="middle" fill="{}">{}</text>"#,
            theme::CHART_TEXT,
            rank.char()
        );
    }

    // Pieces.
    for square in Square::ALL {
        let Some(piece) = board.piece_at(square) else {
            continue;
        };
        let file_col = u32::from(square.file());
        let rank_row = 7 - u32::from(square.rank());
        let x = MARGIN + file_col * SQUARE + SQUARE / 2;
        let y = MARGIN + rank_row * SQUARE + SQUARE / 2 + 13;
        let fill = match piece.color {
            Color::White => theme::PIECE_WHITE,
            Color::Black => theme::PIECE_BLACK,
        };
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" font-size="38" text-anchor="middle" fill="{fill}" stroke="{}" stroke-width="0.6">{}</text>"#,
            theme::PIECE_OUTLINE,
            glyph(piece.color, piece.role)
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Unicode chess glyph for a piece
fn glyph(color: Color, role: Role) -> char {
    match (color, role) {
        (Color::White, Role::King) => '\u{2654}',
        (Color::White, Role::Queen) => '\u{2655}',
        (Color::White, Role::Rook) => '\u{2656}',
        (Color::White, Role::Bishop) => '\u{2657}',
        (Color::White, Role::Knight) => '\u{2658}',
        (Color::White, Role::Pawn) => '\u{2659}',
        (Color::Black, Role::King) => '\u{265A}',
        (Color::Black, Role::Queen) => '\u{265B}',
        (Color::Black, Role::Rook) => '\u{265C}',
        (Color::Black, Role::Bishop) => '\u{265D}',
        (Color::Black, Role::Knight) => '\u{265E}',
        (Color::Black, Role::Pawn) => '\u{265F}',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_renders_all_squares_and_pieces() {
        let board = Board::default();
        let svg = render_board(&board);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 64);
        // 32 piece glyphs plus 16 coordinate labels.
        assert_eq!(svg.matches("<text").count(), 48);
        assert!(svg.contains('\u{2654}'), "white king is drawn");
        assert!(svg.contains('\u{265A}'), "black king is drawn");
    }

    #[test]
    fn test_empty_board_renders_squares_only() {
        let board = Board::empty();
        let svg = render_board(&board);

        assert_eq!(svg.matches("<rect").count(), 64);
        assert_eq!(svg.matches("<text").count(), 16, "only coordinate labels");
    }

    #[test]
    fn test_a1_is_a_dark_square() {
        // Bottom-left corner: rank_row 7, file_col 0, odd parity.
        let board = Board::empty();
        let svg = render_board(&board);
        let a1 = format!(
            r#"<rect x="{}" y="{}" width="45" height="45" fill="{}"/>"#,
            MARGIN,
            MARGIN + 7 * SQUARE,
            theme::SQUARE_DARK
        );
        assert!(svg.contains(&a1), "a1 must use the dark fill");
    }
}
