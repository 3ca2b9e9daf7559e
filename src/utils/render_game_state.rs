//! Terminal-oriented Unicode board renderer.
//!
//! Draws the board view with rank 8 on top for debugging, self-play logs, and
//! the `Display` impl on `ChessBoard`.

use crate::game_state::board_model::BoardModel;
use crate::game_state::board_view::board_view;
use crate::game_state::chess_types::*;

/// Render the board to a Unicode string for terminal output.
pub fn render_board(model: &BoardModel) -> String {
    let view = board_view(model);
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for (row_idx, row) in view.iter().enumerate() {
        let rank_char = char::from(b'8' - row_idx as u8);
        out.push(rank_char);
        out.push(' ');

        for (file, square) in row.iter().enumerate() {
            match square.piece.zip(square.color) {
                Some((piece, color)) => out.push(piece_to_unicode(color, piece)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board_model::BoardModel;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn renders_starting_position_rows() {
        let model = BoardModel::from_fen(STARTING_POSITION_FEN).expect("start FEN should parse");
        let rendered = render_board(&model);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }
}
