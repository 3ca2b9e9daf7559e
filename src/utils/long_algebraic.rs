//! Long algebraic move text (`e2e4`, `e7e8q`).
//!
//! Formatting needs only the move. Parsing resolves the capture flag against
//! a position and rejects moves whose origin does not hold a side-to-move
//! piece.

use std::fmt;

use crate::errors::ChessErrors;
use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::is_capture_move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn chess_move_to_long_algebraic(mv: &ChessMove) -> Result<String, ChessErrors> {
    let mut out = square_to_algebraic(mv.from)?;
    out.push_str(&square_to_algebraic(mv.to)?);
    if let Some(kind) = mv.promoting_to {
        out.push(promotion_to_char(kind)?);
    }
    Ok(out)
}

pub fn long_algebraic_to_chess_move(
    long_algebraic: &str,
    model: &BoardModel,
) -> Result<ChessMove, ChessErrors> {
    let invalid = |detail: &str| {
        ChessErrors::InvalidLongAlgebraic(format!("{long_algebraic}: {detail}"))
    };

    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(invalid("expected four or five characters"));
    }

    let from = algebraic_to_square(&long_algebraic[0..2]).map_err(|_| invalid("bad origin"))?;
    let to = algebraic_to_square(&long_algebraic[2..4]).map_err(|_| invalid("bad destination"))?;

    let (color, _) = model
        .piece_on(from)
        .ok_or_else(|| invalid("no piece on origin square"))?;
    if color != model.turn {
        return Err(invalid("origin piece does not belong to side to move"));
    }

    let mut mv = ChessMove::new(from, to).with_capture(is_capture_move(model, color, from, to));
    if let Some(ch) = long_algebraic.chars().nth(4) {
        let kind = char_to_promotion(ch).ok_or_else(|| invalid("bad promotion piece"))?;
        mv = mv.with_promotion(kind);
    }
    Ok(mv)
}

fn promotion_to_char(kind: PieceKind) -> Result<char, ChessErrors> {
    match kind {
        PieceKind::Knight => Ok('n'),
        PieceKind::Bishop => Ok('b'),
        PieceKind::Rook => Ok('r'),
        PieceKind::Queen => Ok('q'),
        PieceKind::Pawn | PieceKind::King => Err(ChessErrors::InvalidLongAlgebraic(format!(
            "{kind:?} is not a promotion piece"
        ))),
    }
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match chess_move_to_long_algebraic(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}->{}", self.from, self.to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{chess_move_to_long_algebraic, long_algebraic_to_chess_move};
    use crate::game_state::board_model::BoardModel;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn formats_plain_and_promotion_moves() {
        let e2e4 = ChessMove::new(square_at(4, 1), square_at(4, 3));
        assert_eq!(chess_move_to_long_algebraic(&e2e4).expect("should format"), "e2e4");
        let b7b8 = ChessMove::new(54, 62).with_promotion(PieceKind::Queen);
        assert_eq!(b7b8.to_string(), "b7b8q");
    }

    #[test]
    fn parses_against_position() {
        let model = BoardModel::from_fen("rnbqkbnr/pp1p1ppp/2p5/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 - 0 0")
            .expect("FEN should parse");
        let mv = long_algebraic_to_chess_move("f5e6", &model).expect("f5e6 should parse");
        assert_eq!((mv.from, mv.to), (34, 43));
        assert!(mv.is_capture);

        let quiet = long_algebraic_to_chess_move("g1f3", &model).expect("g1f3 should parse");
        assert!(!quiet.is_capture);
    }

    #[test]
    fn parses_promotion_suffix() {
        let model = BoardModel::from_fen("8/1P6/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_chess_move("b7b8N", &model).expect("b7b8n should parse");
        assert_eq!(mv.promoting_to, Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_bad_text_and_wrong_side() {
        let model = BoardModel::from_fen(STARTING_POSITION_FEN).expect("start FEN should parse");
        for bad in ["e2", "e2e4qq", "z2e4", "e2e9", "e4e5", "e7e5", "e2e4k", "é2e4"] {
            assert!(
                long_algebraic_to_chess_move(bad, &model).is_err(),
                "{bad} should be rejected"
            );
        }
    }
}
