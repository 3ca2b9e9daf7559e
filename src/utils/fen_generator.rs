//! BoardModel-to-FEN serializer.
//!
//! `generate_fen` emits all six fields. `generate_position_key` emits only the
//! first four, which is what identifies a position for search caching.

use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(model: &BoardModel) -> String {
    format!(
        "{} {} {}",
        generate_position_key(model),
        model.halfmove_clock,
        model.fullmove_number
    )
}

pub fn generate_position_key(model: &BoardModel) -> String {
    let side_to_move = match model.turn {
        Color::White => "w",
        Color::Black => "b",
    };

    format!(
        "{} {} {} {}",
        generate_board_field(model),
        side_to_move,
        generate_castling_field(model.castling_rights),
        generate_en_passant_field(model.en_passant_target)
    )
}

fn generate_board_field(model: &BoardModel) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match model.piece_on(square_at(file, rank)) {
                Some((color, piece)) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char(color));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let field: String = [
        (CASTLE_WHITE_KINGSIDE, 'K'),
        (CASTLE_WHITE_QUEENSIDE, 'Q'),
        (CASTLE_BLACK_KINGSIDE, 'k'),
        (CASTLE_BLACK_QUEENSIDE, 'q'),
    ]
    .into_iter()
    .filter(|&(right, _)| rights & right != 0)
    .map(|(_, ch)| ch)
    .collect();

    if field.is_empty() {
        "-".to_owned()
    } else {
        field
    }
}

fn generate_en_passant_field(target: Option<Square>) -> String {
    target
        .and_then(|square| square_to_algebraic(square).ok())
        .unwrap_or_else(|| "-".to_owned())
}
