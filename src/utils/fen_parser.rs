//! FEN-to-BoardModel parser.
//!
//! Builds the twelve piece bitboards, side to move, castling rights, en
//! passant target, and clocks from a Forsyth-Edwards Notation string. A lone
//! `-` in a counter position is read as an empty placeholder and skipped.

use crate::errors::ChessErrors;
use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<BoardModel, ChessErrors> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| invalid("missing en passant square"))?;

    let counters: Vec<&str> = parts.filter(|&field| field != "-").collect();
    let [halfmove_part, fullmove_part] = counters.as_slice() else {
        return Err(invalid(&format!(
            "expected halfmove clock and fullmove number, found {} counter fields",
            counters.len()
        )));
    };

    let mut model = BoardModel::empty();

    parse_board(board_part, &mut model)?;
    model.turn = parse_side_to_move(side_part)?;
    model.castling_rights = parse_castling_rights(castling_part)?;
    model.en_passant_target = parse_en_passant_square(en_passant_part)?;
    model.halfmove_clock = halfmove_part
        .parse::<u32>()
        .map_err(|_| invalid(&format!("halfmove clock '{halfmove_part}'")))?;
    model.fullmove_number = fullmove_part
        .parse::<u32>()
        .map_err(|_| invalid(&format!("fullmove number '{fullmove_part}'")))?;

    Ok(model)
}

fn invalid(detail: &str) -> ChessErrors {
    ChessErrors::InvalidFen(detail.to_owned())
}

fn parse_board(board_part: &str, model: &mut BoardModel) -> Result<(), ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(&format!(
            "board layout must contain 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(&format!("rank '{rank_str}' has too many files")));
                }
                continue;
            }

            let (color, piece) = PieceKind::from_fen_char(ch).ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid(&format!("rank '{rank_str}' has too many files")));
            }

            model.put_piece(color, piece, square_at(file, board_rank));
            file += 1;
        }

        if file != 8 {
            return Err(invalid(&format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessErrors> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(&format!("castling rights character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(&format!("en passant square '{en_passant_part}'")))
}
