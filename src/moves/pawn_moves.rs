use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_rules::pawn_start_rank;
use crate::game_state::chess_types::{rank_of, Color, Square};

pub const WHITE_PAWN_ATTACKS: [Bitboard; 64] = generate_white_pawn_attacks();
pub const BLACK_PAWN_ATTACKS: [Bitboard; 64] = generate_black_pawn_attacks();

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

/// Pushes and captures for a `color` pawn on `square`.
///
/// `en_passant` is the current target square, honoured only when it sits on
/// the rank a `color` pawn can capture onto.
pub fn pawn_targets(
    square: Square,
    color: Color,
    own: Bitboard,
    enemy: Bitboard,
    en_passant: Option<Square>,
) -> Bitboard {
    let occupied = own | enemy;
    let origin = Bitboard::from_square(square);
    let mut targets = Bitboard::EMPTY;

    let single = match color {
        Color::White => origin.shift_left(8),
        Color::Black => origin.shift_right(8),
    };
    if !single.is_empty() && !single.intersects(occupied) {
        targets |= single;
        if rank_of(square) == pawn_start_rank(color) {
            let double = match color {
                Color::White => single.shift_left(8),
                Color::Black => single.shift_right(8),
            };
            if !double.intersects(occupied) {
                targets |= double;
            }
        }
    }

    let mut capturable = enemy;
    if let Some(target) = en_passant {
        let capture_rank = match color {
            Color::White => 5,
            Color::Black => 2,
        };
        if rank_of(target) == capture_rank {
            capturable |= Bitboard::from_square(target);
        }
    }
    targets | (pawn_attacks(color, square) & capturable)
}

const fn generate_white_pawn_attacks() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = 7 - sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank < 7 {
            if file > 0 {
                attacks |= 1u64 << (sq + 9);
            }
            if file < 7 {
                attacks |= 1u64 << (sq + 7);
            }
        }

        table[sq] = Bitboard::new(attacks);
        sq += 1;
    }

    table
}

const fn generate_black_pawn_attacks() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = 7 - sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank > 0 {
            if file > 0 {
                attacks |= 1u64 << (sq - 7);
            }
            if file < 7 {
                attacks |= 1u64 << (sq - 9);
            }
        }

        table[sq] = Bitboard::new(attacks);
        sq += 1;
    }

    table
}
