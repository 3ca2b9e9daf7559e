use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::{file_of, rank_of, square_at, Square};

pub const KNIGHT_ATTACKS: [Bitboard; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

/// Knight destinations from `square` that are not blocked by `own` pieces.
#[inline]
pub fn knight_targets(square: Square, own: Bitboard) -> Bitboard {
    knight_attacks(square) & !own
}

const fn generate_knight_attacks() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;

    while sq < 64 {
        let file = file_of(sq) as i32;
        let rank = rank_of(sq) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file + 1, rank + 2);
        attacks |= set_if_valid(file + 2, rank + 1);
        attacks |= set_if_valid(file + 2, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 2);
        attacks |= set_if_valid(file - 1, rank - 2);
        attacks |= set_if_valid(file - 2, rank - 1);
        attacks |= set_if_valid(file - 2, rank + 1);
        attacks |= set_if_valid(file - 1, rank + 2);

        table[sq as usize] = Bitboard::new(attacks);
        sq += 1;
    }

    table
}

pub(crate) const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << square_at(file as u8, rank as u8)
}

#[cfg(test)]
mod tests {
    use super::{knight_attacks, knight_targets, KNIGHT_ATTACKS};
    use crate::game_state::bitboard::Bitboard;
    use crate::game_state::chess_types::square_at;

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        let d4 = square_at(3, 3);
        assert_eq!(KNIGHT_ATTACKS[d4 as usize].count(), 8);
        assert_eq!(knight_attacks(d4).count(), 8);
    }

    #[test]
    fn corner_knight_does_not_wrap_files() {
        let h1 = square_at(7, 0);
        let expected = Bitboard::from_square(square_at(6, 2)) | Bitboard::from_square(square_at(5, 1));
        assert_eq!(knight_attacks(h1), expected);
    }

    #[test]
    fn own_pieces_block_knight_targets() {
        let g1 = square_at(6, 0);
        let own = Bitboard::from_square(square_at(4, 1));
        let targets = knight_targets(g1, own);
        assert_eq!(targets.count(), 2);
        assert!(!targets.intersects(own));
    }
}
