use crate::game_state::bitboard::Bitboard;
use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::chess_types::{file_of, rank_of, Color, PieceKind, Square};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::knight_moves::set_if_valid;

pub const KING_ATTACKS: [Bitboard; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

/// One-step king destinations plus any castling destinations available.
pub fn king_targets(model: &BoardModel, square: Square, color: Color) -> Bitboard {
    (king_attacks(square) & !model.occupancy(color)) | castling_targets(model, square, color)
}

/// King landing squares for every castling lane `color` may use right now.
///
/// A lane needs its right, king and rook on their home squares, nothing in
/// between, and neither the king's square nor the squares it crosses under
/// attack.
pub fn castling_targets(model: &BoardModel, square: Square, color: Color) -> Bitboard {
    let occupied = model.occupied();
    let rooks = model.bitboard(color, PieceKind::Rook);
    let mut targets = Bitboard::EMPTY;

    for lane in CASTLING_LANES.iter().filter(|lane| lane.color == color) {
        if !model.has_castling_right(lane.right)
            || lane.king_from != square
            || !rooks.contains(lane.rook_from)
            || occupied.intersects(lane.must_be_empty)
        {
            continue;
        }

        let attacker = color.opposite();
        let passes_through_check = is_square_attacked(model, lane.king_from, attacker)
            || lane
                .king_path
                .iter()
                .any(|&step| is_square_attacked(model, step, attacker));
        if !passes_through_check {
            targets |= Bitboard::from_square(lane.king_to);
        }
    }

    targets
}

const fn generate_king_attacks() -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;

    while sq < 64 {
        let file = file_of(sq) as i32;
        let rank = rank_of(sq) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file - 1, rank - 1);
        attacks |= set_if_valid(file, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 1);
        attacks |= set_if_valid(file - 1, rank);
        attacks |= set_if_valid(file + 1, rank);
        attacks |= set_if_valid(file - 1, rank + 1);
        attacks |= set_if_valid(file, rank + 1);
        attacks |= set_if_valid(file + 1, rank + 1);

        table[sq as usize] = Bitboard::new(attacks);
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{castling_targets, king_attacks};
    use crate::game_state::bitboard::Bitboard;
    use crate::game_state::board_model::BoardModel;
    use crate::game_state::chess_rules::{C1, E1, E8, G1, G8};
    use crate::game_state::chess_types::{square_at, Color};

    fn model(fen: &str) -> BoardModel {
        BoardModel::from_fen(fen).expect("fixture FEN should parse")
    }

    #[test]
    fn king_attack_counts_by_region() {
        assert_eq!(king_attacks(square_at(0, 0)).count(), 3);
        assert_eq!(king_attacks(square_at(4, 0)).count(), 5);
        assert_eq!(king_attacks(square_at(3, 3)).count(), 8);
    }

    #[test]
    fn both_lanes_open_on_cleared_back_rank() {
        let board = model("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(
            castling_targets(&board, E1, Color::White),
            Bitboard::from_square(G1) | Bitboard::from_square(C1)
        );
    }

    #[test]
    fn attacked_transit_square_blocks_castling() {
        // Black rook on f8 covers f1.
        let board = model("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(
            castling_targets(&board, E1, Color::White),
            Bitboard::from_square(C1)
        );
    }

    #[test]
    fn king_in_check_cannot_castle() {
        let board = model("r3k2r/8/8/8/8/8/8/4R1K1 b kq - 0 1");
        assert!(castling_targets(&board, E8, Color::Black).is_empty());
    }

    #[test]
    fn missing_right_or_rook_blocks_lane() {
        let board = model("r3k3/8/8/8/8/8/8/4K3 b k - 0 1");
        assert!(!castling_targets(&board, E8, Color::Black).contains(G8));
        assert!(castling_targets(&board, E8, Color::Black).is_empty());
    }
}
