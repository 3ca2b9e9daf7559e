//! Ray casting for bishops, rooks, and queens.
//!
//! Each direction is a shift amount plus the edge mask where the ray must
//! stop. A ray starting on its own edge is skipped entirely, which is what
//! keeps horizontal and diagonal shifts from wrapping between files.

use crate::game_state::bitboard::{Bitboard, FILE_A, FILE_H, RANK_1, RANK_8};
use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, Copy)]
struct RayDirection {
    shift: u32,
    toward_higher: bool,
    edge: Bitboard,
}

impl RayDirection {
    #[inline]
    const fn step(self, from: Bitboard, count: u32) -> Bitboard {
        if self.toward_higher {
            from.shift_left(self.shift * count)
        } else {
            from.shift_right(self.shift * count)
        }
    }
}

const NORTH: RayDirection = RayDirection {
    shift: 8,
    toward_higher: true,
    edge: RANK_8,
};
const SOUTH: RayDirection = RayDirection {
    shift: 8,
    toward_higher: false,
    edge: RANK_1,
};
const TOWARD_A: RayDirection = RayDirection {
    shift: 1,
    toward_higher: true,
    edge: FILE_A,
};
const TOWARD_H: RayDirection = RayDirection {
    shift: 1,
    toward_higher: false,
    edge: FILE_H,
};
const NORTH_TOWARD_A: RayDirection = RayDirection {
    shift: 9,
    toward_higher: true,
    edge: Bitboard::new(RANK_8.bits() | FILE_A.bits()),
};
const NORTH_TOWARD_H: RayDirection = RayDirection {
    shift: 7,
    toward_higher: true,
    edge: Bitboard::new(RANK_8.bits() | FILE_H.bits()),
};
const SOUTH_TOWARD_A: RayDirection = RayDirection {
    shift: 7,
    toward_higher: false,
    edge: Bitboard::new(RANK_1.bits() | FILE_A.bits()),
};
const SOUTH_TOWARD_H: RayDirection = RayDirection {
    shift: 9,
    toward_higher: false,
    edge: Bitboard::new(RANK_1.bits() | FILE_H.bits()),
};

const ROOK_DIRECTIONS: [RayDirection; 4] = [NORTH, SOUTH, TOWARD_A, TOWARD_H];
const BISHOP_DIRECTIONS: [RayDirection; 4] =
    [NORTH_TOWARD_A, NORTH_TOWARD_H, SOUTH_TOWARD_A, SOUTH_TOWARD_H];

fn ray_cast(from: Square, own: Bitboard, enemy: Bitboard, directions: &[RayDirection]) -> Bitboard {
    let origin = Bitboard::from_square(from);
    let mut targets = Bitboard::EMPTY;

    for &direction in directions {
        if origin.intersects(direction.edge) {
            continue;
        }
        for count in 1..=7 {
            let square = direction.step(origin, count);
            if square.intersects(own) {
                break;
            }
            targets |= square;
            if square.intersects(enemy | direction.edge) {
                break;
            }
        }
    }

    targets
}

/// Squares a rook on `from` can move to, captures included.
#[inline]
pub fn rook_targets(from: Square, own: Bitboard, enemy: Bitboard) -> Bitboard {
    ray_cast(from, own, enemy, &ROOK_DIRECTIONS)
}

#[inline]
pub fn bishop_targets(from: Square, own: Bitboard, enemy: Bitboard) -> Bitboard {
    ray_cast(from, own, enemy, &BISHOP_DIRECTIONS)
}

#[inline]
pub fn queen_targets(from: Square, own: Bitboard, enemy: Bitboard) -> Bitboard {
    rook_targets(from, own, enemy) | bishop_targets(from, own, enemy)
}

#[cfg(test)]
mod tests {
    use super::{bishop_targets, queen_targets, rook_targets};
    use crate::game_state::bitboard::Bitboard;
    use crate::game_state::chess_types::square_at;

    #[test]
    fn rook_on_empty_board_sees_fourteen_squares() {
        for square in [0u8, 7, 27, 63] {
            assert_eq!(
                rook_targets(square, Bitboard::EMPTY, Bitboard::EMPTY).count(),
                14
            );
        }
    }

    #[test]
    fn bishop_from_corner_covers_long_diagonal_only() {
        let h1 = square_at(7, 0);
        let targets = bishop_targets(h1, Bitboard::EMPTY, Bitboard::EMPTY);
        assert_eq!(targets.count(), 7);
        assert!(targets.contains(square_at(0, 7)));
    }

    #[test]
    fn bishop_centre_count_does_not_wrap() {
        let d4 = square_at(3, 3);
        assert_eq!(bishop_targets(d4, Bitboard::EMPTY, Bitboard::EMPTY).count(), 13);
        let a4 = square_at(0, 3);
        assert_eq!(bishop_targets(a4, Bitboard::EMPTY, Bitboard::EMPTY).count(), 7);
    }

    #[test]
    fn rays_stop_on_enemy_and_before_own() {
        let d1 = square_at(3, 0);
        let own = Bitboard::from_square(square_at(3, 3));
        let enemy = Bitboard::from_square(square_at(6, 0));
        let targets = rook_targets(d1, own, enemy);
        assert!(targets.contains(square_at(3, 2)));
        assert!(!targets.contains(square_at(3, 3)));
        assert!(targets.contains(square_at(6, 0)));
        assert!(!targets.contains(square_at(7, 0)));
        assert_eq!(targets.count(), 2 + 3 + 3);
    }

    #[test]
    fn queen_combines_both_patterns() {
        let d4 = square_at(3, 3);
        assert_eq!(queen_targets(d4, Bitboard::EMPTY, Bitboard::EMPTY).count(), 27);
    }
}
