//! Plain position data: twelve piece bitboards plus side to move, castling
//! rights, en passant target, and the two clocks.
//!
//! The model is `Copy` so legality checks and search can simulate moves on a
//! scratch value. Occupancy is derived on demand from the piece sets.

use crate::errors::ChessErrors;
use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Square};
use crate::utils::fen_generator::{generate_fen, generate_position_key};
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardModel {
    /// Indexed by `Color::index()` then `PieceKind::index()`.
    pub pieces: [[Bitboard; 6]; 2],
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for BoardModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardModel {
    /// Board with no pieces, White to move, no rights.
    pub const fn empty() -> Self {
        Self {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            turn: Color::White,
            castling_rights: 0,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// First four FEN fields; identifies a position for the transposition table.
    pub fn position_key(&self) -> String {
        generate_position_key(self)
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn bitboard_mut(&mut self, color: Color, kind: PieceKind) -> &mut Bitboard {
        &mut self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.pieces[color.index()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy(Color::White) | self.occupancy(Color::Black)
    }

    /// Kind of the `color` piece on `square`, if any.
    pub fn piece_of_color_on(&self, color: Color, square: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|&kind| self.bitboard(color, kind).contains(square))
    }

    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        Color::ALL.into_iter().find_map(|color| {
            self.piece_of_color_on(color, square)
                .map(|kind| (color, kind))
        })
    }

    /// Square of the `color` king. `None` only for hand-built positions.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.bitboard(color, PieceKind::King);
        (!kings.is_empty()).then(|| kings.bit_index())
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    pub fn en_passant_bitboard(&self) -> Bitboard {
        self.en_passant_target
            .map_or(Bitboard::EMPTY, Bitboard::from_square)
    }

    #[inline]
    pub fn put_piece(&mut self, color: Color, kind: PieceKind, square: Square) {
        *self.bitboard_mut(color, kind) |= Bitboard::from_square(square);
    }

    #[inline]
    pub fn remove_piece(&mut self, color: Color, kind: PieceKind, square: Square) {
        *self.bitboard_mut(color, kind) &= !Bitboard::from_square(square);
    }

    /// No square is claimed by two piece sets.
    pub fn pieces_are_disjoint(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let bb = self.bitboard(color, kind);
                if seen.intersects(bb) {
                    return false;
                }
                seen |= bb;
            }
        }
        true
    }
}
