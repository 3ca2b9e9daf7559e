//! Presentation grid for UIs: 8 rows from rank 8 down to rank 1, each with 8
//! columns from the a-file to the h-file.

use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::{square_at, Color, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardSquare {
    /// `None` for an empty square.
    pub color: Option<Color>,
    pub piece: Option<PieceKind>,
    pub index: Square,
}

pub type BoardView = [[BoardSquare; 8]; 8];

pub fn board_view(model: &BoardModel) -> BoardView {
    let mut view = [[BoardSquare::default(); 8]; 8];
    for (row_idx, row) in view.iter_mut().enumerate() {
        let rank = 7 - row_idx as u8;
        for (file, cell) in row.iter_mut().enumerate() {
            let index = square_at(file as u8, rank);
            let occupant = model.piece_on(index);
            *cell = BoardSquare {
                color: occupant.map(|(color, _)| color),
                piece: occupant.map(|(_, piece)| piece),
                index,
            };
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::{board_view, BoardSquare};
    use crate::game_state::board_model::BoardModel;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn top_left_is_black_rook_on_a8() {
        let model = BoardModel::from_fen(STARTING_POSITION_FEN).expect("start FEN should parse");
        let view = board_view(&model);
        assert_eq!(
            view[0][0],
            BoardSquare {
                color: Some(Color::Black),
                piece: Some(PieceKind::Rook),
                index: 63,
            }
        );
        assert_eq!(view[7][4].piece, Some(PieceKind::King));
        assert_eq!(view[7][4].color, Some(Color::White));
        assert_eq!(view[7][4].index, 3);
        assert_eq!(view[4][4].piece, None);
        assert_eq!(view[4][4].color, None);
    }
}
