//! Move-path enumeration for validating generation against known counts.

use std::fmt;

use crate::errors::ChessErrors;
use crate::game_state::chess_board::ChessBoard;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;

/// A position with published leaf counts, `nodes[d - 1]` at depth `d`.
#[derive(Debug, Clone, Copy)]
pub struct PerftReference {
    pub name: &'static str,
    pub fen: &'static str,
    pub nodes: &'static [usize],
}

impl PerftReference {
    /// Depths whose expected count stays within `max_nodes`.
    pub fn depths_within(&self, max_nodes: usize) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .take_while(move |(_, nodes)| **nodes <= max_nodes)
            .map(|(idx, &nodes)| (idx as u8 + 1, nodes))
    }
}

pub const REFERENCE_POSITIONS: &[PerftReference] = &[
    PerftReference {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        nodes: &[20, 400, 8_902, 197_281],
    },
    PerftReference {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
        nodes: &[48, 2_039, 97_862],
    },
    PerftReference {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        nodes: &[14, 191, 2_812, 43_238, 674_624],
    },
    PerftReference {
        name: "promotions",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        nodes: &[6, 264, 9_467, 422_333],
    },
    PerftReference {
        name: "discovered_checks",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        nodes: &[44, 1_486, 62_379],
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

impl fmt::Display for PerftCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} captures={} ep={} castles={} promotions={} checks={} mates={}",
            self.nodes,
            self.captures,
            self.en_passant,
            self.castles,
            self.promotions,
            self.checks,
            self.checkmates
        )
    }
}

/// Count leaf positions `depth` plies below the current one, with the
/// side to move alternating from `board.turn()`.
pub fn perft(board: &mut ChessBoard, depth: u8) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mover = board.turn();
    let mut total = PerftCounts::default();

    for mv in board.all_legal_moves(mover) {
        let mut guard = board.play(&mv)?;
        if depth > 1 {
            total.merge(perft(&mut guard, depth - 1)?);
            continue;
        }

        let result = guard.result();
        total.nodes += 1;
        total.captures += usize::from(result.is_capture());
        total.en_passant += usize::from(result.is_en_passant);
        total.castles += usize::from(result.is_castling);
        total.promotions += usize::from(result.promoted_to.is_some());
        if guard.is_check(mover.opposite()) {
            total.checks += 1;
            total.checkmates += usize::from(guard.is_checkmate());
        }
    }

    Ok(total)
}

/// Per-root-move node counts, sorted by move, for diffing against other
/// engines.
pub fn perft_divide(
    board: &mut ChessBoard,
    depth: u8,
) -> Result<Vec<(String, usize)>, ChessErrors> {
    let mover = board.turn();
    let mut rows = Vec::new();
    for mv in board.all_legal_moves(mover) {
        let mut guard = board.play(&mv)?;
        let nodes = perft(&mut guard, depth.saturating_sub(1))?.nodes;
        rows.push((mv.to_string(), nodes));
    }
    rows.sort();
    Ok(rows)
}
