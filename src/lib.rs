//! Crate root module declarations for the bitboard chess engine.
//!
//! Exposes the rules core (board state, move generation), the alpha-beta
//! search, the engine wrappers and text utilities so binaries, benches and
//! UI layers can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod bitboard;
    pub mod board_model;
    pub mod board_view;
    pub mod chess_board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod undo_state;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod search_config;
    pub mod transposition_table;
}

pub mod engines {
    pub mod engine_iterative;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
    pub mod self_play;
}
