//! Iterative deepening search with minimax alpha-beta pruning.
//!
//! White maximises and Black minimises a White-relative score. Each depth
//! reuses the previous best move as the first root candidate, and interior
//! nodes share results through the transposition table. The clock is only
//! consulted between depths, so a search can overrun its budget by at most
//! one full iteration.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::errors::ChessErrors;
use crate::game_state::chess_board::ChessBoard;
use crate::game_state::chess_types::{ChessMove, Color};
use crate::search::board_scoring::{BoardScorer, Score};
use crate::search::search_config::EngineConfig;
use crate::search::transposition_table::{Bound, TranspositionTable, TtEntry, TtStats};

/// Magnitude of a checkmate score. Remaining depth is added on top so that
/// faster mates score higher.
pub const MATE_SCORE: Score = 1_000_000;
const INFINITE: Score = 2_000_000;
/// Lowest magnitude a mate score can take once shifted by a node's depth.
const MATE_THRESHOLD: Score = MATE_SCORE - u8::MAX as Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub chess_move: ChessMove,
    pub score: Score,
    pub depth: u8,
}

impl ScoredMove {
    #[inline]
    pub fn is_mate(&self) -> bool {
        is_mate_score(self.score)
    }
}

#[inline]
pub fn is_mate_score(score: Score) -> bool {
    score.abs() >= MATE_THRESHOLD
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub quiescence_nodes: u64,
    pub cutoffs: u64,
    pub reached_depth: u8,
    pub elapsed: Duration,
    pub tt: TtStats,
}

impl SearchStats {
    /// Transposition hits as a percentage of probes.
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt.probes == 0 {
            0.0
        } else {
            self.tt.hits as f64 * 100.0 / self.tt.probes as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    IterativeDeepening {
        depth: u8,
    },
}

#[derive(Debug)]
pub struct SearchEngine<S: BoardScorer> {
    config: EngineConfig,
    scorer: S,
    table: TranspositionTable,
    stats: SearchStats,
    phase: SearchPhase,
}

impl<S: BoardScorer> SearchEngine<S> {
    pub fn new(scorer: S, config: EngineConfig) -> Self {
        Self {
            table: TranspositionTable::new(config.tt_capacity),
            config,
            scorer,
            stats: SearchStats::default(),
            phase: SearchPhase::Idle,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    #[inline]
    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Forget everything learned from earlier searches.
    pub fn new_game(&mut self) {
        self.table.clear();
        self.stats = SearchStats::default();
        self.phase = SearchPhase::Idle;
    }

    /// Deepen one ply at a time until `timeout` has elapsed, `max_depth` is
    /// reached or a forced mate is found. Depth 1 always completes.
    pub fn find_deepening_optimal_move(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        timeout: Duration,
    ) -> Result<ScoredMove, ChessErrors> {
        let outcome = self.with_root_color(board, color, |engine, root| {
            engine.deepen(root, color, timeout)
        });
        self.phase = SearchPhase::Idle;
        outcome
    }

    /// Fixed-depth search from the root.
    pub fn find_best_move(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        depth: u8,
    ) -> Result<ScoredMove, ChessErrors> {
        self.with_root_color(board, color, |engine, root| {
            engine.search_root(root, color, depth.max(1), None)
        })
    }

    /// Run `search` on a board where `color` is to move.
    fn with_root_color<T>(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        search: impl FnOnce(&mut Self, &mut ChessBoard) -> Result<T, ChessErrors>,
    ) -> Result<T, ChessErrors> {
        if board.turn() == color {
            return search(self, board);
        }
        warn!(
            requested = %color,
            to_move = %board.turn(),
            "search requested for the side not on move; flipping turn"
        );
        let mut flipped = board.with_turn(color);
        search(self, &mut flipped)
    }

    fn deepen(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        timeout: Duration,
    ) -> Result<ScoredMove, ChessErrors> {
        let started_at = Instant::now();
        self.stats = SearchStats::default();
        let max_depth = self.config.max_depth.max(1);
        let mut best: Option<ScoredMove> = None;

        for depth in 1..=max_depth {
            if best.is_some() && started_at.elapsed() >= timeout {
                break;
            }
            self.phase = SearchPhase::IterativeDeepening { depth };
            self.table.new_generation();

            let previous = best.map(|scored| scored.chess_move);
            let scored = self.search_root(board, color, depth, previous)?;

            self.stats.reached_depth = depth;
            self.stats.elapsed = started_at.elapsed();
            self.stats.tt = self.table.stats();
            debug!(
                depth,
                score = scored.score,
                best = %scored.chess_move,
                nodes = self.stats.nodes,
                qnodes = self.stats.quiescence_nodes,
                cutoffs = self.stats.cutoffs,
                tt_hit_rate = self.stats.tt_hit_rate(),
                elapsed_ms = self.stats.elapsed.as_millis() as u64,
                "depth complete"
            );

            best = Some(scored);
            if scored.is_mate() {
                break;
            }
        }

        let best = best.ok_or(ChessErrors::NoLegalMoves(color))?;
        info!(
            %color,
            best = %best.chess_move,
            score = best.score,
            depth = best.depth,
            nodes = self.stats.nodes,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "search finished"
        );
        Ok(best)
    }

    fn search_root(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        depth: u8,
        preferred: Option<ChessMove>,
    ) -> Result<ScoredMove, ChessErrors> {
        let mut moves = board.all_legal_moves(color);
        if moves.is_empty() {
            return Err(ChessErrors::NoLegalMoves(color));
        }
        order_moves(&mut moves, preferred);

        let maximizing = color == Color::White;
        let mut alpha = -INFINITE;
        let mut beta = INFINITE;
        let mut best: Option<ScoredMove> = None;

        for mv in &moves {
            self.stats.nodes += 1;
            let mut child = board.play(mv)?;
            if child.is_checkmate() {
                return Ok(ScoredMove {
                    chess_move: *mv,
                    score: mate_score(color.opposite(), depth),
                    depth,
                });
            }
            let score = self.minimax(&mut child, color.opposite(), depth - 1, alpha, beta)?;
            drop(child);

            let improves = best.map_or(true, |current| {
                if maximizing {
                    score > current.score
                } else {
                    score < current.score
                }
            });
            if improves {
                best = Some(ScoredMove {
                    chess_move: *mv,
                    score,
                    depth,
                });
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        best.ok_or(ChessErrors::NoLegalMoves(color))
    }

    fn minimax(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<Score, ChessErrors> {
        if depth == 0 {
            return self.quiescence(board, color, alpha, beta, self.config.quiescence_plies);
        }
        self.stats.nodes += 1;

        let key = board.position_key();
        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut tt_move = None;
        if let Some(hit) = self.table.probe(&key) {
            tt_move = hit.best_move;
            if hit.depth >= depth {
                let score = score_from_table(hit.score, depth);
                match hit.bound {
                    Bound::Exact => return Ok(score),
                    Bound::Lower => alpha = alpha.max(score),
                    Bound::Upper => beta = beta.min(score),
                }
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    return Ok(score);
                }
            }
        }

        let mut moves = board.all_legal_moves(color);
        if moves.is_empty() {
            return Ok(terminal_score(board, color, depth));
        }
        order_moves(&mut moves, tt_move);

        let maximizing = color == Color::White;
        let mut best_score = if maximizing { -INFINITE } else { INFINITE };
        let mut best_move = None;

        for mv in &moves {
            let score = {
                let mut child = board.play(mv)?;
                self.minimax(&mut child, color.opposite(), depth - 1, alpha, beta)?
            };
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(*mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(*mv);
                }
                beta = beta.min(score);
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.store(TtEntry {
            key,
            depth,
            score: score_to_table(best_score, depth),
            bound,
            best_move,
        });
        Ok(best_score)
    }

    /// Extend the horizon with captures, or every evasion while in check,
    /// for up to `plies_left` more plies.
    fn quiescence(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        mut alpha: Score,
        mut beta: Score,
        plies_left: u8,
    ) -> Result<Score, ChessErrors> {
        self.stats.quiescence_nodes += 1;

        let moves = board.all_legal_moves(color);
        if moves.is_empty() {
            return Ok(terminal_score(board, color, 0));
        }
        let stand_pat = self.scorer.score(board.model());
        if plies_left == 0 {
            return Ok(stand_pat);
        }

        let in_check = board.is_check(color);
        let maximizing = color == Color::White;
        let mut best_score = if maximizing { -INFINITE } else { INFINITE };
        if !in_check {
            best_score = stand_pat;
            if maximizing {
                if stand_pat >= beta {
                    return Ok(stand_pat);
                }
                alpha = alpha.max(stand_pat);
            } else {
                if stand_pat <= alpha {
                    return Ok(stand_pat);
                }
                beta = beta.min(stand_pat);
            }
        }

        for mv in moves.iter().filter(|mv| in_check || mv.is_capture) {
            let score = {
                let mut child = board.play(mv)?;
                self.quiescence(&mut child, color.opposite(), alpha, beta, plies_left - 1)?
            };
            if maximizing {
                best_score = best_score.max(score);
                alpha = alpha.max(score);
            } else {
                best_score = best_score.min(score);
                beta = beta.min(score);
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best_score)
    }
}

/// Score for `mated` having been checkmated with `depth` plies of search left.
#[inline]
fn mate_score(mated: Color, depth: u8) -> Score {
    let magnitude = MATE_SCORE + Score::from(depth);
    match mated {
        Color::White => -magnitude,
        Color::Black => magnitude,
    }
}

// Mate scores carry the remaining depth of the mated node, which depends on
// where the root was. The table stores them relative to the storing node
// instead, so a hit reached at another depth still ranks mates by distance.
#[inline]
fn score_to_table(score: Score, depth: u8) -> Score {
    let depth = Score::from(depth);
    if score >= MATE_THRESHOLD {
        score - depth
    } else if score <= -MATE_THRESHOLD {
        score + depth
    } else {
        score
    }
}

#[inline]
fn score_from_table(score: Score, depth: u8) -> Score {
    let depth = Score::from(depth);
    if score >= MATE_THRESHOLD {
        score + depth
    } else if score <= -MATE_THRESHOLD {
        score - depth
    } else {
        score
    }
}

/// `color` is to move and has no legal moves.
fn terminal_score(board: &ChessBoard, color: Color, depth: u8) -> Score {
    if board.is_check(color) {
        mate_score(color, depth)
    } else {
        0
    }
}

/// Put `first` at the front, keeping the generator's capture-first order
/// for everything else.
fn order_moves(moves: &mut [ChessMove], first: Option<ChessMove>) {
    let Some(first) = first else {
        return;
    };
    if let Some(pos) = moves.iter().position(|mv| *mv == first) {
        moves[..=pos].rotate_right(1);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{
        is_mate_score, order_moves, score_from_table, score_to_table, SearchEngine, SearchPhase,
        INFINITE, MATE_SCORE,
    };
    use crate::errors::ChessErrors;
    use crate::game_state::chess_board::ChessBoard;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{ChessMove, Color};
    use crate::search::board_scoring::{MaterialScorer, PieceSquareScorer};
    use crate::search::search_config::EngineConfig;
    use crate::search::transposition_table::{Bound, TtEntry};

    fn board(fen: &str) -> ChessBoard {
        ChessBoard::new(fen).expect("fixture FEN should parse")
    }

    fn engine() -> SearchEngine<PieceSquareScorer> {
        SearchEngine::new(PieceSquareScorer, EngineConfig::default())
    }

    #[test]
    fn finds_rook_mate_in_one() {
        let mut board = board("8/8/7R/8/8/2K5/8/2k5 w - - 0 0");
        let before = board.save();
        let mut engine = engine();
        let best = engine
            .find_deepening_optimal_move(&mut board, Color::White, Duration::from_secs(5))
            .expect("white has moves");
        assert_eq!((best.chess_move.from, best.chess_move.to), (40, 0));
        assert!(best.score >= MATE_SCORE);
        assert_eq!(best.depth, 1, "mate at depth one should end the deepening");
        assert_eq!(board.save(), before);
        assert_eq!(engine.phase(), SearchPhase::Idle);
    }

    #[test]
    fn black_finds_mate_with_negative_score() {
        let mut board = board("2K5/8/2k5/8/8/7r/8/8 b - - 0 1");
        let best = engine()
            .find_best_move(&mut board, Color::Black, 2)
            .expect("black has moves");
        assert_eq!((best.chess_move.from, best.chess_move.to), (16, 56));
        assert!(best.score <= -MATE_SCORE);
    }

    #[test]
    fn captures_the_checking_queen() {
        let mut board = board("8/8/1R6/8/8/2K5/1q6/2k5 w - - 0 0");
        let best = engine()
            .find_best_move(&mut board, Color::White, 3)
            .expect("white has moves");
        assert_eq!((best.chess_move.from, best.chess_move.to), (46, 14));
        assert!(best.chess_move.is_capture);
        assert!(best.score > 0);
    }

    #[test]
    fn equal_inputs_give_equal_results() {
        let mut first = board(STARTING_POSITION_FEN);
        let mut second = board(STARTING_POSITION_FEN);
        let a = engine().find_best_move(&mut first, Color::White, 3).expect("legal moves");
        let b = engine().find_best_move(&mut second, Color::White, 3).expect("legal moves");
        assert_eq!(a, b);
        assert_eq!(first.save(), STARTING_POSITION_FEN);
    }

    #[test]
    fn mated_root_reports_no_legal_moves() {
        let mut board = board("2kr4/1pp2p1p/5p2/4p3/4b3/4q3/7P/3K4 w - - 2 27");
        let err = engine()
            .find_deepening_optimal_move(&mut board, Color::White, Duration::from_millis(50))
            .expect_err("mated side cannot move");
        assert_eq!(err, ChessErrors::NoLegalMoves(Color::White));
    }

    #[test]
    fn searches_for_side_not_on_move() {
        let mut board = board(STARTING_POSITION_FEN);
        let best = engine()
            .find_best_move(&mut board, Color::Black, 1)
            .expect("black has moves");
        assert_eq!(
            board.piece_on(best.chess_move.from).map(|(color, _)| color),
            Some(Color::Black)
        );
        assert_eq!(board.save(), STARTING_POSITION_FEN);
    }

    #[test]
    fn zero_timeout_still_completes_depth_one() {
        let mut board = board(STARTING_POSITION_FEN);
        let mut engine = engine();
        let best = engine
            .find_deepening_optimal_move(&mut board, Color::White, Duration::ZERO)
            .expect("white has moves");
        assert_eq!(best.depth, 1);
        assert_eq!(engine.stats().reached_depth, 1);
        assert!(engine.stats().nodes >= 20);
    }

    #[test]
    fn max_depth_caps_deepening() {
        let config = EngineConfig {
            max_depth: 2,
            ..EngineConfig::default()
        };
        let mut engine = SearchEngine::new(MaterialScorer, config);
        let mut board = board(STARTING_POSITION_FEN);
        let best = engine
            .find_deepening_optimal_move(&mut board, Color::White, Duration::from_secs(60))
            .expect("white has moves");
        assert_eq!(best.depth, 2);
        assert!(!is_mate_score(best.score));
    }

    #[test]
    fn quiescence_refuses_defended_pawn() {
        let fen = "4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1";
        let queen_takes_pawn = (4, 36);

        let mut greedy = SearchEngine::new(
            PieceSquareScorer,
            EngineConfig {
                quiescence_plies: 0,
                ..EngineConfig::default()
            },
        );
        let grab = greedy
            .find_best_move(&mut board(fen), Color::White, 1)
            .expect("white has moves");
        assert_eq!((grab.chess_move.from, grab.chess_move.to), queen_takes_pawn);

        let careful = engine()
            .find_best_move(&mut board(fen), Color::White, 1)
            .expect("white has moves");
        assert_ne!((careful.chess_move.from, careful.chess_move.to), queen_takes_pawn);
    }

    #[test]
    fn table_is_used_across_depths() {
        let mut board = board(STARTING_POSITION_FEN);
        let mut engine = SearchEngine::new(
            MaterialScorer,
            EngineConfig {
                max_depth: 3,
                ..EngineConfig::default()
            },
        );
        engine
            .find_deepening_optimal_move(&mut board, Color::White, Duration::from_secs(60))
            .expect("white has moves");
        let stats = engine.stats();
        assert_eq!(stats.reached_depth, 3);
        assert!(stats.tt.stores > 0);
        assert!(stats.tt.hits > 0);
        assert!(stats.cutoffs > 0);
        assert!(engine.table().occupied() > 0);

        engine.new_game();
        assert_eq!(engine.table().occupied(), 0);
    }

    #[test]
    fn preferred_move_goes_first() {
        let mut moves = vec![
            ChessMove::new(1, 2).with_capture(true),
            ChessMove::new(3, 4),
            ChessMove::new(5, 6),
        ];
        order_moves(&mut moves, Some(ChessMove::new(5, 6)));
        assert_eq!(moves[0], ChessMove::new(5, 6));
        assert_eq!(moves[1], ChessMove::new(1, 2).with_capture(true));
        order_moves(&mut moves, Some(ChessMove::new(60, 61)));
        assert_eq!(moves[0], ChessMove::new(5, 6));
    }
    #[test]
    fn table_mate_scores_follow_the_lookup_depth() {
        // Mate two plies below a depth-4 node is still two plies away when
        // the same position is looked up with three plies left.
        let stored = score_to_table(MATE_SCORE + 2, 4);
        assert_eq!(score_from_table(stored, 3), MATE_SCORE + 1);
        assert_eq!(score_from_table(score_to_table(-MATE_SCORE - 2, 4), 3), -MATE_SCORE - 1);
        assert_eq!(score_to_table(350, 6), 350);
        assert_eq!(score_from_table(-350, 6), -350);
        assert!(is_mate_score(stored));
    }

    #[test]
    fn warm_table_keeps_mate_distance() {
        // Kb6 (or Kc7) then Rh8/Ra1 mates in two.
        let fen = "k7/8/2K5/8/8/8/8/7R w - - 0 1";
        let cold = engine()
            .find_best_move(&mut board(fen), Color::White, 3)
            .expect("white has moves");
        assert_eq!(cold.score, MATE_SCORE);

        let mut warm = engine();
        warm.find_best_move(&mut board(fen), Color::White, 5)
            .expect("white has moves");
        let rerun = warm
            .find_best_move(&mut board(fen), Color::White, 3)
            .expect("white has moves");
        assert_eq!(rerun.score, cold.score);
    }

    #[test]
    fn stored_bounds_cut_off_like_a_full_search() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";
        let mut reference = SearchEngine::new(MaterialScorer, EngineConfig::default());
        let mut position = board(fen);
        let exact = reference
            .minimax(&mut position, Color::White, 2, -INFINITE, INFINITE)
            .expect("search should run");
        let key = position.position_key();

        for (bound, alpha, beta) in [
            (Bound::Lower, -INFINITE, exact),
            (Bound::Upper, exact, INFINITE),
        ] {
            let mut engine = SearchEngine::new(MaterialScorer, EngineConfig::default());
            engine.table.store(TtEntry {
                key: key.clone(),
                depth: 2,
                score: exact,
                bound,
                best_move: None,
            });
            let score = engine
                .minimax(&mut position, Color::White, 2, alpha, beta)
                .expect("search should run");
            assert_eq!(score, exact, "{bound:?} bound");
            assert_eq!(engine.stats().cutoffs, 1, "{bound:?} bound should cut off at once");
            assert_eq!(engine.stats().nodes, 1);
        }

        // A lower bound that only raises alpha still searches to the same value.
        let mut engine = SearchEngine::new(MaterialScorer, EngineConfig::default());
        engine.table.store(TtEntry {
            key,
            depth: 2,
            score: exact - 50,
            bound: Bound::Lower,
            best_move: None,
        });
        let score = engine
            .minimax(&mut position, Color::White, 2, -INFINITE, INFINITE)
            .expect("search should run");
        assert_eq!(score, exact);
        assert!(engine.stats().nodes > 1);
        assert_eq!(position.save(), fen);
    }
}
