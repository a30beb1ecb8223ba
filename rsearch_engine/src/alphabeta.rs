
use crate::types::*;
use crate::evaluate::*;
use crate::explore::*;
use crate::move_ordering::*;
use crate::trans_table::*;

use log::trace;

#[derive(Debug,PartialEq,PartialOrd,Clone,Copy)]
pub struct ABResult {
    pub mv:       Option<Move>,
    pub score:    Score,
}

impl std::ops::Neg for ABResult {
    type Output = Self;
    fn neg(self) -> Self::Output {
        let mut out = self;
        out.score = -self.score;
        out
    }
}

/// New
impl ABResult {

    pub fn new_null_score(score: Score) -> Self {
        Self {
            mv: None,
            score,
        }
    }

    pub fn new_single(mv: Move, score: Score) -> Self {
        Self {
            mv: Some(mv),
            score,
        }
    }

}

/// Score for the side to move being mated `ply` plies from the root
pub fn mated_score(ply: Depth) -> Score {
    -(CHECKMATE_VALUE - ply as Score)
}

/// Negamax
impl Explorer {

    /// Fail-soft alpha-beta. Score is from the side to move's point of view,
    /// `sign` is +1 when that side is White.
    pub fn ab_search<G: Game>(
        &mut self,
        g:                      &mut G,
        (depth,ply):            (Depth,Depth),
        (mut alpha,mut beta):   (Score,Score),
        sign:                   Score,
    ) -> ABResult {

        if depth <= 0 {
            return ABResult::new_null_score(self.horizon(g, ply, (alpha,beta), sign));
        }

        self.stats.nodes += 1;
        trace!("ab_search: depth {}, ply {}, a/b: {},{}", depth, ply, alpha, beta);

        let zb = g.zobrist();
        let mut hash_move = None;

        match self.tt.probe(zb).copied() {
            Some(si) if si.depth_searched >= depth => {
                self.stats.tt_hits += 1;
                hash_move = si.best_move;
                let score = score_from_tt(si.score, ply);
                (alpha,beta) = si.narrow_window(score, (alpha,beta));
                if alpha >= beta {
                    self.stats.tt_cuts += 1;
                    return ABResult { mv: si.best_move, score };
                }
            },
            Some(si) => {
                // too shallow, still a good first move
                self.stats.tt_misses += 1;
                hash_move = si.best_move;
            },
            None => {
                self.stats.tt_misses += 1;
            },
        }

        let moves = g.legal_moves();

        if moves.is_empty() {
            let score = match self.game_over_score(g, ply) {
                Some(score) => score,
                // not expanded
                None        => self.horizon(g, ply, (alpha,beta), sign),
            };
            return ABResult::new_null_score(score);
        }

        if g.is_draw() {
            self.stats.draws += 1;
            return ABResult::new_null_score(self.cfg.draw_value);
        }

        let hints = self.order_hints(g, &moves, hash_move, depth);
        let moves = order_moves(moves, &hints);

        let alpha0 = alpha;
        let mut best = ABResult::new_null_score(-INFINITY);

        for (i,mv) in moves.into_iter().enumerate() {
            let ext = self.primary_extension(i, (depth,ply));
            g.make_move(mv);
            let res = -self.ab_search(g, (depth - 1 + ext, ply + 1), (-beta, -alpha), -sign);
            g.undo_move(mv);

            if res.score > best.score {
                best = ABResult::new_single(mv, res.score);
            }

            if best.score > alpha {
                alpha = best.score;
            }

            if alpha >= beta {
                self.stats.beta_cuts += 1;
                if !mv.is_capture() {
                    self.killers.insert(depth, mv);
                }
                break;
            }
        }

        let node_type = Node::from_bounds(best.score, alpha0, beta);
        self.tt.insert(SearchInfo::new(
            zb,
            best.mv,
            depth,
            node_type,
            score_to_tt(best.score, ply),
        ));

        best
    }

    /// Score at depth 0: quiescence search, or the static eval
    fn horizon<G: Game>(
        &mut self,
        g:              &mut G,
        ply:            Depth,
        (alpha,beta):   (Score,Score),
        sign:           Score,
    ) -> Score {
        if self.cfg.quiescence {
            return self.qsearch(g, (ply,0), (alpha,beta), sign);
        }
        if let Some(score) = self.game_over_score(g, ply) {
            return score;
        }
        if g.is_draw() {
            self.stats.draws += 1;
            return self.cfg.draw_value;
        }
        self.stats.leaves += 1;
        sign * evaluate(g, &self.cfg).sum()
    }

    /// Checkmate or stalemate score, None if the side to move can still play
    pub(crate) fn game_over_score<G: Game>(&mut self, g: &G, ply: Depth) -> Option<Score> {
        if g.is_checkmate() {
            trace!("checkmate at ply {}", ply);
            self.stats.checkmates += 1;
            Some(mated_score(ply))
        } else if g.is_stalemate() {
            trace!("stalemate at ply {}", ply);
            self.stats.stalemates += 1;
            Some(self.cfg.draw_value)
        } else {
            None
        }
    }

    /// Extra depth for the `i`th ordered move, counting down from
    /// `primary_move_extension` for the first. No line from the root gains
    /// more than `primary_move_extension` plies in total.
    fn primary_extension(&self, i: usize, (depth,ply): (Depth,Depth)) -> Depth {
        let max_ext = self.cfg.primary_move_extension;
        if max_ext <= 0 || i >= max_ext as usize {
            return 0;
        }
        let ext  = max_ext - i as Depth;
        let room = self.root_depth + max_ext - (ply + depth);
        ext.min(room).max(0)
    }

}
