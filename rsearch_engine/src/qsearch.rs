
use crate::types::*;
use crate::evaluate::*;
use crate::explore::*;
use crate::move_ordering::*;
use crate::trans_table::*;

use log::trace;

impl Explorer {

    /// Captures only, or every evasion when in check.
    /// Returns at least the stand-pat score unless in check.
    pub fn qsearch<G: Game>(
        &mut self,
        g:                      &mut G,
        (ply,qply):             (Depth,Depth),
        (mut alpha,mut beta):   (Score,Score),
        sign:                   Score,
    ) -> Score {
        trace!("qsearch, ply {}, a/b: {:?},{:?}", ply, alpha, beta);

        self.stats.qt_nodes += 1;
        self.stats.q_max_depth = self.stats.q_max_depth.max(qply);

        let zb = g.zobrist();
        let mut hash_move = None;

        if self.cfg.tt_in_qsearch {
            match self.tt.probe(zb).copied() {
                Some(si) => {
                    self.stats.tt_hits += 1;
                    hash_move = si.best_move;
                    let score = score_from_tt(si.score, ply);
                    (alpha,beta) = si.narrow_window(score, (alpha,beta));
                    if alpha >= beta {
                        self.stats.tt_cuts += 1;
                        return score;
                    }
                },
                None => {
                    self.stats.tt_misses += 1;
                },
            }
        }

        let in_check = g.in_check();
        let moves = if in_check { g.legal_moves() } else { g.capture_moves() };

        if moves.is_empty() {
            if let Some(score) = self.game_over_score(g, ply) {
                return score;
            }
        }

        if g.is_draw() {
            self.stats.draws += 1;
            return self.cfg.draw_value;
        }

        let alpha0 = alpha;
        let stand_pat = sign * evaluate(g, &self.cfg).sum();

        let (mut best, moves) = if in_check {
            if moves.is_empty() || qply >= self.cfg.max_qsearch_ply {
                self.stats.leaves += 1;
                return stand_pat;
            }
            (-INFINITY, moves)
        } else {
            if stand_pat >= beta {
                trace!("qsearch returning beta 0: {:?}, sp = {}", beta, stand_pat);
                return beta;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
            if qply >= self.cfg.max_qsearch_ply {
                self.stats.leaves += 1;
                return stand_pat;
            }
            if moves.is_empty() {
                self.stats.leaves += 1;
            }
            (stand_pat, moves)
        };

        let hints = self.order_hints(g, &moves, hash_move, QS_DEPTH);
        let moves = order_moves(moves, &hints);

        let mut best_mv = None;

        for mv in moves {
            trace!("qsearch: mv = {}", mv);
            g.make_move(mv);
            let score = -self.qsearch(g, (ply + 1,qply + 1), (-beta,-alpha), -sign);
            g.undo_move(mv);

            if score > best {
                best    = score;
                best_mv = Some(mv);
            }

            if score > alpha {
                alpha = score;
            }

            if alpha >= beta {
                trace!("qsearch returning beta 1: {:?}", beta);
                self.stats.beta_cuts += 1;
                if !mv.is_capture() {
                    self.killers.insert(QS_DEPTH, mv);
                }
                break;
            }
        }

        if self.cfg.tt_in_qsearch {
            self.tt.insert(SearchInfo::new(
                zb,
                best_mv,
                QS_DEPTH,
                Node::from_bounds(best, alpha0, beta),
                score_to_tt(best, ply),
            ));
        }

        best
    }

}
