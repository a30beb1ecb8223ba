
use crate::types::*;
use crate::evaluate::*;
use crate::explore::Explorer;

pub const HASH_MOVE_BONUS: Score = 1000;

const KILLER_PRIMARY_BONUS: Score = 9;
const KILLER_SECONDARY_BONUS: Score = 8;

/// [P,N,B,R,Q,K]
const MVV_VALUE: [Score; 6] = [10, 20, 30, 40, 50, 0];
const LVA_VALUE: [Score; 6] = [5, 4, 3, 2, 1, 0];

/// Hints for one node
#[derive(Debug,Default,Clone,Copy)]
pub struct OrderHints {
    pub hash_move:     Option<Move>,
    pub killers:       (Option<Move>,Option<Move>),
    pub endgame:       bool,
    pub pawn_bonus:    Score,
}

pub fn mvv_lva(mv: &Move) -> Score {
    match mv.victim {
        Some(victim) => MVV_VALUE[victim.index()] + LVA_VALUE[mv.piece.index()],
        None         => 0,
    }
}

pub fn score_move(mv: &Move, hints: &OrderHints) -> Score {
    let mut score = 0;

    if hints.hash_move == Some(*mv) {
        score += HASH_MOVE_BONUS;
    }

    score += mvv_lva(mv);

    if let Some(pc) = mv.promotion {
        score += MVV_VALUE[pc.index()];
    }

    if !mv.is_capture() {
        if hints.killers.0 == Some(*mv) {
            score += KILLER_PRIMARY_BONUS;
        } else if hints.killers.1 == Some(*mv) {
            score += KILLER_SECONDARY_BONUS;
        }
    }

    if hints.endgame && mv.piece == Pawn {
        score += hints.pawn_bonus;
    }

    score
}

/// Highest first, ties keep generation order
pub fn order_moves(moves: Vec<Move>, hints: &OrderHints) -> Vec<Move> {
    let mut xs: Vec<(Move,Score)> = moves.into_iter()
        .map(|mv| {
            let s = score_move(&mv, hints);
            (mv,s)
        })
        .collect();
    xs.sort_by(|a,b| b.1.cmp(&a.1));
    xs.into_iter().map(|(mv,_)| mv).collect()
}

impl Explorer {

    /// The cached move only counts if it is legal here
    pub fn order_hints<G: Game>(
        &self,
        g:              &G,
        moves:          &[Move],
        hash_move:      Option<Move>,
        killer_depth:   Depth,
    ) -> OrderHints {
        OrderHints {
            hash_move:  hash_move.filter(|mv| moves.contains(mv)),
            killers:    self.killers.get(killer_depth),
            endgame:    is_endgame(g, &self.cfg),
            pawn_bonus: self.cfg.endgame_pawn_push_bonus,
        }
    }

}
