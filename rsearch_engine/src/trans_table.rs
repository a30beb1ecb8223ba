
use crate::types::*;
use crate::evaluate::*;

use serde::{Serialize,Deserialize};
use derive_new::new;

/// Depth stored for quiescence results, never usable by a full-width probe
pub const QS_DEPTH: Depth = 0;

pub const MAX_TT_SIZE_LOG2: u8 = 30;

/// Exact,      true score == stored
/// LowerBound, fail high, true score >= stored
/// UpperBound, fail low, true score <= stored
#[derive(Debug,Eq,PartialEq,Hash,Clone,Copy,Serialize,Deserialize)]
pub enum Node {
    Invalid,
    Exact,
    LowerBound,
    UpperBound,
}

impl Default for Node {
    fn default() -> Self { Node::Invalid }
}

impl Node {
    /// Bound of a fail-soft result searched with (alpha0,beta)
    pub fn from_bounds(best: Score, alpha0: Score, beta: Score) -> Self {
        if best <= alpha0 {
            Node::UpperBound
        } else if best >= beta {
            Node::LowerBound
        } else {
            Node::Exact
        }
    }
}

#[derive(Debug,Default,Eq,PartialEq,Hash,Clone,Copy,Serialize,Deserialize,new)]
pub struct SearchInfo {
    pub zobrist:            Zobrist,
    pub best_move:          Option<Move>,
    pub depth_searched:     Depth,
    pub node_type:          Node,
    pub score:              Score,
}

impl SearchInfo {

    pub fn is_valid(&self) -> bool {
        self.node_type != Node::Invalid
    }

    /// Narrow (alpha,beta) by this entry's bound, score already ply adjusted
    pub fn narrow_window(&self, score: Score, (alpha,beta): (Score,Score)) -> (Score,Score) {
        match self.node_type {
            Node::Exact      => (score, score),
            Node::LowerBound => (Score::max(alpha, score), beta),
            Node::UpperBound => (alpha, Score::min(beta, score)),
            Node::Invalid    => (alpha, beta),
        }
    }

}

/// Mate scores relative to the node being stored, not the root
pub fn score_to_tt(score: Score, ply: Depth) -> Score {
    if score >= MATE_IN_MAX_PLY {
        score + ply as Score
    } else if score <= -MATE_IN_MAX_PLY {
        score - ply as Score
    } else {
        score
    }
}

pub fn score_from_tt(score: Score, ply: Depth) -> Score {
    if score >= MATE_IN_MAX_PLY {
        score - ply as Score
    } else if score <= -MATE_IN_MAX_PLY {
        score + ply as Score
    } else {
        score
    }
}

/// Direct-mapped, always-replace
#[derive(Debug,Clone)]
pub struct TransTable {
    entries:   Vec<SearchInfo>,
    mask:      u64,
}

impl TransTable {

    pub fn new(size_log2: u8) -> Self {
        let capacity = 1usize << size_log2.min(MAX_TT_SIZE_LOG2);
        Self {
            entries: vec![SearchInfo::default(); capacity],
            mask:    capacity as u64 - 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    fn index(&self, zb: Zobrist) -> usize {
        (zb.0 & self.mask) as usize
    }

    /// None if the slot is empty or holds another position
    pub fn probe(&self, zb: Zobrist) -> Option<&SearchInfo> {
        let si = &self.entries[self.index(zb)];
        if si.is_valid() && si.zobrist == zb {
            Some(si)
        } else {
            None
        }
    }

    /// Overwrites whatever was in the slot
    pub fn insert(&mut self, si: SearchInfo) {
        let idx = self.index(si.zobrist);
        self.entries[idx] = si;
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|si| *si = SearchInfo::default());
    }

    pub fn len_used(&self) -> usize {
        self.entries.iter().filter(|si| si.is_valid()).count()
    }

}
