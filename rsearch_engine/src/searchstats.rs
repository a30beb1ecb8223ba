
use std::time::Duration;

use log::debug;

use crate::types::*;

#[derive(Debug,Default,PartialEq,Eq,Clone,Copy)]
pub struct SearchStats {
    pub nodes:          u64,
    pub qt_nodes:       u64,
    pub leaves:         u64,
    pub checkmates:     u64,
    pub stalemates:     u64,
    pub draws:          u64,
    pub tt_hits:        u64,
    pub tt_misses:      u64,
    pub tt_cuts:        u64,
    pub beta_cuts:      u64,
    pub q_max_depth:    Depth,
}

impl SearchStats {

    pub fn total_nodes(&self) -> u64 {
        self.nodes + self.qt_nodes
    }

    pub fn log_summary(&self, dt: Duration) {
        let secs = dt.as_secs_f64().max(1e-9);
        debug!("time       = {:.3}s", dt.as_secs_f64());
        debug!("nodes      = {} (+{} qsearch)", self.nodes, self.qt_nodes);
        debug!("rate       = {:.2} knodes/s", (self.total_nodes() as f64 / 1000.) / secs);
        debug!("leaves     = {}", self.leaves);
        debug!("checkmates = {}", self.checkmates);
        debug!("stalemates = {}", self.stalemates);
        debug!("draws      = {}", self.draws);
        debug!("hits       = {} ({} cut)", self.tt_hits, self.tt_cuts);
        debug!("misses     = {}", self.tt_misses);
        debug!("beta cuts  = {}", self.beta_cuts);
        debug!("q depth    = {}", self.q_max_depth);
    }

}

impl std::ops::Add for SearchStats {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            nodes:          self.nodes + other.nodes,
            qt_nodes:       self.qt_nodes + other.qt_nodes,
            leaves:         self.leaves + other.leaves,
            checkmates:     self.checkmates + other.checkmates,
            stalemates:     self.stalemates + other.stalemates,
            draws:          self.draws + other.draws,
            tt_hits:        self.tt_hits + other.tt_hits,
            tt_misses:      self.tt_misses + other.tt_misses,
            tt_cuts:        self.tt_cuts + other.tt_cuts,
            beta_cuts:      self.beta_cuts + other.beta_cuts,
            q_max_depth:    Depth::max(self.q_max_depth, other.q_max_depth),
        }
    }
}

impl std::ops::AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
