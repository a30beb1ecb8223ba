
use crate::types::*;
use crate::evaluate::*;
use crate::error::ConfigError;
use crate::options::EngineConfig;
use crate::observer::*;
use crate::killer_moves::KillerMoves;
use crate::searchstats::SearchStats;
pub use crate::timer::*;
pub use crate::trans_table::*;

use std::time::Duration;

use log::{debug,warn,log_enabled,Level};
use rustc_hash::FxHashSet;
use derive_new::new;

/// Outcome of one turn
#[derive(Debug,Clone,PartialEq,new)]
pub struct SearchResult {
    pub mv:       Move,
    /// From the side to move's point of view
    pub score:    Score,
    /// Last completed depth, 0 if no search was needed
    pub depth:    Depth,
    pub pv:       Vec<Move>,
    pub stats:    SearchStats,
}

/// Owns everything that persists between turns. The position is borrowed
/// per call and restored before returning.
pub struct Explorer {
    pub cfg:        EngineConfig,
    pub tt:         TransTable,
    pub killers:    KillerMoves,
    pub stats:      SearchStats,
    /// Depth of the iteration in progress
    pub(crate) root_depth: Depth,
    observer:       Box<dyn SearchObserver>,
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("cfg", &self.cfg)
            .field("tt_capacity", &self.tt.capacity())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Explorer {

    pub fn new(cfg: EngineConfig) -> Self {
        let tt       = TransTable::new(cfg.tt_size_log2);
        let observer = cfg.observer.build();
        Self {
            cfg,
            tt,
            killers: KillerMoves::default(),
            stats:   SearchStats::default(),
            root_depth: 0,
            observer,
        }
    }

    pub fn try_new(cfg: EngineConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::new(cfg))
    }

    pub fn set_observer(&mut self, observer: Box<dyn SearchObserver>) {
        self.observer = observer;
    }

    /// Forget everything learned, e.g. for a new game
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.stats = SearchStats::default();
    }

}

/// Entry points
impl Explorer {

    /// Best move within roughly `budget`, None if there are no legal moves
    pub fn think<G: Game>(&mut self, g: &mut G, budget: Duration) -> Option<Move> {
        let timer = Timer::new(budget, self.cfg.time_growth_factor);
        self.iterative_deepening(g, &timer).map(|res| res.mv)
    }

    pub fn iterative_deepening<G: Game, C: TurnClock>(
        &mut self,
        g:       &mut G,
        timer:   &Timer<C>,
    ) -> Option<SearchResult> {
        self.stats = SearchStats::default();

        let moves = g.legal_moves();
        if moves.is_empty() {
            warn!("iterative_deepening: no legal moves at root");
            return None;
        }

        if moves.len() == 1 && self.cfg.instant_single_reply {
            let mv = moves[0];
            let score = g.side_to_move().sign() * evaluate(g, &self.cfg).sum();
            debug!("single legal move {}, not searching", mv);
            self.observer.on_decision(Some(mv), score, 0);
            return Some(SearchResult::new(mv, score, 0, vec![mv], self.stats));
        }

        let mut max_depth = self.cfg.max_depth;
        if is_endgame(g, &self.cfg) {
            max_depth += self.cfg.endgame_extra_depth;
            debug!("endgame, searching up to depth {}", max_depth);
        }

        let out = self.deepen(g, timer, max_depth);
        self.finish(out.as_ref(), timer.elapsed());
        out
    }

    /// No time limit, no single reply shortcut
    pub fn search_depth<G: Game>(&mut self, g: &mut G, depth: Depth) -> Option<SearchResult> {
        self.stats = SearchStats::default();

        if g.legal_moves().is_empty() {
            warn!("search_depth: no legal moves at root");
            return None;
        }

        let timer = Timer::unbounded();
        let out = self.deepen(g, &timer, depth);
        self.finish(out.as_ref(), timer.elapsed());
        out
    }

    fn finish(&mut self, out: Option<&SearchResult>, dt: Duration) {
        if log_enabled!(Level::Debug) {
            self.stats.log_summary(dt);
            debug!("tt used {} / {}", self.tt.len_used(), self.tt.capacity());
        }
        match out {
            Some(res) => self.observer.on_decision(Some(res.mv), res.score, res.depth),
            None      => self.observer.on_decision(None, 0, 0),
        }
    }

}

/// Deepening
impl Explorer {

    fn deepen<G: Game, C: TurnClock>(
        &mut self,
        g:           &mut G,
        timer:       &Timer<C>,
        max_depth:   Depth,
    ) -> Option<SearchResult> {
        let sign = g.side_to_move().sign();
        let mut out: Option<SearchResult> = None;

        for depth in 1..=max_depth {
            let t0 = timer.elapsed();
            let (mv,score) = match self.search_root(g, depth, sign) {
                Some(x) => x,
                None    => break,
            };
            let dt = timer.elapsed().saturating_sub(t0);

            let pv_len = depth + self.cfg.primary_move_extension + self.cfg.max_qsearch_ply;
            let pv = self.principal_variation(g, pv_len as usize);

            self.observer.on_iteration(&IterationInfo::new(
                depth,
                score,
                Some(mv),
                dt,
                self.stats.total_nodes(),
                pv.clone(),
            ));

            out = Some(SearchResult::new(mv, score, depth, pv, self.stats));

            if is_mate_score(score) {
                debug!("mate score at depth {}, stopping", depth);
                break;
            }

            if !timer.should_search(dt) {
                debug!("no time for depth {}, remaining {:?}", depth + 1, timer.remaining());
                break;
            }
        }

        out
    }

    /// Root cache entry is preferred, unless an aliasing write replaced it
    fn search_root<G: Game>(&mut self, g: &mut G, depth: Depth, sign: Score) -> Option<(Move,Score)> {
        self.root_depth = depth;
        let res = self.ab_search(g, (depth,0), (-INFINITY,INFINITY), sign);

        let moves = g.legal_moves();
        let from_tt = self.tt.probe(g.zobrist())
            .filter(|si| si.depth_searched >= depth)
            .and_then(|si| si.best_move
                      .filter(|mv| moves.contains(mv))
                      .map(|mv| (mv, score_from_tt(si.score, 0))));

        match (from_tt, res.mv) {
            (Some(x),_)     => Some(x),
            (None,Some(mv)) => Some((mv, res.score)),
            (None,None)     => moves.first().map(|&mv| (mv, res.score)),
        }
    }

    /// Follows cached best moves from the current position
    pub fn principal_variation<G: Game>(&self, g: &mut G, max_plies: usize) -> Vec<Move> {
        let mut pv   = vec![];
        let mut seen = FxHashSet::default();

        while pv.len() < max_plies {
            let zb = g.zobrist();
            if !seen.insert(zb) { break; }

            let mv = match self.tt.probe(zb).and_then(|si| si.best_move) {
                Some(mv) => mv,
                None     => break,
            };
            if !g.legal_moves().contains(&mv) { break; }

            g.make_move(mv);
            pv.push(mv);
        }

        for &mv in pv.iter().rev() {
            g.undo_move(mv);
        }

        pv
    }

}
