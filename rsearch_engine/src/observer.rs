
use crate::types::*;
use crate::evaluate::*;

use std::time::Duration;

use log::{debug,info};
use serde::{Serialize,Deserialize};
use derive_new::new;

/// One completed deepening iteration
#[derive(Debug,Clone,PartialEq,new)]
pub struct IterationInfo {
    pub depth:       Depth,
    pub score:       Score,
    pub best_move:   Option<Move>,
    pub elapsed:     Duration,
    pub nodes:       u64,
    pub pv:          Vec<Move>,
}

impl IterationInfo {
    pub fn pv_string(&self) -> String {
        self.pv.iter()
            .map(|mv| format!("{}", mv))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub trait SearchObserver {
    fn on_iteration(&mut self, info: &IterationInfo);

    fn on_decision(&mut self, _mv: Option<Move>, _score: Score, _depth: Depth) {}
}

#[derive(Debug,Eq,PartialEq,Clone,Copy,Serialize,Deserialize)]
pub enum ObserverKind {
    /// Through the `log` crate
    Log,
    Silent,
}

impl ObserverKind {
    pub fn build(&self) -> Box<dyn SearchObserver> {
        match self {
            ObserverKind::Log    => Box::new(LogObserver),
            ObserverKind::Silent => Box::new(NullObserver),
        }
    }
}

#[derive(Debug,Default,Clone,Copy)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_iteration(&mut self, info: &IterationInfo) {
        let mate = match mate_in_plies(info.score) {
            Some(p) => format!(" (mate in {} plies)", p),
            None    => String::new(),
        };
        debug!("depth {:>2}, score {:>6}{}, nodes {:>8}, {:.3}s, pv: {}",
               info.depth, info.score, mate, info.nodes,
               info.elapsed.as_secs_f64(), info.pv_string());
    }

    fn on_decision(&mut self, mv: Option<Move>, score: Score, depth: Depth) {
        match mv {
            Some(mv) => info!("best move {} at depth {}, score {}", mv, depth, score),
            None     => info!("no move found"),
        }
    }
}

#[derive(Debug,Default,Clone,Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn on_iteration(&mut self, _info: &IterationInfo) {}
}
