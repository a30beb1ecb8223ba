
use crate::types::*;
use crate::evaluate::*;
use crate::explore::*;
use crate::observer::*;
use crate::options::*;
use crate::tree::*;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sq(s: &str) -> Coord { s.parse().unwrap() }

fn cfg() -> EngineConfig {
    EngineConfig::default()
        .tt_size_log2(16)
        .observer(ObserverKind::Silent)
}

#[derive(Debug,Clone,Default)]
struct Recorder(Rc<RefCell<Vec<IterationInfo>>>);

impl Recorder {
    fn depths(&self) -> Vec<Depth> {
        self.0.borrow().iter().map(|info| info.depth).collect()
    }
}

impl SearchObserver for Recorder {
    fn on_iteration(&mut self, info: &IterationInfo) {
        self.0.borrow_mut().push(info.clone());
    }
}

fn ka2() -> Move { Move::quiet(sq("a1"), sq("a2"), King) }
fn qxd5() -> Move { Move::capture(sq("d1"), sq("d5"), Queen, Rook) }

/// Ra8 mates, the other two moves do not
fn mate_in_one() -> TreeGame {
    let mut b = TreeBuilder::new(White, &[
        (White, King,  sq("f6")),
        (White, Rook,  sq("a1")),
        (Black, King,  sq("h8")),
    ]).unwrap();
    let kg8 = Move::quiet(sq("h8"), sq("g8"), King);

    let mated = b.add_move(ROOT, Move::quiet(sq("a1"), sq("a8"), Rook)).unwrap();
    b.set_in_check(mated, true).unwrap();
    b.add_line(ROOT, &[Move::quiet(sq("a1"), sq("a2"), Rook), kg8]).unwrap();
    b.add_line(ROOT, &[Move::quiet(sq("f6"), sq("g6"), King), kg8]).unwrap();
    b.build()
}

#[test]
fn test_horizon_01() {
    init_logger();

    let mut g = demo().unwrap();
    let mut ex = Explorer::new(cfg());
    let res = ex.search_depth(&mut g, 1).unwrap();
    assert_eq!(res.mv, ka2());
    assert!(res.score > 0);

    let mut g = demo().unwrap();
    let mut ex = Explorer::new(cfg().quiescence(false));
    let res = ex.search_depth(&mut g, 1).unwrap();
    assert_eq!(res.mv, qxd5());
    assert_eq!(ex.stats.qt_nodes, 0);
}

#[test]
fn test_mate_in_one_01() {
    init_logger();

    let mut g = mate_in_one();
    let mut ex = Explorer::new(cfg());
    let rec = Recorder::default();
    ex.set_observer(Box::new(rec.clone()));

    let timer = Timer::with_clock(g.clock(), Duration::from_secs(60), 3);
    let res = ex.iterative_deepening(&mut g, &timer).unwrap();

    assert_eq!(res.mv, Move::quiet(sq("a1"), sq("a8"), Rook));
    assert_eq!(res.score, CHECKMATE_VALUE - 1);
    assert_eq!(mate_in_plies(res.score), Some(1));
    assert_eq!(res.pv, vec![res.mv]);

    // proven mate, no deeper iterations
    assert_eq!(rec.depths(), vec![1]);
}

#[test]
fn test_mate_at_horizon_01() {
    let mut g = mate_in_one();
    let mut ex = Explorer::new(cfg().quiescence(false));
    let res = ex.search_depth(&mut g, 1).unwrap();
    assert_eq!(res.mv, Move::quiet(sq("a1"), sq("a8"), Rook));
    assert_eq!(res.score, CHECKMATE_VALUE - 1);
    assert_eq!(ex.stats.checkmates, 1);
}

/// Qxg6 wins a knight but stalemates, Ke7 keeps the game going
fn stalemate_trap() -> (TreeGame,Move) {
    let mut b = TreeBuilder::new(White, &[
        (White, King,   sq("f7")),
        (White, Queen,  sq("d3")),
        (Black, King,   sq("h8")),
        (Black, Knight, sq("g6")),
    ]).unwrap();
    let ke7 = Move::quiet(sq("f7"), sq("e7"), King);

    let stale = b.add_move(ROOT, Move::capture(sq("d3"), sq("g6"), Queen, Knight)).unwrap();
    b.set_stalemate(stale, true).unwrap();
    b.add_line(ROOT, &[ke7, Move::quiet(sq("g6"), sq("f4"), Knight)]).unwrap();
    (b.build(), ke7)
}

#[test]
fn test_stalemate_at_horizon_01() {
    init_logger();

    let (g,ke7) = stalemate_trap();

    for quiescence in [true, false] {
        let mut g = g.clone();
        let mut ex = Explorer::new(cfg().quiescence(quiescence));
        let res = ex.search_depth(&mut g, 1).unwrap();
        assert_eq!(res.mv, ke7);
        assert!(res.score > 0);
        assert_eq!(ex.stats.stalemates, 1);
    }

    let mut g = g;
    let mut ex = Explorer::new(cfg());
    assert_eq!(ex.think(&mut g, Duration::from_millis(50)), Some(ke7));
}

#[test]
fn test_single_reply_01() {
    let mut b = TreeBuilder::new(Black, &[
        (White, King,  sq("f6")),
        (White, Rook,  sq("a8")),
        (Black, King,  sq("h7")),
    ]).unwrap();
    let kh6 = Move::quiet(sq("h7"), sq("h6"), King);
    b.add_move(ROOT, kh6).unwrap();
    let mut g = b.build();

    let mut ex = Explorer::new(cfg());
    let res = ex.iterative_deepening(&mut g, &Timer::unbounded()).unwrap();
    assert_eq!(res.mv, kh6);
    assert_eq!(res.depth, 0);
    assert_eq!(ex.stats.nodes, 0);

    let mut ex = Explorer::new(cfg().instant_single_reply(false).max_depth(2));
    let res = ex.iterative_deepening(&mut g, &Timer::unbounded()).unwrap();
    assert_eq!(res.mv, kh6);
    assert!(res.depth >= 2);
    assert!(ex.stats.nodes > 0);
}

#[test]
fn test_no_moves_01() {
    let mut g = TreeBuilder::new(White, &[
        (White, King,  sq("a1")),
        (Black, King,  sq("h8")),
    ]).unwrap().build();

    let mut ex = Explorer::new(cfg());
    assert_eq!(ex.think(&mut g, Duration::from_millis(10)), None);
    assert_eq!(ex.search_depth(&mut g, 3), None);
}

#[test]
fn test_think_01() {
    let mut g = demo().unwrap();
    let mut ex = Explorer::new(cfg());
    assert_eq!(ex.think(&mut g, Duration::from_millis(50)), Some(ka2()));
}

#[test]
fn test_time_budget_01() {
    init_logger();

    // depth 1 makes 3 moves, at 1ms each the next depth needs 9ms
    let mut g = demo().unwrap();
    g.set_move_cost(Duration::from_millis(1));

    let mut ex = Explorer::new(cfg().max_depth(3).endgame_extra_depth(0));
    let rec = Recorder::default();
    ex.set_observer(Box::new(rec.clone()));

    let timer = Timer::with_clock(g.clock(), Duration::from_millis(10), 3);
    let res = ex.iterative_deepening(&mut g, &timer).unwrap();
    assert_eq!(res.depth, 1);
    assert_eq!(res.mv, ka2());
    assert_eq!(rec.depths(), vec![1]);
    assert_eq!(rec.0.borrow()[0].elapsed, Duration::from_millis(3));

    let mut ex = Explorer::new(cfg().max_depth(3).endgame_extra_depth(0));
    let rec = Recorder::default();
    ex.set_observer(Box::new(rec.clone()));

    let timer = Timer::with_clock(g.clock(), Duration::from_millis(1000), 3);
    let res = ex.iterative_deepening(&mut g, &timer).unwrap();
    assert_eq!(res.depth, 3);
    assert_eq!(rec.depths(), vec![1, 2, 3]);
}

#[test]
fn test_endgame_extra_depth_01() {
    let mut g = demo().unwrap();

    let mut ex = Explorer::new(cfg().max_depth(2).endgame_extra_depth(1));
    let rec = Recorder::default();
    ex.set_observer(Box::new(rec.clone()));
    ex.iterative_deepening(&mut g, &Timer::unbounded()).unwrap();
    assert_eq!(rec.depths(), vec![1, 2, 3]);

    let mut ex = Explorer::new(cfg().max_depth(2).endgame_extra_depth(1).endgame_pieces(4));
    let rec = Recorder::default();
    ex.set_observer(Box::new(rec.clone()));
    ex.iterative_deepening(&mut g, &Timer::unbounded()).unwrap();
    assert_eq!(rec.depths(), vec![1, 2]);
}

#[test]
fn test_position_restored_01() {
    let mut g = TreeGame::generate(3, 4, 5);
    let zb0 = g.zobrist();
    let moves0 = g.legal_moves();

    let mut ex = Explorer::new(cfg().max_depth(3));
    ex.iterative_deepening(&mut g, &Timer::unbounded()).unwrap();

    assert_eq!(g.zobrist(), zb0);
    assert_eq!(g.legal_moves(), moves0);
    assert!(g.history().is_empty());
}

#[test]
fn test_determinism_01() {
    let g = TreeGame::generate(42, 4, 5);

    let mut g1 = g.clone();
    let mut ex1 = Explorer::new(cfg());
    let r1 = ex1.search_depth(&mut g1, 3).unwrap();

    let mut g2 = g.clone();
    let mut ex2 = Explorer::new(cfg());
    let r2 = ex2.search_depth(&mut g2, 3).unwrap();

    assert_eq!(r1, r2);
    assert!(g.legal_moves().contains(&r1.mv));
}

#[test]
fn test_mirror_symmetry_01() {
    let g = demo().unwrap();
    let m = g.mirrored();

    for depth in 1..=2 {
        let mut g0 = g.clone();
        let mut ex = Explorer::new(cfg());
        let r0 = ex.search_depth(&mut g0, depth).unwrap();

        let mut g1 = m.clone();
        let mut ex = Explorer::new(cfg());
        let r1 = ex.search_depth(&mut g1, depth).unwrap();

        assert_eq!(r0.score, r1.score);
        assert_eq!(r0.mv.mirror(), r1.mv);
        assert_eq!(r0.stats.total_nodes(), r1.stats.total_nodes());
    }
}

#[test]
fn test_principal_variation_01() {
    let mut g = demo().unwrap();
    let mut ex = Explorer::new(cfg());
    let res = ex.search_depth(&mut g, 2).unwrap();

    assert_eq!(res.pv.first(), Some(&res.mv));
    assert!(!res.pv.is_empty());

    // every pv move is legal in turn, and the walk leaves no trace
    let zb0 = g.zobrist();
    let pv = ex.principal_variation(&mut g, 10);
    assert_eq!(pv, res.pv);
    for &mv in pv.iter() {
        assert!(g.legal_moves().contains(&mv));
        g.make_move(mv);
    }
    for &mv in pv.iter().rev() {
        g.undo_move(mv);
    }
    assert_eq!(g.zobrist(), zb0);
}

#[test]
fn test_warm_cache_01() {
    let mut g = demo().unwrap();
    let mut ex = Explorer::new(cfg());

    let r0 = ex.search_depth(&mut g, 2).unwrap();
    assert!(ex.tt.len_used() > 0);

    let r1 = ex.search_depth(&mut g, 2).unwrap();
    assert_eq!(r0.mv, r1.mv);
    assert_eq!(r0.score, r1.score);
    assert!(r1.stats.tt_cuts > 0);
    assert!(r1.stats.total_nodes() < r0.stats.total_nodes());

    ex.clear();
    assert_eq!(ex.tt.len_used(), 0);
    assert_eq!(ex.killers.get(1), (None, None));
}

#[test]
fn test_try_new_01() {
    assert!(Explorer::try_new(cfg()).is_ok());
    let err = Explorer::try_new(cfg().time_growth_factor(0)).unwrap_err();
    assert!(matches!(err, crate::error::ConfigError::Invalid { field: "time_growth_factor", .. }));
}
