
use crate::types::*;
use crate::options::EngineConfig;

pub type Score = i32;

pub const CHECKMATE_VALUE: Score = 100_000_000;
/// Any score at least this far from zero is a forced mate
pub const MATE_IN_MAX_PLY: Score = CHECKMATE_VALUE - MAX_SEARCH_PLY as Score;
/// Outside every reachable score, safe to negate
pub const INFINITY: Score = CHECKMATE_VALUE + 1;

pub const DRAW_VALUE: Score = 0;

/// King sentinel, always cancels out
pub const KING_VALUE: Score = 20_000;

const KING_HUNT_WEIGHT: Score = 10;

pub fn is_mate_score(score: Score) -> bool {
    score.abs() >= MATE_IN_MAX_PLY
}

/// Plies to mate, positive if the side to move mates
pub fn mate_in_plies(score: Score) -> Option<Depth> {
    if !is_mate_score(score) { return None; }
    let plies = (CHECKMATE_VALUE - score.abs()) as Depth;
    if score > 0 { Some(plies) } else { Some(-plies) }
}

impl Piece {
    pub fn score(&self) -> Score {
        match self {
            Pawn   => 100,
            Knight => 300,
            Bishop => 310,
            Rook   => 500,
            Queen  => 900,
            King   => KING_VALUE,
        }
    }
}

#[derive(Debug,Default,Eq,PartialEq,Clone,Copy)]
pub struct Eval {
    pub endgame:          bool,
    pub material:         [[Score; 6]; 2],
    pub piece_positions:  [[Score; 6]; 2],
    /// White-positive
    pub king_hunt:        Score,
}

impl Eval {

    /// White-positive total
    pub fn sum(&self) -> Score {
        self.sum_color(White) + self.sum_color(Black) + self.king_hunt
    }

    fn sum_color(&self, col: Color) -> Score {
        let s: Score = self.material[col].iter().sum::<Score>()
            + self.piece_positions[col].iter().sum::<Score>();
        match col {
            White => s,
            Black => -s,
        }
    }

    /// Material without kings
    pub fn sum_material(&self, col: Color) -> Score {
        self.material[col][..King.index()].iter().sum()
    }

    pub fn get_piece_pos(&self, pc: Piece, col: Color) -> Score {
        self.piece_positions[col][pc.index()]
    }

    pub fn get_piece_mat(&self, pc: Piece, col: Color) -> Score {
        self.material[col][pc.index()]
    }

}

/// Main Evaluation
pub fn evaluate<G: Game>(g: &G, cfg: &EngineConfig) -> Eval {
    let mut out = Eval::default();

    let n_pieces = g.all_occupied().popcount();
    out.endgame = n_pieces <= cfg.endgame_pieces;

    for &col in [White,Black].iter() {
        for pc in Piece::iter_pieces() {
            let b = g.get(pc, col);
            out.material[col][pc.index()] = b.popcount() as Score * pc.score();
            out.piece_positions[col][pc.index()] = b
                .map(|c0| score_position(pc, col, c0, out.endgame))
                .sum();
        }
    }

    if n_pieces <= cfg.king_hunt_pieces {
        out.king_hunt = king_hunt(g, &out);
    }

    out
}

pub fn is_endgame<G: Game>(g: &G, cfg: &EngineConfig) -> bool {
    g.all_occupied().popcount() <= cfg.endgame_pieces
}

/// Reward the side ahead in material for walking its king onto the other one
fn king_hunt<G: Game>(g: &G, ev: &Eval) -> Score {
    let diff = ev.sum_material(White) - ev.sum_material(Black);
    if diff == 0 { return 0; }

    let (wk,bk) = match (g.get(King, White).bitscan_safe(), g.get(King, Black).bitscan_safe()) {
        (Some(wk),Some(bk)) => (wk,bk),
        _                   => return 0,
    };

    let bonus = (7 - wk.distance(bk) as Score) * KING_HUNT_WEIGHT;
    if diff > 0 { bonus } else { -bonus }
}

/// Tables are from White's side, files a-d only, indexed [rank][file].
/// Files e-h read the reflected file and Black reads the flipped rank.
pub fn score_position(pc: Piece, col: Color, c0: Coord, endgame: bool) -> Score {
    let rank = c0.relative_rank(col) as usize;
    let file = c0.fold_file() as usize;
    let table = match pc {
        Pawn              => &PAWN_TABLE,
        Knight            => &KNIGHT_TABLE,
        Bishop            => &BISHOP_TABLE,
        Rook              => &ROOK_TABLE,
        Queen             => &QUEEN_TABLE,
        King if endgame   => &KING_END_TABLE,
        King              => &KING_MID_TABLE,
    };
    table[rank][file]
}

type HalfTable = [[Score; 4]; 8];

#[rustfmt::skip]
static PAWN_TABLE: HalfTable = [
    [  0,   0,   0,   0],
    [  5,  10,  10, -20],
    [  5,  -5, -10,   0],
    [  0,   0,   0,  20],
    [  5,   5,  10,  25],
    [ 10,  10,  20,  30],
    [ 50,  50,  50,  50],
    [  0,   0,   0,   0],
];

#[rustfmt::skip]
static KNIGHT_TABLE: HalfTable = [
    [-50, -40, -30, -30],
    [-40, -20,   0,   5],
    [-30,   5,  10,  15],
    [-30,   0,  15,  20],
    [-30,   5,  15,  20],
    [-30,   0,  10,  15],
    [-40, -20,   0,   0],
    [-50, -40, -30, -30],
];

#[rustfmt::skip]
static BISHOP_TABLE: HalfTable = [
    [-20, -10, -10, -10],
    [-10,   5,   0,   0],
    [-10,  10,  10,  10],
    [-10,   0,  10,  10],
    [-10,   5,   5,  10],
    [-10,   0,   5,  10],
    [-10,   0,   0,   0],
    [-20, -10, -10, -10],
];

#[rustfmt::skip]
static ROOK_TABLE: HalfTable = [
    [  0,   0,   0,   5],
    [ -5,   0,   0,   0],
    [ -5,   0,   0,   0],
    [ -5,   0,   0,   0],
    [ -5,   0,   0,   0],
    [ -5,   0,   0,   0],
    [  5,  10,  10,  10],
    [  0,   0,   0,   0],
];

#[rustfmt::skip]
static QUEEN_TABLE: HalfTable = [
    [-20, -10, -10,  -5],
    [-10,   0,   5,   0],
    [-10,   5,   5,   5],
    [  0,   0,   5,   5],
    [ -5,   0,   5,   5],
    [-10,   0,   5,   5],
    [-10,   0,   0,   0],
    [-20, -10, -10,  -5],
];

#[rustfmt::skip]
static KING_MID_TABLE: HalfTable = [
    [ 20,  30,  10,   0],
    [ 20,  20,   0,   0],
    [-10, -20, -20, -20],
    [-20, -30, -30, -40],
    [-30, -40, -40, -50],
    [-30, -40, -40, -50],
    [-30, -40, -40, -50],
    [-30, -40, -40, -50],
];

/// Centralising
#[rustfmt::skip]
static KING_END_TABLE: HalfTable = [
    [-50, -30, -30, -30],
    [-30, -30,   0,   0],
    [-30, -10,  20,  30],
    [-30, -10,  30,  40],
    [-30, -10,  30,  40],
    [-30, -10,  20,  30],
    [-30, -20, -10,   0],
    [-50, -40, -30, -20],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::*;

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    #[test]
    fn test_eval_symmetric_01() {
        let cfg = EngineConfig::default();
        let g = TreeBuilder::new(White, &[
            (White, King,   sq("g1")),
            (White, Rook,   sq("a1")),
            (White, Knight, sq("c3")),
            (White, Pawn,   sq("d4")),
            (Black, King,   sq("g8")),
            (Black, Rook,   sq("a8")),
            (Black, Knight, sq("c6")),
            (Black, Pawn,   sq("d5")),
        ]).unwrap().build();
        let ev = evaluate(&g, &cfg);
        assert_eq!(ev.sum(), 0);
        assert_eq!(ev.get_piece_pos(Knight, White), ev.get_piece_pos(Knight, Black));
    }

    #[test]
    fn test_eval_material_01() {
        let cfg = EngineConfig::default();
        let g = TreeBuilder::new(White, &[
            (White, King,  sq("e1")),
            (White, Queen, sq("d1")),
            (Black, King,  sq("e8")),
            (Black, Rook,  sq("a8")),
            (Black, Pawn,  sq("h7")),
            (Black, Pawn,  sq("g7")),
            (Black, Pawn,  sq("f7")),
        ]).unwrap().build();
        let ev = evaluate(&g, &cfg);
        assert_eq!(ev.get_piece_mat(Queen, White), 900);
        assert_eq!(ev.get_piece_mat(Pawn, Black), 300);
        assert_eq!(ev.sum_material(White) - ev.sum_material(Black), 100);
        assert!(!ev.endgame);
    }

    #[test]
    fn test_eval_file_reflection_01() {
        for pc in Piece::iter_pieces() {
            for rank in 0..8 {
                for file in 0..4 {
                    let a = score_position(pc, White, Coord(file, rank), false);
                    let b = score_position(pc, White, Coord(7 - file, rank), false);
                    let c = score_position(pc, Black, Coord(file, 7 - rank), false);
                    assert_eq!(a, b);
                    assert_eq!(a, c);
                }
            }
        }
    }

    #[test]
    fn test_eval_endgame_king_01() {
        let cfg = EngineConfig::default();
        assert!(score_position(King, White, sq("e4"), true) > score_position(King, White, sq("a1"), true));
        assert!(score_position(King, White, sq("e4"), false) < score_position(King, White, sq("g1"), false));

        let g = TreeBuilder::new(White, &[
            (White, King,  sq("e4")),
            (White, Rook,  sq("a1")),
            (Black, King,  sq("h8")),
        ]).unwrap().build();
        let ev = evaluate(&g, &cfg);
        assert!(ev.endgame);
        assert_eq!(ev.get_piece_pos(King, White), 40);
    }

    #[test]
    fn test_eval_king_hunt_01() {
        let cfg = EngineConfig::default();
        let far = TreeBuilder::new(White, &[
            (White, King,  sq("a1")),
            (White, Queen, sq("d1")),
            (Black, King,  sq("h8")),
        ]).unwrap().build();
        let near = TreeBuilder::new(White, &[
            (White, King,  sq("f6")),
            (White, Queen, sq("d1")),
            (Black, King,  sq("h8")),
        ]).unwrap().build();
        let ev_far  = evaluate(&far, &cfg);
        let ev_near = evaluate(&near, &cfg);
        assert_eq!(ev_far.king_hunt, 0);
        assert_eq!(ev_near.king_hunt, 5 * KING_HUNT_WEIGHT);

        let mirrored = near.mirrored();
        assert_eq!(evaluate(&mirrored, &cfg).sum(), -ev_near.sum());
    }

    #[test]
    fn test_mate_score_01() {
        assert!(is_mate_score(CHECKMATE_VALUE - 3));
        assert!(is_mate_score(-(CHECKMATE_VALUE - 3)));
        assert!(!is_mate_score(KING_VALUE));
        assert_eq!(mate_in_plies(CHECKMATE_VALUE - 3), Some(3));
        assert_eq!(mate_in_plies(-(CHECKMATE_VALUE - 2)), Some(-2));
        assert_eq!(mate_in_plies(150), None);
    }

}
