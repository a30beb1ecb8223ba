
use crate::types::*;
use crate::error::{TreeError,TreeResult};
use crate::timer::TurnClock;

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use rand::{Rng,SeedableRng};
use rand::prelude::StdRng;
use serde::{Serialize,Deserialize};

pub type NodeId = usize;

pub const ROOT: NodeId = 0;

/// One declared position. The legal moves are exactly `children`.
///
/// A node without children is not expanded, and is scored as a leaf unless
/// it is marked as mate (`in_check`) or `stalemate`.
#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct TreeNode {
    pub side_to_move:  Color,
    pub pieces:        Vec<(Color,Piece,Coord)>,
    #[serde(default)]
    pub in_check:      bool,
    #[serde(default)]
    pub draw:          bool,
    #[serde(default)]
    pub stalemate:     bool,
    #[serde(default)]
    pub children:      Vec<(Move,NodeId)>,
    #[serde(skip)]
    boards:            [[BitBoard; 6]; 2],
    #[serde(skip)]
    zobrist:           Zobrist,
}

impl TreeNode {

    pub fn new(side_to_move: Color, pieces: Vec<(Color,Piece,Coord)>) -> TreeResult<Self> {
        let mut out = Self {
            side_to_move,
            pieces,
            in_check:  false,
            draw:      false,
            stalemate: false,
            children:  vec![],
            boards:    Default::default(),
            zobrist:   Zobrist::default(),
        };
        out.check_squares()?;
        out.init();
        Ok(out)
    }

    fn check_squares(&self) -> TreeResult<()> {
        let mut occ = BitBoard::empty();
        for &(_,_,c0) in self.pieces.iter() {
            if c0.0 > 7 || c0.1 > 7 {
                return Err(TreeError::BadCoord(format!("{:?}", c0)));
            }
            if occ.is_one_at(c0) {
                return Err(TreeError::Occupied(c0));
            }
            occ.set_one_mut(c0);
        }
        Ok(())
    }

    /// Recompute boards and hash from `pieces`
    fn init(&mut self) {
        let mut boards: [[BitBoard; 6]; 2] = Default::default();
        for &(col,pc,c0) in self.pieces.iter() {
            boards[col][pc.index()].set_one_mut(c0);
        }
        self.boards  = boards;
        self.zobrist = Zobrist::from_pieces(&self.pieces, self.side_to_move);
    }

    pub fn zobrist(&self) -> Zobrist {
        self.zobrist
    }

    pub fn piece_at(&self, c0: Coord) -> Option<(Color,Piece)> {
        self.pieces.iter()
            .find(|&&(_,_,c1)| c1 == c0)
            .map(|&(col,pc,_)| (col,pc))
    }

    pub fn child(&self, mv: Move) -> Option<NodeId> {
        self.children.iter()
            .find(|(m,_)| *m == mv)
            .map(|&(_,id)| id)
    }

    /// Pieces after `mv`, and the incrementally updated hash
    fn apply(&self, mv: Move) -> Result<(Vec<(Color,Piece,Coord)>,Zobrist), TreeError> {
        let side = self.side_to_move;

        if self.piece_at(mv.from) != Some((side,mv.piece)) {
            return Err(TreeError::NoPieceAt { at: mv.from, piece: mv.piece, side });
        }

        let found = self.piece_at(mv.to);
        match found {
            Some((col,_)) if col == side => return Err(TreeError::Occupied(mv.to)),
            Some((_,pc)) if Some(pc) != mv.victim =>
                return Err(TreeError::VictimMismatch { at: mv.to, found: Some(pc) }),
            None if mv.victim.is_some() =>
                return Err(TreeError::VictimMismatch { at: mv.to, found: None }),
            _ => {},
        }

        let placed = mv.promotion.unwrap_or(mv.piece);

        let mut zb = self.zobrist
            .update_piece(mv.piece, side, mv.from)
            .update_piece(placed, side, mv.to)
            .update_side_to_move();
        if let Some(victim) = mv.victim {
            zb = zb.update_piece(victim, !side, mv.to);
        }

        let pieces = self.pieces.iter()
            .filter(|&&(_,_,c0)| c0 != mv.to)
            .map(|&(col,pc,c0)| {
                if c0 == mv.from { (col,placed,mv.to) } else { (col,pc,c0) }
            })
            .collect();

        Ok((pieces,zb))
    }

    #[must_use]
    fn mirrored(&self) -> Self {
        let mut out = Self {
            side_to_move: !self.side_to_move,
            pieces:       self.pieces.iter()
                .map(|&(col,pc,c0)| (!col,pc,c0.mirror_vert()))
                .collect(),
            in_check:     self.in_check,
            draw:         self.draw,
            stalemate:    self.stalemate,
            children:     self.children.iter()
                .map(|&(mv,id)| (mv.mirror(),id))
                .collect(),
            boards:       Default::default(),
            zobrist:      Zobrist::default(),
        };
        out.init();
        out
    }

}

/// Simulated turn clock, advanced by a fixed cost on every `make_move`
#[derive(Debug,Clone,Default)]
pub struct TreeClock {
    now:     Rc<Cell<Duration>>,
    start:   Duration,
}

impl TreeClock {
    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }

    /// Shares the time source, elapsed counts from now
    pub fn restart(&self) -> Self {
        Self {
            now:   self.now.clone(),
            start: self.now.get(),
        }
    }
}

impl TurnClock for TreeClock {
    fn elapsed(&self) -> Duration {
        self.now.get().saturating_sub(self.start)
    }
}

#[derive(Serialize,Deserialize)]
struct TreeFile {
    nodes:         Vec<TreeNode>,
    #[serde(default)]
    move_cost_us:  u64,
}

/// A hand-declared game tree implementing `Game`.
///
/// Knows nothing about chess rules: the legal moves of a node are what was
/// declared for it. Making an undeclared move, or undoing anything but the
/// last move made, panics.
#[derive(Debug,Clone)]
pub struct TreeGame {
    nodes:       Vec<TreeNode>,
    path:        Vec<NodeId>,
    moves:       Vec<Move>,
    clock:       TreeClock,
    move_cost:   Duration,
}

/// Load, save
impl TreeGame {

    pub fn from_nodes(mut nodes: Vec<TreeNode>, move_cost: Duration) -> TreeResult<Self> {
        if nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        for node in nodes.iter_mut() {
            node.check_squares()?;
            node.init();
        }
        for (id,node) in nodes.iter().enumerate() {
            for &(mv,child) in node.children.iter() {
                if child >= nodes.len() {
                    return Err(TreeError::BadChild { node: id, child });
                }
                node.apply(mv)?;
            }
        }
        Ok(Self {
            nodes,
            path:      vec![ROOT],
            moves:     vec![],
            clock:     TreeClock::default(),
            move_cost,
        })
    }

    pub fn from_json(s: &str) -> TreeResult<Self> {
        let file: TreeFile = serde_json::from_str(s)
            .map_err(|error| TreeError::Parse { error })?;
        Self::from_nodes(file.nodes, Duration::from_micros(file.move_cost_us))
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> TreeResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|error| TreeError::Read { error })?;
        Self::from_json(&s)
    }

    pub fn to_json(&self) -> Result<String, TreeError> {
        let file = TreeFile {
            nodes:        self.nodes.clone(),
            move_cost_us: self.move_cost.as_micros() as u64,
        };
        serde_json::to_string_pretty(&file)
            .map_err(|error| TreeError::Parse { error })
    }

}

impl TreeGame {

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn current_id(&self) -> NodeId {
        self.path.last().copied().unwrap_or(ROOT)
    }

    pub fn current(&self) -> &TreeNode {
        &self.nodes[self.current_id()]
    }

    /// Moves made and not yet undone
    pub fn history(&self) -> &[Move] {
        &self.moves
    }

    /// A clock for the current turn, ticking `move_cost` per move made
    pub fn clock(&self) -> TreeClock {
        self.clock.restart()
    }

    pub fn set_move_cost(&mut self, dt: Duration) {
        self.move_cost = dt;
    }

    /// Same tree with colors swapped and ranks flipped
    pub fn mirrored(&self) -> Self {
        Self {
            nodes:      self.nodes.iter().map(|n| n.mirrored()).collect(),
            path:       self.path.clone(),
            moves:      self.moves.iter().map(|mv| mv.mirror()).collect(),
            clock:      TreeClock::default(),
            move_cost:  self.move_cost,
        }
    }

}

impl Game for TreeGame {

    fn side_to_move(&self) -> Color {
        self.current().side_to_move
    }

    fn zobrist(&self) -> Zobrist {
        self.current().zobrist
    }

    fn legal_moves(&self) -> Vec<Move> {
        self.current().children.iter().map(|&(mv,_)| mv).collect()
    }

    fn make_move(&mut self, mv: Move) {
        let node = self.current();
        let child = match node.child(mv) {
            Some(child) => child,
            None        => panic!("make_move: {} not declared at node {}", mv, self.current_id()),
        };
        self.path.push(child);
        self.moves.push(mv);
        self.clock.advance(self.move_cost);
    }

    fn undo_move(&mut self, mv: Move) {
        match self.moves.pop() {
            Some(last) if last == mv => {},
            last                     => panic!("undo_move: {} does not match last move {:?}", mv, last),
        }
        self.path.pop();
    }

    fn in_check(&self) -> bool {
        self.current().in_check
    }

    fn is_stalemate(&self) -> bool {
        let node = self.current();
        node.stalemate && !node.in_check && node.children.is_empty()
    }

    fn is_draw(&self) -> bool {
        self.current().draw
    }

    fn get(&self, pc: Piece, col: Color) -> BitBoard {
        self.current().boards[col][pc.index()]
    }

}

/// Declares a tree one move at a time, merging transpositions.
#[derive(Debug,Clone)]
pub struct TreeBuilder {
    nodes:       Vec<TreeNode>,
    index:       FxHashMap<Zobrist,NodeId>,
    move_cost:   Duration,
}

impl TreeBuilder {

    pub fn new(side_to_move: Color, pieces: &[(Color,Piece,Coord)]) -> TreeResult<Self> {
        let root = TreeNode::new(side_to_move, pieces.to_vec())?;
        let mut index = FxHashMap::default();
        index.insert(root.zobrist, ROOT);
        Ok(Self {
            nodes:     vec![root],
            index,
            move_cost: Duration::ZERO,
        })
    }

    pub fn with_move_cost(mut self, dt: Duration) -> Self {
        self.move_cost = dt;
        self
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Declare `mv` legal at `parent`, returns the resulting node.
    /// A position already in the tree is reused.
    pub fn add_move(&mut self, parent: NodeId, mv: Move) -> TreeResult<NodeId> {
        let node = self.nodes.get(parent).ok_or(TreeError::UnknownNode(parent))?;

        if let Some(id) = node.child(mv) {
            return Ok(id);
        }

        let (pieces,zb) = node.apply(mv)?;
        let side = !node.side_to_move;

        let id = match self.index.get(&zb) {
            Some(&id) => id,
            None      => {
                let mut child = TreeNode::new(side, pieces)?;
                debug_assert_eq!(child.zobrist, zb);
                child.zobrist = zb;
                let id = self.nodes.len();
                self.nodes.push(child);
                self.index.insert(zb, id);
                id
            },
        };

        self.nodes[parent].children.push((mv,id));
        Ok(id)
    }

    /// Add a line of moves from `parent`, returns the last node
    pub fn add_line(&mut self, parent: NodeId, moves: &[Move]) -> TreeResult<NodeId> {
        moves.iter().try_fold(parent, |id, &mv| self.add_move(id, mv))
    }

    pub fn set_in_check(&mut self, id: NodeId, in_check: bool) -> TreeResult<()> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        node.in_check = in_check;
        Ok(())
    }

    pub fn set_draw(&mut self, id: NodeId, draw: bool) -> TreeResult<()> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        node.draw = draw;
        Ok(())
    }

    pub fn set_stalemate(&mut self, id: NodeId, stalemate: bool) -> TreeResult<()> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        node.stalemate = stalemate;
        Ok(())
    }

    pub fn build(self) -> TreeGame {
        TreeGame {
            nodes:      self.nodes,
            path:       vec![ROOT],
            moves:      vec![],
            clock:      TreeClock::default(),
            move_cost:  self.move_cost,
        }
    }

}

/// Random trees
impl TreeGame {

    /// Random piece moves from a fixed opening, `branching` moves per node for
    /// `plies` plies. Same seed, same tree.
    pub fn generate(seed: u64, plies: usize, branching: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let start = [
            (White, King,   Coord(4,0)),
            (White, Queen,  Coord(3,0)),
            (White, Rook,   Coord(0,0)),
            (White, Knight, Coord(1,0)),
            (White, Pawn,   Coord(3,1)),
            (White, Pawn,   Coord(4,1)),
            (Black, King,   Coord(4,7)),
            (Black, Queen,  Coord(3,7)),
            (Black, Rook,   Coord(0,7)),
            (Black, Knight, Coord(1,7)),
            (Black, Pawn,   Coord(3,6)),
            (Black, Pawn,   Coord(4,6)),
        ];

        let mut builder = match TreeBuilder::new(White, &start) {
            Ok(b)  => b,
            Err(e) => panic!("generate: bad start position: {}", e),
        };

        let mut frontier = vec![ROOT];
        let mut expanded = vec![false; 1];

        for _ in 0..plies {
            let mut next = vec![];
            for parent in frontier {
                if expanded[parent] { continue; }
                expanded[parent] = true;

                let node = &builder.nodes[parent];
                let side = node.side_to_move;
                let own: Vec<(Piece,Coord)> = node.pieces.iter()
                    .filter(|&&(col,_,_)| col == side)
                    .map(|&(_,pc,c0)| (pc,c0))
                    .collect();

                let mut moves = vec![];
                for _ in 0..branching * 8 {
                    if moves.len() >= branching { break; }
                    let (pc,from) = own[rng.gen_range(0..own.len())];
                    let to = Coord::from_square(rng.gen_range(0..64));
                    if to == from { continue; }
                    let victim = match node.piece_at(to) {
                        Some((col,_)) if col == side => continue,
                        Some((_,King))               => continue,
                        Some((_,v))                  => Some(v),
                        None                         => None,
                    };
                    let mv = Move::new(from, to, pc, victim, None);
                    if !moves.contains(&mv) {
                        moves.push(mv);
                    }
                }

                for mv in moves {
                    if let Ok(child) = builder.add_move(parent, mv) {
                        if child >= expanded.len() {
                            expanded.resize(child + 1, false);
                        }
                        next.push(child);
                    }
                }
            }
            frontier = next;
        }

        builder.build()
    }

}

fn sq(s: &str) -> Result<Coord, TreeError> {
    s.parse()
}

/// White can win a rook with the queen, but the rook is defended by a pawn.
pub fn demo() -> TreeResult<TreeGame> {
    let mut b = TreeBuilder::new(White, &[
        (White, King,  sq("a1")?),
        (White, Queen, sq("d1")?),
        (Black, King,  sq("h8")?),
        (Black, Rook,  sq("d5")?),
        (Black, Pawn,  sq("e6")?),
    ])?;

    let ka2  = Move::quiet(sq("a1")?, sq("a2")?, King);
    let qxd5 = Move::capture(sq("d1")?, sq("d5")?, Queen, Rook);
    let kg8  = Move::quiet(sq("h8")?, sq("g8")?, King);
    let exd5 = Move::capture(sq("e6")?, sq("d5")?, Pawn, Queen);

    b.add_line(ROOT, &[ka2, kg8])?;
    let after_qxd5 = b.add_move(ROOT, qxd5)?;
    b.add_move(after_qxd5, exd5)?;
    b.add_move(after_qxd5, kg8)?;

    Ok(b.build())
}
