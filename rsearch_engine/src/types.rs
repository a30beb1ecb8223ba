
pub use crate::bitboard::*;
pub use crate::coords::*;
pub use crate::hashing::Zobrist;

pub use self::{Color::*,Piece::*};

use serde::{Serialize,Deserialize};
use derive_new::new;

pub type Depth = i16;

/// Hard ceiling on distance from the root, qsearch included
pub const MAX_SEARCH_PLY: Depth = 128;

#[derive(Serialize,Deserialize,Debug,Eq,PartialEq,Ord,PartialOrd,Hash,Clone,Copy)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Negamax sign: +1 for White, -1 for Black
    pub fn sign(&self) -> i32 {
        match self {
            White => 1,
            Black => -1,
        }
    }
    pub fn index(&self) -> usize {
        match self {
            White => 0,
            Black => 1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            White => Black,
            Black => White,
        }
    }
}

impl<T> std::ops::Index<Color> for [T; 2] {
    type Output = T;
    fn index(&self, col: Color) -> &Self::Output {
        &self[col.index()]
    }
}

impl<T> std::ops::IndexMut<Color> for [T; 2] {
    fn index_mut(&mut self, col: Color) -> &mut Self::Output {
        &mut self[col.index()]
    }
}

#[derive(Serialize,Deserialize,Debug,Eq,PartialEq,Ord,PartialOrd,Hash,Clone,Copy)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn iter_pieces() -> impl Iterator<Item = Piece> {
        [Pawn,Knight,Bishop,Rook,Queen,King].into_iter()
    }

    pub fn to_char(&self) -> char {
        match self {
            Pawn   => 'p',
            Knight => 'n',
            Bishop => 'b',
            Rook   => 'r',
            Queen  => 'q',
            King   => 'k',
        }
    }

}

/// A move as the rules engine hands it to the search.
///
/// The search never interprets `from`/`to` beyond ordering and display, it
/// only needs to know what moved and what, if anything, was taken.
#[derive(Serialize,Deserialize,Debug,Eq,PartialEq,Ord,PartialOrd,Hash,Clone,Copy,new)]
pub struct Move {
    pub from:       Coord,
    pub to:         Coord,
    pub piece:      Piece,
    #[serde(default)]
    pub victim:     Option<Piece>,
    #[serde(default)]
    pub promotion:  Option<Piece>,
}

impl Move {

    pub fn quiet(from: Coord, to: Coord, piece: Piece) -> Self {
        Self::new(from, to, piece, None, None)
    }

    pub fn capture(from: Coord, to: Coord, piece: Piece, victim: Piece) -> Self {
        Self::new(from, to, piece, Some(victim), None)
    }

    #[must_use]
    pub fn with_promotion(mut self, pc: Piece) -> Self {
        self.promotion = Some(pc);
        self
    }

    pub fn is_capture(&self) -> bool {
        self.victim.is_some()
    }

    /// Same move with colors swapped
    #[must_use]
    pub fn mirror(&self) -> Self {
        Self {
            from: self.from.mirror_vert(),
            to:   self.to.mirror_vert(),
            ..*self
        }
    }

}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(pc) = self.promotion {
            write!(f, "{}", pc.to_char())?;
        }
        Ok(())
    }
}

/// The rules engine, as seen by the search.
///
/// `make_move` and `undo_move` must be called in strictly nested pairs; the
/// search relies on the position being exactly restored after every undo.
///
/// `legal_moves` may be empty in a position that is neither checkmate nor
/// stalemate when the engine does not expand it, e.g. a truncated game tree.
/// The search scores such a position statically.
pub trait Game {

    fn side_to_move(&self) -> Color;

    /// Identity hash of the position and side to move
    fn zobrist(&self) -> Zobrist;

    fn legal_moves(&self) -> Vec<Move>;

    fn capture_moves(&self) -> Vec<Move> {
        self.legal_moves().into_iter()
            .filter(|mv| mv.is_capture())
            .collect()
    }

    fn make_move(&mut self, mv: Move);

    fn undo_move(&mut self, mv: Move);

    fn in_check(&self) -> bool;

    fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }

    /// Repetition, 50 move rule, insufficient material
    fn is_draw(&self) -> bool;

    fn get(&self, pc: Piece, col: Color) -> BitBoard;

    fn get_color(&self, col: Color) -> BitBoard {
        Piece::iter_pieces().fold(BitBoard::empty(), |b, pc| b | self.get(pc, col))
    }

    fn all_occupied(&self) -> BitBoard {
        self.get_color(White) | self.get_color(Black)
    }

}
