
use crate::types::*;

use serde::{Serialize,Deserialize};
use derive_more::*;

#[derive(Serialize,Deserialize,Debug,Default,Hash,Eq,PartialEq,PartialOrd,Clone,Copy,
         BitAnd,BitAndAssign,BitOr,BitOrAssign,BitXor,BitXorAssign,Not,
         From,Into,
)]
pub struct BitBoard(pub u64);

impl Iterator for BitBoard {
    type Item = Coord;
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            None
        } else {
            Some(self.bitscan_reset_mut())
        }
    }
}

/// creation
impl BitBoard {

    pub fn new<T>(cs: &[T]) -> BitBoard where
        T: Into<Coord> + Copy,
    {
        let mut b = BitBoard::empty();
        for c in cs.iter() {
            b.set_one_mut((*c).into());
        }
        b
    }

    pub fn empty() -> BitBoard {
        BitBoard(0)
    }

    pub fn single(c: Coord) -> BitBoard {
        BitBoard(1u64 << c.square())
    }

}

/// Queries
impl BitBoard {

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_not_empty(&self) -> bool {
        self.0 != 0
    }

    pub fn is_one_at(&self, c0: Coord) -> bool {
        (*self & BitBoard::single(c0)).is_not_empty()
    }

    pub fn popcount(&self) -> u32 {
        self.0.count_ones()
    }

}

/// Modification
impl BitBoard {

    pub fn set_one_mut(&mut self, c: Coord) {
        *self |= Self::single(c);
    }

    pub fn set_zero_mut(&mut self, c: Coord) {
        *self &= !Self::single(c);
    }

    /// Swap ranks 1 <-> 8
    #[must_use]
    pub fn mirror_vert(&self) -> Self {
        BitBoard(self.0.swap_bytes())
    }

}

/// Bitscan
impl BitBoard {

    pub fn bitscan_safe(&self) -> Option<Coord> {
        if self.is_empty() {
            None
        } else {
            Some(self.bitscan())
        }
    }

    /// Lowest set square, board must not be empty
    pub fn bitscan(&self) -> Coord {
        Coord::from_square(self.0.trailing_zeros() as u8)
    }

    pub fn bitscan_reset_mut(&mut self) -> Coord {
        let c = self.bitscan();
        self.0 &= self.0 - 1;
        c
    }

}
