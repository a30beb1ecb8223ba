
use crate::types::*;

use rand::{Rng,SeedableRng};
use rand::prelude::StdRng;
use serde::{Serialize,Deserialize};
use once_cell::sync::Lazy;

#[derive(Serialize,Deserialize,Debug,Default,Hash,Eq,PartialEq,Ord,PartialOrd,Clone,Copy)]
pub struct Zobrist(pub u64);

pub static ZOBRIST_TABLES: Lazy<ZobristTables> = Lazy::new(|| ZobristTables::new(0x5eed_cafe));

#[derive(Debug,Clone)]
pub struct ZobristTables {
    pub pieces:          [[[u64; 64]; 6]; 2],
    pub black_to_move:   u64,
}

impl ZobristTables {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for col in pieces.iter_mut() {
            for pc in col.iter_mut() {
                for sq in pc.iter_mut() {
                    *sq = rng.gen();
                }
            }
        }

        Self {
            pieces,
            black_to_move: rng.gen(),
        }
    }

    pub fn get_piece(&self, pc: Piece, col: Color) -> &[u64; 64] {
        &self.pieces[col][pc.index()]
    }
}

impl Zobrist {

    /// Hash of a piece placement and side to move
    pub fn from_pieces<'a, I>(pieces: I, side_to_move: Color) -> Self
        where I: IntoIterator<Item = &'a (Color,Piece,Coord)>
    {
        let zb = &*ZOBRIST_TABLES;
        let mut out = 0u64;
        for &(col,pc,c0) in pieces {
            out ^= zb.get_piece(pc, col)[c0.square() as usize];
        }
        if side_to_move == Black { out ^= zb.black_to_move; }
        Zobrist(out)
    }

    #[must_use]
    pub fn update_side_to_move(&self) -> Self {
        Self(self.0 ^ ZOBRIST_TABLES.black_to_move)
    }

    #[must_use]
    pub fn update_piece(&self, pc: Piece, col: Color, c0: Coord) -> Self {
        Self(self.0 ^ ZOBRIST_TABLES.get_piece(pc, col)[c0.square() as usize])
    }

}
