
use crate::types::*;
use crate::error::TreeError;

use serde::{Serialize,Deserialize};

/// Coord(file, rank), both 0..8, a1 = Coord(0,0)
#[derive(Serialize,Deserialize,Debug,Eq,PartialEq,Ord,PartialOrd,Hash,Clone,Copy)]
pub struct Coord(pub u8, pub u8);

impl Coord {

    pub fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "Coord out of range: ({}, {})", file, rank);
        Self(file, rank)
    }

    pub fn file(&self) -> u8 { self.0 }
    pub fn rank(&self) -> u8 { self.1 }

    /// 0..64, rank-major
    pub fn square(&self) -> u8 {
        self.1 * 8 + self.0
    }

    pub fn from_square(sq: u8) -> Self {
        Self(sq % 8, sq / 8)
    }

    /// Rank as seen from the given side's back rank
    pub fn relative_rank(&self, side: Color) -> u8 {
        match side {
            White => self.1,
            Black => 7 - self.1,
        }
    }

    /// Reflect across the central file, a <-> h
    pub fn fold_file(&self) -> u8 {
        u8::min(self.0, 7 - self.0)
    }

    /// Swap ranks 1 <-> 8, used when flipping colors
    #[must_use]
    pub fn mirror_vert(&self) -> Self {
        Self(self.0, 7 - self.1)
    }

    /// King steps between two squares
    pub fn distance(&self, other: Coord) -> u8 {
        let df = (self.0 as i8 - other.0 as i8).unsigned_abs();
        let dr = (self.1 as i8 - other.1 as i8).unsigned_abs();
        u8::max(df, dr)
    }

}

impl From<u8> for Coord {
    fn from(sq: u8) -> Self {
        Self::from_square(sq)
    }
}

impl std::str::FromStr for Coord {
    type Err = TreeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bs = s.trim().as_bytes();
        if bs.len() != 2 {
            return Err(TreeError::BadCoord(s.to_string()));
        }
        let f = bs[0].to_ascii_lowercase();
        let r = bs[1];
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return Err(TreeError::BadCoord(s.to_string()));
        }
        Ok(Coord(f - b'a', r - b'1'))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.0) as char, self.1 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_parse_01() {
        let c: Coord = "e4".parse().unwrap();
        assert_eq!(c, Coord(4,3));
        assert_eq!(c.square(), 28);
        assert_eq!(Coord::from_square(28), c);
        assert_eq!(format!("{}", c), "e4");
        assert!("i9".parse::<Coord>().is_err());
        assert!("e".parse::<Coord>().is_err());
    }

    #[test]
    fn test_coord_mirror_01() {
        let c: Coord = "b2".parse().unwrap();
        assert_eq!(c.mirror_vert(), "b7".parse().unwrap());
        assert_eq!(c.fold_file(), 1);
        assert_eq!("g2".parse::<Coord>().unwrap().fold_file(), 1);
        assert_eq!(c.relative_rank(Black), 6);
        assert_eq!(c.distance("e6".parse().unwrap()), 4);
    }

}
