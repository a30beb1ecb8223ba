
use crate::types::*;

const KILLER_SLOTS: usize = MAX_SEARCH_PLY as usize;

/// Quiet moves that caused a beta cutoff, by remaining depth
#[derive(Debug,Clone)]
pub struct KillerMoves {
    primary:     [Option<Move>; KILLER_SLOTS],
    secondary:   [Option<Move>; KILLER_SLOTS],
}

impl Default for KillerMoves {
    fn default() -> Self {
        Self {
            primary:   [None; KILLER_SLOTS],
            secondary: [None; KILLER_SLOTS],
        }
    }
}

impl KillerMoves {

    fn slot(depth: Depth) -> usize {
        depth.clamp(0, MAX_SEARCH_PLY - 1) as usize
    }

    pub fn clear(&mut self) {
        self.primary   = [None; KILLER_SLOTS];
        self.secondary = [None; KILLER_SLOTS];
    }

    /// Old primary moves down, unless mv is already primary
    pub fn insert(&mut self, depth: Depth, mv: Move) {
        let d = Self::slot(depth);
        if self.primary[d] != Some(mv) {
            self.secondary[d] = self.primary[d];
            self.primary[d]   = Some(mv);
        }
    }

    pub fn get(&self, depth: Depth) -> (Option<Move>,Option<Move>) {
        let d = Self::slot(depth);
        (self.primary[d], self.secondary[d])
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_killers_01() {
        let m0 = Move::quiet(Coord(0,0), Coord(0,1), Rook);
        let m1 = Move::quiet(Coord(1,0), Coord(2,2), Knight);
        let m2 = Move::quiet(Coord(4,0), Coord(4,1), King);

        let mut km = KillerMoves::default();
        assert_eq!(km.get(3), (None, None));

        km.insert(3, m0);
        assert_eq!(km.get(3), (Some(m0), None));

        // repeated insert does not fill secondary with a duplicate
        km.insert(3, m0);
        assert_eq!(km.get(3), (Some(m0), None));

        km.insert(3, m1);
        assert_eq!(km.get(3), (Some(m1), Some(m0)));

        km.insert(3, m2);
        assert_eq!(km.get(3), (Some(m2), Some(m1)));

        assert_eq!(km.get(2), (None, None));

        km.clear();
        assert_eq!(km.get(3), (None, None));
    }

    #[test]
    fn test_killers_clamp_01() {
        let m0 = Move::quiet(Coord(0,0), Coord(0,1), Rook);
        let mut km = KillerMoves::default();
        km.insert(-2, m0);
        assert_eq!(km.get(0), (Some(m0), None));
        km.insert(500, m0);
        assert_eq!(km.get(MAX_SEARCH_PLY - 1), (Some(m0), None));
    }

}
