//! Principal variation: an ordered move sequence, value-copied up the tree.

use beluga_core::Square;

/// Ordered sequence of squares, at most 60 long (one per non-pass ply).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pv(Vec<Square>);

impl Pv {
    pub fn empty() -> Self {
        Pv(Vec::new())
    }

    /// Rebuild as `[first] ++ child`, the way a node adopts a child's PV
    /// once `first` becomes the new best move.
    pub fn set(&mut self, first: Square, child: &Pv) {
        self.0.clear();
        self.0.push(first);
        self.0.extend_from_slice(&child.0);
    }

    pub fn moves(&self) -> &[Square] {
        &self.0
    }

    pub fn first(&self) -> Option<Square> {
        self.0.first().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beluga_core::Square;

    #[test]
    fn set_prepends_and_copies_child() {
        let mut child = Pv::empty();
        child.set(Square::E5, &Pv::empty());
        let mut pv = Pv::empty();
        pv.set(Square::F5, &child);
        assert_eq!(pv.moves(), &[Square::F5, Square::E5]);
        assert_eq!(pv.first(), Some(Square::F5));
    }
}
