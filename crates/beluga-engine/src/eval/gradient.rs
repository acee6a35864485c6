//! Float-valued gradient accumulator, mirroring [`Evaluator`](crate::eval::Evaluator)'s
//! table layout so a learner can accumulate per-cell loss contributions.

use beluga_core::Board;

use crate::eval::params::FeatureParameters;
use crate::eval::patterns::{
    CORNER3X3_INSTANCES, CORNER5X2_INSTANCES, DIAG4_INSTANCES, DIAG5_INSTANCES, DIAG6_INSTANCES,
    DIAG7_INSTANCES, DIAG8_INSTANCES, EDGE_INSTANCES, HOR2_INSTANCES, HOR3_INSTANCES,
    HOR4_INSTANCES, add_over_instances,
};

/// Per-cell float gradient, one cell per Evaluator table cell.
pub struct Gradient {
    params: FeatureParameters<f32>,
}

impl Gradient {
    pub fn zeroed() -> Self {
        Self { params: FeatureParameters::zeroed() }
    }

    pub fn params(&self) -> &FeatureParameters<f32> {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut FeatureParameters<f32> {
        &mut self.params
    }

    /// Add `g` to every pattern-instance cell that `board` activates.
    pub fn add(&mut self, board: &Board, g: f32) {
        let p = &mut self.params;
        add_over_instances(board, &EDGE_INSTANCES, &mut p.edge, g);
        add_over_instances(board, &HOR2_INSTANCES, &mut p.hor2, g);
        add_over_instances(board, &HOR3_INSTANCES, &mut p.hor3, g);
        add_over_instances(board, &HOR4_INSTANCES, &mut p.hor4, g);
        add_over_instances(board, &DIAG8_INSTANCES, &mut p.diag8, g);
        add_over_instances(board, &DIAG7_INSTANCES, &mut p.diag7, g);
        add_over_instances(board, &DIAG6_INSTANCES, &mut p.diag6, g);
        add_over_instances(board, &DIAG5_INSTANCES, &mut p.diag5, g);
        add_over_instances(board, &DIAG4_INSTANCES, &mut p.diag4, g);
        add_over_instances(board, &CORNER3X3_INSTANCES, &mut p.corner3x3, g);
        add_over_instances(board, &CORNER5X2_INSTANCES, &mut p.corner5x2, g);
    }

    /// Sum gradient contributions across symmetric cells (Corner5x2 excluded).
    pub fn symmetrize(&mut self) {
        self.params.symmetrize(|a, b| a + b);
    }

    /// Reset every cell to zero, reusing the allocation.
    pub fn clear(&mut self) {
        for table in self.params.tables_mut() {
            table.fill(0.0);
        }
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_every_activated_cell() {
        let mut gradient = Gradient::zeroed();
        let board = Board::starting_position();
        gradient.add(&board, 1.0);
        gradient.add(&board, 1.0);
        // Hor4 instance 0 (row 3) is activated by the starting position.
        let idx = crate::eval::patterns::horner_index(&board, &HOR4_INSTANCES[0]);
        assert_eq!(gradient.params().hor4[idx], 2.0);
    }

    #[test]
    fn clear_zeroes_every_table() {
        let mut gradient = Gradient::zeroed();
        gradient.add(&Board::starting_position(), 3.5);
        gradient.clear();
        assert!(gradient.params().hor4.iter().all(|&v| v == 0.0));
        assert!(gradient.params().corner5x2.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn symmetrize_sums_partner_cells() {
        let mut gradient = Gradient::zeroed();
        gradient.params_mut().diag4[5] = 2.0;
        let partner = crate::eval::patterns::reverse_index(5, 4);
        gradient.params_mut().diag4[partner] += 3.0;
        gradient.symmetrize();
        assert_eq!(gradient.params().diag4[5], 5.0);
        assert_eq!(gradient.params().diag4[partner], 5.0);
    }
}
