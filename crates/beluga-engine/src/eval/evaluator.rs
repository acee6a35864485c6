//! Score-valued pattern evaluator: static position evaluation and the
//! on-disk parameter file format.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use beluga_core::Board;

use crate::eval::params::FeatureParameters;
use crate::eval::patterns::{
    CORNER3X3_INSTANCES, CORNER5X2_INSTANCES, DIAG4_INSTANCES, DIAG5_INSTANCES, DIAG6_INSTANCES,
    DIAG7_INSTANCES, DIAG8_INSTANCES, EDGE_INSTANCES, HOR2_INSTANCES, HOR3_INSTANCES,
    HOR4_INSTANCES, sum_over_instances,
};
use crate::eval::score::Score;
use crate::error::ParamError;

/// Signature at the head of a parameter file: "beluga" followed by ten zero
/// bytes, 16 bytes total.
const SIGNATURE: &[u8; 16] = b"beluga\0\0\0\0\0\0\0\0\0\0";

/// Static position evaluator: a sum of pattern-table lookups.
pub struct Evaluator {
    params: FeatureParameters<Score>,
}

impl Evaluator {
    /// A fresh evaluator with every parameter at zero.
    pub fn zeroed() -> Self {
        Self { params: FeatureParameters::zeroed() }
    }

    pub fn params(&self) -> &FeatureParameters<Score> {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut FeatureParameters<Score> {
        &mut self.params
    }

    /// Static evaluation of `board`, in Black-to-move convention: positive
    /// favors Black regardless of whose turn it is. Callers negate when the
    /// side to move is White.
    pub fn evaluate(&self, board: &Board) -> Score {
        let p = &self.params;
        sum_over_instances(board, &EDGE_INSTANCES, &p.edge)
            + sum_over_instances(board, &HOR2_INSTANCES, &p.hor2)
            + sum_over_instances(board, &HOR3_INSTANCES, &p.hor3)
            + sum_over_instances(board, &HOR4_INSTANCES, &p.hor4)
            + sum_over_instances(board, &DIAG8_INSTANCES, &p.diag8)
            + sum_over_instances(board, &DIAG7_INSTANCES, &p.diag7)
            + sum_over_instances(board, &DIAG6_INSTANCES, &p.diag6)
            + sum_over_instances(board, &DIAG5_INSTANCES, &p.diag5)
            + sum_over_instances(board, &DIAG4_INSTANCES, &p.diag4)
            + sum_over_instances(board, &CORNER3X3_INSTANCES, &p.corner3x3)
            + sum_over_instances(board, &CORNER5X2_INSTANCES, &p.corner5x2)
    }

    /// Re-symmetrize every table (except Corner5x2) after a learner batch:
    /// each symmetric pair keeps the lower-indexed cell's value and copies it
    /// into the higher-indexed partner.
    pub fn symmetrize(&mut self) {
        self.params.symmetrize(|lower, _higher| lower);
    }

    /// Load parameters from `path`. On any failure the caller is expected to
    /// fall back to [`Evaluator::zeroed`] and log the diagnostic, matching
    /// the reference learner's behavior.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamError> {
        let file = File::open(path).map_err(ParamError::Open)?;
        let mut reader = BufReader::new(file);

        let mut signature = [0u8; 16];
        reader.read_exact(&mut signature).map_err(|_| ParamError::ShortRead)?;
        if &signature != SIGNATURE {
            return Err(ParamError::BadSignature);
        }

        let mut evaluator = Self::zeroed();
        for table in evaluator.params.tables_mut() {
            for cell in table.iter_mut() {
                let mut buf = [0u8; 2];
                reader.read_exact(&mut buf).map_err(|_| ParamError::ShortRead)?;
                *cell = Score::new(i16::from_le_bytes(buf));
            }
        }
        Ok(evaluator)
    }

    /// Save parameters to `path` in the format documented on [`Evaluator::load`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ParamError> {
        let file = File::create(path).map_err(ParamError::Write)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(SIGNATURE).map_err(ParamError::Write)?;
        for table in self.params.tables() {
            for &cell in table {
                writer.write_all(&cell.value().to_le_bytes()).map_err(ParamError::Write)?;
            }
        }
        writer.flush().map_err(ParamError::Write)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_evaluates_to_zero() {
        let evaluator = Evaluator::zeroed();
        assert_eq!(evaluator.evaluate(&Board::starting_position()), Score::ZERO);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let mut evaluator = Evaluator::zeroed();
        evaluator.params_mut().diag4[5] = Score::new(42);
        evaluator.params_mut().corner5x2[100] = Score::new(-7);

        let path = std::env::temp_dir().join("beluga_eval_roundtrip_test.bin");
        evaluator.save(&path).unwrap();
        let loaded = Evaluator::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.params().diag4[5], Score::new(42));
        assert_eq!(loaded.params().corner5x2[100], Score::new(-7));
    }

    #[test]
    fn bad_signature_is_rejected() {
        let path = std::env::temp_dir().join("beluga_eval_bad_signature_test.bin");
        std::fs::write(&path, b"Beluga\0\0\0\0\0\0\0\0\0\0").unwrap();
        let result = Evaluator::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ParamError::BadSignature)));
    }

    #[test]
    fn short_file_is_rejected() {
        let path = std::env::temp_dir().join("beluga_eval_short_file_test.bin");
        std::fs::write(&path, b"beluga\0\0\0\0\0\0\0\0\0\0\x01\x00").unwrap();
        let result = Evaluator::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ParamError::ShortRead)));
    }

    #[test]
    fn missing_file_is_open_failure() {
        let result = Evaluator::load("/nonexistent/path/eval.bin");
        assert!(matches!(result, Err(ParamError::Open(_))));
    }

    #[test]
    fn symmetrize_copies_lower_into_higher() {
        let mut evaluator = Evaluator::zeroed();
        evaluator.params_mut().diag4[5] = Score::new(9);
        evaluator.symmetrize();
        let partner = crate::eval::patterns::reverse_index(5, 4);
        assert_eq!(evaluator.params().diag4[partner], evaluator.params().diag4[5.min(partner)]);
    }
}
