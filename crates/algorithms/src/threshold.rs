//! Binary change thresholding
//!
//! Converts the signed difference raster into a {0, 1} mask via a strict
//! absolute-value comparison.

use verdant_core::raster::Raster;
use verdant_core::{Algorithm, Error, Result};

/// Parameters for thresholding
#[derive(Debug, Clone)]
pub struct ThresholdParams {
    /// Change threshold in [0.0, 1.0] (inclusive bounds)
    pub threshold: f64,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self { threshold: 0.2 }
    }
}

/// Thresholding algorithm
#[derive(Debug, Clone, Default)]
pub struct Threshold;

impl Algorithm for Threshold {
    type Input = Raster<f32>;
    type Output = Raster<u8>;
    type Params = ThresholdParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Threshold"
    }

    fn description(&self) -> &'static str {
        "Binary mask: 1 where |difference| strictly exceeds the threshold"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        threshold(&input, &params)
    }
}

/// Build the binary change mask: `mask = 1` iff `|diff| > t`, else 0.
///
/// The comparison is strict: a pixel whose absolute difference exactly
/// equals the threshold is not flagged. The threshold is narrowed to the
/// sample precision (f32) before comparing, so a pixel holding 0.2 against
/// the default threshold 0.2 is an exact tie and stays 0. NaN pixels are
/// never flagged.
///
/// `t` outside [0.0, 1.0] is rejected.
pub fn threshold(diff: &Raster<f32>, params: &ThresholdParams) -> Result<Raster<u8>> {
    let t = params.threshold;
    if !(0.0..=1.0).contains(&t) {
        return Err(Error::InvalidParameter {
            name: "threshold",
            value: t.to_string(),
            reason: "must be within [0.0, 1.0]".to_string(),
        });
    }

    let t = t as f32;
    let mut mask = diff.with_same_meta::<u8>();
    *mask.data_mut() = diff.data().mapv(|v| {
        if v.is_nan() {
            0
        } else if v.abs() > t {
            1
        } else {
            0
        }
    });

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_of(values: &[f32], rows: usize, cols: usize) -> Raster<f32> {
        Raster::from_vec(values.to_vec(), rows, cols).unwrap()
    }

    #[test]
    fn test_strict_inequality_tie_break() {
        // 0.25 is exactly representable in both f32 and f64, so the tie is
        // exact: |diff| == t must yield 0.
        let diff = raster_of(&[0.25, -0.25, 0.250001, -0.26], 2, 2);
        let mask = threshold(&diff, &ThresholdParams { threshold: 0.25 }).unwrap();

        assert_eq!(mask.get(0, 0).unwrap(), 0);
        assert_eq!(mask.get(0, 1).unwrap(), 0);
        assert_eq!(mask.get(1, 0).unwrap(), 1);
        assert_eq!(mask.get(1, 1).unwrap(), 1);
    }

    #[test]
    fn test_exact_tie_at_default_threshold() {
        // 0.2 has no exact binary representation; a pixel storing 0.2f32
        // against the default 0.2 threshold must still be an exact tie, not
        // flagged by the widened residue.
        let diff = raster_of(&[0.2, -0.2, 0.2000002], 1, 3);
        let mask = threshold(&diff, &ThresholdParams::default()).unwrap();

        assert_eq!(mask.get(0, 0).unwrap(), 0);
        assert_eq!(mask.get(0, 1).unwrap(), 0);
        assert_eq!(mask.get(0, 2).unwrap(), 1);
    }

    #[test]
    fn test_absolute_value_both_signs() {
        let diff = raster_of(&[0.5, -0.5, 0.1, -0.1], 2, 2);
        let mask = threshold(&diff, &ThresholdParams { threshold: 0.2 }).unwrap();

        assert_eq!(mask.get(0, 0).unwrap(), 1);
        assert_eq!(mask.get(0, 1).unwrap(), 1);
        assert_eq!(mask.get(1, 0).unwrap(), 0);
        assert_eq!(mask.get(1, 1).unwrap(), 0);
    }

    #[test]
    fn test_zero_diff_unflagged_at_any_threshold() {
        let diff = raster_of(&[0.0; 9], 3, 3);
        for t in [0.0, 0.2, 1.0] {
            let mask = threshold(&diff, &ThresholdParams { threshold: t }).unwrap();
            assert!(mask.data().iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn test_nan_never_flagged() {
        let diff = raster_of(&[f32::NAN, 0.9], 1, 2);
        let mask = threshold(&diff, &ThresholdParams { threshold: 0.2 }).unwrap();
        assert_eq!(mask.get(0, 0).unwrap(), 0);
        assert_eq!(mask.get(0, 1).unwrap(), 1);
    }

    #[test]
    fn test_algorithm_surface() {
        // Default params via the trait: t = 0.2.
        let diff = raster_of(&[0.5, 0.1], 1, 2);
        let mask = Threshold.execute_default(diff).unwrap();
        assert_eq!(mask.get(0, 0).unwrap(), 1);
        assert_eq!(mask.get(0, 1).unwrap(), 0);
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let diff = raster_of(&[0.0], 1, 1);
        assert!(threshold(&diff, &ThresholdParams { threshold: -0.1 }).is_err());
        assert!(threshold(&diff, &ThresholdParams { threshold: 1.1 }).is_err());
        // Inclusive bounds are accepted
        assert!(threshold(&diff, &ThresholdParams { threshold: 0.0 }).is_ok());
        assert!(threshold(&diff, &ThresholdParams { threshold: 1.0 }).is_ok());
    }
}
