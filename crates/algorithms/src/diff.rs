//! Temporal raster differencing
//!
//! `diff = after - before`, elementwise. The signed result feeds the
//! thresholder; with NDVI inputs in [-1, 1] the difference lies in [-2, 2].

use verdant_core::raster::Raster;
use verdant_core::{Algorithm, Error, Result};

/// Raster difference algorithm
#[derive(Debug, Clone, Default)]
pub struct Difference;

impl Algorithm for Difference {
    type Input = (Raster<f32>, Raster<f32>);
    type Output = Raster<f32>;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Difference"
    }

    fn description(&self) -> &'static str {
        "Elementwise difference of two same-shape rasters (after - before)"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        difference(&input.0, &input.1)
    }
}

/// Compute the elementwise difference `after - before`.
///
/// Both rasters must share shape and transform; the fetcher guarantees this
/// by requesting both with the same bbox and resolution. A mismatch fails
/// fast rather than silently broadcasting or cropping. NaN in either input
/// yields NaN in the output.
///
/// The result carries `before`'s transform and CRS, with NaN as nodata.
pub fn difference(before: &Raster<f32>, after: &Raster<f32>) -> Result<Raster<f32>> {
    let (rows, cols) = before.shape();
    if after.shape() != (rows, cols) {
        return Err(Error::SizeMismatch {
            er: rows,
            ec: cols,
            ar: after.rows(),
            ac: after.cols(),
        });
    }

    let mut diff = before.with_same_meta::<f32>();
    diff.set_nodata(Some(f32::NAN));
    *diff.data_mut() = after.data() - before.data();

    Ok(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_core::GeoTransform;

    fn make_band(rows: usize, cols: usize, value: f32) -> Raster<f32> {
        let mut r = Raster::filled(rows, cols, value);
        r.set_transform(GeoTransform::new(0.0, rows as f64, 1.0, -1.0));
        r
    }

    #[test]
    fn test_difference() {
        let before = make_band(5, 5, 0.2);
        let after = make_band(5, 5, 0.7);

        let diff = difference(&before, &after).unwrap();
        assert!((diff.get(2, 2).unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(diff.transform(), before.transform());
    }

    #[test]
    fn test_identical_inputs_give_zeros() {
        let a = make_band(4, 6, 0.35);
        let diff = difference(&a, &a).unwrap();
        assert!(diff.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_anti_symmetry() {
        let mut a = make_band(3, 3, 0.0);
        let mut b = make_band(3, 3, 0.0);
        for row in 0..3 {
            for col in 0..3 {
                a.set(row, col, (row * 3 + col) as f32 / 10.0).unwrap();
                b.set(row, col, ((row * 3 + col) as f32).sin()).unwrap();
            }
        }

        let ab = difference(&a, &b).unwrap();
        let ba = difference(&b, &a).unwrap();

        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(ab.get(row, col).unwrap(), -ba.get(row, col).unwrap());
            }
        }
    }

    #[test]
    fn test_shape_mismatch_fails_fast() {
        let a = make_band(4, 4, 0.1);
        let b = make_band(4, 5, 0.1);
        assert!(matches!(
            difference(&a, &b),
            Err(Error::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_algorithm_surface() {
        let before = make_band(3, 3, 0.2);
        let after = make_band(3, 3, 0.9);

        let algo = Difference;
        assert_eq!(algo.name(), "Difference");
        let diff = algo.execute_default((before, after)).unwrap();
        assert!((diff.get(1, 1).unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_nan_propagates() {
        let mut a = make_band(2, 2, 0.1);
        let b = make_band(2, 2, 0.5);
        a.set(0, 1, f32::NAN).unwrap();

        let diff = difference(&a, &b).unwrap();
        assert!(diff.get(0, 1).unwrap().is_nan());
        assert!(!diff.get(0, 0).unwrap().is_nan());
    }
}
