//! Display normalization
//!
//! Linear rescale of a raster to [0, 1] for rendering. Display-only: the
//! thresholder works on the raw signed difference, never on this output.

use verdant_core::raster::Raster;
use verdant_core::{Algorithm, Error, Result};

/// Min-max normalization algorithm
#[derive(Debug, Clone, Default)]
pub struct Normalize;

impl Algorithm for Normalize {
    type Input = Raster<f32>;
    type Output = Raster<f32>;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Normalize"
    }

    fn description(&self) -> &'static str {
        "Linear min-max rescale to [0, 1] for display"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        Ok(normalize(&input))
    }
}

/// Rescale a raster linearly so min maps to 0.0 and max to 1.0.
///
/// NaN cells are ignored when scanning for min/max and stay NaN in the
/// output. A degenerate raster (all values equal, or no finite values at
/// all) comes back as a constant zero raster instead of dividing by zero.
pub fn normalize(raster: &Raster<f32>) -> Raster<f32> {
    let Some((min, max)) = raster.min_max() else {
        return raster.like(0.0);
    };

    let range = max - min;
    if !(range > 0.0) || !range.is_finite() {
        return raster.like(0.0);
    }

    let mut out = raster.with_same_meta::<f32>();
    out.set_nodata(Some(f32::NAN));
    *out.data_mut() = raster.data().mapv(|v| {
        if v.is_nan() {
            f32::NAN
        } else {
            (v - min) / range
        }
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rescales_to_unit_range() {
        let mut r: Raster<f32> = Raster::new(2, 2);
        r.set(0, 0, -0.4).unwrap();
        r.set(0, 1, 0.0).unwrap();
        r.set(1, 0, 0.2).unwrap();
        r.set(1, 1, 0.6).unwrap();

        let n = normalize(&r);
        assert_relative_eq!(n.get(0, 0).unwrap(), 0.0);
        assert_relative_eq!(n.get(0, 1).unwrap(), 0.4);
        assert_relative_eq!(n.get(1, 0).unwrap(), 0.6);
        assert_relative_eq!(n.get(1, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_constant_raster_guard() {
        let r: Raster<f32> = Raster::filled(3, 3, 0.42);
        let n = normalize(&r);
        assert!(n.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_all_nan_guard() {
        let r: Raster<f32> = Raster::filled(2, 2, f32::NAN);
        let n = normalize(&r);
        assert!(n.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_algorithm_surface() {
        let mut r: Raster<f32> = Raster::new(1, 2);
        r.set(0, 0, -1.0).unwrap();
        r.set(0, 1, 3.0).unwrap();

        let n = Normalize.execute_default(r).unwrap();
        assert_relative_eq!(n.get(0, 0).unwrap(), 0.0);
        assert_relative_eq!(n.get(0, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_nan_cells_stay_nan() {
        let mut r: Raster<f32> = Raster::new(1, 3);
        r.set(0, 0, 1.0).unwrap();
        r.set(0, 1, f32::NAN).unwrap();
        r.set(0, 2, 3.0).unwrap();

        let n = normalize(&r);
        assert_relative_eq!(n.get(0, 0).unwrap(), 0.0);
        assert!(n.get(0, 1).unwrap().is_nan());
        assert_relative_eq!(n.get(0, 2).unwrap(), 1.0);
    }
}
