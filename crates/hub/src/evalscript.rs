//! Evalscripts sent to the Process API.

/// V3 evalscript computing NDVI from the red (B04) and near-infrared (B08)
/// bands as a single FLOAT32 output band.
pub const NDVI_EVALSCRIPT: &str = r#"//VERSION=3
function setup() {
  return {
    input: ["B04", "B08"],
    output: {
      bands: 1,
      sampleType: "FLOAT32"
    }
  };
}

function evaluatePixel(sample) {
  let ndvi = index(sample.B08, sample.B04);
  return [ndvi];
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evalscript_requests_ndvi_bands() {
        assert!(NDVI_EVALSCRIPT.contains("\"B04\""));
        assert!(NDVI_EVALSCRIPT.contains("\"B08\""));
        assert!(NDVI_EVALSCRIPT.contains("FLOAT32"));
        assert!(NDVI_EVALSCRIPT.starts_with("//VERSION=3"));
    }
}
