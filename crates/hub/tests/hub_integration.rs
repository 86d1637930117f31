//! Integration tests against the live Process API.
//!
//! These require real credentials in `VERDANT_CLIENT_ID` and
//! `VERDANT_CLIENT_SECRET` and hit the network, so they are ignored by
//! default. Run with `cargo test -p verdant-hub -- --ignored`.

use chrono::NaiveDate;

use verdant_core::bbox::BoundingBox;
use verdant_core::Crs;
use verdant_hub::{HubClient, HubClientOptions, HubConfig, DEFAULT_RESOLUTION_METERS};

fn test_bbox() -> BoundingBox {
    // Small area near Madrid
    BoundingBox::new(-3.72, 40.40, -3.68, 40.43, Crs::wgs84()).unwrap()
}

#[tokio::test]
#[ignore]
async fn connect_with_real_credentials() {
    let config = HubConfig::from_env().unwrap();
    let client = HubClient::connect(config, HubClientOptions::default()).await;
    assert!(client.is_ok(), "connect failed: {:?}", client.err());
}

#[tokio::test]
#[ignore]
async fn fetch_ndvi_raster() {
    let config = HubConfig::from_env().unwrap();
    let client = HubClient::connect(config, HubClientOptions::default())
        .await
        .unwrap();

    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let raster = client
        .fetch_index_raster(&test_bbox(), date, DEFAULT_RESOLUTION_METERS)
        .await
        .unwrap();

    assert!(raster.rows() > 0 && raster.cols() > 0);
    assert!(raster.crs().is_some());

    // NDVI values over land should sit in [-1, 1] wherever data exists.
    if let Some((min, max)) = raster.min_max() {
        assert!(min >= -1.0 && max <= 1.0, "NDVI out of range: {min}..{max}");
    }
}

#[tokio::test]
#[ignore]
async fn bad_credentials_fail_to_connect() {
    let config = HubConfig::new("not-a-client", "not-a-secret");
    let result = HubClient::connect(config, HubClientOptions::default()).await;
    assert!(result.is_err());
}
