#![cfg(feature = "serde")]

use cornerkit::{CornerDetector, DetectorConfig, ExtractorKind, OwnedImage};

#[test]
fn detector_config_loads_from_json() {
    let text = r#"{
        "extractor": "non_max_naive",
        "extract": { "radius": 3, "threshold": 0.5 },
        "max_corners": 4
    }"#;
    let cfg: DetectorConfig = serde_json::from_str(text).unwrap();
    assert_eq!(cfg.extractor, ExtractorKind::NonMaxNaive);
    assert_eq!(cfg.extract.radius, 3);
    assert_eq!(cfg.max_corners, 4);

    let mut data = vec![0.0f32; 20 * 20];
    data[10 * 20 + 10] = 2.0;
    let map = OwnedImage::from_vec(data, 20, 20).unwrap();
    let mut detector = CornerDetector::new(cfg);
    let corners = detector.detect(map.view()).unwrap();
    assert_eq!(corners.len(), 1);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let cfg: DetectorConfig = serde_json::from_str(r#"{ "extract": { "threshold": 7.0 } }"#).unwrap();
    let defaults = DetectorConfig::default();
    assert_eq!(cfg.extractor, defaults.extractor);
    assert_eq!(cfg.max_corners, defaults.max_corners);
    assert_eq!(cfg.extract.radius, defaults.extract.radius);
    assert_eq!(cfg.extract.threshold, 7.0);
}
