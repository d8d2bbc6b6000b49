//! Integration tests for the ppe-detect library API

#[test]
fn test_prelude_imports() {
    // This test verifies that the prelude module exports everything correctly
    use ppe_detect::prelude::*;

    let style = AnnotationStyle::default();
    let person = Person {
        id: None,
        bounding_box: Some(BoundingBox::new(0.0, 0.0, 0.5, 0.5)),
        confidence: 90.0,
        body_parts: vec![],
    };

    let plan = plan_person(&person, 100, 100, 80.0, &style);
    assert_eq!(plan.status, MaskStatus::Missing);
    assert_eq!(plan.overlays[0].kind, OverlayKind::NoMask);
}

#[test]
fn test_plan_from_recorded_response() {
    // Low confidence mask on one person, bare face on another
    use ppe_detect::{plan_person, AnnotationStyle, DetectionResponse, MaskStatus, OverlayKind};

    let raw = r#"{
        "Persons": [
            {
                "BoundingBox": {"Left": 0.0, "Top": 0.0, "Width": 0.5, "Height": 1.0},
                "BodyParts": [{"Name": "FACE", "EquipmentDetections": [
                    {"Type": "FACE_COVER", "BoundingBox": {"Left": 0.1, "Top": 0.1, "Width": 0.2, "Height": 0.2},
                     "CoversBodyPart": {"Value": true, "Confidence": 42.0}}
                ]}]
            },
            {
                "BoundingBox": {"Left": 0.5, "Top": 0.0, "Width": 0.5, "Height": 1.0},
                "BodyParts": [{"Name": "FACE", "EquipmentDetections": []}]
            }
        ]
    }"#;
    let response: DetectionResponse = serde_json::from_str(raw).unwrap();
    let style = AnnotationStyle::default();

    let first = plan_person(&response.persons[0], 640, 480, 80.0, &style);
    assert_eq!(first.status, MaskStatus::Worn);
    assert!(first.low_confidence);
    let kinds: Vec<_> = first.overlays.iter().map(|o| o.kind).collect();
    assert_eq!(kinds, vec![OverlayKind::MaskCovering, OverlayKind::LowConfidence]);

    let second = plan_person(&response.persons[1], 640, 480, 80.0, &style);
    assert_eq!(second.status, MaskStatus::Missing);
    assert_eq!(second.overlays.len(), 1);
    assert_eq!(second.overlays[0].rect.left, 320.0);
}

#[test]
fn test_config_module() {
    // This test verifies the config module is publicly accessible
    use ppe_detect::config::{ConfigOverrides, DetectConfig};

    let config = DetectConfig::from_toml_str("confidence = 50.5", &ConfigOverrides::default()).unwrap();
    assert_eq!(config.confidence_threshold, 50.5);
    assert!(config.destination().is_err());
}
