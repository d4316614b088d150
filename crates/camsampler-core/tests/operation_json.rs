// Operation deserialization tests

use camsampler_core::{AmbientRegion, CutterType, Operation, Polygon};

#[test]
fn test_operation_from_json_with_defaults() {
    let json = r#"{
        "cutter_type": "BALLNOSE",
        "cutter_diameter": 6.0,
        "minz": -10.0,
        "maxz": 0.0,
        "stepdown": 2.5
    }"#;

    let op: Operation = serde_json::from_str(json).unwrap();
    assert_eq!(op.cutter_type, CutterType::Ballnose);
    assert_eq!(op.ambient, AmbientRegion::Unbounded);
    assert!(op.objects.is_empty());
    assert!(op.validate().is_ok());
}

#[test]
fn test_operation_with_polygon_ambient() {
    let json = r#"{
        "cutter_type": "END",
        "cutter_diameter": 3.0,
        "minz": -1.0,
        "maxz": 0.0,
        "stepdown": 0.5,
        "ambient": {
            "kind": "polygons",
            "polygons": [
                { "exterior": [[0, 0], [10, 0], [10, 10], [0, 10]] }
            ]
        }
    }"#;

    let op: Operation = serde_json::from_str(json).unwrap();
    assert_eq!(
        op.ambient,
        AmbientRegion::polygon(Polygon::rectangle([0.0, 0.0], [10.0, 10.0]))
    );
    assert!(op.ambient.contains(5.0, 5.0));
    assert!(!op.ambient.contains(15.0, 5.0));
}

#[test]
fn test_operation_with_degenerate_ambient_fails_validation() {
    let json = r#"{
        "cutter_type": "END",
        "cutter_diameter": 3.0,
        "minz": -1.0,
        "maxz": 0.0,
        "stepdown": 0.5,
        "ambient": { "kind": "polygons", "polygons": [ { "exterior": [[0, 0], [1, 1]] } ] }
    }"#;

    let op: Operation = serde_json::from_str(json).unwrap();
    assert!(op.validate().is_err());
}
