//! Unit tests for domain types.

use super::*;

#[test]
fn test_scientist_id_roundtrip() {
    let id = ScientistId::new(42);
    assert_eq!(id.value(), 42);
    assert_eq!(id, ScientistId(42));
}

#[test]
fn test_new_scientist_valid() {
    let input = NewScientist {
        name: "Grace Hopper".to_string(),
        field_of_study: "Computing".to_string(),
    };
    assert!(input.validate().is_empty());
}

#[test]
fn test_new_scientist_blank_fields() {
    let input = NewScientist::default();
    let violations = input.validate();
    assert_eq!(violations.len(), 2);
    assert!(violations[0].contains("name"));
    assert!(violations[1].contains("field_of_study"));
}

#[test]
fn test_new_mission_blank_name() {
    let input = NewMission {
        name: String::new(),
        scientist_id: ScientistId::new(1),
        planet_id: PlanetId::new(1),
    };
    assert_eq!(input.validate().len(), 1);
}

#[test]
fn test_patch_from_json_known_attributes() {
    let body = serde_json::json!({"name": "New Name", "field_of_study": "Astronomy"});
    let patch = ScientistPatch::from_json(&body).unwrap();
    assert_eq!(patch.name.as_deref(), Some("New Name"));
    assert_eq!(patch.field_of_study.as_deref(), Some("Astronomy"));
    assert_eq!(patch.id, None);
}

#[test]
fn test_patch_from_json_ignores_unknown_attributes() {
    let body = serde_json::json!({"name": "X", "favorite_color": "teal"});
    let patch = ScientistPatch::from_json(&body).unwrap();
    assert_eq!(patch.name.as_deref(), Some("X"));
}

#[test]
fn test_patch_from_json_rejects_wrong_types() {
    let body = serde_json::json!({"name": 7});
    assert!(ScientistPatch::from_json(&body).is_err());

    let body = serde_json::json!({"id": "seven"});
    assert!(ScientistPatch::from_json(&body).is_err());
}

#[test]
fn test_patch_from_json_rejects_non_object() {
    let body = serde_json::json!(["name"]);
    assert!(ScientistPatch::from_json(&body).is_err());
}

#[test]
fn test_patch_validate_empty_string() {
    let patch = ScientistPatch {
        name: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(patch.validate().len(), 1);
}

#[test]
fn test_patch_id_overwrite_allowed() {
    let body = serde_json::json!({"id": 99});
    let patch = ScientistPatch::from_json(&body).unwrap();
    assert_eq!(patch.id, Some(99));
    assert!(patch.validate().is_empty());
}
