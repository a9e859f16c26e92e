use super::*;

use crate::domain::SlotIndex;

#[test]
fn stored_record_parses_with_all_fields() {
    let json = r#"{ "slot": 0, "valid": true, "gen": 1, "species_id": 6, "level": 55, "name": "Pkmn (ID:6)" }"#;
    let record: StoredRecord = serde_json::from_str(json).expect("parse");
    assert_eq!(record.slot, SlotIndex(0));
    assert!(record.valid);
    assert_eq!(record.name.as_deref(), Some("Pkmn (ID:6)"));
    assert_eq!(record.species_id, Some(6));
    assert_eq!(record.gen, Some(1));
    assert_eq!(record.level, Some(55));
}

#[test]
fn stored_record_defaults_missing_optional_fields() {
    let record: StoredRecord =
        serde_json::from_str(r#"{ "slot": 1, "valid": true, "species_id": 25 }"#).expect("parse");
    assert_eq!(record.slot, SlotIndex(1));
    assert_eq!(record.name, None);
    assert_eq!(record.species_id, Some(25));
    assert_eq!(record.gen, None);
    assert_eq!(record.level, None);
}

#[test]
fn empty_slot_parses_without_record_fields() {
    let record: StoredRecord =
        serde_json::from_str(r#"{ "slot": 0, "valid": false }"#).expect("parse");
    assert!(!record.valid);
    assert_eq!(record.name, None);
}

#[test]
fn status_field_is_optional() {
    let present: StatusResponse =
        serde_json::from_str(r#"{ "status": "Connected - Idle" }"#).expect("parse");
    assert_eq!(present.status.as_deref(), Some("Connected - Idle"));

    let absent: StatusResponse = serde_json::from_str("{}").expect("parse");
    assert_eq!(absent.status, None);
}

#[test]
fn slot_display_is_one_based() {
    assert_eq!(SlotIndex(0).display(), 1);
    assert_eq!(SlotIndex(2).display(), 3);
    assert_eq!(SlotIndex(255).display(), 256);
}
