use kintree_core::{DateSource, Person, Relation};
use serde_json::json;

#[test]
fn decodes_wire_field_names() {
    let person: Person = serde_json::from_value(json!({
        "id": "p1",
        "name": "Ada",
        "relationship": "Great-Grandmother",
        "birthDate": {"_seconds": 86400, "_nanoseconds": 0},
        "passedAwayDate": "2001-04-02",
        "parentIds": [null, " p0 ", "   "],
        "spouseIds": ["p2"],
        "photoURL": "https://example.invalid/ada.png",
        "gender": "female",
        "unknownField": 42
    }))
    .unwrap();

    assert_eq!(person.parent_ids, vec!["p0"]);
    assert_eq!(person.spouse_ids, vec!["p2"]);
    assert_eq!(
        person.birth_date,
        Some(DateSource::Seconds {
            seconds: 86400,
            nanos: 0
        })
    );
    assert_eq!(person.passed_away_date, Some(DateSource::text("2001-04-02")));
    assert_eq!(person.relation(), Relation::GreatGrandparent);
    assert_eq!(person.gender.as_deref(), Some("female"));
}

#[test]
fn minimal_document_uses_defaults() {
    let person: Person = serde_json::from_value(json!({"id": "solo"})).unwrap();

    assert_eq!(person, Person::new("solo", ""));
    assert_eq!(person.display_name(), "Unnamed member");
    assert_eq!(person.relationship_display(), "Family Member");
    assert_eq!(person.relation(), Relation::Unrecognized);
}

#[test]
fn serializes_with_wire_names_and_skips_absent_extras() {
    let mut person = Person::new("p1", "Ada").with_parents(["p0"]);
    person.photo_url = Some("https://example.invalid/ada.png".to_string());

    let value = serde_json::to_value(&person).unwrap();
    assert_eq!(value["parentIds"], json!(["p0"]));
    assert_eq!(value["photoURL"], json!("https://example.invalid/ada.png"));
    assert!(value.get("notes").is_none());
    assert!(value.get("location").is_none());
}
