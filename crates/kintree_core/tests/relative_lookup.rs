use chrono::NaiveDate;
use kintree_core::{DateSource, FamilyIndex, Person};

fn family() -> Vec<Person> {
    vec![
        Person::new("ggp", "Great Gran"),
        Person::new("gp1", "Grandpa").with_parents(["ggp"]),
        Person::new("gp2", "Grandma"),
        Person::new("dad", "Dad").with_parents(["gp1", "gp2"]),
        Person::new("mom", "Mom"),
        Person::new("me", "Me")
            .with_relationship("You")
            .with_parents(["dad", "mom", "ghost"])
            .with_spouses(["sp", "ghost-spouse"])
            .with_birth_date(DateSource::text("1990-03-05")),
        Person::new("sp", "Spouse").with_spouses(["me"]),
        Person::new("zoe", "Zoe").with_parents(["me", "sp"]),
        Person::new("adam", "adam").with_parents(["me", "me"]),
        Person::new("sis", "Sis").with_parents(["mom"]),
    ]
}

#[test]
fn relatives_resolve_every_tier() {
    let people = family();
    let index = FamilyIndex::build(&people);
    let relatives = index.relatives("me").unwrap();

    assert_eq!(relatives.parents, vec!["Dad", "Mom"]);
    assert_eq!(relatives.grandparents, vec!["Grandpa", "Grandma"]);
    assert_eq!(relatives.great_grandparents, vec!["Great Gran"]);
    assert_eq!(relatives.children, vec!["adam", "Zoe"]);
    assert_eq!(relatives.spouses, vec!["Spouse"]);
    assert_eq!(relatives.siblings, vec!["Sis"]);
}

#[test]
fn relatives_of_root_are_mostly_empty() {
    let people = family();
    let index = FamilyIndex::build(&people);
    let relatives = index.relatives("ggp").unwrap();

    assert!(relatives.parents.is_empty());
    assert!(relatives.grandparents.is_empty());
    assert!(relatives.siblings.is_empty());
    assert_eq!(relatives.children, vec!["Grandpa"]);
}

#[test]
fn unknown_member_has_no_relatives() {
    let people = family();
    let index = FamilyIndex::build(&people);

    assert_eq!(index.relatives("nobody"), None);
    assert_eq!(
        index.member_detail("nobody", NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()),
        None
    );
}

#[test]
fn blank_names_use_placeholder() {
    let people = vec![
        Person::new("parent", ""),
        Person::new("child", "Child").with_parents(["parent"]),
    ];
    let index = FamilyIndex::build(&people);

    assert_eq!(index.relatives("child").unwrap().parents, vec!["Unnamed member"]);
}

#[test]
fn member_detail_formats_dates_for_display() {
    let mut people = family();
    people[5].location = Some("  Springfield ".to_string());
    people[4].passed_away_date = Some(DateSource::text("2020-01-15"));
    let index = FamilyIndex::build(&people);
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    let me = index.member_detail("me", today).unwrap();
    assert_eq!(me.name, "Me");
    assert_eq!(me.relationship, "You");
    assert_eq!(me.birthday, "March 5, 1990");
    assert_eq!(me.age, Some(36));
    assert_eq!(me.passed_away, None);
    assert_eq!(me.location.as_deref(), Some("Springfield"));
    assert_eq!(me.relatives.parents, vec!["Dad", "Mom"]);

    let mom = index.member_detail("mom", today).unwrap();
    assert_eq!(mom.birthday, "Not set");
    assert_eq!(mom.relationship, "Family Member");
    assert_eq!(mom.passed_away.as_deref(), Some("January 15, 2020"));
    assert_eq!(mom.age, None);
    assert_eq!(mom.relatives.children, vec!["Me", "Sis"]);
}

#[test]
fn absent_passing_date_hides_row_and_gender_maps_to_label() {
    let mut people = family();
    people[4].passed_away_date = Some(DateSource::text(""));
    people[4].gender = Some("female".to_string());
    people[3].passed_away_date = Some(DateSource::EpochMillis(0));
    people[3].gender = Some("robot".to_string());
    let index = FamilyIndex::build(&people);
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    let mom = index.member_detail("mom", today).unwrap();
    assert_eq!(mom.passed_away, None);
    assert_eq!(mom.gender.as_deref(), Some("Female"));

    let dad = index.member_detail("dad", today).unwrap();
    assert_eq!(dad.passed_away, None);
    assert_eq!(dad.gender, None);
}
