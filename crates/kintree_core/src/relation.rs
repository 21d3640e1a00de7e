//! Relationship label classification.
//!
//! # Responsibility
//! - Map free-text relationship labels onto known relation categories.
//! - Provide generation offsets used as a fallback leveling signal.
//!
//! # Invariants
//! - Unrecognized labels (including blank) yield no offset, which is distinct
//!   from an explicit peer offset of `0`.
//! - Structural parent/child/spouse links always win over label offsets.

/// Labels that mark the viewing user's own record.
pub const SELF_MARKERS: &[&str] = &["You (Admin)", "You", "Self"];

/// Known relation categories, plus an explicit unrecognized bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    SelfMarker,
    GreatGrandparent,
    Grandparent,
    Parent,
    ParentInLaw,
    GreatAuntOrUncle,
    AuntOrUncle,
    Spouse,
    Sibling,
    SiblingInLaw,
    Cousin,
    Child,
    ChildInLaw,
    NieceOrNephew,
    Grandchild,
    GreatGrandchild,
    Unrecognized,
}

const LABEL_TABLE: &[(&str, Relation)] = &[
    ("you (admin)", Relation::SelfMarker),
    ("you", Relation::SelfMarker),
    ("self", Relation::SelfMarker),
    ("great grandfather", Relation::GreatGrandparent),
    ("great grandmother", Relation::GreatGrandparent),
    ("great grandparent", Relation::GreatGrandparent),
    ("grandfather", Relation::Grandparent),
    ("grandmother", Relation::Grandparent),
    ("grandparent", Relation::Grandparent),
    ("father", Relation::Parent),
    ("mother", Relation::Parent),
    ("parent", Relation::Parent),
    ("father in law", Relation::ParentInLaw),
    ("mother in law", Relation::ParentInLaw),
    ("anseli's mother", Relation::ParentInLaw),
    ("great uncle", Relation::GreatAuntOrUncle),
    ("great aunt", Relation::GreatAuntOrUncle),
    ("uncle", Relation::AuntOrUncle),
    ("aunt", Relation::AuntOrUncle),
    ("spouse", Relation::Spouse),
    ("partner", Relation::Spouse),
    ("husband", Relation::Spouse),
    ("wife", Relation::Spouse),
    ("brother", Relation::Sibling),
    ("sister", Relation::Sibling),
    ("sibling", Relation::Sibling),
    ("brother in law", Relation::SiblingInLaw),
    ("sister in law", Relation::SiblingInLaw),
    ("cousin", Relation::Cousin),
    ("first cousin", Relation::Cousin),
    ("son", Relation::Child),
    ("daughter", Relation::Child),
    ("child", Relation::Child),
    ("son in law", Relation::ChildInLaw),
    ("daughter in law", Relation::ChildInLaw),
    ("nephew", Relation::NieceOrNephew),
    ("niece", Relation::NieceOrNephew),
    ("grandson", Relation::Grandchild),
    ("granddaughter", Relation::Grandchild),
    ("grandchild", Relation::Grandchild),
    ("great grandson", Relation::GreatGrandchild),
    ("great granddaughter", Relation::GreatGrandchild),
    ("great grandchild", Relation::GreatGrandchild),
];

impl Relation {
    /// Classifies a label. Matching ignores case, surrounding whitespace and
    /// hyphen-vs-space spelling (`Great-Grandmother`, `mother-in-law`).
    pub fn from_label(label: &str) -> Self {
        let key = normalize_label(label);
        if key.is_empty() {
            return Self::Unrecognized;
        }
        LABEL_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, relation)| *relation)
            .unwrap_or(Self::Unrecognized)
    }

    /// Generation offset relative to the viewing user.
    ///
    /// Ancestors are negative, descendants positive, peers zero.
    pub fn generation_offset(self) -> Option<i32> {
        match self {
            Self::GreatGrandparent => Some(-3),
            Self::Grandparent | Self::GreatAuntOrUncle => Some(-2),
            Self::Parent | Self::ParentInLaw | Self::AuntOrUncle => Some(-1),
            Self::SelfMarker
            | Self::Spouse
            | Self::Sibling
            | Self::SiblingInLaw
            | Self::Cousin => Some(0),
            Self::Child | Self::ChildInLaw | Self::NieceOrNephew => Some(1),
            Self::Grandchild => Some(2),
            Self::GreatGrandchild => Some(3),
            Self::Unrecognized => None,
        }
    }

    /// Coarse absolute tier used by the dashboard generation counter.
    ///
    /// All ancestors share tier 1, peers tier 2, children tier 3 and every
    /// deeper descendant tier 4.
    pub fn dashboard_tier(self) -> Option<u32> {
        self.generation_offset().map(|offset| match offset {
            i32::MIN..=-1 => 1,
            0 => 2,
            1 => 3,
            _ => 4,
        })
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
