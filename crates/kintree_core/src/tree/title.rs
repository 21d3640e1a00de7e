//! Display titles for generation bands.

/// Level treated as "your generation" when no self anchor exists.
pub const UNANCHORED_SELF_LEVEL: u32 = 4;

const RELATIVE_TITLES: &[(i64, &str)] = &[
    (-3, "Great-Grandparents"),
    (-2, "Grandparents"),
    (-1, "Parents & In-Laws"),
    (0, "Your Generation"),
    (1, "Children"),
    (2, "Grandchildren"),
    (3, "Great-Grandchildren"),
];

/// Titles a normalized level relative to the anchor's level, or relative to
/// `UNANCHORED_SELF_LEVEL` when the tree has no anchor.
///
/// Offsets beyond three generations get a generic `Generation N` title.
pub fn generation_title(level: u32, anchor_level: Option<u32>) -> String {
    let reference = anchor_level.unwrap_or(UNANCHORED_SELF_LEVEL);
    let offset = i64::from(level) - i64::from(reference);
    RELATIVE_TITLES
        .iter()
        .find(|(candidate, _)| *candidate == offset)
        .map(|(_, title)| (*title).to_string())
        .unwrap_or_else(|| format!("Generation {level}"))
}

#[cfg(test)]
mod tests {
    use super::generation_title;

    #[test]
    fn anchored_titles_follow_offset_from_anchor() {
        assert_eq!(generation_title(2, Some(3)), "Parents & In-Laws");
        assert_eq!(generation_title(3, Some(3)), "Your Generation");
        assert_eq!(generation_title(6, Some(3)), "Great-Grandchildren");
        assert_eq!(generation_title(7, Some(3)), "Generation 7");
    }

    #[test]
    fn unanchored_titles_treat_level_four_as_own_generation() {
        assert_eq!(generation_title(1, None), "Great-Grandparents");
        assert_eq!(generation_title(4, None), "Your Generation");
        assert_eq!(generation_title(5, None), "Children");
        assert_eq!(generation_title(8, None), "Generation 8");
    }
}
