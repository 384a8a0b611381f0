//! Team name normalization
//!
//! Produces the cache key for a team. This is a heuristic string cleanup,
//! not a canonical team identity: two spellings of the same school only
//! collide if they reduce to the same string.

use once_cell::sync::Lazy;
use regex::Regex;

/// Institutional boilerplate removed from team names ("University of", "University")
static INSTITUTION_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bUniversity(?:\s+of)?\b").expect("institution token regex is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Normalize a raw team name into a cache key
///
/// Gender designators such as `(M)` and `(W)` are kept verbatim. Runs of
/// whitespace anywhere in the name collapse to a single space, so
/// `"Stanford  (W)"` and `"Stanford (W)"` share a key.
///
/// # Examples
///
/// ```
/// use courtboard_core::normalize::normalize_team_name;
///
/// assert_eq!(normalize_team_name("Stanford University (W)"), "Stanford (W)");
/// assert_eq!(
///     normalize_team_name("University of California, Los Angeles (M)"),
///     "California, Los Angeles (M)"
/// );
/// assert_eq!(normalize_team_name("  UCLA (M) "), "UCLA (M)");
/// assert_eq!(normalize_team_name("Stanford  (W)"), "Stanford (W)");
/// ```
pub fn normalize_team_name(raw: &str) -> String {
    let mut current = raw.to_string();
    // Removing a token can never create a new whole-word match, but loop to a
    // fixed point so idempotence does not depend on that.
    loop {
        let stripped = INSTITUTION_TOKENS.replace_all(&current, " ");
        let collapsed = WHITESPACE.replace_all(&stripped, " ");
        let next = collapsed.trim().to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_university_of() {
        assert_eq!(
            normalize_team_name("University of Texas (M)"),
            "Texas (M)"
        );
    }

    #[test]
    fn test_strips_trailing_university() {
        assert_eq!(normalize_team_name("Baylor University (W)"), "Baylor (W)");
    }

    #[test]
    fn test_preserves_gender_suffix() {
        assert_eq!(normalize_team_name("UCLA (M)"), "UCLA (M)");
        assert_eq!(normalize_team_name("UCLA (W)"), "UCLA (W)");
        assert_ne!(normalize_team_name("UCLA (M)"), normalize_team_name("UCLA (W)"));
    }

    #[test]
    fn test_idempotent() {
        let names = [
            "University of California, Los Angeles (M)",
            "UCLA (M)",
            "Stanford University (W)",
            "  Ohio   State  ",
            "University",
            "",
        ];
        for name in names {
            let once = normalize_team_name(name);
            assert_eq!(normalize_team_name(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_does_not_touch_partial_words() {
        assert_eq!(
            normalize_team_name("Universityville Tech"),
            "Universityville Tech"
        );
    }

    #[test]
    fn test_internal_whitespace_runs_share_a_key() {
        assert_eq!(normalize_team_name("Stanford  (W)"), "Stanford (W)");
        assert_eq!(
            normalize_team_name("Stanford\t(W)"),
            normalize_team_name("Stanford (W)")
        );
    }

    #[test]
    fn test_heuristic_does_not_merge_abbreviations() {
        // Known gap: no canonical team id, so an abbreviation and the full
        // name stay distinct keys.
        assert_ne!(
            normalize_team_name("University of California, Los Angeles (M)"),
            normalize_team_name("UCLA (M)")
        );
    }
}
