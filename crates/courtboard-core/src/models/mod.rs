//! Data models for courtboard
//!
//! Typed views of the plain records stored in the document store.

pub mod player;
pub mod team;
pub mod tennis_match;

pub use player::Player;
pub use team::Team;
pub use tennis_match::{Match, MatchKind, MatchResult, SetScore, Side};

use std::cmp::Ordering;

/// A decoded document that can reject values serde accepted
pub trait Record {
    /// Collection name in the document store
    const COLLECTION: &'static str;

    /// Shape checks beyond what deserialization enforces
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Case-insensitive name ordering, original case as tie-break
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_names_ignores_case() {
        let mut names = vec!["stanford (W)", "Baylor (M)", "UCLA (M)", "auburn (M)"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["auburn (M)", "Baylor (M)", "stanford (W)", "UCLA (M)"]);
    }

    #[test]
    fn test_compare_names_tie_break_is_stable() {
        assert_eq!(compare_names("Duke", "duke"), Ordering::Less);
        assert_eq!(compare_names("duke", "duke"), Ordering::Equal);
    }
}
