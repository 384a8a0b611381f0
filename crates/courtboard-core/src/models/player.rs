//! Roster player records (collection `players`)

use super::Record;
use serde::{Deserialize, Serialize};

/// A roster player with biographical data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,

    /// "Freshman", "Sophomore", ...
    #[serde(default)]
    pub class_year: Option<String>,

    #[serde(default)]
    pub hometown: Option<String>,

    #[serde(default)]
    pub height: Option<String>,

    /// Handedness, e.g. "Right-handed"
    #[serde(default)]
    pub plays: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub photo_url: Option<String>,

    /// National singles ranking, if ranked
    #[serde(default)]
    pub singles_rank: Option<u32>,
}

impl Player {
    /// True if `reference` (an id or a name) points at this player
    pub fn is_referenced_by(&self, reference: &str) -> bool {
        reference == self.id || reference.trim().eq_ignore_ascii_case(self.name.trim())
    }
}

impl Record for Player {
    const COLLECTION: &'static str = "players";

    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("missing id".to_string());
        }
        if self.name.trim().is_empty() {
            return Err(format!("player '{}' has no name", self.id));
        }
        Ok(())
    }
}
