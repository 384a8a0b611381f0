//! Team records (collection `teams`)

use super::Record;
use serde::{Deserialize, Serialize};

/// A college team with its logo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Display name, e.g. "Stanford University (W)"
    pub name: String,

    /// Logo image URL
    pub logo_url: String,

    #[serde(default)]
    pub conference: Option<String>,

    #[serde(default)]
    pub location: Option<String>,
}

impl Record for Team {
    const COLLECTION: &'static str = "teams";

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("missing name".to_string());
        }
        if self.logo_url.trim().is_empty() {
            return Err(format!("team '{}' has no logoUrl", self.name));
        }
        Ok(())
    }
}
