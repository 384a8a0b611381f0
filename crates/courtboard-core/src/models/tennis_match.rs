//! Match records (collection `matches`)
//!
//! Scores are stored from the client team's point of view: `client` games
//! belong to our program, `opponent` games to the visiting side.

use super::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Singles,
    Doubles,
}

impl MatchKind {
    /// Sets needed to win: college singles is best of three, doubles a single set
    pub fn sets_to_win(self) -> usize {
        match self {
            MatchKind::Singles => 2,
            MatchKind::Doubles => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
    Unfinished,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Win => write!(f, "W"),
            MatchResult::Loss => write!(f, "L"),
            MatchResult::Unfinished => write!(f, "-"),
        }
    }
}

/// Which side of the net
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Client,
    Opponent,
}

/// Games won by each side in one set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub client: u8,
    pub opponent: u8,

    /// Tiebreak points of the side that lost the tiebreak
    #[serde(default)]
    pub tiebreak: Option<u8>,
}

impl SetScore {
    pub fn new(client: u8, opponent: u8) -> Self {
        Self {
            client,
            opponent,
            tiebreak: None,
        }
    }

    pub fn with_tiebreak(mut self, loser_points: u8) -> Self {
        self.tiebreak = Some(loser_points);
        self
    }

    /// Winner of a completed set, `None` while the set is still in play
    pub fn winner(&self) -> Option<Side> {
        let (high, low) = if self.client >= self.opponent {
            (self.client, self.opponent)
        } else {
            (self.opponent, self.client)
        };

        let complete = if self.tiebreak.is_some() {
            high > low
        } else {
            (high >= 6 && high - low >= 2) || (high == 7 && low == 6)
        };

        match (complete, self.client > self.opponent) {
            (false, _) => None,
            (true, true) => Some(Side::Client),
            (true, false) => Some(Side::Opponent),
        }
    }
}

/// One singles or doubles match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub date: NaiveDate,
    pub kind: MatchKind,
    pub client_team: String,
    pub opponent_team: String,

    /// Player ids or names on our side
    pub client_players: Vec<String>,

    #[serde(default)]
    pub opponent_players: Vec<String>,

    #[serde(default)]
    pub sets: Vec<SetScore>,

    /// Recorded outcome; derived from `sets` when absent
    #[serde(default)]
    pub result: Option<MatchResult>,

    /// Lineup position (1 = top singles/doubles court)
    #[serde(default)]
    pub position: Option<u8>,
}

impl Match {
    /// Recorded result, or the one implied by the completed sets
    pub fn outcome(&self) -> MatchResult {
        if let Some(result) = self.result {
            return result;
        }

        let needed = self.kind.sets_to_win();
        let (mut client, mut opponent) = (0, 0);
        for set in &self.sets {
            match set.winner() {
                Some(Side::Client) => client += 1,
                Some(Side::Opponent) => opponent += 1,
                None => {}
            }
        }

        if client >= needed && client > opponent {
            MatchResult::Win
        } else if opponent >= needed && opponent > client {
            MatchResult::Loss
        } else {
            MatchResult::Unfinished
        }
    }
}

impl Record for Match {
    const COLLECTION: &'static str = "matches";

    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("missing id".to_string());
        }
        if self.client_players.is_empty() {
            return Err(format!("match '{}' lists no client players", self.id));
        }
        Ok(())
    }
}
