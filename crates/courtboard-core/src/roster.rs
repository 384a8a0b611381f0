//! Roster and match-history logic behind the player pages
//!
//! Selects a player's matches, formats set scores into match tiles and
//! computes win statistics.

use crate::error::CoreError;
use crate::models::{compare_names, Match, MatchKind, MatchResult, Player, SetScore};
use chrono::NaiveDate;
use serde::Serialize;

/// Sort players by name, case-insensitive
pub fn sort_roster(players: &mut [Player]) {
    players.sort_by(|a, b| compare_names(&a.name, &b.name));
}

/// Find a player by exact id, then by case-insensitive name
pub fn find_player<'a>(players: &'a [Player], query: &str) -> Result<&'a Player, CoreError> {
    players
        .iter()
        .find(|p| p.id == query)
        .or_else(|| players.iter().find(|p| p.is_referenced_by(query)))
        .ok_or_else(|| CoreError::PlayerNotFound {
            query: query.to_string(),
        })
}

/// Matches the player took part in for our side, newest first
pub fn player_matches<'a>(matches: &'a [Match], player: &Player) -> Vec<&'a Match> {
    let mut selected: Vec<&Match> = matches
        .iter()
        .filter(|m| m.client_players.iter().any(|r| player.is_referenced_by(r)))
        .collect();

    selected.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    selected
}

/// "6-4", or "7-6(5)" when a tiebreak is recorded
pub fn format_set(set: &SetScore) -> String {
    match set.tiebreak {
        Some(points) => format!("{}-{}({})", set.client, set.opponent, points),
        None => format!("{}-{}", set.client, set.opponent),
    }
}

/// Comma-separated score line, e.g. "6-4, 3-6, 7-6(5)"
pub fn score_line(sets: &[SetScore]) -> String {
    sets.iter().map(format_set).collect::<Vec<_>>().join(", ")
}

/// Summary of one match as shown on a player page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchTile {
    pub match_id: String,
    pub date: NaiveDate,
    pub kind: MatchKind,
    pub position: Option<u8>,
    pub client_team: String,
    pub opponent_team: String,
    /// Doubles partner(s) of the player, empty in singles
    pub partners: Vec<String>,
    pub opponents: Vec<String>,
    pub score: String,
    pub outcome: MatchResult,
}

impl MatchTile {
    pub fn from_match(m: &Match, player: &Player) -> Self {
        Self {
            match_id: m.id.clone(),
            date: m.date,
            kind: m.kind,
            position: m.position,
            client_team: m.client_team.clone(),
            opponent_team: m.opponent_team.clone(),
            partners: m
                .client_players
                .iter()
                .filter(|r| !player.is_referenced_by(r))
                .cloned()
                .collect(),
            opponents: m.opponent_players.clone(),
            score: score_line(&m.sets),
            outcome: m.outcome(),
        }
    }

    /// Position label such as "S1" or "D2"
    pub fn position_label(&self) -> Option<String> {
        let prefix = match self.kind {
            MatchKind::Singles => 'S',
            MatchKind::Doubles => 'D',
        };
        self.position.map(|p| format!("{prefix}{p}"))
    }
}

/// Win/loss record; unfinished matches count in neither column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinStats {
    pub singles_wins: u32,
    pub singles_losses: u32,
    pub doubles_wins: u32,
    pub doubles_losses: u32,
}

impl WinStats {
    pub fn wins(&self) -> u32 {
        self.singles_wins + self.doubles_wins
    }

    pub fn losses(&self) -> u32 {
        self.singles_losses + self.doubles_losses
    }

    /// Overall win percentage (0-100), `None` before any decided match
    pub fn win_percentage(&self) -> Option<f64> {
        let played = self.wins() + self.losses();
        if played == 0 {
            return None;
        }
        Some(self.wins() as f64 * 100.0 / played as f64)
    }

    fn record(&mut self, kind: MatchKind, outcome: MatchResult) {
        match (kind, outcome) {
            (MatchKind::Singles, MatchResult::Win) => self.singles_wins += 1,
            (MatchKind::Singles, MatchResult::Loss) => self.singles_losses += 1,
            (MatchKind::Doubles, MatchResult::Win) => self.doubles_wins += 1,
            (MatchKind::Doubles, MatchResult::Loss) => self.doubles_losses += 1,
            (_, MatchResult::Unfinished) => {}
        }
    }
}

pub fn win_stats(matches: &[Match], player: &Player) -> WinStats {
    let mut stats = WinStats::default();
    for m in player_matches(matches, player) {
        stats.record(m.kind, m.outcome());
    }
    stats
}

/// Everything a player page needs
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub player: Player,
    pub stats: WinStats,
    pub tiles: Vec<MatchTile>,
}

impl PlayerProfile {
    pub fn build(player: &Player, matches: &[Match]) -> Self {
        let selected = player_matches(matches, player);
        let mut stats = WinStats::default();
        let tiles: Vec<MatchTile> = selected
            .into_iter()
            .map(|m| {
                stats.record(m.kind, m.outcome());
                MatchTile::from_match(m, player)
            })
            .collect();

        Self {
            player: player.clone(),
            stats,
            tiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, name: &str) -> Player {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            class_year: None,
            hometown: None,
            height: None,
            plays: None,
            bio: None,
            photo_url: None,
            singles_rank: None,
        }
    }

    fn tennis_match(
        id: &str,
        date: (i32, u32, u32),
        kind: MatchKind,
        client_players: &[&str],
        sets: Vec<SetScore>,
    ) -> Match {
        Match {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            kind,
            client_team: "UCLA (W)".to_string(),
            opponent_team: "USC (W)".to_string(),
            client_players: client_players.iter().map(|s| s.to_string()).collect(),
            opponent_players: vec!["Opp One".to_string()],
            sets,
            result: None,
            position: Some(2),
        }
    }

    fn history() -> Vec<Match> {
        vec![
            tennis_match(
                "m1",
                (2024, 2, 10),
                MatchKind::Singles,
                &["p1"],
                vec![SetScore::new(6, 3), SetScore::new(6, 2)],
            ),
            tennis_match(
                "m2",
                (2024, 3, 5),
                MatchKind::Doubles,
                &["p1", "p2"],
                vec![SetScore::new(4, 6)],
            ),
            tennis_match(
                "m3",
                (2024, 3, 5),
                MatchKind::Singles,
                &["Ana Ruiz"],
                vec![SetScore::new(6, 7).with_tiebreak(5), SetScore::new(6, 4), SetScore::new(2, 1)],
            ),
            tennis_match(
                "m4",
                (2024, 1, 20),
                MatchKind::Singles,
                &["p2"],
                vec![SetScore::new(6, 0), SetScore::new(6, 0)],
            ),
        ]
    }

    #[test]
    fn test_sort_roster_case_insensitive() {
        let mut roster = vec![player("1", "zoe Park"), player("2", "Ana Ruiz"), player("3", "bo Chen")];
        sort_roster(&mut roster);
        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Ruiz", "bo Chen", "zoe Park"]);
    }

    #[test]
    fn test_find_player() {
        let roster = vec![player("p1", "Ana Ruiz"), player("p2", "Bo Chen")];
        assert_eq!(find_player(&roster, "p2").unwrap().name, "Bo Chen");
        assert_eq!(find_player(&roster, "ANA RUIZ").unwrap().id, "p1");
        assert!(matches!(
            find_player(&roster, "nobody"),
            Err(CoreError::PlayerNotFound { .. })
        ));
    }

    #[test]
    fn test_player_matches_newest_first() {
        let matches = history();
        let ana = player("p1", "Ana Ruiz");

        let ids: Vec<_> = player_matches(&matches, &ana)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        // Same date: ordered by id
        assert_eq!(ids, vec!["m2", "m3", "m1"]);
    }

    #[test]
    fn test_score_line() {
        let sets = [
            SetScore::new(6, 4),
            SetScore::new(3, 6),
            SetScore::new(7, 6).with_tiebreak(5),
        ];
        assert_eq!(score_line(&sets), "6-4, 3-6, 7-6(5)");
        assert_eq!(score_line(&[]), "");
    }

    #[test]
    fn test_tile_partners_and_label() {
        let matches = history();
        let ana = player("p1", "Ana Ruiz");

        let tile = MatchTile::from_match(&matches[1], &ana);
        assert_eq!(tile.partners, vec!["p2".to_string()]);
        assert_eq!(tile.outcome, MatchResult::Loss);
        assert_eq!(tile.score, "4-6");
        assert_eq!(tile.position_label().as_deref(), Some("D2"));
    }

    #[test]
    fn test_win_stats() {
        let matches = history();
        let ana = player("p1", "Ana Ruiz");

        let stats = win_stats(&matches, &ana);
        assert_eq!(stats.singles_wins, 1);
        assert_eq!(stats.singles_losses, 0);
        assert_eq!(stats.doubles_losses, 1);
        // m3 is still in the third set
        assert_eq!(stats.wins() + stats.losses(), 2);
        assert_eq!(stats.win_percentage(), Some(50.0));

        assert_eq!(WinStats::default().win_percentage(), None);
    }

    #[test]
    fn test_profile_matches_stats() {
        let matches = history();
        let ana = player("p1", "Ana Ruiz");

        let profile = PlayerProfile::build(&ana, &matches);
        assert_eq!(profile.tiles.len(), 3);
        assert_eq!(profile.stats, win_stats(&matches, &ana));
    }
}
