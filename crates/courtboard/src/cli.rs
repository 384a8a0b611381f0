//! Terminal output for the courtboard commands
//!
//! Tables via comfy-table, with a plain (uncolored) variant for logs and a
//! JSON variant for scripting.

use chrono::{TimeZone, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use courtboard_core::cache::CachedLogo;
use courtboard_core::models::{MatchResult, Player, Team};
use courtboard_core::{MatchLogos, PlayerProfile};
use serde::Serialize;

// ============================================================================
// Tables
// ============================================================================

fn header_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Roster table (players already sorted)
pub fn format_roster(players: &[Player], no_color: bool) -> String {
    if players.is_empty() {
        return "No players found.".to_string();
    }

    let mut table = header_table(&["ID", "Name", "Year", "Hometown", "Plays", "Rank"], no_color);
    for player in players {
        table.add_row(Row::from(vec![
            player.id.clone(),
            player.name.clone(),
            dash(player.class_year.as_deref()),
            dash(player.hometown.as_deref()),
            dash(player.plays.as_deref()),
            player
                .singles_rank
                .map(|r| format!("#{r}"))
                .unwrap_or_else(|| "-".to_string()),
        ]));
    }
    table.to_string()
}

/// Team table (teams already sorted)
pub fn format_teams(teams: &[Team], no_color: bool) -> String {
    if teams.is_empty() {
        return "No teams found.".to_string();
    }

    let mut table = header_table(&["Team", "Conference", "Logo"], no_color);
    for team in teams {
        table.add_row(Row::from(vec![
            team.name.clone(),
            dash(team.conference.as_deref()),
            team.logo_url.clone(),
        ]));
    }
    table.to_string()
}

/// Player page: bio block, record, then one row per match tile
pub fn format_profile(profile: &PlayerProfile, no_color: bool) -> String {
    let player = &profile.player;
    let stats = &profile.stats;

    let mut lines = vec![];
    lines.push(format!("Player:           {} ({})", player.name, player.id));
    lines.push(format!("Year:             {}", dash(player.class_year.as_deref())));
    lines.push(format!("Hometown:         {}", dash(player.hometown.as_deref())));
    lines.push(format!("Height:           {}", dash(player.height.as_deref())));
    lines.push(format!("Plays:            {}", dash(player.plays.as_deref())));
    if let Some(rank) = player.singles_rank {
        lines.push(format!("Singles rank:     #{rank}"));
    }
    if let Some(bio) = &player.bio {
        lines.push(format!("Bio:              {}", truncate(bio, 200)));
    }
    lines.push(String::new());
    lines.push(format!(
        "Record:           {}-{} ({})",
        stats.wins(),
        stats.losses(),
        stats
            .win_percentage()
            .map(|p| format!("{p:.1}%"))
            .unwrap_or_else(|| "no decided matches".to_string())
    ));
    lines.push(format!(
        "  Singles:        {}-{}",
        stats.singles_wins, stats.singles_losses
    ));
    lines.push(format!(
        "  Doubles:        {}-{}",
        stats.doubles_wins, stats.doubles_losses
    ));
    lines.push(String::new());

    if profile.tiles.is_empty() {
        lines.push("No matches found.".to_string());
        return lines.join("\n");
    }

    let mut table = header_table(&["Date", "Pos", "Opponent", "Partner", "Score", "W/L"], no_color);
    for tile in &profile.tiles {
        let outcome = tile.outcome.to_string();
        let outcome_cell = if no_color {
            Cell::new(outcome)
        } else {
            match tile.outcome {
                MatchResult::Win => Cell::new(outcome).fg(Color::Green),
                MatchResult::Loss => Cell::new(outcome).fg(Color::Red),
                MatchResult::Unfinished => Cell::new(outcome),
            }
        };

        let opponent = if tile.opponents.is_empty() {
            tile.opponent_team.clone()
        } else {
            format!("{} ({})", tile.opponents.join(" / "), tile.opponent_team)
        };

        table.add_row(Row::from(vec![
            Cell::new(tile.date.format("%Y-%m-%d")),
            Cell::new(tile.position_label().unwrap_or_else(|| "-".to_string())),
            Cell::new(opponent),
            Cell::new(if tile.partners.is_empty() {
                "-".to_string()
            } else {
                tile.partners.join(" / ")
            }),
            Cell::new(&tile.score),
            outcome_cell,
        ]));
    }
    lines.push(table.to_string());

    lines.join("\n")
}

/// Resolved logos for a match
pub fn format_logos(client: &str, opponent: &str, logos: &MatchLogos) -> String {
    format!(
        "{:<30} {}\n{:<30} {}",
        client,
        dash(non_empty(&logos.client_logo_url)),
        opponent,
        dash(non_empty(&logos.opponent_logo_url))
    )
}

/// Durable cache entries with age and freshness
pub fn format_cache_entries(entries: &[CachedLogo], no_color: bool) -> String {
    if entries.is_empty() {
        return "Logo cache is empty.".to_string();
    }

    let mut table = header_table(&["Key", "URL", "Written", "State"], no_color);
    for entry in entries {
        let written = Utc
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "invalid".to_string());
        let state = if entry.fresh { "fresh" } else { "expired" };
        let state_cell = match (no_color, entry.fresh) {
            (true, _) => Cell::new(state),
            (false, true) => Cell::new(state).fg(Color::Green),
            (false, false) => Cell::new(state).fg(Color::DarkGrey),
        };

        table.add_row(Row::from(vec![
            Cell::new(&entry.key),
            Cell::new(dash(non_empty(&entry.url))),
            Cell::new(written),
            state_cell,
        ]));
    }
    table.to_string()
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

// ============================================================================
// Utilities
// ============================================================================

fn dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        // Char-based so multi-byte names never split
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================
