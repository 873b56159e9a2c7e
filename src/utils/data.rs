use crate::models::{LeagueStandings, StatLeaders};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StandingsRow<'a> {
    #[serde(rename = "Division")]
    division: &'a str,
    #[serde(rename = "Rank")]
    rank: u32,
    #[serde(rename = "Team")]
    team: &'a str,
    #[serde(rename = "W")]
    wins: u32,
    #[serde(rename = "L")]
    losses: u32,
    #[serde(rename = "PCT")]
    win_pct: String,
    #[serde(rename = "GB")]
    games_back: f64,
    #[serde(rename = "Streak")]
    streak: &'a str,
    #[serde(rename = "Wild Card")]
    wildcard: bool,
}

#[derive(Serialize)]
struct LeaderRow<'a> {
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Player")]
    player: &'a str,
    #[serde(rename = "Team")]
    team: &'a str,
    #[serde(rename = "Value")]
    value: &'a str,
}

/// Save one league's division tables to CSV, one row per team
pub fn save_standings_to_csv(standings: &LeagueStandings, filename: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename.as_ref()).context("Failed to create CSV file")?;

    for division in &standings.divisions {
        for team in &division.teams {
            writer
                .serialize(StandingsRow {
                    division: &division.name,
                    rank: team.division_rank,
                    team: &team.name,
                    wins: team.wins,
                    losses: team.losses,
                    win_pct: format!("{:.3}", team.win_pct),
                    games_back: team.games_back,
                    streak: team.streak.as_deref().unwrap_or(""),
                    wildcard: team.is_wildcard,
                })
                .context("Failed to write standings row")?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Save every leaderboard to CSV
pub fn save_leaders_to_csv(leaders: &StatLeaders, filename: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename.as_ref()).context("Failed to create CSV file")?;

    for category in &leaders.categories {
        for leader in &category.leaders {
            writer
                .serialize(LeaderRow {
                    category: &category.title,
                    rank: leader.rank,
                    player: &leader.player_name,
                    team: &leader.team_name,
                    value: &leader.display_value,
                })
                .context("Failed to write leader row")?;
        }
    }

    writer.flush()?;
    Ok(())
}
