use crate::api::mlb_stats_api::{StandingsRecord, StandingsResponse, TeamRecord};
use crate::models::{DivisionStandings, League, LeagueStandings, StandingEntry};
use crate::utils::team_directory::{self, Division};
use std::cmp::Ordering;

/// Wildcard berths per league
pub const WILDCARD_SPOTS: usize = 3;
/// Teams shown in the wildcard race table
pub const WILDCARD_RACE_SIZE: usize = 6;

fn win_pct(wins: u32, losses: u32) -> f64 {
    let games = wins + losses;
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64
    }
}

/// Games back between two records
pub fn games_behind(leader_wins: u32, leader_losses: u32, wins: u32, losses: u32) -> f64 {
    ((leader_wins as f64 - wins as f64) + (losses as f64 - leader_losses as f64)) / 2.0
}

fn by_win_pct_desc(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.win_pct
        .partial_cmp(&a.win_pct)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.wins.cmp(&a.wins))
}

fn standing_entry(record: TeamRecord) -> StandingEntry {
    let abbr = team_directory::by_mlb_id(record.team.id)
        .map(|t| t.abbr.to_string())
        .unwrap_or_else(|| record.team.name.chars().take(3).collect::<String>().to_uppercase());

    let win_pct = record
        .winning_percentage
        .as_deref()
        .and_then(|p| p.trim().parse::<f64>().ok())
        .unwrap_or_else(|| win_pct(record.wins, record.losses));

    // "-" marks the division leader
    let games_back = record
        .games_back
        .as_deref()
        .and_then(|gb| gb.trim().trim_start_matches('+').parse::<f64>().ok())
        .unwrap_or(0.0);

    StandingEntry {
        team_id: record.team.id,
        name: record.team.name,
        abbr,
        wins: record.wins,
        losses: record.losses,
        win_pct,
        games_back,
        wildcard_games_back: None,
        streak: record
            .streak
            .and_then(|s| s.streak_code)
            .filter(|s| !s.is_empty()),
        division_rank: record
            .division_rank
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or(0),
        is_division_leader: false,
        is_wildcard: false,
    }
}

fn division_standings(record: StandingsRecord) -> DivisionStandings {
    let division = Division::from_mlb_id(record.division.id);
    let mut teams: Vec<StandingEntry> = record.team_records.into_iter().map(standing_entry).collect();

    // Upstream rank first; unranked teams fall back to win percentage
    teams.sort_by(|a, b| {
        let rank_a = if a.division_rank == 0 { u32::MAX } else { a.division_rank };
        let rank_b = if b.division_rank == 0 { u32::MAX } else { b.division_rank };
        rank_a.cmp(&rank_b).then_with(|| by_win_pct_desc(a, b))
    });

    if let Some(leader) = teams.first_mut() {
        leader.is_division_leader = true;
    }

    let name = match (division, record.division.name.is_empty()) {
        (Some(d), _) => d.name().to_string(),
        (None, false) => record.division.name.clone(),
        (None, true) => format!("Division {}", record.division.id),
    };

    DivisionStandings {
        id: record.division.id,
        name,
        slug: division.map(|d| d.slug().to_string()).unwrap_or_default(),
        teams,
    }
}

/// Build a league table: division leaders, wildcard flags and the wildcard race
pub fn league_standings(league: League, response: StandingsResponse) -> LeagueStandings {
    let mut divisions: Vec<DivisionStandings> =
        response.records.into_iter().map(division_standings).collect();

    divisions.sort_by_key(|d| {
        Division::ALL
            .iter()
            .position(|div| div.mlb_id() == d.id)
            .unwrap_or(usize::MAX)
    });

    let mut race: Vec<StandingEntry> = divisions
        .iter()
        .flat_map(|d| d.teams.iter())
        .filter(|t| !t.is_division_leader)
        .cloned()
        .collect();
    race.sort_by(by_win_pct_desc);
    race.truncate(WILDCARD_RACE_SIZE);

    let wildcard_ids: Vec<u32> = race.iter().take(WILDCARD_SPOTS).map(|t| t.team_id).collect();
    for team in divisions.iter_mut().flat_map(|d| d.teams.iter_mut()) {
        team.is_wildcard = wildcard_ids.contains(&team.team_id);
    }

    if let Some((top_wins, top_losses)) = race.first().map(|t| (t.wins, t.losses)) {
        for team in race.iter_mut() {
            team.is_wildcard = wildcard_ids.contains(&team.team_id);
            team.wildcard_games_back = Some(games_behind(top_wins, top_losses, team.wins, team.losses));
        }
    }

    LeagueStandings {
        league,
        name: league.name().to_string(),
        divisions,
        wildcard: race,
    }
}
