use crate::api::espn_api::EspnTeam;
use crate::api::mlb_stats_api::RosterEntry;
use crate::models::{RosterGroups, RosterPlayer, ScheduleGame, TeamDetails, TeamInfo};
use crate::utils::teams::{alternate_color, primary_color};
use chrono::{DateTime, Utc};

pub const RECENT_GAMES: usize = 5;

const INFIELD: [&str; 4] = ["1B", "2B", "3B", "SS"];
const OUTFIELD: [&str; 4] = ["LF", "CF", "RF", "OF"];

pub fn team_info(team: EspnTeam) -> TeamInfo {
    let logo = team.logo_url();
    let record_summary = team
        .record
        .as_ref()
        .and_then(|r| r.items.first())
        .and_then(|i| i.summary.clone());

    TeamInfo {
        color: primary_color(team.color.as_deref()),
        alternate_color: alternate_color(team.alternate_color.as_deref()),
        name: team.display_name.unwrap_or_default(),
        abbr: team.abbreviation.unwrap_or_default(),
        location: team.location.unwrap_or_default(),
        nickname: team.name.unwrap_or_default(),
        standing_summary: team.standing_summary.unwrap_or_default(),
        id: team.id,
        logo,
        record_summary,
    }
}

pub fn roster_player(entry: RosterEntry) -> RosterPlayer {
    RosterPlayer {
        id: entry.person.id,
        full_name: entry.person.full_name,
        jersey_number: entry.jersey_number,
        position: entry.position.abbreviation,
        position_name: entry.position.name,
    }
}

/// Split a roster into position groups; every player lands in exactly one group
pub fn group_roster(roster: &[RosterPlayer]) -> RosterGroups {
    let mut groups = RosterGroups::default();

    for player in roster {
        let bucket = if player.position_name.contains("Pitcher") {
            &mut groups.pitchers
        } else if player.position == "C" {
            &mut groups.catchers
        } else if INFIELD.contains(&player.position.as_str()) {
            &mut groups.infielders
        } else if OUTFIELD.contains(&player.position.as_str()) {
            &mut groups.outfielders
        } else {
            &mut groups.other
        };
        bucket.push(player.clone());
    }

    groups
}

/// Most recent finished games before `now`, newest first
pub fn last_games(games: &[ScheduleGame], now: DateTime<Utc>, count: usize) -> Vec<ScheduleGame> {
    let mut past: Vec<&ScheduleGame> = games
        .iter()
        .filter(|g| g.state.is_final() && g.game_date.is_some_and(|d| d < now))
        .collect();
    past.sort_by(|a, b| b.game_date.cmp(&a.game_date));
    past.into_iter().take(count).cloned().collect()
}

/// The earliest unfinished game at or after `now`
pub fn next_game(games: &[ScheduleGame], now: DateTime<Utc>) -> Option<ScheduleGame> {
    games
        .iter()
        .filter(|g| !g.state.is_final() && g.game_date.is_some_and(|d| d >= now))
        .min_by_key(|g| g.game_date)
        .cloned()
}

pub fn team_details(
    team: Option<EspnTeam>,
    schedule: Vec<ScheduleGame>,
    roster: Vec<RosterEntry>,
    now: DateTime<Utc>,
) -> TeamDetails {
    let roster: Vec<RosterPlayer> = roster.into_iter().map(roster_player).collect();

    TeamDetails {
        team_info: team.map(team_info),
        roster_groups: group_roster(&roster),
        roster,
        last_games: last_games(&schedule, now, RECENT_GAMES),
        next_game: next_game(&schedule, now),
    }
}
