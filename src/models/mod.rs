use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MLB league filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "AL")]
    American,
    #[serde(rename = "NL")]
    National,
}

impl League {
    /// League id used by the MLB Stats API
    pub fn mlb_id(&self) -> u32 {
        match self {
            League::American => 103,
            League::National => 104,
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            League::American => "AL",
            League::National => "NL",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            League::American => "American League",
            League::National => "National League",
        }
    }
}

impl FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AL" => Ok(League::American),
            "NL" => Ok(League::National),
            other => Err(format!("Unknown league: {}", other)),
        }
    }
}

/// `all`, `AL` or `NL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeagueFilter {
    #[default]
    All,
    Only(League),
}

impl LeagueFilter {
    pub fn league(&self) -> Option<League> {
        match self {
            LeagueFilter::All => None,
            LeagueFilter::Only(league) => Some(*league),
        }
    }
}

impl FromStr for LeagueFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(LeagueFilter::All);
        }
        s.parse::<League>()
            .map(LeagueFilter::Only)
            .map_err(|_| format!("League must be one of all, AL, NL (got {})", s))
    }
}

impl fmt::Display for LeagueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeagueFilter::All => write!(f, "all"),
            LeagueFilter::Only(league) => write!(f, "{}", league.alias()),
        }
    }
}

impl Serialize for LeagueFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Coarse game state shared by scoreboard and schedule views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Scheduled,
    Live,
    Final,
}

impl GameState {
    pub fn is_final(&self) -> bool {
        matches!(self, GameState::Final)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, GameState::Live)
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, GameState::Scheduled)
    }
}

/// One side of a scoreboard game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    pub name: String,
    pub abbr: String,
    pub score: u32,
    pub logo: Option<String>,
}

/// A game on today's live scoreboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardGame {
    pub id: String,
    pub home_team: TeamScore,
    pub away_team: TeamScore,
    pub state: GameState,
    /// `Final`, `Live`, `Scheduled` or the local start time
    pub status: String,
    pub inning: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    pub games: Vec<ScoreboardGame>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSide {
    pub team_id: u32,
    pub name: String,
    pub score: u32,
    pub is_winner: Option<bool>,
    pub probable_pitcher: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Linescore {
    pub current_inning: Option<u32>,
    pub inning_state: Option<String>,
    pub balls: u32,
    pub strikes: u32,
    pub outs: u32,
}

/// A game from the MLB Stats API schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub game_pk: u64,
    pub game_date: Option<DateTime<Utc>>,
    pub official_date: String,
    pub state: GameState,
    pub detailed_state: String,
    pub status_code: String,
    pub away: ScheduleSide,
    pub home: ScheduleSide,
    pub linescore: Option<Linescore>,
    pub venue: Option<String>,
}

impl ScheduleGame {
    pub fn involves(&self, team_id: u32) -> bool {
        self.away.team_id == team_id || self.home.team_id == team_id
    }

    /// Score of `team_id` and its opponent, if the team played in this game
    pub fn scores_for(&self, team_id: u32) -> Option<(u32, u32)> {
        if self.home.team_id == team_id {
            Some((self.home.score, self.away.score))
        } else if self.away.team_id == team_id {
            Some((self.away.score, self.home.score))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: String,
    pub games: Vec<ScheduleGame>,
    pub total_games: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// ESPN team id
    pub id: String,
    pub mlb_id: Option<u32>,
    pub name: String,
    pub abbr: String,
    pub location: String,
    pub nickname: String,
    pub division: String,
    pub wins: u32,
    pub losses: u32,
    pub logo: String,
    pub color: String,
    pub alternate_color: String,
    pub standing_summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLeader {
    pub rank: usize,
    pub player_name: String,
    pub team_name: String,
    pub value: f64,
    pub display_value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCategory {
    pub key: String,
    pub title: String,
    pub group: String,
    pub leaders: Vec<StatLeader>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLeaders {
    pub league: LeagueFilter,
    pub season: i32,
    pub categories: Vec<StatCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub team_id: u32,
    pub name: String,
    pub abbr: String,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
    pub games_back: f64,
    pub wildcard_games_back: Option<f64>,
    pub streak: Option<String>,
    pub division_rank: u32,
    pub is_division_leader: bool,
    pub is_wildcard: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionStandings {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub teams: Vec<StandingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStandings {
    pub league: League,
    pub name: String,
    pub divisions: Vec<DivisionStandings>,
    pub wildcard: Vec<StandingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standings {
    pub american_league: LeagueStandings,
    pub national_league: LeagueStandings,
}

impl Standings {
    pub fn league(&self, league: League) -> &LeagueStandings {
        match league {
            League::American => &self.american_league,
            League::National => &self.national_league,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub category: String,
    pub link: String,
    pub published: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupRecord {
    pub team1_wins: u32,
    pub team2_wins: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub team1_id: u32,
    pub team2_id: u32,
    pub season: i32,
    pub games: Vec<ScheduleGame>,
    pub record: MatchupRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    pub abbr: String,
    pub location: String,
    pub nickname: String,
    pub logo: Option<String>,
    pub color: String,
    pub alternate_color: String,
    pub standing_summary: String,
    pub record_summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub id: u32,
    pub full_name: String,
    pub jersey_number: Option<String>,
    pub position: String,
    pub position_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterGroups {
    pub pitchers: Vec<RosterPlayer>,
    pub catchers: Vec<RosterPlayer>,
    pub infielders: Vec<RosterPlayer>,
    pub outfielders: Vec<RosterPlayer>,
    pub other: Vec<RosterPlayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetails {
    pub team_info: Option<TeamInfo>,
    pub roster: Vec<RosterPlayer>,
    pub roster_groups: RosterGroups,
    pub last_games: Vec<ScheduleGame>,
    pub next_game: Option<ScheduleGame>,
}
