use super::send_json;
use crate::error::Result;
use crate::models::{GameState, League, Linescore, ScheduleGame, ScheduleSide};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

const SPORT_ID: &str = "1"; // MLB

/// Response from `/schedule`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

impl ScheduleResponse {
    /// Every game on every date of the response, in upstream order
    pub fn into_games(self) -> Vec<MlbGame> {
        self.dates.into_iter().flat_map(|d| d.games).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDate {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub games: Vec<MlbGame>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbGame {
    #[serde(default)]
    pub game_pk: u64,
    pub game_date: Option<String>,
    pub official_date: Option<String>,
    #[serde(default)]
    pub status: MlbGameStatus,
    #[serde(default)]
    pub teams: MlbGameTeams,
    pub linescore: Option<MlbLinescore>,
    pub venue: Option<NamedRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbGameStatus {
    pub abstract_game_state: Option<String>,
    pub detailed_state: Option<String>,
    pub status_code: Option<String>,
}

impl MlbGameStatus {
    pub fn is_final(&self) -> bool {
        self.status_code.as_deref() == Some("F")
            || self.abstract_game_state.as_deref() == Some("Final")
    }

    pub fn state(&self) -> GameState {
        if self.is_final() {
            GameState::Final
        } else if self.abstract_game_state.as_deref() == Some("Live") {
            GameState::Live
        } else {
            GameState::Scheduled
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MlbGameTeams {
    #[serde(default)]
    pub away: MlbGameTeam,
    #[serde(default)]
    pub home: MlbGameTeam,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbGameTeam {
    #[serde(default)]
    pub team: TeamRef,
    pub score: Option<u32>,
    pub is_winner: Option<bool>,
    pub probable_pitcher: Option<PersonRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbLinescore {
    pub current_inning: Option<u32>,
    pub inning_state: Option<String>,
    pub balls: Option<u32>,
    pub strikes: Option<u32>,
    pub outs: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// Response from `/standings`
#[derive(Debug, Default, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub records: Vec<StandingsRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRecord {
    #[serde(default)]
    pub division: NamedRef,
    #[serde(default)]
    pub team_records: Vec<TeamRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    #[serde(default)]
    pub team: TeamRef,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    pub winning_percentage: Option<String>,
    pub games_back: Option<String>,
    pub division_rank: Option<String>,
    pub streak: Option<Streak>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub streak_code: Option<String>,
}

/// Response from `/stats`
#[derive(Debug, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub stats: Vec<StatsGroup>,
}

impl StatsResponse {
    pub fn into_splits(self) -> Vec<StatSplit> {
        self.stats.into_iter().flat_map(|g| g.splits).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsGroup {
    #[serde(default)]
    pub splits: Vec<StatSplit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatSplit {
    #[serde(default)]
    pub player: PersonRef,
    #[serde(default)]
    pub team: TeamRef,
    /// Values are a mix of numbers and numeric strings ("avg": ".312")
    #[serde(default)]
    pub stat: Map<String, Value>,
}

/// Response from `/teams/{id}/roster`
#[derive(Debug, Default, Deserialize)]
pub struct RosterResponse {
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    #[serde(default)]
    pub person: PersonRef,
    pub jersey_number: Option<String>,
    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Default, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}

impl From<MlbGameTeam> for ScheduleSide {
    fn from(side: MlbGameTeam) -> Self {
        ScheduleSide {
            team_id: side.team.id,
            name: side.team.name,
            score: side.score.unwrap_or(0),
            is_winner: side.is_winner,
            probable_pitcher: side.probable_pitcher.map(|p| p.full_name),
        }
    }
}

impl From<MlbLinescore> for Linescore {
    fn from(linescore: MlbLinescore) -> Self {
        Linescore {
            current_inning: linescore.current_inning,
            inning_state: linescore.inning_state,
            balls: linescore.balls.unwrap_or(0),
            strikes: linescore.strikes.unwrap_or(0),
            outs: linescore.outs.unwrap_or(0),
        }
    }
}

impl From<MlbGame> for ScheduleGame {
    fn from(game: MlbGame) -> Self {
        let game_date = game
            .game_date
            .as_deref()
            .and_then(|d| d.parse::<DateTime<Utc>>().ok());

        // officialDate is missing on some hydrations; fall back to the UTC day of gameDate
        let official_date = game
            .official_date
            .clone()
            .or_else(|| game_date.map(|d| d.format("%Y-%m-%d").to_string()))
            .unwrap_or_default();

        ScheduleGame {
            game_pk: game.game_pk,
            game_date,
            official_date,
            state: game.status.state(),
            detailed_state: game.status.detailed_state.clone().unwrap_or_default(),
            status_code: game.status.status_code.clone().unwrap_or_default(),
            away: game.teams.away.into(),
            home: game.teams.home.into(),
            linescore: game.linescore.map(Linescore::from),
            venue: game.venue.map(|v| v.name),
        }
    }
}

/// Client for the public MLB Stats API
#[derive(Debug, Clone)]
pub struct MlbStatsApiClient {
    client: Client,
    base_url: String,
}

impl MlbStatsApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.get(&url).query(query);
        send_json(&url, request).await
    }

    /// All games scheduled on `date`
    pub async fn fetch_schedule(&self, date: NaiveDate) -> Result<ScheduleResponse> {
        self.get(
            "/schedule",
            &[
                ("sportId", SPORT_ID.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
                ("hydrate", "team,linescore,probablePitcher".to_string()),
            ],
        )
        .await
    }

    /// A team's full-season schedule
    pub async fn fetch_team_schedule(&self, team_id: u32, season: i32) -> Result<ScheduleResponse> {
        self.get(
            "/schedule",
            &[
                ("sportId", SPORT_ID.to_string()),
                ("season", season.to_string()),
                ("teamId", team_id.to_string()),
                ("hydrate", "team,linescore".to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_standings(&self, league: League, season: i32) -> Result<StandingsResponse> {
        self.get(
            "/standings",
            &[
                ("leagueId", league.mlb_id().to_string()),
                ("season", season.to_string()),
            ],
        )
        .await
    }

    /// Season leaders for one stat group, sorted upstream by `sort_stat`
    pub async fn fetch_stats(
        &self,
        group: &str,
        sort_stat: &str,
        league: Option<League>,
        season: i32,
        limit: usize,
    ) -> Result<StatsResponse> {
        let mut query = vec![
            ("stats", "season".to_string()),
            ("group", group.to_string()),
            ("season", season.to_string()),
            ("sportId", SPORT_ID.to_string()),
            ("limit", limit.to_string()),
            ("sortStat", sort_stat.to_string()),
        ];
        if let Some(league) = league {
            query.push(("leagueId", league.mlb_id().to_string()));
        }

        self.get("/stats", &query).await
    }

    pub async fn fetch_roster(&self, team_id: u32) -> Result<RosterResponse> {
        self.get(
            &format!("/teams/{}/roster", team_id),
            &[("rosterType", "active".to_string())],
        )
        .await
    }
}
