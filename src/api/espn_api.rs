use super::{send_json, string_or_number};
use crate::error::Result;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Response from `/scoreboard`
#[derive(Debug, Default, Deserialize)]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub events: Vec<EspnEvent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnEvent {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// ISO 8601, usually without seconds ("2025-06-01T17:05Z")
    pub date: Option<String>,
    #[serde(default)]
    pub competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnCompetition {
    #[serde(default)]
    pub competitors: Vec<EspnCompetitor>,
    pub status: Option<EspnStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspnCompetitor {
    pub home_away: Option<String>,
    pub score: Option<Value>,
    pub team: Option<EspnTeam>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspnStatusType {
    #[serde(default)]
    pub completed: bool,
    pub state: Option<String>,
    pub detail: Option<String>,
    pub short_detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspnTeam {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub location: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub alternate_color: Option<String>,
    /// Scoreboard competitors carry a single logo URL
    pub logo: Option<String>,
    #[serde(default)]
    pub logos: Vec<EspnLogo>,
    pub record: Option<EspnRecord>,
    pub standing_summary: Option<String>,
}

impl EspnTeam {
    pub fn logo_url(&self) -> Option<String> {
        self.logos
            .first()
            .and_then(|l| l.href.clone())
            .or_else(|| self.logo.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnLogo {
    pub href: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnRecord {
    #[serde(default)]
    pub items: Vec<EspnRecordItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnRecordItem {
    pub summary: Option<String>,
    #[serde(default)]
    pub stats: Vec<EspnStat>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnStat {
    #[serde(default)]
    pub name: String,
    pub value: Option<f64>,
}

/// Response from `/teams`
#[derive(Debug, Default, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub sports: Vec<EspnSport>,
}

impl TeamsResponse {
    /// Teams of the first league of the first sport
    pub fn into_teams(self) -> Vec<EspnTeam> {
        self.sports
            .into_iter()
            .next()
            .and_then(|s| s.leagues.into_iter().next())
            .map(|l| l.teams.into_iter().map(|w| w.team).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnSport {
    #[serde(default)]
    pub leagues: Vec<EspnLeague>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnLeague {
    #[serde(default)]
    pub teams: Vec<EspnTeamWrapper>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnTeamWrapper {
    #[serde(default)]
    pub team: EspnTeam,
}

/// Response from `/teams/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct TeamResponse {
    pub team: Option<EspnTeam>,
}

/// Response from `/news`
#[derive(Debug, Default, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub articles: Vec<EspnArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspnArticle {
    pub data_source_identifier: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<EspnImage>,
    #[serde(default)]
    pub categories: Vec<EspnCategory>,
    #[serde(rename = "type")]
    pub article_type: Option<String>,
    pub links: Option<EspnLinks>,
    pub published: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnImage {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnCategory {
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnLinks {
    pub web: Option<EspnLink>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EspnLink {
    pub href: Option<String>,
}

/// Client for ESPN's public MLB site API (scoreboard, news, teams)
#[derive(Debug, Clone)]
pub struct EspnApiClient {
    client: Client,
    base_url: String,
}

impl EspnApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, BROWSER_USER_AGENT);
        send_json(&url, request).await
    }

    /// Today's live scoreboard
    pub async fn fetch_scoreboard(&self) -> Result<ScoreboardResponse> {
        self.get("/scoreboard").await
    }

    pub async fn fetch_news(&self) -> Result<NewsResponse> {
        self.get("/news").await
    }

    pub async fn fetch_teams(&self) -> Result<TeamsResponse> {
        self.get("/teams").await
    }

    pub async fn fetch_team(&self, team_id: &str) -> Result<TeamResponse> {
        self.get(&format!("/teams/{}", team_id)).await
    }
}
