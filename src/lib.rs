pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod params;
pub mod routes;
pub mod utils;
pub mod widget;

pub use api::*;
pub use config::Config;
pub use error::{DashboardError, Result};
pub use models::*;
pub use routes::app;

use chrono::{NaiveDate, Utc};
use futures::future::try_join_all;
use utils::leaders::{stat_category, CATEGORIES};
use utils::{matchup, news, schedule, scores, standings, team_details, team_directory, teams};

/// Every data operation the dashboard exposes, one per proxy endpoint.
/// Each call goes straight to the upstream APIs; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Dashboard {
    mlb: MlbStatsApiClient,
    espn: EspnApiClient,
    config: Config,
}

impl Dashboard {
    pub fn new(config: Config) -> Self {
        Self {
            mlb: MlbStatsApiClient::new(config.mlb_stats_api_url.clone()),
            espn: EspnApiClient::new(config.espn_api_url.clone()),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Today's live scoreboard
    pub async fn scores(&self) -> Result<Scoreboard> {
        let response = self.espn.fetch_scoreboard().await?;
        tracing::info!("Scoreboard returned {} events", response.events.len());

        Ok(Scoreboard {
            games: scores::scoreboard_games(&response),
            last_updated: Utc::now(),
        })
    }

    /// Both league tables; fails if either league fails
    pub async fn standings(&self) -> Result<Standings> {
        let season = self.config.season;
        let (al, nl) = tokio::try_join!(
            self.mlb.fetch_standings(League::American, season),
            self.mlb.fetch_standings(League::National, season)
        )?;

        Ok(Standings {
            american_league: standings::league_standings(League::American, al),
            national_league: standings::league_standings(League::National, nl),
        })
    }

    /// Six leaderboards fetched concurrently; fails if any one fails
    pub async fn stat_leaders(&self, league: LeagueFilter, limit: usize) -> Result<StatLeaders> {
        let season = self.config.season;
        let responses = try_join_all(CATEGORIES.iter().map(|def| {
            self.mlb
                .fetch_stats(def.group, def.sort_stat, league.league(), season, limit)
        }))
        .await?;

        let categories = CATEGORIES
            .iter()
            .zip(responses)
            .map(|(def, response)| stat_category(def, &response.into_splits(), limit))
            .collect();

        Ok(StatLeaders {
            league,
            season,
            categories,
        })
    }

    pub async fn schedule(&self, date: NaiveDate) -> Result<DaySchedule> {
        let response = self.mlb.fetch_schedule(date).await?;
        Ok(schedule::day_schedule(date, response))
    }

    pub async fn news(&self) -> Result<Vec<NewsItem>> {
        let response = self.espn.fetch_news().await?;
        Ok(news::news_items(response, self.config.news_limit))
    }

    pub async fn teams(&self) -> Result<Vec<Team>> {
        let response = self.espn.fetch_teams().await?;
        Ok(teams::teams(response))
    }

    /// Details for an ESPN team id: team info, active roster, last five and next game
    pub async fn team_details(&self, espn_team_id: &str) -> Result<TeamDetails> {
        let entry = team_directory::by_espn_id(espn_team_id).ok_or_else(|| {
            DashboardError::InvalidParameter(format!("Unknown team ID: {}", espn_team_id))
        })?;

        let (team, schedule, roster) = tokio::try_join!(
            self.espn.fetch_team(espn_team_id),
            self.mlb.fetch_team_schedule(entry.mlb_id, self.config.season),
            self.mlb.fetch_roster(entry.mlb_id)
        )?;

        let schedule: Vec<ScheduleGame> = schedule
            .into_games()
            .into_iter()
            .map(ScheduleGame::from)
            .collect();

        Ok(team_details::team_details(
            team.team,
            schedule,
            roster.roster,
            Utc::now(),
        ))
    }

    /// Head-to-head for two MLB team ids over the configured season
    pub async fn matchup(&self, team1_id: u32, team2_id: u32) -> Result<Matchup> {
        let season = self.config.season;
        let response = self.mlb.fetch_team_schedule(team1_id, season).await?;

        let schedule: Vec<ScheduleGame> = response
            .into_games()
            .into_iter()
            .map(ScheduleGame::from)
            .collect();

        Ok(matchup::matchup(team1_id, team2_id, season, schedule))
    }
}
