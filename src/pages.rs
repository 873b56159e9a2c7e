//! Server-rendered dashboard pages. Every page is a set of independent widgets,
//! each loading its own data through `Dashboard` on every request.

use crate::error::DashboardError;
use crate::models::{
    DaySchedule, League, LeagueFilter, LeagueStandings, Matchup, NewsItem, RosterPlayer, ScheduleGame,
    Scoreboard, StatLeaders, Team, TeamDetails,
};
use crate::routes::ApiQuery;
use crate::utils::leaders::DEFAULT_LEADER_LIMIT;
use crate::utils::team_directory::{self, Division, TEAMS};
use crate::utils::teams::filter_and_sort;
use crate::widget::{Widget, NEWS_POLL, SCORES_POLL};
use crate::{params, Dashboard};
use askama::Template;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Duration as ChronoDuration, NaiveDate};
use std::time::Duration;

// Custom filters for formatting
mod filters {
    use chrono::{DateTime, Local, Utc};

    /// Winning percentage the way box scores print it: `.580`, `1.000`
    pub fn pct(value: &f64) -> ::askama::Result<String> {
        let formatted = format!("{:.3}", value);
        Ok(match formatted.strip_prefix('0') {
            Some(rest) => rest.to_string(),
            None => formatted,
        })
    }

    pub fn games_back(value: &f64) -> ::askama::Result<String> {
        if *value <= 0.0 {
            Ok("-".to_string())
        } else {
            Ok(format!("{:.1}", value))
        }
    }

    pub fn game_time(value: &Option<DateTime<Utc>>) -> ::askama::Result<String> {
        Ok(match value {
            Some(dt) => dt.with_timezone(&Local).format("%-I:%M %p").to_string(),
            None => "TBD".to_string(),
        })
    }

    pub fn local_time(value: &DateTime<Utc>) -> ::askama::Result<String> {
        Ok(value.with_timezone(&Local).format("%-I:%M:%S %p").to_string())
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    active_page: &'static str,
    refresh_seconds: Option<u64>,
    news: Widget<Vec<NewsItem>>,
    scores: Widget<Scoreboard>,
    teams: Widget<Vec<Team>>,
}

#[derive(Template)]
#[template(path = "scores.html")]
struct ScoresTemplate {
    active_page: &'static str,
    refresh_seconds: Option<u64>,
    scores: Widget<Scoreboard>,
}

#[derive(Template)]
#[template(path = "standings.html")]
struct StandingsTemplate {
    active_page: &'static str,
    refresh_seconds: Option<u64>,
    league_alias: &'static str,
    standings: Widget<LeagueStandings>,
}

#[derive(Template)]
#[template(path = "stats.html")]
struct StatsTemplate {
    active_page: &'static str,
    refresh_seconds: Option<u64>,
    filter: String,
    leaders: Widget<StatLeaders>,
}

#[derive(Template)]
#[template(path = "schedule.html")]
struct ScheduleTemplate {
    active_page: &'static str,
    refresh_seconds: Option<u64>,
    date: String,
    date_label: String,
    prev_date: String,
    next_date: String,
    schedule: Widget<DaySchedule>,
}

struct DivisionLink {
    slug: &'static str,
    name: &'static str,
    active: bool,
}

#[derive(Template)]
#[template(path = "teams.html")]
struct TeamsTemplate {
    active_page: &'static str,
    refresh_seconds: Option<u64>,
    selected_division: Option<String>,
    divisions: Vec<DivisionLink>,
    teams: Widget<Vec<Team>>,
}

/// One line of a team's game log, from that team's point of view
#[derive(Debug, Clone, PartialEq)]
struct GameRow {
    date: String,
    matchup: String,
    result: Option<String>,
}

struct RosterGroupView {
    label: &'static str,
    players: Vec<RosterPlayer>,
}

struct TeamView {
    details: TeamDetails,
    recent: Vec<GameRow>,
    next: Option<GameRow>,
    roster_groups: Vec<RosterGroupView>,
}

#[derive(Template)]
#[template(path = "team_details.html")]
struct TeamDetailsTemplate {
    active_page: &'static str,
    refresh_seconds: Option<u64>,
    team_id: String,
    team: Widget<TeamView>,
}

struct TeamOption {
    mlb_id: u32,
    abbr: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "matchup.html")]
struct MatchupTemplate {
    active_page: &'static str,
    refresh_seconds: Option<u64>,
    team1_abbr: &'static str,
    team2_abbr: &'static str,
    team1_options: Vec<TeamOption>,
    team2_options: Vec<TeamOption>,
    matchup: Widget<Matchup>,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

/// A page reloads as often as its most frequently polling widget
fn refresh_seconds(intervals: &[Option<Duration>]) -> Option<u64> {
    intervals.iter().flatten().min().map(|d| d.as_secs())
}

fn game_row(game: &ScheduleGame, mlb_id: u32) -> GameRow {
    let matchup = if game.home.team_id == mlb_id {
        format!("vs {}", game.away.name)
    } else {
        format!("@ {}", game.home.name)
    };

    let result = match game.scores_for(mlb_id) {
        Some((own, opponent)) if game.state.is_final() => {
            let outcome = if own > opponent { "W" } else { "L" };
            Some(format!("{} {}-{}", outcome, own, opponent))
        }
        _ => None,
    };

    GameRow {
        date: game.official_date.clone(),
        matchup,
        result,
    }
}

fn team_view(details: TeamDetails, mlb_id: u32) -> TeamView {
    let recent = details
        .last_games
        .iter()
        .map(|game| game_row(game, mlb_id))
        .collect();
    let next = details.next_game.as_ref().map(|game| game_row(game, mlb_id));

    let groups = details.roster_groups.clone();
    let roster_groups = vec![
        RosterGroupView { label: "Pitchers", players: groups.pitchers },
        RosterGroupView { label: "Catchers", players: groups.catchers },
        RosterGroupView { label: "Infielders", players: groups.infielders },
        RosterGroupView { label: "Outfielders", players: groups.outfielders },
        RosterGroupView { label: "Other", players: groups.other },
    ];

    TeamView {
        details,
        recent,
        next,
        roster_groups,
    }
}

fn team_options(selected: Option<u32>) -> Vec<TeamOption> {
    let mut options: Vec<TeamOption> = TEAMS
        .iter()
        .map(|entry| TeamOption {
            mlb_id: entry.mlb_id,
            abbr: entry.abbr,
            selected: selected == Some(entry.mlb_id),
        })
        .collect();
    options.sort_by(|a, b| a.abbr.cmp(b.abbr));
    options
}

fn abbr_for(mlb_id: Option<u32>) -> &'static str {
    mlb_id
        .and_then(team_directory::by_mlb_id)
        .map(|entry| entry.abbr)
        .unwrap_or("")
}

async fn home(State(dashboard): State<Dashboard>) -> impl IntoResponse {
    let mut news = Widget::new("Latest News", "Failed to load news").polling(NEWS_POLL);
    let mut scores = Widget::new("Scores", "Failed to load scores").polling(SCORES_POLL);
    let mut teams = Widget::new("Teams", "Failed to load teams");

    tokio::join!(
        news.refresh(dashboard.news()),
        scores.refresh(dashboard.scores()),
        teams.refresh(async { dashboard.teams().await.map(|list| filter_and_sort(&list, None)) })
    );

    let template = HomeTemplate {
        active_page: "home",
        refresh_seconds: refresh_seconds(&[news.poll_interval(), scores.poll_interval()]),
        news,
        scores,
        teams,
    };

    HtmlTemplate(template)
}

async fn scores(State(dashboard): State<Dashboard>) -> impl IntoResponse {
    let mut scores = Widget::new("Scores", "Failed to load scores").polling(SCORES_POLL);
    scores.refresh(dashboard.scores()).await;

    HtmlTemplate(ScoresTemplate {
        active_page: "scores",
        refresh_seconds: scores.poll_seconds(),
        scores,
    })
}

async fn standings(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = ApiQuery::lenient(query);
    let league = params::parse_league_filter(query.league.as_deref())
        .ok()
        .and_then(|filter| filter.league())
        .unwrap_or(League::American);

    let mut standings = Widget::new("Standings", "Failed to load standings");
    standings
        .refresh(async {
            let both = dashboard.standings().await?;
            Ok::<_, DashboardError>(both.league(league).clone())
        })
        .await;

    HtmlTemplate(StandingsTemplate {
        active_page: "standings",
        refresh_seconds: None,
        league_alias: league.alias(),
        standings,
    })
}

async fn stats(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = ApiQuery::lenient(query);
    let filter = params::parse_league_filter(query.league.as_deref()).unwrap_or(LeagueFilter::All);

    let mut leaders = Widget::new("League Leaders", "Failed to load stats");
    leaders
        .refresh(dashboard.stat_leaders(filter, DEFAULT_LEADER_LIMIT))
        .await;

    HtmlTemplate(StatsTemplate {
        active_page: "stats",
        refresh_seconds: None,
        filter: filter.to_string(),
        leaders,
    })
}

async fn schedule(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = ApiQuery::lenient(query);
    let date = params::parse_date(query.date.as_deref())
        .unwrap_or_else(|_| chrono::Utc::now().date_naive());

    let mut schedule = Widget::new("Schedule", "Failed to load schedule");
    schedule.refresh(dashboard.schedule(date)).await;

    HtmlTemplate(ScheduleTemplate {
        active_page: "schedule",
        refresh_seconds: None,
        date: date.to_string(),
        date_label: date.format("%A, %B %-d, %Y").to_string(),
        prev_date: shift_date(date, -1),
        next_date: shift_date(date, 1),
        schedule,
    })
}

fn shift_date(date: NaiveDate, days: i64) -> String {
    date.checked_add_signed(ChronoDuration::days(days))
        .unwrap_or(date)
        .to_string()
}

async fn teams(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = ApiQuery::lenient(query);
    let division = query
        .division
        .as_deref()
        .and_then(Division::from_slug);

    let mut teams = Widget::new("Teams", "Failed to load teams");
    teams
        .refresh(async {
            let list = dashboard.teams().await?;
            Ok::<_, DashboardError>(filter_and_sort(&list, division.map(|d| d.slug())))
        })
        .await;

    let divisions = Division::ALL
        .iter()
        .map(|d| DivisionLink {
            slug: d.slug(),
            name: d.name(),
            active: division == Some(*d),
        })
        .collect();

    HtmlTemplate(TeamsTemplate {
        active_page: "teams",
        refresh_seconds: None,
        selected_division: division.map(|d| d.slug().to_string()),
        divisions,
        teams,
    })
}

async fn team_details(State(dashboard): State<Dashboard>, Path(team_id): Path<String>) -> impl IntoResponse {
    let mut team = Widget::new("Team", "Failed to load team details");
    team.refresh(async {
        let details = dashboard.team_details(&team_id).await?;
        let mlb_id = team_directory::by_espn_id(&team_id)
            .map(|entry| entry.mlb_id)
            .unwrap_or_default();
        Ok::<_, DashboardError>(team_view(details, mlb_id))
    })
    .await;

    HtmlTemplate(TeamDetailsTemplate {
        active_page: "teams",
        refresh_seconds: None,
        team_id,
        team,
    })
}

async fn matchup(
    State(dashboard): State<Dashboard>,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = ApiQuery::lenient(query);
    let team1 = query.team1_id.as_deref().and_then(|id| id.parse::<u32>().ok());
    let team2 = query.team2_id.as_deref().and_then(|id| id.parse::<u32>().ok());

    let mut matchup = Widget::new("Matchup", "Failed to load matchup");
    // Nothing to load until both teams are picked
    if query.team1_id.is_some() || query.team2_id.is_some() {
        matchup
            .refresh(async {
                let (team1_id, team2_id) = params::require_matchup_ids(
                    query.team1_id.as_deref(),
                    query.team2_id.as_deref(),
                )?;
                dashboard.matchup(team1_id, team2_id).await
            })
            .await;
    }

    HtmlTemplate(MatchupTemplate {
        active_page: "matchup",
        refresh_seconds: None,
        team1_abbr: abbr_for(team1),
        team2_abbr: abbr_for(team2),
        team1_options: team_options(team1),
        team2_options: team_options(team2),
        matchup,
    })
}

pub fn routes() -> Router<Dashboard> {
    Router::new()
        .route("/", get(home))
        .route("/scores", get(scores))
        .route("/standings", get(standings))
        .route("/stats", get(stats))
        .route("/schedule", get(schedule))
        .route("/teams", get(teams))
        .route("/teams/:id", get(team_details))
        .route("/matchup", get(matchup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameState, ScheduleSide, ScoreboardGame, TeamScore};

    fn game(home: (u32, u32), away: (u32, u32), state: GameState) -> ScheduleGame {
        let side = |(team_id, score): (u32, u32), name: &str| ScheduleSide {
            team_id,
            name: name.to_string(),
            score,
            is_winner: None,
            probable_pitcher: None,
        };
        ScheduleGame {
            game_pk: 1,
            game_date: None,
            official_date: "2025-06-01".to_string(),
            state,
            detailed_state: "Final".to_string(),
            status_code: "F".to_string(),
            away: side(away, "Boston Red Sox"),
            home: side(home, "New York Yankees"),
            linescore: None,
            venue: None,
        }
    }

    #[test]
    fn test_filters() {
        assert_eq!(filters::pct(&0.58).unwrap(), ".580");
        assert_eq!(filters::pct(&1.0).unwrap(), "1.000");
        assert_eq!(filters::games_back(&0.0).unwrap(), "-");
        assert_eq!(filters::games_back(&3.5).unwrap(), "3.5");
        assert_eq!(filters::game_time(&None).unwrap(), "TBD");
    }

    #[test]
    fn test_refresh_seconds_uses_fastest_widget() {
        assert_eq!(refresh_seconds(&[Some(NEWS_POLL), Some(SCORES_POLL)]), Some(30));
        assert_eq!(refresh_seconds(&[None, Some(NEWS_POLL)]), Some(300));
        assert_eq!(refresh_seconds(&[None]), None);
    }

    #[test]
    fn test_game_row_from_each_side() {
        let final_game = game((147, 5), (111, 3), GameState::Final);
        let home_row = game_row(&final_game, 147);
        assert_eq!(home_row.matchup, "vs Boston Red Sox");
        assert_eq!(home_row.result.as_deref(), Some("W 5-3"));

        let away_row = game_row(&final_game, 111);
        assert_eq!(away_row.matchup, "@ New York Yankees");
        assert_eq!(away_row.result.as_deref(), Some("L 3-5"));

        let upcoming = game((147, 0), (111, 0), GameState::Scheduled);
        assert_eq!(game_row(&upcoming, 147).result, None);
    }

    #[test]
    fn test_team_options_mark_selection() {
        let options = team_options(Some(147));
        assert_eq!(options.len(), 30);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
        assert!(options.iter().any(|o| o.selected && o.abbr == "NYY"));
        assert_eq!(abbr_for(Some(111)), "BOS");
        assert_eq!(abbr_for(None), "");
    }

    #[test]
    fn test_failed_widget_renders_message_and_refresh() {
        let mut scores: Widget<Scoreboard> =
            Widget::new("Scores", "Failed to load scores").polling(SCORES_POLL);
        scores.complete(Err(DashboardError::UpstreamStatus {
            status: 503,
            url: "http://upstream.test/scoreboard".to_string(),
        }));

        let html = ScoresTemplate {
            active_page: "scores",
            refresh_seconds: scores.poll_seconds(),
            scores,
        }
        .render()
        .unwrap();

        assert!(html.contains("Failed to load scores"));
        assert!(html.contains("Try Again"));
        assert!(html.contains(r#"http-equiv="refresh" content="30""#));
        assert!(!html.contains("upstream.test"));
    }

    #[test]
    fn test_live_game_card_is_highlighted() {
        let side = |name: &str, abbr: &str, score| TeamScore {
            name: name.to_string(),
            abbr: abbr.to_string(),
            score,
            logo: None,
        };
        let mut scores: Widget<Scoreboard> = Widget::new("Scores", "Failed to load scores");
        scores.complete(Ok(Scoreboard {
            games: vec![ScoreboardGame {
                id: "401".to_string(),
                home_team: side("New York Yankees", "NYY", 4),
                away_team: side("Boston Red Sox", "BOS", 2),
                state: GameState::Live,
                status: "Live".to_string(),
                inning: Some("Bot 7th".to_string()),
                start_time: None,
            }],
            last_updated: chrono::Utc::now(),
        }));

        let html = ScoresTemplate {
            active_page: "scores",
            refresh_seconds: None,
            scores,
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"class="score-card live""#));
        assert!(html.contains("Bot 7th"));
    }

    #[test]
    fn test_idle_matchup_shows_prompt() {
        let html = MatchupTemplate {
            active_page: "matchup",
            refresh_seconds: None,
            team1_abbr: "",
            team2_abbr: "",
            team1_options: team_options(None),
            team2_options: team_options(None),
            matchup: Widget::new("Matchup", "Failed to load matchup"),
        }
        .render()
        .unwrap();

        assert!(html.contains("Pick two teams"));
        assert!(!html.contains("http-equiv"));
    }
}
