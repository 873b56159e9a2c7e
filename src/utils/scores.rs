use crate::api::espn_api::{EspnCompetitor, EspnEvent, ScoreboardResponse};
use crate::api::value_as_f64;
use crate::models::{GameState, ScoreboardGame, TeamScore};
use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// ESPN dates come as full RFC 3339 or as minute precision ("2025-06-01T17:05Z")
pub fn parse_espn_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

fn team_score(competitor: Option<&EspnCompetitor>) -> TeamScore {
    let team = competitor.and_then(|c| c.team.as_ref());
    let score = competitor
        .and_then(|c| c.score.as_ref())
        .and_then(value_as_f64)
        .unwrap_or(0.0);

    TeamScore {
        name: team
            .and_then(|t| t.display_name.clone())
            .unwrap_or_else(|| "TBD".to_string()),
        abbr: team
            .and_then(|t| t.abbreviation.clone())
            .unwrap_or_else(|| "TBD".to_string()),
        score: score.max(0.0) as u32,
        logo: team.and_then(|t| t.logo_url()),
    }
}

/// Convert one scoreboard event into our game view
pub fn scoreboard_game(event: &EspnEvent) -> ScoreboardGame {
    let competition = event.competitions.first();
    let find_side = |side: &str| {
        competition.and_then(|c| {
            c.competitors
                .iter()
                .find(|t| t.home_away.as_deref() == Some(side))
        })
    };
    let status = competition
        .and_then(|c| c.status.as_ref())
        .and_then(|s| s.status_type.as_ref());
    let start_time = event.date.as_deref().and_then(parse_espn_date);

    let (state, display, inning) = match status {
        Some(s) if s.completed => (GameState::Final, "Final".to_string(), None),
        Some(s) if s.state.as_deref() == Some("in") => (
            GameState::Live,
            "Live".to_string(),
            s.detail.clone().or_else(|| s.short_detail.clone()),
        ),
        Some(s) if s.state.as_deref() == Some("pre") => {
            let display = start_time
                .map(|t| t.with_timezone(&Local).format("%-I:%M %p").to_string())
                .unwrap_or_else(|| "Scheduled".to_string());
            (GameState::Scheduled, display, None)
        }
        _ => (GameState::Scheduled, "Scheduled".to_string(), None),
    };

    ScoreboardGame {
        id: event.id.clone(),
        home_team: team_score(find_side("home")),
        away_team: team_score(find_side("away")),
        state,
        status: display,
        inning,
        start_time,
    }
}

pub fn scoreboard_games(response: &ScoreboardResponse) -> Vec<ScoreboardGame> {
    response.events.iter().map(scoreboard_game).collect()
}
