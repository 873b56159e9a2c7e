//! Query parameter validation shared by the JSON routes and the HTML pages.
//! Empty values count as missing.

use crate::error::{DashboardError, Result};
use crate::models::LeagueFilter;
use crate::utils::leaders::{DEFAULT_LEADER_LIMIT, MAX_LEADER_LIMIT};
use chrono::{NaiveDate, Utc};

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

/// `YYYY-MM-DD`, defaulting to today (UTC)
pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate> {
    match present(raw) {
        None => Ok(Utc::now().date_naive()),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            DashboardError::InvalidParameter(format!("Invalid date (expected YYYY-MM-DD): {}", value))
        }),
    }
}

pub fn parse_league_filter(raw: Option<&str>) -> Result<LeagueFilter> {
    match present(raw) {
        None => Ok(LeagueFilter::All),
        Some(value) => value.parse().map_err(DashboardError::InvalidParameter),
    }
}

pub fn parse_limit(raw: Option<&str>) -> Result<usize> {
    let Some(value) = present(raw) else {
        return Ok(DEFAULT_LEADER_LIMIT);
    };

    match value.parse::<usize>() {
        Ok(limit) if (1..=MAX_LEADER_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(DashboardError::InvalidParameter(format!(
            "Limit must be between 1 and {}",
            MAX_LEADER_LIMIT
        ))),
    }
}

fn parse_id(value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| DashboardError::InvalidParameter(format!("Invalid team ID: {}", value)))
}

/// ESPN team id for the team-details route
pub fn require_team_id(raw: Option<&str>) -> Result<String> {
    let value = present(raw).ok_or(DashboardError::MissingParameter("Team ID is required"))?;
    parse_id(value).map(|id| id.to_string())
}

/// MLB team ids for the matchup route
pub fn require_matchup_ids(team1: Option<&str>, team2: Option<&str>) -> Result<(u32, u32)> {
    match (present(team1), present(team2)) {
        (Some(team1), Some(team2)) => {
            let ids = (parse_id(team1)?, parse_id(team2)?);
            if ids.0 == ids.1 {
                return Err(DashboardError::InvalidParameter(
                    "Team IDs must be different".to_string(),
                ));
            }
            Ok(ids)
        }
        _ => Err(DashboardError::MissingParameter("Both team IDs are required")),
    }
}
