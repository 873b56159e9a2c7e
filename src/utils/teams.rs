use crate::api::espn_api::{EspnTeam, TeamsResponse};
use crate::models::Team;
use crate::utils::team_directory;

const DEFAULT_COLOR: &str = "003087";
const DEFAULT_ALTERNATE_COLOR: &str = "FFFFFF";

pub fn primary_color(color: Option<&str>) -> String {
    format!("#{}", color.filter(|c| !c.is_empty()).unwrap_or(DEFAULT_COLOR))
}

pub fn alternate_color(color: Option<&str>) -> String {
    format!(
        "#{}",
        color.filter(|c| !c.is_empty()).unwrap_or(DEFAULT_ALTERNATE_COLOR)
    )
}

fn record_stat(team: &EspnTeam, name: &str) -> u32 {
    team.record
        .as_ref()
        .and_then(|r| r.items.first())
        .and_then(|item| item.stats.iter().find(|s| s.name == name))
        .and_then(|s| s.value)
        .map(|v| v.round().max(0.0) as u32)
        .unwrap_or(0)
}

pub const PLACEHOLDER_LOGO: &str = "/static/placeholder.svg";

pub fn team(espn: EspnTeam) -> Team {
    let logo = espn
        .logo_url()
        .unwrap_or_else(|| PLACEHOLDER_LOGO.to_string());
    let directory = team_directory::by_espn_id(&espn.id);

    Team {
        mlb_id: directory.map(|d| d.mlb_id),
        division: team_directory::division_slug(&espn.id).to_string(),
        wins: record_stat(&espn, "wins"),
        losses: record_stat(&espn, "losses"),
        logo,
        color: primary_color(espn.color.as_deref()),
        alternate_color: alternate_color(espn.alternate_color.as_deref()),
        abbr: espn.abbreviation.unwrap_or_default(),
        location: espn.location.unwrap_or_default(),
        nickname: espn.name.unwrap_or_default(),
        standing_summary: espn.standing_summary.unwrap_or_default(),
        id: espn.id,
        name: espn.display_name.unwrap_or_default(),
    }
}

pub fn teams(response: TeamsResponse) -> Vec<Team> {
    response.into_teams().into_iter().map(team).collect()
}

/// Teams of one division (or all), most wins first
pub fn filter_and_sort(teams: &[Team], division: Option<&str>) -> Vec<Team> {
    let mut selected: Vec<Team> = teams
        .iter()
        .filter(|t| division.map_or(true, |d| t.division == d))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.wins.cmp(&a.wins));
    selected
}
