use crate::api::mlb_stats_api::ScheduleResponse;
use crate::models::{DaySchedule, ScheduleGame};
use chrono::NaiveDate;

/// Games played on `date`. Upstream may return neighbouring dates (or games
/// whose official date moved after a postponement), so both the date bucket
/// and each game's official date must match.
pub fn day_schedule(date: NaiveDate, response: ScheduleResponse) -> DaySchedule {
    let wanted = date.format("%Y-%m-%d").to_string();

    let games: Vec<ScheduleGame> = response
        .dates
        .into_iter()
        .filter(|d| d.date == wanted)
        .flat_map(|d| d.games)
        .map(ScheduleGame::from)
        .filter(|g| g.official_date == wanted)
        .collect();

    DaySchedule {
        date: wanted,
        total_games: games.len(),
        games,
    }
}
