use crate::models::{Matchup, MatchupRecord, ScheduleGame};

/// Keep only games in `schedule` that involve `opponent_id`
pub fn head_to_head_games(schedule: Vec<ScheduleGame>, opponent_id: u32) -> Vec<ScheduleGame> {
    schedule
        .into_iter()
        .filter(|g| g.involves(opponent_id))
        .collect()
}

/// Tally finished games by score. Scheduled and in-progress games are skipped;
/// every finished game credits exactly one side, so the total equals the
/// number of finished games.
pub fn tally_record(games: &[ScheduleGame], team1_id: u32) -> MatchupRecord {
    let mut record = MatchupRecord::default();

    for game in games.iter().filter(|g| g.state.is_final()) {
        let team1_won = match game.scores_for(team1_id) {
            Some((team1_score, opponent_score)) => team1_score > opponent_score,
            None => false,
        };

        if team1_won {
            record.team1_wins += 1;
        } else {
            record.team2_wins += 1;
        }

        tracing::debug!(
            "Game {}: {} {} @ {} {} - team1 won: {}",
            game.game_pk,
            game.away.name,
            game.away.score,
            game.home.name,
            game.home.score,
            team1_won
        );
    }

    record
}

/// Head-to-head view of `team1_id` vs `team2_id` from team1's season schedule
pub fn matchup(team1_id: u32, team2_id: u32, season: i32, schedule: Vec<ScheduleGame>) -> Matchup {
    let games = head_to_head_games(schedule, team2_id);
    let record = tally_record(&games, team1_id);

    tracing::info!(
        "Found {} games between teams {} and {} (record {}-{})",
        games.len(),
        team1_id,
        team2_id,
        record.team1_wins,
        record.team2_wins
    );

    Matchup {
        team1_id,
        team2_id,
        season,
        games,
        record,
    }
}
