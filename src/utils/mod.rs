pub mod data;
pub mod leaders;
pub mod matchup;
pub mod news;
pub mod schedule;
pub mod scores;
pub mod standings;
pub mod team_details;
pub mod team_directory;
pub mod teams;
