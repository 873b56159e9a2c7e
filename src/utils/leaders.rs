use crate::api::mlb_stats_api::StatSplit;
use crate::api::value_as_f64;
use crate::models::{StatCategory, StatLeader};
use std::cmp::Ordering;

pub const DEFAULT_LEADER_LIMIT: usize = 5;
pub const MAX_LEADER_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Counting stats and averages: higher is better
    Descending,
    /// ERA: lower is better
    Ascending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// ".312"
    Average,
    /// "2.45"
    TwoDecimals,
    /// "42"
    Count,
}

/// A leaderboard we build from one `/stats` call
#[derive(Debug, Clone, Copy)]
pub struct CategoryDef {
    /// Field name inside a split's `stat` object
    pub key: &'static str,
    pub title: &'static str,
    pub group: &'static str,
    /// `sortStat` query value
    pub sort_stat: &'static str,
    pub direction: SortDirection,
    pub precision: Precision,
}

pub const CATEGORIES: [CategoryDef; 6] = [
    CategoryDef {
        key: "avg",
        title: "Batting Average",
        group: "hitting",
        sort_stat: "battingAverage",
        direction: SortDirection::Descending,
        precision: Precision::Average,
    },
    CategoryDef {
        key: "homeRuns",
        title: "Home Runs",
        group: "hitting",
        sort_stat: "homeRuns",
        direction: SortDirection::Descending,
        precision: Precision::Count,
    },
    CategoryDef {
        key: "rbi",
        title: "RBI",
        group: "hitting",
        sort_stat: "runsBattedIn",
        direction: SortDirection::Descending,
        precision: Precision::Count,
    },
    CategoryDef {
        key: "era",
        title: "ERA",
        group: "pitching",
        sort_stat: "earnedRunAverage",
        direction: SortDirection::Ascending,
        precision: Precision::TwoDecimals,
    },
    CategoryDef {
        key: "wins",
        title: "Wins",
        group: "pitching",
        sort_stat: "wins",
        direction: SortDirection::Descending,
        precision: Precision::Count,
    },
    CategoryDef {
        key: "strikeOuts",
        title: "Strikeouts",
        group: "pitching",
        sort_stat: "strikeouts",
        direction: SortDirection::Descending,
        precision: Precision::Count,
    },
];

pub fn format_stat(value: f64, precision: Precision) -> String {
    match precision {
        Precision::Average => {
            let formatted = format!("{:.3}", value);
            match formatted.strip_prefix('0') {
                Some(rest) => rest.to_string(),
                None => formatted,
            }
        }
        Precision::TwoDecimals => format!("{:.2}", value),
        Precision::Count => format!("{}", value.round() as i64),
    }
}

/// Rank the splits for one category: drop zero or missing values, sort in the
/// category's direction, keep the top `limit`
pub fn rank_leaders(def: &CategoryDef, splits: &[StatSplit], limit: usize) -> Vec<StatLeader> {
    let mut candidates: Vec<(&StatSplit, f64)> = splits
        .iter()
        .filter_map(|split| {
            let value = split.stat.get(def.key).and_then(value_as_f64)?;
            (value > 0.0).then_some((split, value))
        })
        .collect();

    candidates.sort_by(|(_, a), (_, b)| {
        let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match def.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    candidates.truncate(limit);

    candidates
        .into_iter()
        .enumerate()
        .map(|(i, (split, value))| StatLeader {
            rank: i + 1,
            player_name: split.player.full_name.clone(),
            team_name: split.team.name.clone(),
            value,
            display_value: format_stat(value, def.precision),
        })
        .collect()
}

pub fn stat_category(def: &CategoryDef, splits: &[StatSplit], limit: usize) -> StatCategory {
    StatCategory {
        key: def.key.to_string(),
        title: def.title.to_string(),
        group: def.group.to_string(),
        leaders: rank_leaders(def, splits, limit),
    }
}
