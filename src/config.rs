use crate::error::{DashboardError, Result};
use chrono::{Datelike, Local};
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_MLB_STATS_API_URL: &str = "https://statsapi.mlb.com/api/v1";
pub const DEFAULT_ESPN_API_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/baseball/mlb";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_NEWS_LIMIT: usize = 8;

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub mlb_stats_api_url: String,
    pub espn_api_url: String,
    pub season: i32,
    pub news_limit: usize,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            addr: parse_var("DASHBOARD_ADDR", DEFAULT_ADDR)?,
            mlb_stats_api_url: string_var("MLB_STATS_API_URL", DEFAULT_MLB_STATS_API_URL),
            espn_api_url: string_var("ESPN_API_URL", DEFAULT_ESPN_API_URL),
            season: parse_var("MLB_SEASON", &Local::now().year().to_string())?,
            news_limit: parse_var("NEWS_LIMIT", &DEFAULT_NEWS_LIMIT.to_string())?,
            static_dir: string_var("STATIC_DIR", "static"),
        })
    }

    /// Point both upstream clients at a single base URL (used with mock servers)
    pub fn with_upstream(base_url: &str, season: i32) -> Self {
        Self {
            mlb_stats_api_url: base_url.trim_end_matches('/').to_string(),
            espn_api_url: base_url.trim_end_matches('/').to_string(),
            season,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            mlb_stats_api_url: DEFAULT_MLB_STATS_API_URL.to_string(),
            espn_api_url: DEFAULT_ESPN_API_URL.to_string(),
            season: Local::now().year(),
            news_limit: DEFAULT_NEWS_LIMIT,
            static_dir: "static".to_string(),
        }
    }
}

fn string_var(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T: FromStr>(name: &str, default: &str) -> Result<T> {
    let raw = string_var(name, default);
    raw.parse::<T>()
        .map_err(|_| DashboardError::Config(format!("{} has an invalid value: {}", name, raw)))
}
