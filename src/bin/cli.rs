use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mlb_dashboard::params;
use mlb_dashboard::utils::data::{save_leaders_to_csv, save_standings_to_csv};
use mlb_dashboard::utils::team_directory::{self, Division};
use mlb_dashboard::utils::teams::filter_and_sort;
use mlb_dashboard::widget::{Widget, SCORES_POLL};
use mlb_dashboard::{Config, Dashboard, League, Scoreboard, ScheduleGame};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cli", about = "MLB scores, standings and stats in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Today's scoreboard
    Scores {
        /// Keep refreshing every 30 seconds until Ctrl+C
        #[arg(long)]
        watch: bool,
    },
    /// Division tables and wild card race
    Standings {
        #[arg(long, default_value = "AL")]
        league: String,
        #[arg(long)]
        csv: Option<String>,
    },
    /// Season stat leaders
    Leaders {
        /// all, AL or NL
        #[arg(long, default_value = "all")]
        league: String,
        #[arg(long)]
        limit: Option<String>,
        #[arg(long)]
        csv: Option<String>,
    },
    /// Games on a date (YYYY-MM-DD, default today)
    Schedule {
        #[arg(long)]
        date: Option<String>,
    },
    News,
    /// All clubs, optionally one division (e.g. al-east)
    Teams {
        #[arg(long)]
        division: Option<String>,
    },
    /// One club: ESPN id, MLB id or abbreviation
    Team { id: String },
    /// Season series between two clubs
    Matchup { team1: String, team2: String },
}

fn print_scoreboard(board: &Scoreboard) {
    if board.games.is_empty() {
        println!("No games today.");
        return;
    }

    for game in &board.games {
        let status = game.inning.as_deref().unwrap_or(&game.status);
        println!(
            "{:<4} {:>2}  @  {:<4} {:>2}   {}",
            game.away_team.abbr, game.away_team.score, game.home_team.abbr, game.home_team.score, status
        );
    }
    println!(
        "\nLast updated {}",
        board.last_updated.with_timezone(&chrono::Local).format("%-I:%M:%S %p")
    );
}

fn print_game_line(game: &ScheduleGame) {
    if game.state.is_scheduled() {
        println!(
            "{}  {} @ {}  ({} vs {})",
            game.official_date,
            game.away.name,
            game.home.name,
            game.away.probable_pitcher.as_deref().unwrap_or("TBD"),
            game.home.probable_pitcher.as_deref().unwrap_or("TBD")
        );
    } else {
        println!(
            "{}  {} {} @ {} {}  {}",
            game.official_date,
            game.away.name,
            game.away.score,
            game.home.name,
            game.home.score,
            game.detailed_state
        );
    }
}

async fn scores(dashboard: &Dashboard, watch: bool) -> Result<()> {
    if !watch {
        let board = dashboard.scores().await.context("Failed to fetch scores")?;
        print_scoreboard(&board);
        return Ok(());
    }

    let mut widget = Widget::new("Scores", "Failed to load scores").polling(SCORES_POLL);
    let mut ticker = tokio::time::interval(SCORES_POLL);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                widget.refresh(dashboard.scores()).await;
                println!("\n{}\n", widget.title());
                match (widget.data(), widget.error()) {
                    (Some(board), _) => print_scoreboard(board),
                    (None, Some(message)) => eprintln!("{}", message),
                    (None, None) => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopped watching scores");
                return Ok(());
            }
        }
    }
}

async fn standings(dashboard: &Dashboard, league: &str, csv: Option<String>) -> Result<()> {
    let league: League = league.parse().map_err(|e: String| anyhow!(e))?;
    let standings = dashboard
        .standings()
        .await
        .context("Failed to fetch standings")?;
    let table = standings.league(league);

    println!("{}\n", table.name);
    for division in &table.divisions {
        println!("{}", division.name);
        println!("  {:<26} {:>3} {:>3} {:>6} {:>5}", "Team", "W", "L", "PCT", "GB");
        for team in &division.teams {
            println!(
                "  {:<26} {:>3} {:>3} {:>6.3} {:>5.1}",
                team.name, team.wins, team.losses, team.win_pct, team.games_back
            );
        }
        println!();
    }

    println!("Wild Card");
    for (i, team) in table.wildcard.iter().enumerate() {
        let marker = if team.is_wildcard { "*" } else { " " };
        println!(
            "{} {}. {:<26} {:>3}-{:<3} {:>5.1}",
            marker,
            i + 1,
            team.name,
            team.wins,
            team.losses,
            team.wildcard_games_back.unwrap_or(0.0)
        );
    }

    if let Some(path) = csv {
        save_standings_to_csv(table, &path)?;
        println!("\nSaved standings to {}", path);
    }

    Ok(())
}

async fn leaders(dashboard: &Dashboard, league: &str, limit: Option<String>, csv: Option<String>) -> Result<()> {
    let league = params::parse_league_filter(Some(league))?;
    let limit = params::parse_limit(limit.as_deref())?;
    let leaders = dashboard
        .stat_leaders(league, limit)
        .await
        .context("Failed to fetch stat leaders")?;

    println!("{} Leaders ({})\n", leaders.season, leaders.league);
    for category in &leaders.categories {
        println!("{}", category.title);
        if category.leaders.is_empty() {
            println!("  No qualified players.");
        }
        for leader in &category.leaders {
            println!(
                "  {:>2}. {:<24} {:<24} {:>6}",
                leader.rank, leader.player_name, leader.team_name, leader.display_value
            );
        }
        println!();
    }

    if let Some(path) = csv {
        save_leaders_to_csv(&leaders, &path)?;
        println!("Saved leaders to {}", path);
    }

    Ok(())
}

async fn schedule(dashboard: &Dashboard, date: Option<String>) -> Result<()> {
    let date = params::parse_date(date.as_deref())?;
    let day = dashboard
        .schedule(date)
        .await
        .context("Failed to fetch schedule")?;

    println!("{} games on {}\n", day.total_games, day.date);
    for game in &day.games {
        print_game_line(game);
    }
    Ok(())
}

async fn news(dashboard: &Dashboard) -> Result<()> {
    let items = dashboard.news().await.context("Failed to fetch news")?;
    if items.is_empty() {
        println!("No news available right now.");
    }
    for (i, item) in items.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, item.category, item.title);
        if !item.subtitle.is_empty() {
            println!("   {}", item.subtitle);
        }
        println!("   {}", item.link);
    }
    Ok(())
}

async fn teams(dashboard: &Dashboard, division: Option<String>) -> Result<()> {
    let division = match division.as_deref() {
        Some(slug) => Some(
            Division::from_slug(slug).ok_or_else(|| anyhow!("Unknown division: {}", slug))?,
        ),
        None => None,
    };

    let all = dashboard.teams().await.context("Failed to fetch teams")?;
    for team in filter_and_sort(&all, division.map(|d| d.slug())) {
        println!(
            "{:<4} {:<28} {:>3}-{:<3} {}",
            team.abbr, team.name, team.wins, team.losses, team.standing_summary
        );
    }
    Ok(())
}

async fn team(dashboard: &Dashboard, key: &str) -> Result<()> {
    let entry = team_directory::resolve(key).ok_or_else(|| anyhow!("Unknown team: {}", key))?;
    let details = dashboard
        .team_details(entry.espn_id)
        .await
        .context("Failed to fetch team details")?;

    match &details.team_info {
        Some(info) => println!("{} ({})\n{}\n", info.name, info.abbr, info.standing_summary),
        None => println!("{}\n", entry.abbr),
    }

    println!("Recent games");
    for game in &details.last_games {
        print_game_line(game);
    }
    if let Some(game) = &details.next_game {
        println!("\nNext game");
        print_game_line(game);
    }

    println!("\nActive roster ({} players)", details.roster.len());
    for player in &details.roster {
        println!(
            "  {:>3} {:<28} {}",
            player.jersey_number.as_deref().unwrap_or("-"),
            player.full_name,
            player.position
        );
    }
    Ok(())
}

async fn matchup(dashboard: &Dashboard, team1: &str, team2: &str) -> Result<()> {
    let first = team_directory::resolve(team1).ok_or_else(|| anyhow!("Unknown team: {}", team1))?;
    let second = team_directory::resolve(team2).ok_or_else(|| anyhow!("Unknown team: {}", team2))?;
    let (team1_id, team2_id) = params::require_matchup_ids(
        Some(&first.mlb_id.to_string()),
        Some(&second.mlb_id.to_string()),
    )?;

    let matchup = dashboard
        .matchup(team1_id, team2_id)
        .await
        .context("Failed to fetch matchup")?;

    println!(
        "{} season series: {} {} - {} {}\n",
        matchup.season, first.abbr, matchup.record.team1_wins, second.abbr, matchup.record.team2_wins
    );
    for game in &matchup.games {
        print_game_line(game);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let dashboard = Dashboard::new(config);

    match cli.command {
        Command::Scores { watch } => scores(&dashboard, watch).await,
        Command::Standings { league, csv } => standings(&dashboard, &league, csv).await,
        Command::Leaders { league, limit, csv } => leaders(&dashboard, &league, limit, csv).await,
        Command::Schedule { date } => schedule(&dashboard, date).await,
        Command::News => news(&dashboard).await,
        Command::Teams { division } => teams(&dashboard, division).await,
        Command::Team { id } => team(&dashboard, &id).await,
        Command::Matchup { team1, team2 } => matchup(&dashboard, &team1, &team2).await,
    }
}
