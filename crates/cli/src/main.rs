mod commands;
mod config;
#[cfg(test)]
mod test;
mod ui;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use leaderboard::{Leaderboard, LeaderboardOptions, SortOrder};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "leaderboard")]
#[command(about = "Rank, score and page members of a Redis-backed leaderboard")]
#[command(version)]
#[command(after_help = "Examples:
  leaderboard -b weekly rank alice 1200     Set alice's score
  leaderboard -b weekly --order desc top    Show the 10 highest scores
  leaderboard -b weekly rank-of alice       Show alice's rank and score
  leaderboard -b weekly page 2              Show the second page")]
struct Cli {
    /// Leaderboard name (the Redis key)
    #[arg(
        short,
        long,
        global = true,
        env = "LEADERBOARD_NAME",
        default_value = "leaderboard"
    )]
    board: String,

    /// Members per page (overrides LEADERBOARD_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Sort order, asc or desc (overrides LEADERBOARD_SORT_ORDER)
    #[arg(long, global = true)]
    order: Option<SortOrder>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set a member's score (adds the member if new)
    #[command(after_help = "Example: leaderboard rank alice 1200")]
    Rank {
        member: String,
        #[arg(allow_hyphen_values = true)]
        score: f64,
    },

    /// Add to a member's score (use a negative delta to subtract)
    #[command(after_help = "Example: leaderboard incr alice -- -50")]
    Incr {
        member: String,
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },

    /// Remove a member from the leaderboard
    #[command(after_help = "Example: leaderboard remove alice")]
    Remove { member: String },

    /// Delete the whole leaderboard
    #[command(after_help = "Example: leaderboard -b weekly delete")]
    Delete,

    /// Count members, optionally within an inclusive score range
    #[command(after_help = "Examples:
  leaderboard count                   All members
  leaderboard count --min 100         Members scoring 100 or more
  leaderboard count --min 10 --max 20 Members scoring 10 to 20")]
    Count {
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,
    },

    /// Show how many pages the leaderboard spans
    Pages,

    /// Show a member's rank and score
    #[command(after_help = "Example: leaderboard rank-of alice")]
    RankOf { member: String },

    /// Show a member's score
    #[command(after_help = "Example: leaderboard score alice")]
    Score { member: String },

    /// Show which page a member is on
    #[command(after_help = "Example: leaderboard page-of alice")]
    PageOf { member: String },

    /// Show the best members
    #[command(after_help = "Examples:
  leaderboard top              Top 10
  leaderboard top -n 3         Top 3
  leaderboard top -n 10 -o 10  Ranks 11 to 20")]
    Top {
        /// How many members to show
        #[arg(short = 'n', long, default_value_t = 10)]
        count: u64,
        /// How many members to skip
        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },

    /// Show one page of the leaderboard (1-based)
    #[command(after_help = "Example: leaderboard page 2")]
    Page {
        #[arg(default_value_t = 1)]
        page: u64,
    },

    /// Generate shell completions
    #[command(after_help = "Examples:
  leaderboard completions bash > ~/.bash_completion.d/leaderboard
  leaderboard completions zsh > ~/.zfunc/_leaderboard")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        ui::print_error(&err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = envy::prefixed("LEADERBOARD_").from_env::<Config>()?;
    init_tracing(&config);

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), "leaderboard", &mut std::io::stdout());
        return Ok(());
    }

    let options = LeaderboardOptions::new(&cli.board)
        .page_size(cli.page_size.unwrap_or(config.page_size))
        .sort_order(cli.order.unwrap_or(config.sort_order));
    let board = ui::spin(
        "Connecting...",
        Leaderboard::connect(&config.redis_url, options),
    )
    .await?;

    let json = cli.json;
    match cli.command {
        Commands::Rank { member, score } => commands::rank::run(&board, &member, score).await,
        Commands::Incr { member, delta } => commands::incr::run(&board, &member, delta).await,
        Commands::Remove { member } => commands::remove::run(&board, &member).await,
        Commands::Delete => commands::delete::run(&board).await,
        Commands::Count { min, max } => commands::count::run(&board, min, max, json).await,
        Commands::Pages => commands::pages::run(&board, json).await,
        Commands::RankOf { member } => commands::member::rank(&board, &member, json).await,
        Commands::Score { member } => commands::member::score(&board, &member, json).await,
        Commands::PageOf { member } => commands::member::page(&board, &member, json).await,
        Commands::Top { count, offset } => commands::top::run(&board, offset, count, json).await,
        Commands::Page { page } => commands::page::run(&board, page, json).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// Logs go to stderr so they never mix with command output.
/// JSON when LEADERBOARD_LOG_FORMAT=json, human-readable otherwise.
fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if config.json_logs() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_apply_to_subcommands() {
        let cli = Cli::try_parse_from([
            "leaderboard",
            "top",
            "-b",
            "weekly",
            "--order",
            "desc",
            "-n",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.board, "weekly");
        assert_eq!(cli.order, Some(SortOrder::Descending));
        assert!(matches!(cli.command, Commands::Top { count: 3, offset: 0 }));
    }

    #[test]
    fn rank_accepts_negative_scores() {
        let cli = Cli::try_parse_from(["leaderboard", "rank", "alice", "-12.5"]).unwrap();

        match cli.command {
            Commands::Rank { member, score } => {
                assert_eq!(member, "alice");
                assert_eq!(score, -12.5);
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn unknown_order_is_rejected() {
        let result = Cli::try_parse_from(["leaderboard", "--order", "sideways", "pages"]);

        assert!(result.is_err());
    }
}
