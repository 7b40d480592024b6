//! Draft Planner
//!
//! Command line entry point: plan an auction draft for an ESPN or Sleeper
//! league using price curves fitted to the league's earlier auctions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::info;

use draft_board::{DraftBoard, DraftSession, PricedPlayer, RosterSlot};
use draft_planner_service::{
    find_player, initialize_logging_with_config, load_configuration, PlannerService,
    PlannerSession,
};
use league_sources::{League, Platform};
use player_registry::PlayerRegistry;

#[derive(Parser)]
#[command(name = "draft-planner")]
#[command(about = "Auction draft planner for ESPN and Sleeper fantasy football leagues")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// League platform: espn or sleeper
    #[arg(short, long, global = true)]
    platform: Option<Platform>,

    /// League id on the platform
    #[arg(short, long, global = true)]
    league: Option<String>,

    /// Saved draft to work on
    #[arg(short, long, global = true)]
    draft: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit and print price curves from the league's earlier auctions
    Analyze,

    /// Show the roster, budget and best available players
    Board {
        /// Ranking source to price players with
        #[arg(long)]
        source: Option<String>,

        /// Positions to list (repeatable)
        #[arg(long = "position")]
        positions: Vec<String>,

        #[arg(long)]
        min_price: Option<u32>,

        #[arg(long)]
        max_price: Option<u32>,

        /// Number of players to list
        #[arg(long)]
        count: Option<usize>,

        /// Hide rostered and unaffordable players
        #[arg(long)]
        available_only: Option<bool>,

        /// Seasons used for price estimates, comma separated
        #[arg(long, value_delimiter = ',')]
        years: Option<Vec<i32>>,

        /// Weight (0-100) of the positional price curve
        #[arg(long)]
        weight: Option<u8>,

        /// Group the player list by position
        #[arg(long)]
        by_position: bool,
    },

    /// Add a player to the first suitable roster slot
    Assign {
        /// Player id or name
        player: String,

        /// Preferred slot, e.g. FLEX-0
        #[arg(long)]
        slot: Option<String>,
    },

    /// Put a player in a slot, or empty it when no player is given
    SetSlot {
        slot: String,

        /// Player id or name
        player: Option<String>,
    },

    /// Change a slot's cost by a number of dollars
    Adjust {
        slot: String,

        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },

    /// Empty every roster slot
    Reset,

    /// Save the draft under a new name and continue there
    Save { name: String },

    /// Delete the saved draft and empty its roster
    Delete,

    /// List the league's saved drafts
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = load_configuration(cli.config.as_deref())?;
    let _log_guard = initialize_logging_with_config(
        &config.logging.level,
        &config.logging.format,
        config.logging.file.as_deref(),
    )?;
    info!("Starting Draft Planner v{}", env!("CARGO_PKG_VERSION"));

    let platform = cli
        .platform
        .or(config.league.platform)
        .context("No platform given; pass --platform or set league.platform")?;
    let league_id = cli
        .league
        .clone()
        .or_else(|| config.league.league_id.clone())
        .context("No league given; pass --league or set league.league_id")?;
    let draft_name = cli.draft.clone().unwrap_or_else(|| config.league.draft_name.clone());

    let service = PlannerService::new(config, platform, &league_id).await?;

    match cli.command {
        Commands::Analyze => analyze(&service).await,
        Commands::List => list_drafts(&service, &draft_name).await,
        command => {
            let PlannerSession { league, players, mut session } =
                service.open_session(&draft_name).await?;
            println!(
                "{} {}",
                format!("{} ({} {})", league.name, league.platform, league.season).cyan().bold(),
                format!("[{}]", session.draft_name()).dimmed()
            );

            let result = run_draft_command(command, &league, &players, &mut session).await;

            // Flush any queued autosave before exiting
            session.close().await;
            result
        }
    }
}

async fn analyze(service: &PlannerService) -> Result<()> {
    let league = service.fetch_league().await?;
    let (teams, history) =
        tokio::join!(service.fetch_teams(&league), service.analyze_history(&league));
    let teams = teams?;
    let history = history?;

    let title = format!("{} ({} {})", league.name, league.platform, league.season);
    println!("{}", title.cyan().bold());
    println!("  {} teams, ${} budget", teams.len(), league.auction_budget);
    for team in &teams {
        match &team.owner {
            Some(owner) => println!("    {} ({})", team.name, owner.dimmed()),
            None => println!("    {}", team.name),
        }
    }
    println!();

    if history.is_empty() {
        println!("{}", "No auction drafts found in the league's history".yellow());
        return Ok(());
    }

    println!("{}", "Price curves: price = a * e^(b * rank)".bold());
    for (season, analysis) in history.iter().rev() {
        println!(
            "  {}  {:<6} a={:>7.2} b={:>8.4}",
            season.to_string().green().bold(),
            "ALL",
            analysis.overall.a,
            analysis.overall.b
        );
        for (position, curve) in &analysis.positions {
            println!("        {:<6} a={:>7.2} b={:>8.4}", position, curve.a, curve.b);
        }
    }
    Ok(())
}

async fn list_drafts(service: &PlannerService, current: &str) -> Result<()> {
    let names = service.list_drafts().await?;
    if names.is_empty() {
        println!("{}", "No saved drafts".yellow());
    }
    for name in names {
        if name == current {
            println!("* {}", name.green().bold());
        } else {
            println!("  {name}");
        }
    }
    Ok(())
}

async fn run_draft_command(
    command: Commands,
    league: &League,
    players: &PlayerRegistry,
    session: &mut DraftSession,
) -> Result<()> {
    match command {
        Commands::Board {
            source,
            positions,
            min_price,
            max_price,
            count,
            available_only,
            years,
            weight,
            by_position,
        } => {
            if let Some(source) = source {
                session.update(|board| board.select_ranking_source(&source))?;
            }

            let mut search = session.board().search_settings().clone();
            if !positions.is_empty() {
                search.positions = positions.into_iter().collect();
            }
            search.min_price = min_price.unwrap_or(search.min_price);
            search.max_price = max_price.unwrap_or(search.max_price);
            search.player_count = count.unwrap_or(search.player_count);
            search.show_only_available = available_only.unwrap_or(search.show_only_available);
            if &search != session.board().search_settings() {
                session.set_search_settings(search);
            }

            if years.is_some() || weight.is_some() {
                let mut estimation = session.board().estimation_settings().clone();
                estimation.years = years.unwrap_or(estimation.years);
                estimation.weight = weight.unwrap_or(estimation.weight);
                session.set_estimation_settings(estimation)?;
            }

            print_board(league, session.board(), by_position)
        }
        Commands::Assign { player, slot } => {
            let player = find_player(players, &player)?;
            let focused = slot.map(|slot| slot.parse::<RosterSlot>()).transpose()?;

            match session.on_player_click(&player.id, focused.as_ref())? {
                Some(slot) => {
                    println!("{} {} -> {}", "Rostered".green().bold(), player.full_name, slot)
                }
                None => println!("{} {}", "No open slot for".yellow(), player.full_name),
            }
            print_roster(session.board())
        }
        Commands::SetSlot { slot, player } => {
            let slot: RosterSlot = slot.parse()?;
            let player = player.map(|query| find_player(players, &query).cloned()).transpose()?;

            match &player {
                Some(player) => {
                    println!("{} {} -> {}", "Rostered".green().bold(), player.full_name, slot)
                }
                None => println!("{} {}", "Cleared".yellow().bold(), slot),
            }
            session.on_player_selected(&slot, player)?;
            print_roster(session.board())
        }
        Commands::Adjust { slot, delta } => {
            let slot: RosterSlot = slot.parse()?;
            session.on_cost_adjusted(&slot, delta)?;
            print_roster(session.board())
        }
        Commands::Reset => {
            session.reset_roster();
            println!("{}", "Roster reset".yellow().bold());
            print_budget(session.board())
        }
        Commands::Save { name } => {
            session.save_as(name.as_str()).await?;
            println!("{} {}", "Saved draft".green().bold(), name);
            Ok(())
        }
        Commands::Delete => {
            let name = session.draft_name().to_string();
            if session.delete().await? {
                println!("{} {}", "Deleted draft".red().bold(), name);
            } else {
                println!("{} {}", "No saved draft named".yellow(), name);
            }
            Ok(())
        }
        Commands::Analyze | Commands::List => Ok(()),
    }
}

fn print_board(league: &League, board: &DraftBoard, by_position: bool) -> Result<()> {
    let estimation = board.estimation_settings();
    println!(
        "Ranking: {}   Seasons: {:?}   Positional weight: {}%",
        board.active_ranking_source().unwrap_or("-").bold(),
        estimation.years,
        estimation.weight
    );
    println!();

    print_roster(board)?;
    println!();

    if by_position {
        for (position, players) in board.available_by_position()? {
            println!("{}", position.bold().underline());
            print_players(&players);
            println!();
        }
    } else {
        let spots: u32 = league.draftable_roster().values().sum();
        println!("{}", format!("Available ({spots} roster spots)").bold().underline());
        print_players(&board.available_players()?);
    }
    Ok(())
}

fn print_players(players: &[&PricedPlayer]) {
    for player in players {
        let positional = format!("{}{}", player.position(), player.display_position_rank());
        println!(
            "  {:>4}  {:<26} {:<7} {}",
            player.display_overall_rank().to_string().dimmed(),
            player.player().full_name,
            positional,
            format!("${:>3}", player.estimated_cost).green()
        );
    }
}

fn print_roster(board: &DraftBoard) -> Result<()> {
    for entry in board.roster()? {
        let name = match &entry.player {
            Some(player) => player.full_name.normal(),
            None => "-".dimmed(),
        };
        let adjustment = match entry.adjustment {
            0 => String::new(),
            delta => format!(" ({delta:+})"),
        };
        println!(
            "  {:<8} {:<26} {}{}",
            entry.slot.to_string().bold(),
            name,
            format!("${:>3}", entry.cost).green(),
            adjustment.yellow()
        );
    }
    print_budget(board)
}

fn print_budget(board: &DraftBoard) -> Result<()> {
    let remaining = board.remaining_budget()?;
    let remaining = if remaining < 0 {
        format!("${remaining}").red().bold()
    } else {
        format!("${remaining}").green().bold()
    };

    println!(
        "  Spent ${} of ${}   Remaining {}   Max bid ${}",
        board.budget_spent()?,
        board.auction_budget(),
        remaining,
        board.max_bid()?
    );
    Ok(())
}
