use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use eight_puzzle_search::{Algorithm, Heuristic, Outcome, Puzzle, PuzzleError, SearchResult};

#[derive(Parser)]
#[command(name = "eight-puzzle-search")]
#[command(about = "Uniform-cost and A* search over the 8-puzzle")]
struct Cli {
    /// Start board as nine digits, row-major, 0 for the blank.
    /// When omitted the goal is scrambled by a random walk.
    #[arg(long)]
    initial: Option<String>,

    #[arg(long, default_value = "123456780")]
    goal: String,

    #[arg(long, value_enum, default_value_t = AlgorithmChoice::All)]
    algorithm: AlgorithmChoice,

    /// Heuristic for --algorithm astar.
    #[arg(long, value_enum, default_value_t = HeuristicChoice::Manhattan)]
    heuristic: HeuristicChoice,

    /// Length of the random walk used to build the start board.
    #[arg(long, default_value_t = 20)]
    scramble: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// -v for debug logs, -vv for a line per expansion.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmChoice {
    Uc,
    Astar,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicChoice {
    Misplaced,
    Manhattan,
}

impl From<HeuristicChoice> for Heuristic {
    fn from(choice: HeuristicChoice) -> Self {
        match choice {
            HeuristicChoice::Misplaced => Heuristic::MisplacedTiles,
            HeuristicChoice::Manhattan => Heuristic::ManhattanDistance,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PuzzleError> {
    let goal = Puzzle::parse(&cli.goal)?;
    let initial = match &cli.initial {
        Some(s) => Puzzle::parse(s)?,
        None => {
            let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
            let mut rng = StdRng::seed_from_u64(seed);
            println!("Scrambled {} moves from the goal (seed {})", cli.scramble, seed);
            goal.scrambled(cli.scramble, &mut rng)
        }
    };

    println!("Initial Puzzle: {}\n{}", initial, initial.grid());
    println!("Goal Puzzle: {}\n{}", goal, goal.grid());

    if !initial.is_solvable_from(&goal) {
        println!(
            "{}",
            "Boards have opposite parity; the search will exhaust the reachable states."
                .yellow()
        );
    }

    let algorithms: Vec<Algorithm> = match cli.algorithm {
        AlgorithmChoice::Uc => vec![Algorithm::UniformCost],
        AlgorithmChoice::Astar => vec![Algorithm::AStar(cli.heuristic.into())],
        AlgorithmChoice::All => Algorithm::all().to_vec(),
    };

    for algorithm in algorithms {
        let result = algorithm.run(&initial, &goal);
        report(algorithm, &initial, &goal, &result)?;
    }

    Ok(())
}

fn report(
    algorithm: Algorithm,
    initial: &Puzzle,
    goal: &Puzzle,
    result: &SearchResult,
) -> Result<(), PuzzleError> {
    println!("{}", algorithm.to_string().bold().cyan());

    match result.outcome {
        Outcome::AlreadyAtGoal => println!("  already at goal"),
        Outcome::NoPath => println!("  {}", "no path found".red()),
        Outcome::Solved => {
            let reached = initial.apply_path(&result.path)? == *goal;
            let check = if reached {
                "verified".green()
            } else {
                "does not reach goal".red()
            };
            println!("  path: {} ({})", result.path, check);
        }
    }

    for line in result.stats.to_string().lines() {
        println!("  {}", line);
    }
    println!();
    Ok(())
}
