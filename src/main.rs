//! Tennis score tracker - main binary
//!
//! Scores scripted matches, simulates seeded matches and runs tournaments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tennis_score::{
    core::{MatchFormat, Player},
    scoring::{
        start_match, MatchEndReason, MatchLoop, MatchResult, OutputFormat, RallyController,
        RandomRallyController, ScoreView, ScriptedRallyController, VerbosityLevel,
    },
    tournament::{print_report, run_tourney, TournamentConfig},
    Result, TennisError,
};

/// Verbosity level for match output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Match format flags shared by every subcommand
#[derive(Debug, Clone, Args)]
struct FormatArgs {
    /// Number of sets (odd: 1, 3, 5, ...)
    #[arg(long, short = 'b', default_value_t = 3)]
    best_of: u32,

    /// Play the deciding set as an advantage set (no tiebreak at 6-6)
    #[arg(long)]
    no_final_tiebreak: bool,

    /// Record the match with the advantage-set option off (informational;
    /// the deciding set format follows --no-final-tiebreak)
    #[arg(long)]
    no_advantage_set: bool,
}

impl From<&FormatArgs> for MatchFormat {
    fn from(args: &FormatArgs) -> Self {
        MatchFormat::new(args.best_of, !args.no_advantage_set, !args.no_final_tiebreak)
    }
}

#[derive(Parser)]
#[command(name = "tennis")]
#[command(about = "Tennis score tracker - points, games, sets and matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a scripted sequence of points
    Score {
        /// Point winners, e.g. "1 1 2 p2 p1" (whitespace or comma separated)
        #[arg(long, short = 'p', required_unless_present = "points_file")]
        points: Option<String>,

        /// Read the point script from a file ('#' starts a comment)
        #[arg(long, value_name = "FILE", conflicts_with = "points")]
        points_file: Option<PathBuf>,

        /// Player 1 name
        #[arg(long, default_value = "Player 1")]
        p1_name: String,

        /// Player 2 name
        #[arg(long, default_value = "Player 2")]
        p2_name: String,

        #[command(flatten)]
        format: FormatArgs,

        /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Print the final match state as JSON instead of a scoreboard
        #[arg(long)]
        json: bool,

        /// Print match events as JSON lines
        #[arg(long)]
        json_log: bool,

        /// Fail if the script has points left over after the match is decided
        #[arg(long)]
        strict: bool,

        /// Only print the last N match events once the match ends
        #[arg(long, value_name = "N")]
        log_tail: Option<usize>,
    },

    /// Simulate one match with seeded random points
    Simulate {
        /// Random seed for deterministic simulation
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Probability that player 1 wins any given point
        #[arg(long, default_value_t = 0.5)]
        p1_win_prob: f64,

        /// Player 1 name
        #[arg(long, default_value = "Player 1")]
        p1_name: String,

        /// Player 2 name
        #[arg(long, default_value = "Player 2")]
        p2_name: String,

        #[command(flatten)]
        format: FormatArgs,

        /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Stop the simulation after this many points
        #[arg(long, default_value_t = 100_000)]
        max_points: u32,

        /// Only print the last N match events once the match ends
        #[arg(long, value_name = "N")]
        log_tail: Option<usize>,
    },

    /// Run many simulated matches in parallel and report statistics
    Tourney {
        /// Number of matches to play
        #[arg(long, short = 'm', default_value_t = 1000)]
        matches: usize,

        /// Tournament seed (each match derives its own)
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Probability that player 1 wins any given point
        #[arg(long, default_value_t = 0.5)]
        p1_win_prob: f64,

        #[command(flatten)]
        format: FormatArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            points,
            points_file,
            p1_name,
            p2_name,
            format,
            verbosity,
            json,
            json_log,
            strict,
            log_tail,
        } => {
            let script = match (points, points_file) {
                (Some(points), _) => points,
                (None, Some(path)) => std::fs::read_to_string(&path).map_err(|e| {
                    TennisError::ParseError(format!("cannot read {}: {e}", path.display()))
                })?,
                (None, None) => String::new(),
            };
            let output = ScoreOutput {
                verbosity: verbosity.into(),
                json,
                json_log,
                log_tail,
            };
            run_score(&script, p1_name, p2_name, (&format).into(), output, strict)
        }
        Commands::Simulate {
            seed,
            p1_win_prob,
            p1_name,
            p2_name,
            format,
            verbosity,
            max_points,
            log_tail,
        } => run_simulate(
            seed,
            p1_win_prob,
            p1_name,
            p2_name,
            (&format).into(),
            max_points,
            verbosity.into(),
            log_tail,
        ),
        Commands::Tourney {
            matches,
            seed,
            p1_win_prob,
            format,
        } => {
            let config = TournamentConfig {
                matches,
                seed,
                p1_point_probability: p1_win_prob,
                format: (&format).into(),
            };
            let report = run_tourney(&config)?;
            print_report(&config, &report);
            Ok(())
        }
    }
}

/// How `score` reports the match
struct ScoreOutput {
    verbosity: VerbosityLevel,
    json: bool,
    json_log: bool,
    log_tail: Option<usize>,
}

/// Play a match to its end, holding events back when only a tail is wanted
fn play(
    match_loop: &mut MatchLoop<'_>,
    controller: &mut dyn RallyController,
    log_tail: Option<usize>,
) -> Result<MatchResult> {
    if log_tail.is_some() {
        match_loop.logger.enable_capture();
    }
    let result = match_loop.run_match(controller)?;
    if let Some(tail_lines) = log_tail {
        match_loop.logger.flush_tail(tail_lines);
    }
    Ok(result)
}

fn run_score(
    script: &str,
    p1_name: String,
    p2_name: String,
    format: MatchFormat,
    output: ScoreOutput,
    strict: bool,
) -> Result<()> {
    let mut controller = ScriptedRallyController::from_script(script)?;
    let mut tennis_match = start_match(p1_name, p2_name, format)?;

    // JSON output replaces the event log
    let json = output.json;
    let verbosity = if json { VerbosityLevel::Silent } else { output.verbosity };
    let mut match_loop = MatchLoop::new(&mut tennis_match).with_verbosity(verbosity);
    if output.json_log {
        match_loop.logger.set_output_format(OutputFormat::Json);
    }
    let result = play(&mut match_loop, &mut controller, output.log_tail)?;

    if strict && controller.remaining() > 0 {
        return Err(TennisError::InvalidState(format!(
            "{} point(s) left in the script after the match ended",
            controller.remaining()
        )));
    }

    if json {
        let rendered = serde_json::to_string_pretty(&tennis_match)
            .map_err(|e| TennisError::SerializationError(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    if verbosity >= VerbosityLevel::Minimal {
        println!();
        println!("{}", ScoreView::new(&tennis_match).scoreboard());
        if result.end_reason == MatchEndReason::OutOfPoints {
            println!("(match in progress after {} points)", result.points_played);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_simulate(
    seed: u64,
    p1_win_prob: f64,
    p1_name: String,
    p2_name: String,
    format: MatchFormat,
    max_points: u32,
    verbosity: VerbosityLevel,
    log_tail: Option<usize>,
) -> Result<()> {
    let mut controller = RandomRallyController::with_seed(seed).with_probability(p1_win_prob)?;
    let mut tennis_match = start_match(p1_name, p2_name, format)?;

    let mut match_loop = MatchLoop::new(&mut tennis_match)
        .with_verbosity(verbosity)
        .with_max_points(max_points);
    let result = play(&mut match_loop, &mut controller, log_tail)?;

    if verbosity >= VerbosityLevel::Minimal {
        let view = ScoreView::new(&tennis_match);
        println!();
        println!("{}", view.scoreboard());
        if result.end_reason == MatchEndReason::PointLimit {
            println!("(stopped after {} points)", result.points_played);
        }
        println!("Points played: {}", result.points_played);
        println!(
            "Sets: {}-{}",
            view.sets_won(Player::One),
            view.sets_won(Player::Two)
        );
    }
    Ok(())
}
