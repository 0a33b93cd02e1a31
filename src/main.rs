//! Maze Chase entry point
//!
//! Runs one session on the virtual clock with the autopilot steering and
//! prints each frame to the terminal.
//!
//! ```bash
//! # Watch a medium game in real time
//! maze-chase --difficulty medium --realtime
//!
//! # Reproducible headless run, final frame only
//! maze-chase --seed 42 --max-seconds 60 --quiet
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use maze_chase::render::{self, RenderStyle};
use maze_chase::session::{GameSession, SessionEvent};
use maze_chase::sim::GamePhase;
use maze_chase::{Difficulty, HighScores, Language, PlayerColor, Result, Settings};
use maze_chase::{autopilot, persistence};

/// Longest run the virtual clock accepts, in seconds
const MAX_SECONDS_LIMIT: u64 = 24 * 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "maze-chase")]
#[command(about = "Grid maze-chase arcade game played by the built-in autopilot")]
#[command(version)]
struct Args {
    /// Difficulty preset (easy, medium, hard); defaults to the saved setting
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// RNG seed; defaults to the saved seed, then the current time
    #[arg(short, long)]
    seed: Option<u64>,

    /// Interface language (en, tr)
    #[arg(short, long, value_parser = parse_language)]
    lang: Option<Language>,

    /// Player color (yellow, red, green, blue, pink)
    #[arg(short, long, value_parser = parse_color)]
    color: Option<PlayerColor>,

    /// Stop after this much virtual time
    #[arg(
        long,
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..=MAX_SECONDS_LIMIT)
    )]
    max_seconds: u64,

    /// Sleep one tick period between ticks
    #[arg(long)]
    realtime: bool,

    /// Print only the final frame
    #[arg(short, long)]
    quiet: bool,

    /// Plain text without ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn parse_difficulty(s: &str) -> std::result::Result<Difficulty, String> {
    Difficulty::parse(s).map_err(|e| e.to_string())
}

fn parse_language(s: &str) -> std::result::Result<Language, String> {
    Language::parse(s).ok_or_else(|| format!("unknown language: {s}"))
}

fn parse_color(s: &str) -> std::result::Result<PlayerColor, String> {
    PlayerColor::parse(s).ok_or_else(|| format!("unknown color: {s}"))
}

/// Virtual-time budget in milliseconds
fn run_limit_ms(max_seconds: u64) -> u64 {
    max_seconds.saturating_mul(1_000)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run(args: Args) -> Result<()> {
    let dir = persistence::data_dir();
    let mut settings = Settings::load(&dir);
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(language) = args.lang {
        settings.language = language;
    }
    if let Some(color) = args.color {
        settings.player_color = color;
    }
    let seed = args.seed.or(settings.seed).unwrap_or_else(time_seed);
    let max_ms = run_limit_ms(args.max_seconds);

    let scores = Rc::new(RefCell::new(HighScores::load(&dir)));
    let sink_scores = Rc::clone(&scores);
    let mut session = GameSession::new(settings.difficulty, seed).with_score_sink(
        move |difficulty, score| {
            sink_scores.borrow_mut().record(difficulty, score);
        },
    );
    log::info!(
        "Maze Chase starting: {} seed {}",
        settings.difficulty.as_str(),
        seed
    );

    let style = RenderStyle {
        language: settings.language,
        player_color: (settings.color_output && !args.no_color).then_some(settings.player_color),
        restart_hint: false,
    };
    let step_ms = session.profile().tick_period_ms;

    while !session.state().is_terminal() && session.now_ms() < max_ms {
        let intent = autopilot::choose_intent(session.state(), session.maze());
        session.set_intent(intent);
        let events = session.advance(step_ms);
        let ticked = events.iter().any(|e| matches!(e, SessionEvent::Ticked(_)));
        if ticked && !args.quiet {
            // clear screen and home the cursor
            print!("\x1b[2J\x1b[H{}", render::draw(session.state(), session.maze(), &style));
        }
        if args.realtime {
            std::thread::sleep(Duration::from_millis(step_ms));
        }
    }

    let state = session.state();
    if args.quiet || !state.is_terminal() {
        print!("{}", render::draw(state, session.maze(), &style));
    }
    match state.phase() {
        GamePhase::Active => log::info!(
            "Stopped after {}s with {} points",
            state.elapsed_secs,
            state.score
        ),
        phase => log::info!("Session ended ({:?}) with {} points", phase, state.score),
    }

    print!("{}", render::score_board(&scores.borrow(), settings.language));

    scores.borrow().save(&dir)?;
    settings.save(&dir)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("maze-chase: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("maze-chase").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_all_flags() {
        let args = parse(&[
            "--difficulty", "hard", "--seed", "7", "--lang", "tr", "--color", "green",
            "--max-seconds", "30", "-q",
        ])
        .unwrap();
        assert_eq!(args.difficulty, Some(Difficulty::Hard));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.lang, Some(Language::Tr));
        assert_eq!(args.color, Some(PlayerColor::Green));
        assert_eq!(args.max_seconds, 30);
        assert!(args.quiet);
        assert!(!args.realtime);
    }

    #[test]
    fn test_defaults_defer_to_settings() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.difficulty, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.max_seconds, 300);
        assert!(!args.no_color);
    }

    #[test]
    fn test_difficulty_aliases() {
        assert_eq!(parse(&["-d", "med"]).unwrap().difficulty, Some(Difficulty::Medium));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse(&["--seed", "abc"]).is_err());
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--difficulty", "insane"]).is_err());
        assert!(parse(&["--color", "purple"]).is_err());
        assert!(parse(&["--fullscreen"]).is_err());
    }

    #[test]
    fn test_max_seconds_is_bounded() {
        assert!(parse(&["--max-seconds", "0"]).is_err());
        assert!(parse(&["--max-seconds", "18446744073709551615"]).is_err());
        assert!(parse(&["--max-seconds", "86400"]).is_ok());
    }

    #[test]
    fn test_run_limit_saturates() {
        assert_eq!(run_limit_ms(30), 30_000);
        assert_eq!(run_limit_ms(u64::MAX), u64::MAX);
    }
}
