//! Session controller
//!
//! Owns exactly one [`GameState`] at a time together with the maze, the
//! difficulty profile, the random source and the timers that drive it.
//! The host feeds wall-clock time in through [`GameSession::advance`];
//! everything else happens on the virtual clock inside.

use crate::consts::{CLOCK_PERIOD_MS, POWER_DURATION_MS};
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::sim::{
    Adversary, Direction, GamePhase, GameState, Maze, Player, RandomSource, SimRng, TickReport,
    TimerHandle, TimerKind, Timers, tick,
};

/// Receives the final score once per finished session
pub type ScoreSink = Box<dyn FnMut(Difficulty, u64)>;
/// Receives the state after every tick
pub type FrameObserver = Box<dyn FnMut(&GameState)>;

/// Notable things that happened while advancing time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Ticked(TickReport),
    SecondElapsed(u64),
    PowerExpired,
    Ended { phase: GamePhase, score: u64 },
}

/// Spawn layout a restart rebuilds from
#[derive(Debug, Clone)]
struct Spawns {
    player: Player,
    adversaries: Vec<Adversary>,
}

pub struct GameSession {
    difficulty: Difficulty,
    profile: DifficultyProfile,
    maze: Maze,
    spawns: Spawns,
    state: GameState,
    rng: Box<dyn RandomSource>,
    timers: Timers,
    tick_timer: Option<TimerHandle>,
    clock_timer: Option<TimerHandle>,
    power_timer: Option<TimerHandle>,
    score_sink: Option<ScoreSink>,
    frame_observer: Option<FrameObserver>,
    reported: bool,
    /// Bumped on every restart or difficulty change
    generation: u64,
}

impl GameSession {
    /// New session on the reference maze with a seeded generator
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let maze = Maze::reference();
        let state = GameState::new(&maze, &difficulty.profile());
        Self::from_state(maze, difficulty, state, Box::new(SimRng::new(seed)))
    }

    /// Session on a custom maze and entity layout. Restarts rebuild from the
    /// player and adversaries of `state` as given here.
    pub fn from_state(
        maze: Maze,
        difficulty: Difficulty,
        state: GameState,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let spawns = Spawns {
            player: state.player.clone(),
            adversaries: state.adversaries.clone(),
        };
        let mut session = Self {
            difficulty,
            profile: difficulty.profile(),
            maze,
            spawns,
            state,
            rng,
            timers: Timers::new(),
            tick_timer: None,
            clock_timer: None,
            power_timer: None,
            score_sink: None,
            frame_observer: None,
            reported: false,
            generation: 0,
        };
        session.arm_session_timers();
        log::info!(
            "Session started: {} ({} items, {} power items)",
            difficulty.as_str(),
            session.state.items.len(),
            session.state.power_items.len()
        );
        session
    }

    pub fn with_score_sink(mut self, sink: impl FnMut(Difficulty, u64) + 'static) -> Self {
        self.score_sink = Some(Box::new(sink));
        self
    }

    pub fn with_frame_observer(mut self, observer: impl FnMut(&GameState) + 'static) -> Self {
        self.frame_observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Virtual time of the next scheduled effect, if any
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Buffer a directional intent; only the latest is kept
    pub fn set_intent(&mut self, direction: Direction) {
        if direction != Direction::None {
            self.state.player.desired_direction = direction;
        }
    }

    /// Discard the current session and start over on the same difficulty
    pub fn restart(&mut self) {
        self.reset(self.difficulty);
    }

    /// Start a fresh session on a (possibly) different difficulty
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.reset(difficulty);
    }

    fn reset(&mut self, difficulty: Difficulty) {
        self.timers.cancel_all();
        self.tick_timer = None;
        self.clock_timer = None;
        self.power_timer = None;

        self.difficulty = difficulty;
        self.profile = difficulty.profile();
        self.state = GameState::with_entities(
            &self.maze,
            &self.profile,
            self.spawns.player.clone(),
            self.spawns.adversaries.clone(),
        );
        self.reported = false;
        self.generation += 1;
        self.arm_session_timers();
        log::info!(
            "Session restarted: {} (generation {})",
            difficulty.as_str(),
            self.generation
        );
    }

    fn arm_session_timers(&mut self) {
        self.tick_timer = Some(
            self.timers
                .schedule_repeating(TimerKind::Tick, self.profile.tick_period_ms),
        );
        self.clock_timer = Some(
            self.timers
                .schedule_repeating(TimerKind::Clock, CLOCK_PERIOD_MS),
        );
    }

    /// Advance the virtual clock by `dt_ms`, running every effect that
    /// comes due in order
    pub fn advance(&mut self, dt_ms: u64) -> Vec<SessionEvent> {
        let until = self.timers.now_ms() + dt_ms;
        let mut events = Vec::new();

        while let Some(fired) = self.timers.pop_due(until) {
            match fired.kind {
                TimerKind::Tick => self.on_tick(&mut events),
                TimerKind::Clock => self.on_clock(&mut events),
                TimerKind::PowerExpiry => self.on_power_expiry(fired.handle, &mut events),
            }
        }
        self.timers.set_now(until);
        events
    }

    /// Advance until the session ends or `limit_ms` of virtual time passes
    pub fn run_until_terminal(&mut self, limit_ms: u64) -> GamePhase {
        let deadline = self.timers.now_ms() + limit_ms;
        while !self.state.is_terminal() {
            let Some(next) = self.timers.next_due() else {
                break;
            };
            if next > deadline {
                break;
            }
            self.advance(next - self.timers.now_ms());
        }
        self.state.phase()
    }

    fn on_tick(&mut self, events: &mut Vec<SessionEvent>) {
        let report = tick(&mut self.state, &self.maze, &self.profile, self.rng.as_mut());
        if report.idle {
            return;
        }

        if report.power_started() {
            self.arm_power_expiry();
        }
        if let Some(observer) = self.frame_observer.as_mut() {
            observer(&self.state);
        }

        let ended = report.ended();
        events.push(SessionEvent::Ticked(report));
        if ended {
            self.finish(events);
        }
    }

    fn on_clock(&mut self, events: &mut Vec<SessionEvent>) {
        if self.state.is_terminal() {
            return;
        }
        self.state.elapsed_secs += 1;
        events.push(SessionEvent::SecondElapsed(self.state.elapsed_secs));
    }

    fn on_power_expiry(&mut self, handle: TimerHandle, events: &mut Vec<SessionEvent>) {
        if self.power_timer != Some(handle) || self.state.is_terminal() {
            log::debug!("Ignoring stale power expiry");
            return;
        }
        self.power_timer = None;
        self.state.end_power_mode();
        log::debug!("Power mode expired at {} ms", self.timers.now_ms());
        events.push(SessionEvent::PowerExpired);
    }

    /// Supersede any pending expiry with a fresh full-length one
    fn arm_power_expiry(&mut self) {
        if let Some(old) = self.power_timer.take() {
            self.timers.cancel(old);
        }
        self.power_timer = Some(
            self.timers
                .schedule_once(TimerKind::PowerExpiry, POWER_DURATION_MS),
        );
        log::debug!(
            "Power mode armed until {} ms",
            self.timers.now_ms() + POWER_DURATION_MS
        );
    }

    fn finish(&mut self, events: &mut Vec<SessionEvent>) {
        for handle in [
            self.tick_timer.take(),
            self.clock_timer.take(),
            self.power_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.timers.cancel(handle);
        }

        if self.reported {
            return;
        }
        self.reported = true;
        let phase = self.state.phase();
        let score = self.state.score;
        log::info!(
            "Session ended: {:?} with score {} after {}s",
            phase,
            score,
            self.state.elapsed_secs
        );
        if let Some(sink) = self.score_sink.as_mut() {
            sink(self.difficulty, score);
        }
        events.push(SessionEvent::Ended { phase, score });
    }
}
