//! Simulation step
//!
//! Advances one session by exactly one tick. Timing (when ticks happen,
//! elapsed seconds, power expiry) is handled by the scheduler in
//! [`super::timers`]; this module only reacts to the state it is given.

use super::maze::Maze;
use super::movement::{Direction, is_legal, next_position};
use super::policy::{AdversaryStep, update_adversary};
use super::rng::RandomSource;
use super::state::GameState;
use crate::consts::{ADVERSARY_REWARD, ITEM_REWARD, POWER_ITEM_REWARD};
use crate::difficulty::DifficultyProfile;

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    ItemEaten,
    /// Power mode (re)started; any pending expiry is superseded
    PowerItemEaten,
    /// Index into `GameState::adversaries`
    AdversaryEaten(usize),
    /// Player pushed into a wall; nothing else moved
    PlayerBlocked,
    Won,
    Lost,
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events: Vec<TickEvent>,
    pub score_delta: u64,
    /// True when the state was terminal before the tick and nothing changed
    pub idle: bool,
}

impl TickReport {
    pub fn has(&self, event: TickEvent) -> bool {
        self.events.contains(&event)
    }

    /// Did this tick end the game
    pub fn ended(&self) -> bool {
        self.has(TickEvent::Won) || self.has(TickEvent::Lost)
    }

    pub fn power_started(&self) -> bool {
        self.has(TickEvent::PowerItemEaten)
    }
}

/// Advance the game state by one tick
pub fn tick(
    state: &mut GameState,
    maze: &Maze,
    profile: &DifficultyProfile,
    rng: &mut dyn RandomSource,
) -> TickReport {
    let mut report = TickReport::default();

    if state.is_terminal() {
        report.idle = true;
        return report;
    }

    if state.items.is_empty() {
        state.game_won = true;
        report.events.push(TickEvent::Won);
        log::info!("All items collected, score {}", state.score);
        return report;
    }

    state.time_ticks += 1;

    // Buffered intent wins whenever it is currently possible
    let player = &mut state.player;
    if player.desired_direction != Direction::None
        && is_legal(maze, next_position(player.position, player.desired_direction))
    {
        player.direction = player.desired_direction;
    }

    let candidate = next_position(player.position, player.direction);
    if !is_legal(maze, candidate) {
        report.events.push(TickEvent::PlayerBlocked);
        return report;
    }
    player.position = candidate;

    if state.take_item(candidate) {
        state.score += ITEM_REWARD;
        report.score_delta += ITEM_REWARD;
        report.events.push(TickEvent::ItemEaten);
    }
    if state.take_power_item(candidate) {
        state.score += POWER_ITEM_REWARD;
        report.score_delta += POWER_ITEM_REWARD;
        state.player.powered = true;
        report.events.push(TickEvent::PowerItemEaten);
    }

    let powered = state.player.powered;
    for adversary in &mut state.adversaries {
        let step = update_adversary(
            adversary,
            maze,
            candidate,
            powered,
            profile.adversary_speed,
            profile.chase_mode,
            rng,
        );
        if step == AdversaryStep::Revived {
            log::debug!("{} adversary is back home", adversary.color.as_str());
        }
    }

    resolve_collision(state, &mut report);

    state.player.mouth_open = !state.player.mouth_open;
    log::trace!(
        "tick {} player {:?} score {}",
        state.time_ticks,
        state.player.position,
        state.score
    );
    report
}

/// Capturable adversaries take precedence over lethal ones sharing the
/// player's cell; only the first in iteration order is resolved.
fn resolve_collision(state: &mut GameState, report: &mut TickReport) {
    let here = state.player.position;
    let sharing = || {
        state
            .adversaries
            .iter()
            .enumerate()
            .filter(move |(_, a)| a.position == here)
    };
    let capturable = sharing().find(|(_, a)| a.is_capturable()).map(|(i, _)| i);
    let lethal = sharing().find(|(_, a)| a.is_lethal()).map(|(i, _)| i);

    if let Some(i) = capturable {
        state.adversaries[i].eaten = true;
        state.score += ADVERSARY_REWARD;
        report.score_delta += ADVERSARY_REWARD;
        report.events.push(TickEvent::AdversaryEaten(i));
        log::debug!("Ate {} adversary", state.adversaries[i].color.as_str());
    } else if let Some(i) = lethal {
        log::info!(
            "Caught by {} adversary, score {}",
            state.adversaries[i].color.as_str(),
            state.score
        );
        state.game_over = true;
        report.events.push(TickEvent::Lost);
    }
}
