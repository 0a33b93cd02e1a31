//! Adversary behavior
//!
//! Probabilities and the vertical tie-break are fixed rules of the game, not
//! tuning knobs:
//! - chase (chase mode, not vulnerable): 0.7 toward the player, 0.3 random
//! - flee (vulnerable): 0.7 away from the player, 0.3 random
//! - wander (otherwise): 0.3 random, else keep heading

use super::maze::Maze;
use super::movement::{Direction, is_legal, legal_directions, next_position};
use super::rng::RandomSource;
use super::state::Adversary;
use crate::consts::{PURSUIT_PROBABILITY, WANDER_PROBABILITY};
use crate::{Position, manhattan};

/// Which behavior applies to a non-eaten adversary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Chase,
    Flee,
    Wander,
}

impl Behavior {
    pub fn select(adversary: &Adversary, chase_mode: bool) -> Self {
        if chase_mode && !adversary.vulnerable {
            Behavior::Chase
        } else if adversary.vulnerable {
            Behavior::Flee
        } else {
            Behavior::Wander
        }
    }
}

/// What happened to one adversary during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdversaryStep {
    /// Moved one cell
    Moved,
    /// Eaten adversary reached home and revived
    Revived,
    /// Lost the speed roll
    Skipped,
    /// No legal cell to move into
    Blocked,
}

/// Random cardinal direction
pub fn random_cardinal(rng: &mut dyn RandomSource) -> Direction {
    Direction::CARDINALS[rng.pick_index(Direction::CARDINALS.len())]
}

/// True if the adversary moves this tick. Speeds >= 1 always pass.
pub fn passes_speed_gate(speed: f64, rng: &mut dyn RandomSource) -> bool {
    rng.next_unit() <= speed
}

/// Candidate heading for a non-eaten adversary
pub fn choose_direction(
    adversary: &Adversary,
    target: Position,
    chase_mode: bool,
    rng: &mut dyn RandomSource,
) -> Direction {
    let delta = target - adversary.position;
    match Behavior::select(adversary, chase_mode) {
        Behavior::Chase => {
            if rng.next_unit() < PURSUIT_PROBABILITY {
                Direction::toward(delta)
            } else {
                random_cardinal(rng)
            }
        }
        Behavior::Flee => {
            if rng.next_unit() < PURSUIT_PROBABILITY {
                Direction::toward(delta).opposite()
            } else {
                random_cardinal(rng)
            }
        }
        Behavior::Wander => {
            if rng.next_unit() < WANDER_PROBABILITY {
                random_cardinal(rng)
            } else {
                adversary.direction
            }
        }
    }
}

/// Advance an eaten adversary one step toward home.
///
/// Within Manhattan distance 1 it snaps home and revives, taking `powered`
/// as its vulnerability.
pub fn return_home(adversary: &mut Adversary, maze: &Maze, powered: bool) -> AdversaryStep {
    if manhattan(adversary.position, adversary.home) <= 1 {
        adversary.position = adversary.home;
        adversary.eaten = false;
        adversary.vulnerable = powered;
        return AdversaryStep::Revived;
    }

    let dir = Direction::toward(adversary.home - adversary.position);
    let next = next_position(adversary.position, dir);
    if is_legal(maze, next) {
        adversary.position = next;
        adversary.direction = dir;
        AdversaryStep::Moved
    } else {
        AdversaryStep::Blocked
    }
}

/// Full per-tick update for one adversary
pub fn update_adversary(
    adversary: &mut Adversary,
    maze: &Maze,
    target: Position,
    powered: bool,
    speed: f64,
    chase_mode: bool,
    rng: &mut dyn RandomSource,
) -> AdversaryStep {
    if adversary.eaten {
        return return_home(adversary, maze, powered);
    }

    if !passes_speed_gate(speed, rng) {
        return AdversaryStep::Skipped;
    }

    let mut dir = choose_direction(adversary, target, chase_mode, rng);
    let mut next = next_position(adversary.position, dir);
    if !is_legal(maze, next) {
        let options = legal_directions(maze, adversary.position);
        if options.is_empty() {
            return AdversaryStep::Blocked;
        }
        dir = options[rng.pick_index(options.len())];
        next = next_position(adversary.position, dir);
    }

    adversary.position = next;
    adversary.direction = dir;
    adversary.vulnerable = powered;
    AdversaryStep::Moved
}
