//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, behind [`RandomSource`]
//! - Stable iteration order (adversaries keep their spawn order)
//! - Virtual time only
//! - No rendering or platform dependencies

pub mod maze;
pub mod movement;
pub mod policy;
pub mod rng;
pub mod state;
pub mod tick;
pub mod timers;

pub use maze::{Cell, ItemPlacement, Maze, REFERENCE_LAYOUT};
pub use movement::{Direction, is_legal, legal_directions, next_position};
pub use policy::{AdversaryStep, Behavior, choose_direction, update_adversary};
pub use rng::{RandomSource, ScriptedRandom, SimRng};
pub use state::{
    ADVERSARY_SPAWNS, Adversary, AdversaryColor, GamePhase, GameState, PLAYER_SPAWN, Player,
    reference_adversaries,
};
pub use tick::{TickEvent, TickReport, tick};
pub use timers::{Fired, TimerHandle, TimerKind, Timers};
