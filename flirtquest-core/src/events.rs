//! Scenario event injection.
//!
//! Every `interval` player turns the scene throws in an interruption (a
//! spilled latte, a librarian's glare) to nudge the conversation somewhere
//! new.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog;
use crate::types::SceneKey;

/// Player turns between scenario events.
pub const DEFAULT_EVENT_INTERVAL: u32 = 4;

/// Whether an event is due after `player_turn_count` turns.
///
/// Turn 0 never fires; an interval of 0 disables events entirely.
#[must_use]
pub fn is_due(player_turn_count: u32, interval: u32) -> bool {
    interval > 0 && player_turn_count > 0 && player_turn_count % interval == 0
}

/// Pick an event from `pool` if one is due.
pub fn select_event<R: Rng + ?Sized>(
    player_turn_count: u32,
    interval: u32,
    pool: &[&'static str],
    rng: &mut R,
) -> Option<&'static str> {
    if !is_due(player_turn_count, interval) {
        return None;
    }
    pool.choose(rng).copied()
}

/// Decide whether the active scene injects an event this turn, using the
/// default interval of four turns.
pub fn maybe_inject<R: Rng + ?Sized>(
    player_turn_count: u32,
    scene: SceneKey,
    rng: &mut R,
) -> Option<&'static str> {
    maybe_inject_every(player_turn_count, DEFAULT_EVENT_INTERVAL, scene, rng)
}

/// [`maybe_inject`] with a configurable interval.
pub fn maybe_inject_every<R: Rng + ?Sized>(
    player_turn_count: u32,
    interval: u32,
    scene: SceneKey,
    rng: &mut R,
) -> Option<&'static str> {
    select_event(player_turn_count, interval, catalog::scene(scene).event_pool, rng)
}
