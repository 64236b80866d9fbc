//! Property-based tests for the rule-based engine.
//!
//! These check the invariants that must hold for *any* player input:
//! chemistry stays in range, replies are never empty, events only land on
//! interval turns.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use flirtquest_core::catalog;
use flirtquest_core::chemistry;
use flirtquest_core::events;
use flirtquest_core::reply;
use flirtquest_core::types::{PersonalityKey, SceneKey};

fn arb_personality() -> impl Strategy<Value = PersonalityKey> {
    prop::sample::select(PersonalityKey::ALL.to_vec())
}

fn arb_scene() -> impl Strategy<Value = SceneKey> {
    prop::sample::select(SceneKey::ALL.to_vec())
}

/// Free text salted with the words the rules look for.
fn arb_message() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "gracias", "plan", "feo", "estúpido", "whatsapp", "teléfono", "cita", "chiste",
        "¿", "?", "hola", "perdón", "aburrido", "contigo", "risa", "salir",
    ]);
    (prop::collection::vec(words, 0..8), "[a-záéíóúñ ]{0,40}")
        .prop_map(|(words, noise)| format!("{} {noise}", words.join(" ")))
}

// ---------------------------------------------------------------------------
// Property: chemistry is always in [0, 100]
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn score_stays_in_range(current in 0u8..=100, text in arb_message()) {
        let next = chemistry::score(current, &text);
        prop_assert!(next <= 100);
    }

    #[test]
    fn score_stays_in_range_for_arbitrary_unicode(current in 0u8..=100, text in ".*") {
        let next = chemistry::score(current, &text);
        prop_assert!(next <= 100);
    }

    #[test]
    fn score_is_deterministic(current in 0u8..=100, text in arb_message()) {
        prop_assert_eq!(chemistry::score(current, &text), chemistry::score(current, &text));
    }

    #[test]
    fn single_message_moves_at_most_sixteen(current in 0u8..=100, text in arb_message()) {
        let next = i32::from(chemistry::score(current, &text));
        // +6 +3 +4 = +13 best case, -10 -6 = -16 worst case
        prop_assert!((next - i32::from(current)).abs() <= 16);
    }
}

// ---------------------------------------------------------------------------
// Property: simulated replies are never empty
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reply_is_never_empty(
        message in arb_message(),
        personality in arb_personality(),
        scene in arb_scene(),
        chemistry in 0u8..=100,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = reply::generate(&message, personality, scene, chemistry, &mut rng);
        prop_assert!(!text.trim().is_empty());
        prop_assert!(text.starts_with(catalog::scene(scene).flavor));
    }
}

// ---------------------------------------------------------------------------
// Property: events only fire on positive multiples of the interval
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn events_only_on_interval(turn in 0u32..10_000, scene in arb_scene(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let event = events::maybe_inject(turn, scene, &mut rng);
        if turn > 0 && turn % 4 == 0 {
            prop_assert!(event.is_some_and(|e| catalog::scene(scene).event_pool.contains(&e)));
        } else {
            prop_assert!(event.is_none());
        }
    }
}

#[test]
fn every_combination_produces_a_reply() {
    let mut rng = StdRng::seed_from_u64(2024);
    for personality in PersonalityKey::ALL {
        for scene in SceneKey::ALL {
            for chemistry in [0, 29, 30, 50, 75, 76, 100] {
                let text =
                    reply::generate("¿hacemos un plan?", personality, scene, chemistry, &mut rng);
                assert!(!text.is_empty(), "{personality}/{scene}/{chemistry}");
            }
        }
    }
}
