//! Integration tests: whole conversations driven through the public API
//! without a session runtime.

use rand::SeedableRng;
use rand::rngs::StdRng;

use flirtquest_core::catalog;
use flirtquest_core::reply;
use flirtquest_core::types::{PersonalityKey, Role, SceneKey};
use flirtquest_core::ConversationState;

/// One synchronous turn: score, append, simulated reply, event check.
fn play_turn(state: &mut ConversationState, text: &str, rng: &mut StdRng) {
    state.record_player_message(text);
    let reply = reply::generate(text, state.personality(), state.scene(), state.chemistry(), rng);
    state.record_character_reply(reply);
    state.inject_event(4, rng);
}

#[test]
fn four_turns_in_the_cafe_inject_one_event_after_fourth_reply() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut state = ConversationState::new(SceneKey::Cafeteria, PersonalityKey::Nerd, 50, &mut rng);

    for text in ["hola", "¿qué estudias?", "me gusta tu risa", "¿salimos el viernes?"] {
        play_turn(&mut state, text, &mut rng);
    }

    let roles: Vec<Role> = state.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Character,
            Role::Player, Role::Character,
            Role::Player, Role::Character,
            Role::Player, Role::Character,
            Role::Player, Role::Character,
            Role::Event,
        ]
    );
    let event = &state.messages().last().unwrap().text;
    assert!(catalog::scene(SceneKey::Cafeteria).event_pool.contains(&event.as_str()));
}

#[test]
fn chemistry_tracks_message_tone() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut state =
        ConversationState::new(SceneKey::Fiesta, PersonalityKey::Apasionada, 50, &mut rng);

    play_turn(&mut state, "gracias, me gusta tu plan", &mut rng);
    assert_eq!(state.chemistry(), 63);

    play_turn(&mut state, "esto es estúpido, dame tu whatsapp", &mut rng);
    assert_eq!(state.chemistry(), 57);

    play_turn(&mut state, "qué aburrido, nunca sales", &mut rng);
    // only the negative rule: "sales" is not "salir"
    assert_eq!(state.chemistry(), 47);
}

#[test]
fn low_chemistry_shows_in_the_reply() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut state =
        ConversationState::new(SceneKey::Biblioteca, PersonalityKey::Timida, 35, &mut rng);
    play_turn(&mut state, "eres tonto", &mut rng);
    assert_eq!(state.chemistry(), 25);
    let reply = &state.messages()[2].text;
    assert!(reply.contains("baja un 2% la intensidad"));
}

#[test]
fn reset_clears_turns_so_events_restart_from_zero() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut state =
        ConversationState::new(SceneKey::AppDeCitas, PersonalityKey::Sarcastica, 50, &mut rng);
    for _ in 0..3 {
        play_turn(&mut state, "hola", &mut rng);
    }
    state.reset(&mut rng);
    play_turn(&mut state, "hola", &mut rng);

    assert_eq!(state.player_turn_count(), 1);
    assert!(state.messages().iter().all(|m| m.role != Role::Event));
}

#[test]
fn changing_scene_changes_flavor_and_event_pool() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut state = ConversationState::new(SceneKey::Cafeteria, PersonalityKey::Nerd, 50, &mut rng);
    for _ in 0..3 {
        play_turn(&mut state, "hola", &mut rng);
    }
    state.set_scene(SceneKey::Biblioteca);
    play_turn(&mut state, "hola", &mut rng);

    let messages = state.messages();
    let reply = &messages[messages.len() - 2];
    assert!(reply.text.starts_with("(susurrando entre estantes)"));
    let event = messages.last().unwrap();
    assert_eq!(event.role, Role::Event);
    assert!(catalog::scene(SceneKey::Biblioteca).event_pool.contains(&event.text.as_str()));
}
