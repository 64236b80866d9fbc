//! The mutable conversation aggregate.
//!
//! [`ConversationState`] owns the message log and the scores derived from
//! it. Fields are private: the log only grows through the append methods
//! below, and chemistry only moves through the scorer, so the `[0, 100]`
//! bound and the append-only log cannot be broken from outside.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{self, OPENING_LINE, RESTART_LINE};
use crate::chemistry::{self, ChemistryBreakdown, MAX_CHEMISTRY};
use crate::events;
use crate::types::{Message, PersonalityKey, Role, SceneKey};

/// Everything the UI renders about one conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationState {
    messages: Vec<Message>,
    chemistry: u8,
    player_turn_count: u32,
    scene: SceneKey,
    personality: PersonalityKey,
    goal: &'static str,
    #[serde(skip)]
    initial_chemistry: u8,
}

impl ConversationState {
    /// Start a fresh conversation: opening line from the character, a newly
    /// drawn goal, `initial_chemistry` (clamped to 100).
    pub fn new<R: Rng + ?Sized>(
        scene: SceneKey,
        personality: PersonalityKey,
        initial_chemistry: u8,
        rng: &mut R,
    ) -> Self {
        let initial_chemistry = initial_chemistry.min(MAX_CHEMISTRY);
        Self {
            messages: vec![Message::new(Role::Character, OPENING_LINE)],
            chemistry: initial_chemistry,
            player_turn_count: 0,
            scene,
            personality,
            goal: catalog::draw_goal(rng),
            initial_chemistry,
        }
    }

    /// The full log, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The last `window` messages, oldest first.
    #[must_use]
    pub fn recent(&self, window: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(window);
        &self.messages[start..]
    }

    /// Current chemistry, always in `[0, 100]`.
    #[must_use]
    pub fn chemistry(&self) -> u8 {
        self.chemistry
    }

    /// Number of player messages recorded since the last reset.
    #[must_use]
    pub fn player_turn_count(&self) -> u32 {
        self.player_turn_count
    }

    /// Active scene.
    #[must_use]
    pub fn scene(&self) -> SceneKey {
        self.scene
    }

    /// Active personality.
    #[must_use]
    pub fn personality(&self) -> PersonalityKey {
        self.personality
    }

    /// Icebreaker objective shown to the player.
    #[must_use]
    pub fn goal(&self) -> &'static str {
        self.goal
    }

    /// Switch scene. Takes effect from the next reply and event check.
    pub fn set_scene(&mut self, scene: SceneKey) {
        debug!(from = %self.scene, to = %scene, "Scene changed");
        self.scene = scene;
    }

    /// Switch personality. Takes effect from the next reply.
    pub fn set_personality(&mut self, personality: PersonalityKey) {
        debug!(from = %self.personality, to = %personality, "Personality changed");
        self.personality = personality;
    }

    /// Score `text`, then append it as a player message.
    ///
    /// Blank input is the caller's responsibility to reject.
    pub fn record_player_message(&mut self, text: impl Into<String>) -> ChemistryBreakdown {
        let text = text.into();
        let breakdown = chemistry::analyze(self.chemistry, &text);
        self.chemistry = breakdown.next;
        self.messages.push(Message::new(Role::Player, text));
        self.player_turn_count += 1;

        debug!(
            turn = self.player_turn_count,
            delta = breakdown.delta,
            chemistry = self.chemistry,
            "Player message recorded"
        );
        breakdown
    }

    /// Append the character's reply.
    pub fn record_character_reply(&mut self, text: impl Into<String>) {
        self.messages.push(Message::new(Role::Character, text));
    }

    /// Append a scenario event.
    pub fn record_event(&mut self, text: impl Into<String>) {
        self.messages.push(Message::new(Role::Event, text));
    }

    /// Run the event check for the current turn count and scene, appending
    /// the event if one fires.
    pub fn inject_event<R: Rng + ?Sized>(
        &mut self,
        interval: u32,
        rng: &mut R,
    ) -> Option<&'static str> {
        let event = events::maybe_inject_every(self.player_turn_count, interval, self.scene, rng)?;
        debug!(turn = self.player_turn_count, scene = %self.scene, "Scenario event injected");
        self.record_event(event);
        Some(event)
    }

    /// Start over: restart line, initial chemistry, zero turns, a new goal.
    ///
    /// Scene and personality keep their current selection.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.messages = vec![Message::new(Role::Character, RESTART_LINE)];
        self.chemistry = self.initial_chemistry;
        self.player_turn_count = 0;
        self.goal = catalog::draw_goal(rng);
        info!(scene = %self.scene, personality = %self.personality, "Conversation reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fresh() -> (ConversationState, StdRng) {
        let mut rng = StdRng::seed_from_u64(11);
        let state = ConversationState::new(SceneKey::Cafeteria, PersonalityKey::Nerd, 50, &mut rng);
        (state, rng)
    }

    #[test]
    fn new_state_opens_with_greeting() {
        let (state, _) = fresh();
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].role, Role::Character);
        assert_eq!(state.messages()[0].text, OPENING_LINE);
        assert_eq!(state.chemistry(), 50);
        assert_eq!(state.player_turn_count(), 0);
        assert!(catalog::GOALS.contains(&state.goal()));
    }

    #[test]
    fn player_message_scores_then_appends() {
        let (mut state, _) = fresh();
        let b = state.record_player_message("gracias, me gusta tu plan");
        assert_eq!(b.next, 63);
        assert_eq!(state.chemistry(), 63);
        assert_eq!(state.player_turn_count(), 1);
        let last = state.messages().last().unwrap();
        assert_eq!(last.role, Role::Player);
        assert_eq!(last.text, "gracias, me gusta tu plan");
    }

    #[test]
    fn event_only_after_fourth_turn() {
        let (mut state, mut rng) = fresh();
        for i in 1..=4 {
            state.record_player_message("hola");
            state.record_character_reply("respuesta");
            let event = state.inject_event(4, &mut rng);
            assert_eq!(event.is_some(), i == 4, "turn {i}");
        }
        let last = state.messages().last().unwrap();
        assert_eq!(last.role, Role::Event);
    }

    #[test]
    fn reset_reinitializes_everything_but_selection() {
        let (mut state, mut rng) = fresh();
        state.set_scene(SceneKey::Fiesta);
        state.record_player_message("eres tonto");
        state.record_character_reply("vaya");
        state.reset(&mut rng);

        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].text, RESTART_LINE);
        assert_eq!(state.chemistry(), 50);
        assert_eq!(state.player_turn_count(), 0);
        assert_eq!(state.scene(), SceneKey::Fiesta);
        assert_eq!(state.personality(), PersonalityKey::Nerd);
    }

    #[test]
    fn recent_window_is_a_suffix() {
        let (mut state, _) = fresh();
        for i in 0..5 {
            state.record_player_message(format!("mensaje {i}"));
        }
        let recent = state.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[2].text, "mensaje 4");
        assert_eq!(state.recent(100).len(), 6);
    }

    #[test]
    fn initial_chemistry_is_clamped() {
        let mut rng = StdRng::seed_from_u64(0);
        let state = ConversationState::new(SceneKey::Fiesta, PersonalityKey::Timida, 250, &mut rng);
        assert_eq!(state.chemistry(), 100);
    }
}
