//! Mapping the conversation log onto a provider request.

use flirtquest_core::catalog;
use flirtquest_core::config::LlmConfig;
use flirtquest_core::types::{Message, PersonalityKey, Role, SceneKey};
use flirtquest_llm::prompt::{self, CharacterBrief};
use flirtquest_llm::{ChatMessage, ChatRole, ReplyRequest};

/// Provider-neutral role for a log entry. Scenario events go in as system
/// notes so the model can react to them.
#[must_use]
pub fn chat_role(role: Role) -> ChatRole {
    match role {
        Role::Player => ChatRole::Player,
        Role::Character => ChatRole::Character,
        Role::Event => ChatRole::System,
    }
}

/// Everything the system prompt needs, straight from the static catalogs.
#[must_use]
pub fn character_brief(personality: PersonalityKey, scene: SceneKey) -> CharacterBrief<'static> {
    let profile = catalog::personality(personality);
    let setting = catalog::scene(scene);
    CharacterBrief {
        personality: personality.name(),
        personality_description: profile.system_description,
        style: profile.style_descriptor,
        scene: scene.name(),
        scene_description: setting.description,
    }
}

/// Build the request for one turn.
///
/// `history` is the window of messages *before* the new player message;
/// the result is `[system, ...history, player]`.
#[must_use]
pub fn build_request(
    history: &[Message],
    player_text: &str,
    personality: PersonalityKey,
    scene: SceneKey,
    llm: &LlmConfig,
) -> ReplyRequest {
    let system = prompt::reply_system_prompt(&character_brief(personality, scene));

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::new(ChatRole::System, system));
    messages.extend(
        history
            .iter()
            .map(|m| ChatMessage::new(chat_role(m.role), m.text.clone())),
    );
    messages.push(ChatMessage::new(ChatRole::Player, player_text));

    ReplyRequest::new(messages)
        .with_max_tokens(llm.max_tokens)
        .with_temperature(llm.temperature)
        .with_timeout(llm.request_timeout_ms)
}
