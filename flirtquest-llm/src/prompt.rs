//! Prompt templates for the external reply provider.
//!
//! The provider only ever sees one synthesized system entry; the rest of
//! the request is the conversation itself.

/// System prompt for the crush character.
pub const REPLY_SYSTEM: &str = r"Eres un interés romántico en un juego de citas. {personality_description}
Tu estilo: {style}.
Mantén el coqueteo respetuoso, ingenioso y acorde a tu personalidad ({personality}).
Escenario: {scene}. {scene_description}

REGLAS:
- Responde en 1-3 frases.
- Termina con una pregunta para mantener la conversación.
- Evita contenido explícito.";

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// What the system prompt needs to know about the character and setting.
#[derive(Debug, Clone, Copy)]
pub struct CharacterBrief<'a> {
    /// Personality display name.
    pub personality: &'a str,
    /// Second-person personality description.
    pub personality_description: &'a str,
    /// Style descriptor.
    pub style: &'a str,
    /// Scene display name.
    pub scene: &'a str,
    /// Scene ambience description.
    pub scene_description: &'a str,
}

/// Render [`REPLY_SYSTEM`] for a character brief.
#[must_use]
pub fn reply_system_prompt(brief: &CharacterBrief<'_>) -> String {
    render_template(
        REPLY_SYSTEM,
        &[
            ("personality_description", brief.personality_description),
            ("style", brief.style),
            ("personality", brief.personality),
            ("scene_description", brief.scene_description),
            ("scene", brief.scene),
        ],
    )
}
