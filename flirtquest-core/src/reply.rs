//! Simulated character replies, the fallback used whenever no external
//! provider answers.
//!
//! A reply is assembled from fixed pieces:
//!
//! ```text
//! (scene flavor) opening tone-line [plans clause] [joke] follow-up [chemistry remark]
//! ```
//!
//! The tone line and follow-up question are drawn from the caller's random
//! source, so a seeded RNG makes the output reproducible.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog;
use crate::types::{PersonalityKey, SceneKey};

const QUESTION_MARKERS: &[&str] = &[
    "?", "como", "qué", "que", "dónde", "donde", "por qué", "porque", "cuando", "cuándo",
];
const PLAN_MARKERS: &[&str] = &["plan", "salir", "cita"];
const JOKE_MARKERS: &[&str] = &["chiste", "risa"];

const QUESTION_OPENING: &str = "pregunta interesante…";
const STATEMENT_OPENING: &str = "me gusta cómo lo planteas…";

const PLANS_CLAUSE: &str = " ¿te laten los planes espontáneos? tengo un par de ideas.";
const JOKE_CLAUSE: &str =
    " ok, mini chiste: ¿por qué el café se fue a terapia? porque tenía muchos problemas de filtro.";

/// Questions appended to every simulated reply to keep the chat moving.
pub const FOLLOW_UPS: [&str; 3] = [
    "¿qué te hace ilusión esta semana?",
    "si pudiéramos escapar 2 horas, ¿a dónde vamos?",
    "¿te gustan más las pelis o las series para plan tranqui?",
];

/// Above this chemistry the character teases about keeping the streak.
pub const HIGH_CHEMISTRY: u8 = 75;
/// Below this chemistry the character asks the player to tone it down.
pub const LOW_CHEMISTRY: u8 = 30;

const HIGH_CHEMISTRY_REMARK: &str = " (prometo no arruinar nuestra racha 😌)";
const LOW_CHEMISTRY_REMARK: &str = " (eres divertido, solo… baja un 2% la intensidad)";

fn mentions_any(lower: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| lower.contains(m))
}

/// Whether the message reads as a question.
///
/// Deliberately loose: `que` alone is enough, so most Spanish sentences
/// with a relative clause count.
#[must_use]
pub fn is_question(message: &str) -> bool {
    mentions_any(&message.to_lowercase(), QUESTION_MARKERS)
}

/// Build a simulated reply to `message`.
///
/// Never returns an empty string.
pub fn generate<R: Rng + ?Sized>(
    message: &str,
    personality: PersonalityKey,
    scene: SceneKey,
    chemistry: u8,
    rng: &mut R,
) -> String {
    let lower = message.to_lowercase();
    let profile = catalog::personality(personality);
    let setting = catalog::scene(scene);

    let opening = if mentions_any(&lower, QUESTION_MARKERS) {
        QUESTION_OPENING
    } else {
        STATEMENT_OPENING
    };
    let tone = profile.tone_templates.choose(rng).copied().unwrap_or_default();

    let mut reply = format!("{} {opening} {tone}", setting.flavor);

    if mentions_any(&lower, PLAN_MARKERS) {
        reply.push_str(PLANS_CLAUSE);
    }
    if mentions_any(&lower, JOKE_MARKERS) {
        reply.push_str(JOKE_CLAUSE);
    }

    if let Some(follow_up) = FOLLOW_UPS.choose(rng) {
        reply.push(' ');
        reply.push_str(follow_up);
    }

    if chemistry > HIGH_CHEMISTRY {
        reply.push_str(HIGH_CHEMISTRY_REMARK);
    }
    if chemistry < LOW_CHEMISTRY {
        reply.push_str(LOW_CHEMISTRY_REMARK);
    }

    reply
}
