//! Static content tables: personalities, scenes, goals and opening lines.
//!
//! Everything here is read-only at runtime. Lookups are total over the key
//! enums, so there is no "missing entry" path.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::{PersonalityKey, SceneKey};

/// A behavioral profile for the crush character.
#[derive(Debug, Clone, Copy)]
pub struct Personality {
    /// Catalog key.
    pub key: PersonalityKey,
    /// Second-person description handed to the external provider.
    pub system_description: &'static str,
    /// Short style descriptor, shown under the selector.
    pub style_descriptor: &'static str,
    /// Lines the simulated character picks its tone from.
    pub tone_templates: &'static [&'static str],
}

/// A setting for the conversation.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    /// Catalog key.
    pub key: SceneKey,
    /// Ambience description.
    pub description: &'static str,
    /// Parenthetical prepended to every simulated reply.
    pub flavor: &'static str,
    /// Scenario interruptions that may be injected every few turns.
    pub event_pool: &'static [&'static str],
}

static TIMIDA: Personality = Personality {
    key: PersonalityKey::Timida,
    system_description: "Eres una persona dulce, de pocas palabras, observadora, con humor suave.",
    style_descriptor: "respuestas cortas, preguntas curiosas, evita intensidades altísimas",
    tone_templates: &[
        "jeje, qué lindo lo dices…",
        "me haces sonreír :)",
        "creo que me pones nerviosa, en el buen sentido",
    ],
};

static SARCASTICA: Personality = Personality {
    key: PersonalityKey::Sarcastica,
    system_description: "Eres ingeniosa y algo burlona, pero no cruel. Juegas con dobles sentidos.",
    style_descriptor: "bromas secas, coqueteo indirecto, guiños",
    tone_templates: &[
        "vaya, ¿ensayaste esa línea en el espejo?",
        "no está mal… para ser tu primer intento 😉",
        "¿esa era tu carta fuerte o tienes DLC?",
    ],
};

static APASIONADA: Personality = Personality {
    key: PersonalityKey::Apasionada,
    system_description: "Eres directa, intensa y romántica. Te gusta llevar la iniciativa.",
    style_descriptor: "piropos, metáforas, energía alta",
    tone_templates: &[
        "me encanta tu energía, se siente eléctrica",
        "lo dices y me imagino el plan ahora mismo",
        "si seguimos así, alguien se va a enamorar",
    ],
};

static NERD: Personality = Personality {
    key: PersonalityKey::Nerd,
    system_description: "Te encantan ciencia, juegos y referencias frikis. Flirteas con datos y analogías.",
    style_descriptor: "humor geek, referencias pop, curiosidad genuina",
    tone_templates: &[
        "dato random: los pulpos tienen 3 corazones, yo ahora mismo 4 x ti",
        "esa broma tiene buen ratio señal/ruido",
        "esto tiene química, literal y figurada",
    ],
};

static CAFETERIA: Scene = Scene {
    key: SceneKey::Cafeteria,
    description: "Aromas a café, música suave, gente tecleando en laptops.",
    flavor: "(entre aroma a espresso)",
    event_pool: &[
        "Se cayó un latte cerca y salpicó un poco la mesa. ¿Lo tomas con humor?",
        "El barista anuncia micro abierto: ¡poesía o canción?",
    ],
};

static BIBLIOTECA: Scene = Scene {
    key: SceneKey::Biblioteca,
    description: "Silencio elegante, pasillos de libros, miradas cómplices entre estantes.",
    flavor: "(susurrando entre estantes)",
    event_pool: &[
        "La bibliotecaria pide silencio extremo y te lanza una mirada. ¿Susurras?",
        "Encuentran un libro con dedicatoria romántica de 1998. ¿Lo comentas?",
    ],
};

static FIESTA: Scene = Scene {
    key: SceneKey::Fiesta,
    description: "Luz baja, reggaetón suave, amigos alrededor, risas y vasos tintineando.",
    flavor: "(con la música bajita de fondo)",
    event_pool: &[
        "Se corta la música unos segundos; momento de charla íntima.",
        "Un amigo interrumpe para presentar un juego de verdad o reto.",
    ],
};

static APP_DE_CITAS: Scene = Scene {
    key: SceneKey::AppDeCitas,
    description: "Interfaz minimal, match reciente, chat dentro de la app.",
    flavor: "(match con vibes bonitas)",
    event_pool: &[
        "La app sugiere una pregunta de rompehielos inesperada.",
        "Aparece una notificación de match mutuo en un plan de eventos local.",
    ],
};

/// Icebreaker objectives. One is shown per session; nothing checks it.
pub const GOALS: [&str; 5] = [
    "Consigue que te cuente un hobby extraño.",
    "Logra que ría con un chiste ligero.",
    "Proponle un plan para otro día y obtén un 'sí'.",
    "Descubre su comida favorita.",
    "Consigue un cumplido de vuelta.",
];

/// First character line of a brand-new session.
pub const OPENING_LINE: &str =
    "Hola… creo que hicimos match de timing y de vibra. ¿Cómo te llamo?";

/// First character line after the player restarts the chat.
pub const RESTART_LINE: &str = "¿Volvemos a empezar? Esta vez siento chispa desde el inicio.";

/// Look up a personality profile.
#[must_use]
pub fn personality(key: PersonalityKey) -> &'static Personality {
    match key {
        PersonalityKey::Timida => &TIMIDA,
        PersonalityKey::Sarcastica => &SARCASTICA,
        PersonalityKey::Apasionada => &APASIONADA,
        PersonalityKey::Nerd => &NERD,
    }
}

/// Look up a scene.
#[must_use]
pub fn scene(key: SceneKey) -> &'static Scene {
    match key {
        SceneKey::Cafeteria => &CAFETERIA,
        SceneKey::Biblioteca => &BIBLIOTECA,
        SceneKey::Fiesta => &FIESTA,
        SceneKey::AppDeCitas => &APP_DE_CITAS,
    }
}

/// Draw an icebreaker goal uniformly at random.
pub fn draw_goal<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    // GOALS is a non-empty const array.
    GOALS.choose(rng).copied().unwrap_or(GOALS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_personality_has_tone_lines() {
        for key in PersonalityKey::ALL {
            let p = personality(key);
            assert_eq!(p.key, key);
            assert!(!p.tone_templates.is_empty(), "{key} has no tone lines");
            assert!(!p.system_description.is_empty());
            assert!(!p.style_descriptor.is_empty());
        }
    }

    #[test]
    fn every_scene_has_flavor_and_events() {
        for key in SceneKey::ALL {
            let s = scene(key);
            assert_eq!(s.key, key);
            assert!(s.flavor.starts_with('(') && s.flavor.ends_with(')'));
            assert_eq!(s.event_pool.len(), 2);
        }
    }

    #[test]
    fn drawn_goal_comes_from_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(GOALS.contains(&draw_goal(&mut rng)));
        }
    }
}
