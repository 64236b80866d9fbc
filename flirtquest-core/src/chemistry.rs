//! Chemistry scoring: keyword heuristics over the player's message.
//!
//! Each rule fires at most once per message no matter how many of its
//! trigger words occur. Matching is plain substring search over the
//! lowercased text; accents are *not* folded, so `estúpido` does not hit the
//! `estup` stem.

/// Lowest possible chemistry.
pub const MIN_CHEMISTRY: u8 = 0;
/// Highest possible chemistry.
pub const MAX_CHEMISTRY: u8 = 100;

/// Warm words and stems.
pub const POSITIVE_HINTS: &[&str] = &[
    "gracias", "bonito", "contigo", "interes", "me gusta", "plan", "divert",
];

/// Cold or rude words and stems.
pub const NEGATIVE_HINTS: &[&str] = &[
    "aburr", "tonto", "feo", "molest", "groser", "nunca", "estup",
];

const GRATITUDE_PATTERNS: &[&str] = &["gracias", "perdon", "perdón", "disculp"];
const CONTACT_PATTERNS: &[&str] = &["numero", "whatsapp", "telefono", "teléfono"];
const PLAN_PATTERNS: &[&str] = &["salir", "cita", "plan"];

/// One scoring rule and its fixed contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChemistryRule {
    /// Any positive hint word.
    PositiveHint,
    /// Any negative hint word.
    NegativeHint,
    /// Thanks or an apology.
    Gratitude,
    /// Asking for a phone number or messaging handle too early.
    ContactRequest,
    /// Proposing to go out.
    Plans,
}

impl ChemistryRule {
    /// Every rule, in evaluation order.
    pub const ALL: [ChemistryRule; 5] = [
        ChemistryRule::PositiveHint,
        ChemistryRule::NegativeHint,
        ChemistryRule::Gratitude,
        ChemistryRule::ContactRequest,
        ChemistryRule::Plans,
    ];

    /// Points added when the rule fires.
    #[must_use]
    pub fn delta(self) -> i32 {
        match self {
            Self::PositiveHint => 6,
            Self::NegativeHint => -10,
            Self::Gratitude => 3,
            Self::ContactRequest => -6,
            Self::Plans => 4,
        }
    }

    fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::PositiveHint => POSITIVE_HINTS,
            Self::NegativeHint => NEGATIVE_HINTS,
            Self::Gratitude => GRATITUDE_PATTERNS,
            Self::ContactRequest => CONTACT_PATTERNS,
            Self::Plans => PLAN_PATTERNS,
        }
    }

    /// Whether the rule fires for already-lowercased text.
    #[must_use]
    pub fn matches(self, lower: &str) -> bool {
        self.patterns().iter().any(|p| lower.contains(p))
    }
}

/// Which rules fired for a message and the resulting score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChemistryBreakdown {
    /// Rules that fired, in evaluation order.
    pub fired: Vec<ChemistryRule>,
    /// Sum of the fired rules' deltas, before clamping.
    pub delta: i32,
    /// Score before the message.
    pub previous: u8,
    /// Score after the message, clamped to `[0, 100]`.
    pub next: u8,
}

/// Evaluate every rule against `text` and report what fired.
#[must_use]
pub fn analyze(current: u8, text: &str) -> ChemistryBreakdown {
    let lower = text.to_lowercase();
    let fired: Vec<ChemistryRule> = ChemistryRule::ALL
        .into_iter()
        .filter(|rule| rule.matches(&lower))
        .collect();
    let delta = fired.iter().map(|r| r.delta()).sum::<i32>();
    let next = (i32::from(current) + delta)
        .clamp(i32::from(MIN_CHEMISTRY), i32::from(MAX_CHEMISTRY));

    ChemistryBreakdown {
        fired,
        delta,
        previous: current,
        // Clamped into 0..=100 above.
        next: u8::try_from(next).unwrap_or(MAX_CHEMISTRY),
    }
}

/// New chemistry after the player sends `text`.
///
/// Pure: the same inputs always give the same output. A `current` above 100
/// is treated as 100 would be after clamping.
#[must_use]
pub fn score(current: u8, text: &str) -> u8 {
    analyze(current, text).next
}
