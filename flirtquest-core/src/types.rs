//! Core type definitions for the conversation engine.
//!
//! Keys are closed enums so that the engine never sees a scene or
//! personality that is missing from the static catalogs; free-form names
//! are validated once, at parse time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Who produced a message in the conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The human player.
    Player,
    /// The scripted crush character (simulated or provider-backed).
    Character,
    /// A scenario interruption injected by the event table.
    Event,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::Character => "character",
            Self::Event => "event",
        };
        write!(f, "{name}")
    }
}

/// One entry in the conversation log. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who said it.
    pub role: Role,
    /// What was said.
    pub text: String,
    /// Wall-clock time the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time.
    #[must_use]
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self::at(role, text, Utc::now())
    }

    /// Create a message with an explicit timestamp.
    #[must_use]
    pub fn at(role: Role, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog keys
// ---------------------------------------------------------------------------

/// Behavioral profile of the crush character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalityKey {
    /// Sweet, quiet, observant.
    #[serde(rename = "Tímida", alias = "Timida")]
    Timida,
    /// Witty and teasing, never cruel.
    #[serde(rename = "Sarcástica", alias = "Sarcastica")]
    Sarcastica,
    /// Direct, intense, romantic.
    #[serde(rename = "Apasionada")]
    Apasionada,
    /// Flirts with science facts and pop references.
    #[serde(rename = "Nerd")]
    Nerd,
}

impl PersonalityKey {
    /// All personalities, in menu order.
    pub const ALL: [PersonalityKey; 4] = [
        PersonalityKey::Timida,
        PersonalityKey::Sarcastica,
        PersonalityKey::Apasionada,
        PersonalityKey::Nerd,
    ];

    /// Display name, as shown in the selector.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Timida => "Tímida",
            Self::Sarcastica => "Sarcástica",
            Self::Apasionada => "Apasionada",
            Self::Nerd => "Nerd",
        }
    }
}

impl fmt::Display for PersonalityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PersonalityKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tímida" | "timida" => Ok(Self::Timida),
            "sarcástica" | "sarcastica" => Ok(Self::Sarcastica),
            "apasionada" => Ok(Self::Apasionada),
            "nerd" => Ok(Self::Nerd),
            _ => Err(EngineError::UnknownPersonality(s.to_string())),
        }
    }
}

/// Setting in which the conversation takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKey {
    /// A coffee shop.
    #[serde(rename = "Cafetería", alias = "Cafeteria")]
    Cafeteria,
    /// A quiet library.
    #[serde(rename = "Biblioteca")]
    Biblioteca,
    /// A house party.
    #[serde(rename = "Fiesta")]
    Fiesta,
    /// Chatting inside a dating app.
    #[serde(rename = "App de citas")]
    AppDeCitas,
}

impl SceneKey {
    /// All scenes, in menu order.
    pub const ALL: [SceneKey; 4] = [
        SceneKey::Cafeteria,
        SceneKey::Biblioteca,
        SceneKey::Fiesta,
        SceneKey::AppDeCitas,
    ];

    /// Display name, as shown in the selector.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cafeteria => "Cafetería",
            Self::Biblioteca => "Biblioteca",
            Self::Fiesta => "Fiesta",
            Self::AppDeCitas => "App de citas",
        }
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cafetería" | "cafeteria" => Ok(Self::Cafeteria),
            "biblioteca" => Ok(Self::Biblioteca),
            "fiesta" => Ok(Self::Fiesta),
            "app de citas" => Ok(Self::AppDeCitas),
            _ => Err(EngineError::UnknownScene(s.to_string())),
        }
    }
}
