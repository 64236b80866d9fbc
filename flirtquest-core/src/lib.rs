//! # FlirtQuest Core Library
//!
//! Rule-based conversation engine for a flirting chat game. The player
//! talks to a scripted "crush" whose replies are assembled from
//! personality- and scene-specific templates, while a chemistry score
//! tracks how the date is going.
//!
//! - [`chemistry`]: keyword scoring of player messages into `[0, 100]`
//! - [`reply`]: simulated character replies (the provider fallback)
//! - [`events`]: periodic scenario interruptions
//! - [`state`]: the [`ConversationState`] aggregate the above mutate
//! - [`catalog`]: static personality, scene and goal tables
//!
//! Nothing in this crate performs I/O or keeps global state; randomness is
//! always passed in by the caller.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod chemistry;
pub mod config;
pub mod error;
pub mod events;
pub mod reply;
pub mod state;
pub mod types;

pub use config::FlirtConfig;
pub use error::EngineError;
pub use state::ConversationState;
pub use types::*;
