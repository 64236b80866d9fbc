//! # flirtquest-session: Turn Orchestration
//!
//! Glues the rule-based engine in `flirtquest-core` to the optional
//! external provider in `flirtquest-llm`:
//!
//! ```text
//! player text ─▶ chemistry score ─▶ log ─▶ provider? ──ok──▶ log ─▶ event check
//!                                            │
//!                                            └─none/err─▶ pause ─▶ simulated reply
//! ```
//!
//! ## Modules
//!
//! - `session`: [`Session`], the busy flag and the turn state machine
//! - `history`: mapping the log onto a provider request
//! - `delay`: the simulated "typing…" pause
//! - `provider`: building an `LlmClient` from configuration
//! - `telemetry`: tracing subscriber setup

pub mod delay;
pub mod history;
pub mod provider;
pub mod session;
pub mod telemetry;

pub use session::{ReplyMode, ReplySource, Session, TurnOutcome};
