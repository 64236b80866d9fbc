//! One player's conversation and the turn state machine around it.
//!
//! ```text
//! Idle → Scoring → Appending(player) → AwaitingReply{Provider | Simulated}
//!      → Appending(character) → EventCheck → Idle
//! ```
//!
//! `AwaitingReply` is the only suspension point. While a turn is there the
//! busy flag is set and every other mutation (a new submission, a reset, a
//! scene or personality change) is rejected with [`EngineError::Busy`],
//! never queued. The state lock is only ever held between awaits, so the
//! turn in flight is the single writer.
//!
//! Everything from `AwaitingReply` on runs on its own Tokio task. A turn
//! that got that far always finishes, even if the caller stops waiting.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use flirtquest_core::chemistry::ChemistryBreakdown;
use flirtquest_core::config::{EngineConfig, FlirtConfig, LlmConfig};
use flirtquest_core::error::{EngineError, Result};
use flirtquest_core::reply;
use flirtquest_core::types::{Message, PersonalityKey, SceneKey};
use flirtquest_core::ConversationState;
use flirtquest_llm::{LlmClient, ReplyProvider, ReplyRequest};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::delay;
use crate::history;
use crate::provider;

/// Where a character reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// The external provider answered.
    Provider,
    /// The rule-based generator answered.
    Simulated,
}

/// Whether the session can use an external provider at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyMode {
    /// No provider configured; every reply is simulated.
    Simulated,
    /// A provider is configured; it is tried first on every turn.
    Provider,
}

/// What one completed turn produced, for the UI.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// Player turn number (1-based) since the last reset.
    pub turn: u32,
    /// Chemistry after scoring the player message.
    pub chemistry: u8,
    /// Change in chemistry actually applied (after clamping).
    pub chemistry_delta: i32,
    /// The character's reply.
    pub reply: String,
    /// Who wrote the reply.
    pub reply_source: ReplySource,
    /// Scenario event appended after the reply, if one fired.
    pub event: Option<String>,
}

struct SessionInner {
    state: ConversationState,
    rng: StdRng,
}

/// What a turn carries from `Scoring` into `AwaitingReply`.
struct PendingTurn {
    text: String,
    turn: u32,
    breakdown: ChemistryBreakdown,
    personality: PersonalityKey,
    scene: SceneKey,
    request: Option<ReplyRequest>,
}

/// Clears the busy flag when the turn ends, however it ends.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A single conversation with the crush character.
///
/// Turns are played through an `Arc<Session>` so the reply phase can
/// outlive the caller's future.
pub struct Session<P = LlmClient> {
    id: Uuid,
    inner: Mutex<SessionInner>,
    provider: Option<P>,
    busy: Arc<AtomicBool>,
    engine: EngineConfig,
    llm: LlmConfig,
}

impl Session<LlmClient> {
    /// Build a session with the provider described by `config.llm`.
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the provider name is unknown.
    pub fn from_config(config: &FlirtConfig) -> Result<Self> {
        let client = provider::client_from_config(&config.llm)?;
        let provider = client.is_available().then_some(client);
        Ok(Self::new(config, provider))
    }

    /// Build a session that never calls out; every reply is simulated.
    #[must_use]
    pub fn simulated(config: &FlirtConfig) -> Self {
        Self::new(config, None)
    }
}

impl<P: ReplyProvider + 'static> Session<P> {
    /// Build a session with an explicit (optional) provider.
    #[must_use]
    pub fn new(config: &FlirtConfig, provider: Option<P>) -> Self {
        let mut rng = match config.engine.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = ConversationState::new(
            config.engine.default_scene,
            config.engine.default_personality,
            config.engine.initial_chemistry,
            &mut rng,
        );
        let id = Uuid::new_v4();
        info!(
            session = %id,
            scene = %state.scene(),
            personality = %state.personality(),
            provider = provider.is_some(),
            "Session started"
        );

        Self {
            id,
            inner: Mutex::new(SessionInner { state, rng }),
            provider,
            busy: Arc::new(AtomicBool::new(false)),
            engine: config.engine.clone(),
            llm: config.llm.clone(),
        }
    }

    /// Session identifier, used in logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The external provider, if one was supplied.
    #[must_use]
    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Whether replies can come from an external provider.
    #[must_use]
    pub fn mode(&self) -> ReplyMode {
        match &self.provider {
            Some(p) if p.is_available() => ReplyMode::Provider,
            _ => ReplyMode::Simulated,
        }
    }

    /// Whether a turn is currently awaiting its reply.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// A copy of the current conversation state.
    #[must_use]
    pub fn snapshot(&self) -> ConversationState {
        self.inner.lock().state.clone()
    }

    /// A copy of the message log.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().state.messages().to_vec()
    }

    /// Current chemistry.
    #[must_use]
    pub fn chemistry(&self) -> u8 {
        self.inner.lock().state.chemistry()
    }

    /// Switch scene.
    ///
    /// # Errors
    /// Returns `EngineError::Busy` while a turn is awaiting its reply.
    pub fn set_scene(&self, scene: SceneKey) -> Result<()> {
        let _idle = BusyGuard::acquire(&self.busy).ok_or(EngineError::Busy)?;
        self.inner.lock().state.set_scene(scene);
        Ok(())
    }

    /// Switch personality.
    ///
    /// # Errors
    /// Returns `EngineError::Busy` while a turn is awaiting its reply.
    pub fn set_personality(&self, personality: PersonalityKey) -> Result<()> {
        let _idle = BusyGuard::acquire(&self.busy).ok_or(EngineError::Busy)?;
        self.inner.lock().state.set_personality(personality);
        Ok(())
    }

    /// Start the conversation over.
    ///
    /// # Errors
    /// Returns `EngineError::Busy` while a turn is awaiting its reply.
    pub fn reset(&self) -> Result<()> {
        let _idle = BusyGuard::acquire(&self.busy).ok_or(EngineError::Busy)?;
        let mut inner = self.inner.lock();
        let SessionInner { state, rng } = &mut *inner;
        state.reset(rng);
        Ok(())
    }

    /// Play one turn with the player's message.
    ///
    /// Dropping the returned future after the player message was recorded
    /// does not cancel the turn: the reply and event check still happen and
    /// the session stays busy until they have.
    ///
    /// # Errors
    /// - `EngineError::EmptyMessage` if `text` is blank; nothing is recorded.
    /// - `EngineError::Busy` if another turn is awaiting its reply; nothing
    ///   is recorded.
    /// - `EngineError::TurnAborted` if the runtime shut down mid-turn.
    ///
    /// Provider failures are not errors: they fall back to a simulated reply.
    pub async fn submit(self: &Arc<Self>, text: &str) -> Result<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EngineError::EmptyMessage);
        }
        let guard = BusyGuard::acquire(&self.busy).ok_or(EngineError::Busy)?;

        // Scoring + Appending(player)
        let pending = {
            let mut inner = self.inner.lock();
            let state = &mut inner.state;
            let window = state.recent(self.engine.history_window).to_vec();
            let breakdown = state.record_player_message(text);
            let (personality, scene) = (state.personality(), state.scene());
            let request = self
                .provider
                .as_ref()
                .map(|_| history::build_request(&window, text, personality, scene, &self.llm));
            PendingTurn {
                text: text.to_string(),
                turn: state.player_turn_count(),
                breakdown,
                personality,
                scene,
                request,
            }
        };
        debug!(
            session = %self.id,
            turn = pending.turn,
            chemistry = pending.breakdown.next,
            "Awaiting reply"
        );

        let session = Arc::clone(self);
        let task = tokio::spawn(async move {
            let _turn = guard;
            session.finish_turn(pending).await
        });
        match task.await {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(EngineError::TurnAborted(e.to_string())),
        }
    }

    /// `AwaitingReply` through `EventCheck`.
    async fn finish_turn(&self, pending: PendingTurn) -> TurnOutcome {
        let PendingTurn {
            text,
            turn,
            breakdown,
            personality,
            scene,
            request,
        } = pending;

        let provided = match &request {
            Some(request) => self.ask_provider(request).await,
            None => None,
        };
        let (reply, reply_source) = match provided {
            Some(reply) => (reply, ReplySource::Provider),
            None => {
                let pause = {
                    let mut inner = self.inner.lock();
                    delay::sample(&self.engine.thinking_delay, &mut inner.rng)
                };
                tokio::time::sleep(pause).await;
                let mut inner = self.inner.lock();
                let reply =
                    reply::generate(&text, personality, scene, breakdown.next, &mut inner.rng);
                (reply, ReplySource::Simulated)
            }
        };

        // Appending(character) + EventCheck
        let event = {
            let mut inner = self.inner.lock();
            let SessionInner { state, rng } = &mut *inner;
            state.record_character_reply(reply.clone());
            state
                .inject_event(self.engine.event_interval, rng)
                .map(str::to_string)
        };

        debug!(
            session = %self.id,
            turn,
            source = ?reply_source,
            event = event.is_some(),
            "Turn complete"
        );

        TurnOutcome {
            turn,
            chemistry: breakdown.next,
            chemistry_delta: i32::from(breakdown.next) - i32::from(breakdown.previous),
            reply,
            reply_source,
            event,
        }
    }

    /// Ask the provider, turning every failure into `None`.
    async fn ask_provider(&self, request: &ReplyRequest) -> Option<String> {
        let provider = self.provider.as_ref().filter(|p| p.is_available())?;
        match provider.complete(request).await {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(_) => {
                warn!(session = %self.id, "Provider returned a blank reply; using simulated");
                None
            }
            Err(e) => {
                warn!(session = %self.id, error = %e, "Provider call failed; using simulated");
                None
            }
        }
    }
}
