//! Command handlers for the Narrative Orchestration context.

use questlog_character::application::command_handlers::{character_record, load_character};
use questlog_character::domain::aggregates::Character;
use questlog_core::clock::Clock;
use questlog_core::error::DomainError;
use questlog_core::narration::NarrationGateway;
use questlog_core::record::RecordStore;
use questlog_session::application::command_handlers::{
    load_session, message_record, session_record,
};
use questlog_session::application::query_handlers::recent_messages;
use questlog_session::domain::aggregates::GameSession;
use questlog_session::domain::messages::GameMessage;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::application::session_locks::SessionLocks;
use crate::domain::commands::{GenerateBackstory, SubmitAction};
use crate::domain::extraction::{SignalExtractor, TurnSignals};
use crate::domain::prompt::{
    Personality, RECENT_MESSAGE_LIMIT, build_backstory_prompt, build_system_prompt,
};
use crate::domain::reducer::{FALLBACK_NARRATION, TurnState, merge_turn};
use crate::gateway::NarrationBackends;

/// Everything the narrator needs to play one turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnRequest<'a> {
    /// What the player typed.
    pub player_action: &'a str,
    /// The acting character, before the turn.
    pub character: &'a Character,
    /// The session, before the turn.
    pub session: &'a GameSession,
    /// The session log so far, oldest first.
    pub recent_messages: &'a [GameMessage],
    /// Narrator style.
    pub personality: Personality,
}

/// Result of narrating one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Narrator prose, or the fallback text.
    pub narration: String,
    /// Signals read from the narration.
    pub signals: TurnSignals,
    /// State after the turn.
    pub state: TurnState,
    /// `true` when the backend failed and the fallback was used.
    pub fell_back: bool,
}

/// Narrates one turn and computes the resulting state.
///
/// Never fails: a backend error becomes the fallback narration with no
/// signals, so the turn still advances by one.
#[instrument(
    skip(gateway, extractor, request),
    fields(backend = gateway.name(), turn = request.session.next_turn())
)]
pub async fn narrate_turn(
    gateway: &dyn NarrationGateway,
    extractor: &dyn SignalExtractor,
    request: &TurnRequest<'_>,
) -> TurnOutcome {
    let system_prompt = build_system_prompt(
        request.character,
        request.session,
        request.recent_messages,
        request.personality,
    );

    let (narration, fell_back) = match gateway
        .complete(&system_prompt, request.player_action)
        .await
    {
        Ok(text) => (text, false),
        Err(e) => {
            warn!(error = %e, "narration failed, using fallback");
            (FALLBACK_NARRATION.to_owned(), true)
        }
    };

    let signals = if fell_back {
        TurnSignals::default()
    } else {
        extractor.extract(&narration)
    };
    debug!(
        hp_lost = signals.hp_lost,
        xp_gained = signals.xp_gained,
        "turn signals extracted"
    );

    let state = merge_turn(request.character, request.session, signals, None);

    TurnOutcome {
        narration,
        signals,
        state,
        fell_back,
    }
}

/// What a persisted turn reports back.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    /// Narrator prose, or the fallback text.
    pub dm_response: String,
    /// State after the turn.
    pub game_state: TurnState,
    /// Character level after the turn.
    pub level: u32,
    /// `true` when the turn's experience raised the level.
    pub leveled_up: bool,
    /// The logged player message.
    pub player_message: GameMessage,
    /// The logged DM message.
    pub dm_message: GameMessage,
}

/// Handles the `SubmitAction` command: plays one turn of a stored session
/// and persists it.
///
/// The player message, the DM message, the character and the session are
/// written in a single batch, so either the whole turn is recorded or none
/// of it is. Turns on the same session run one at a time.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the action is blank or the session
/// has ended.
/// Returns `DomainError::NotFound` if the session or its character does not
/// exist.
/// Returns `DomainError::Infrastructure` if the store fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, session_id = %command.session_id))]
pub async fn handle_submit_action(
    command: &SubmitAction,
    clock: &dyn Clock,
    backends: &NarrationBackends,
    extractor: &dyn SignalExtractor,
    store: &dyn RecordStore,
    locks: &SessionLocks,
) -> Result<TurnReport, DomainError> {
    let player_action = command.player_action.trim();
    if player_action.is_empty() {
        return Err(DomainError::Validation("player action must not be blank".into()));
    }

    let _turn_guard = locks.acquire(command.session_id).await?;
    let mut session = load_session(command.session_id, store).await?;
    if !session.is_active {
        return Err(DomainError::Validation(format!(
            "session {} has ended",
            session.id
        )));
    }
    let mut character = load_character(session.character_id, store).await?;
    let history = recent_messages(session.id, RECENT_MESSAGE_LIMIT, store).await?;

    let outcome = narrate_turn(
        backends.for_backend(session.ai_provider),
        extractor,
        &TurnRequest {
            player_action,
            character: &character,
            session: &session,
            recent_messages: &history,
            personality: command.personality,
        },
    )
    .await;

    let now = clock.now();
    let state = outcome.state;
    let player_message = GameMessage::player_action(session.id, state.turn, player_action, now);
    let dm_message = GameMessage::dm_response(session.id, state.turn, outcome.narration.as_str(), now);

    character.set_current_hp(state.character_hp);
    let leveled_up = character.gain_xp(state.xp_gained);
    session.record_turn(state.turn, state.location.clone(), now);

    store
        .commit(vec![
            message_record(&player_message)?,
            message_record(&dm_message)?,
            character_record(&character, now)?,
            session_record(&session, now)?,
        ])
        .await?;

    info!(
        turn = state.turn,
        character_hp = character.current_hp,
        character_xp = character.xp,
        leveled_up,
        fell_back = outcome.fell_back,
        "turn recorded"
    );

    Ok(TurnReport {
        dm_response: outcome.narration,
        game_state: state,
        level: character.level,
        leveled_up,
        player_message,
        dm_message,
    })
}

/// Handles the `GenerateBackstory` command: asks the narrator for a short
/// backstory and stores it on the character.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character does not exist.
/// Returns `DomainError::Infrastructure` if the narrator fails or replies
/// with nothing, or if the store fails.
pub async fn handle_generate_backstory(
    command: &GenerateBackstory,
    clock: &dyn Clock,
    gateway: &dyn NarrationGateway,
    store: &dyn RecordStore,
) -> Result<Character, DomainError> {
    let mut character = load_character(command.character_id, store).await?;

    let prompt = build_backstory_prompt(character.class);
    let reply = gateway
        .complete(&prompt, "Generate a backstory.")
        .await
        .map_err(|e| {
            warn!(
                correlation_id = %command.correlation_id,
                backend = gateway.name(),
                error = %e,
                "backstory generation failed"
            );
            DomainError::Infrastructure(format!("backstory generation failed: {e}"))
        })?;

    let backstory = reply.trim();
    if backstory.is_empty() {
        return Err(DomainError::Infrastructure(
            "narrator returned an empty backstory".into(),
        ));
    }
    character.backstory = Some(backstory.to_owned());

    store
        .upsert(character_record(&character, clock.now())?)
        .await?;

    info!(
        correlation_id = %command.correlation_id,
        character_id = %character.id,
        "backstory generated"
    );
    Ok(character)
}
