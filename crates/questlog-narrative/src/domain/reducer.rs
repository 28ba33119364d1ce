//! Folding turn signals into character and session state.

use questlog_character::domain::aggregates::Character;
use questlog_session::domain::aggregates::GameSession;
use serde::{Deserialize, Serialize};

use super::extraction::TurnSignals;

/// Narration shown when the backend fails.
pub const FALLBACK_NARRATION: &str =
    "The DM ponders your words... but seems momentarily confused. Please try again in a moment.";

/// Game state after a turn, in the shape clients expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnState {
    /// Number of the turn just played.
    pub turn: u32,
    /// Character hit points after the turn.
    #[serde(rename = "characterHP")]
    pub character_hp: i32,
    /// Character experience after the turn.
    #[serde(rename = "characterXP")]
    pub character_xp: u32,
    /// Hit points lost this turn, as reported by the narrator.
    pub damage_dealt: u32,
    /// Experience earned this turn.
    pub xp_gained: u32,
    /// Location after the turn.
    pub location: String,
}

/// Computes the state after a turn. Pure: nothing is mutated.
///
/// Hit points stay within `[0, max_hp]`, experience only grows, and the
/// location carries over unless `location_update` names a new one.
#[must_use]
pub fn merge_turn(
    character: &Character,
    session: &GameSession,
    signals: TurnSignals,
    location_update: Option<&str>,
) -> TurnState {
    let mut after = character.clone();
    after.apply_damage(signals.hp_lost);

    let location = location_update
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(session.world_state.location.as_str())
        .to_owned();

    TurnState {
        turn: session.next_turn(),
        character_hp: after.current_hp,
        character_xp: character.xp.saturating_add(signals.xp_gained),
        damage_dealt: signals.hp_lost,
        xp_gained: signals.xp_gained,
        location,
    }
}

#[cfg(test)]
mod tests {
    use questlog_character::domain::class::CharacterClass;
    use questlog_session::domain::backend::NarrationBackend;
    use questlog_test_support::FixedClock;
    use uuid::Uuid;

    use super::*;

    fn mage_at(current_hp: i32, xp: u32) -> Character {
        let mut mage = Character::create(
            Uuid::new_v4(),
            "Elowen",
            CharacterClass::Mage,
            None,
            &FixedClock::standard(),
        )
        .unwrap();
        mage.max_hp = 30;
        mage.current_hp = current_hp;
        mage.xp = xp;
        mage
    }

    fn session_at(turn_count: u32) -> GameSession {
        let mut session = GameSession::start(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NarrationBackend::Gemini,
            &FixedClock::standard(),
        );
        session.turn_count = turn_count;
        session
    }

    #[test]
    fn test_applies_signals() {
        let character = mage_at(20, 40);
        let signals = TurnSignals {
            hp_lost: 5,
            xp_gained: 10,
        };

        let state = merge_turn(&character, &session_at(2), signals, None);

        assert_eq!(state.turn, 3);
        assert_eq!(state.character_hp, 15);
        assert_eq!(state.character_xp, 50);
        assert_eq!(state.damage_dealt, 5);
        assert_eq!(state.xp_gained, 10);
        assert_eq!(state.location, "The Rusty Dragon Tavern");
    }

    #[test]
    fn test_hp_never_drops_below_zero() {
        let character = mage_at(3, 0);
        let signals = TurnSignals {
            hp_lost: 10,
            xp_gained: 0,
        };

        let state = merge_turn(&character, &session_at(0), signals, None);

        assert_eq!(state.character_hp, 0);
        assert_eq!(state.damage_dealt, 10);
    }

    #[test]
    fn test_oversized_damage_tag_still_drops_hp_to_zero() {
        use crate::domain::extraction::{SignalExtractor, TagPatternExtractor};

        let character = mage_at(25, 0);
        let signals =
            TagPatternExtractor.extract("The dragon breathes. damage taken: 99999999999999 HP");

        let state = merge_turn(&character, &session_at(0), signals, None);

        assert_eq!(state.character_hp, 0);
        assert_eq!(state.damage_dealt, u32::MAX);
    }

    #[test]
    fn test_no_signals_changes_only_the_turn() {
        let character = mage_at(12, 75);
        let session = session_at(8);

        let state = merge_turn(&character, &session, TurnSignals::default(), None);

        assert_eq!(state.turn, 9);
        assert_eq!(state.character_hp, 12);
        assert_eq!(state.character_xp, 75);
    }

    #[test]
    fn test_location_update_replaces_location() {
        let state = merge_turn(
            &mage_at(10, 0),
            &session_at(0),
            TurnSignals::default(),
            Some("  Whispering Woods "),
        );
        assert_eq!(state.location, "Whispering Woods");

        let blank = merge_turn(&mage_at(10, 0), &session_at(0), TurnSignals::default(), Some(" "));
        assert_eq!(blank.location, "The Rusty Dragon Tavern");
    }

    #[test]
    fn test_wire_names() {
        let state = merge_turn(&mage_at(10, 0), &session_at(0), TurnSignals::default(), None);
        let json = serde_json::to_value(&state).unwrap();

        for key in ["turn", "characterHP", "characterXP", "damageDealt", "xpGained", "location"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
