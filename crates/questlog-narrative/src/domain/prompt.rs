//! Narrator prompts.

use questlog_character::domain::aggregates::Character;
use questlog_character::domain::class::CharacterClass;
use questlog_session::domain::aggregates::GameSession;
use questlog_session::domain::messages::{GameMessage, MessageType};
use serde::{Deserialize, Serialize};

/// How many past messages the narrator sees.
pub const RECENT_MESSAGE_LIMIT: usize = 5;

/// Narrator style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// Medieval and serious.
    #[default]
    ClassicFantasy,
    /// Silly encounters and funny NPCs.
    Humorous,
    /// Grim, high-stakes world.
    DarkFantasy,
}

impl Personality {
    /// Looks up a personality by key. Unknown keys fall back to
    /// `ClassicFantasy`.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "humorous" => Self::Humorous,
            "dark_fantasy" => Self::DarkFantasy,
            _ => Self::ClassicFantasy,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ClassicFantasy => "Classic Fantasy",
            Self::Humorous => "Humorous",
            Self::DarkFantasy => "Dark Fantasy",
        }
    }

    /// Setting description appended to the prompt.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ClassicFantasy => "Medieval, serious, traditional fantasy setting",
            Self::Humorous => "Silly, comedic encounters, funny NPCs",
            Self::DarkFantasy => "Grim, dangerous world with high stakes",
        }
    }

    /// Narration tone.
    #[must_use]
    pub fn tone(self) -> &'static str {
        match self {
            Self::ClassicFantasy => "formal and dramatic",
            Self::Humorous => "playful and comedic",
            Self::DarkFantasy => "dark and dangerous",
        }
    }
}

fn recent_history(messages: &[GameMessage]) -> String {
    let start = messages.len().saturating_sub(RECENT_MESSAGE_LIMIT);
    let lines: Vec<String> = messages[start..]
        .iter()
        .map(|message| match message.message_type {
            MessageType::PlayerAction => format!("Player: {}", message.content),
            MessageType::DmResponse => format!("DM: {}", message.content),
        })
        .collect();

    if lines.is_empty() {
        "Adventure begins...".to_owned()
    } else {
        lines.join("\n")
    }
}

/// Builds the narrator's system prompt: character sheet, world state, the
/// last few messages, the house rules with the tagging contract, and the
/// personality.
#[must_use]
pub fn build_system_prompt(
    character: &Character,
    session: &GameSession,
    recent_messages: &[GameMessage],
    personality: Personality,
) -> String {
    let stats = &character.stats;
    let world = &session.world_state;
    let history = recent_history(recent_messages);

    format!(
        "You are a D&D Dungeon Master running a simplified homebrew campaign with a {tone} tone.

=== CHARACTER CONTEXT ===
Name: {name}
Class: {class}
Level: {level}
HP: {current_hp}/{max_hp}
XP: {xp}
Stats: STR {strength}, DEX {dexterity}, CON {constitution}, INT {intelligence}, WIS {wisdom}, CHA {charisma}

=== WORLD STATE ===
Location: {location}
Time: {time}
Season: {season}
Turn: {turn}

=== RECENT EVENTS ===
{history}

=== RULES ===
- Combat uses 1d20 + ability modifier vs target difficulty
- Damage is rolled with dice (e.g., 2d6+2)
- Death occurs at 0 HP (character faints and can be revived)
- XP rewards given after encounters
- Spells/abilities cost mana or health (specify cost)
- Describe rolls in format: *roll: 1d20+5* for attack rolls
- For damage rolls: *damage: 2d6+2 = 8*

=== INSTRUCTIONS ===
1. Respond in 2-3 narrative sentences, staying in character
2. Include dice rolls when needed (attack checks, saving throws)
3. Present 2-3 clear action options at the end of your response
4. If character takes damage, indicate: *damage taken: X HP*
5. If character gains XP, indicate: *gained: X XP*
6. Maintain consistent world and NPC personalities
7. Respect the character's abilities and equipment
8. Make encounters challenging but fair
9. Keep responses focused on gameplay progression

=== PERSONALITY ===
{description}",
        tone = personality.tone(),
        name = character.name,
        class = character.class,
        level = character.level,
        current_hp = character.current_hp,
        max_hp = character.max_hp,
        xp = character.xp,
        strength = stats.strength,
        dexterity = stats.dexterity,
        constitution = stats.constitution,
        intelligence = stats.intelligence,
        wisdom = stats.wisdom,
        charisma = stats.charisma,
        location = world.location,
        time = world.time_of_day,
        season = world.season,
        turn = session.turn_count,
        description = personality.description(),
    )
}

/// Prompt asking for a short backstory for a new character of `class`.
#[must_use]
pub fn build_backstory_prompt(class: CharacterClass) -> String {
    format!(
        "You are a creative D&D storyteller. Generate a short, engaging backstory (2-3 sentences) \
         for a {class} character in a fantasy world. Include their motivation for adventuring. \
         Keep it concise and interesting."
    )
}
