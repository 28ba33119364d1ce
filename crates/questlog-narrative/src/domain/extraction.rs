//! Game-state signals carried inside narrator prose.
//!
//! The narrator is asked to tag mechanical consequences inline, e.g.
//! `*damage taken: 5 HP*` and `*gained: 10 XP*`. Extraction is the only
//! validation applied to narrator output.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DAMAGE_TAKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)damage taken:\s*(\d+)\s*HP").expect("valid regex"));
static XP_GAINED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)gained:\s*(\d+)\s*XP").expect("valid regex"));

/// Mechanical consequences of one narrated turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnSignals {
    /// Hit points the character lost.
    pub hp_lost: u32,
    /// Experience the character earned.
    pub xp_gained: u32,
}

/// Pulls turn signals out of narrator text.
pub trait SignalExtractor: Send + Sync {
    /// Reads `text` and reports what happened. Absent signals are zero.
    fn extract(&self, text: &str) -> TurnSignals;
}

/// Reads inline `damage taken: N HP` and `gained: N XP` tags.
///
/// Matching ignores case. Only the first tag of each kind counts; later
/// tags in the same reply are ignored. A number too large for `u32`
/// saturates to `u32::MAX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagPatternExtractor;

fn first_number(re: &Regex, text: &str) -> u32 {
    // The capture is all digits, so a failed parse can only be overflow.
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(0, |m| m.as_str().parse().unwrap_or(u32::MAX))
}

impl SignalExtractor for TagPatternExtractor {
    fn extract(&self, text: &str) -> TurnSignals {
        TurnSignals {
            hp_lost: first_number(&DAMAGE_TAKEN_RE, text),
            xp_gained: first_number(&XP_GAINED_RE, text),
        }
    }
}
