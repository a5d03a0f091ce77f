//! Crew selection helpers.

use rand::Rng;

use bullpen_types::AgentKind;

/// Pick a random crew member to whisper the next piece of gossip.
///
/// Uniform over the whole roster; deterministic for a fixed seed.
pub fn pick_speaker(rng: &mut impl Rng) -> AgentKind {
    match rng.random_range(0..AgentKind::ALL.len()) {
        0 => AgentKind::Manager,
        1 => AgentKind::Developer,
        _ => AgentKind::Qa,
    }
}
