//! Result hashing.
//!
//! SHA-256 over a canonical little-endian byte encoding of
//! (seed, engine version, ordered inputs). The encoding is hand-rolled
//! rather than serde-derived so the bytes are pinned independently of any
//! serializer's field ordering or float formatting: any third party with
//! the same seed, engine version, and input stream reproduces the hash
//! bit-for-bit.

use sha2::{Digest, Sha256};

use crate::input::types::{PlayerAction, PlayerInput};

/// Action tag bytes. Part of the wire contract; never renumber.
const TAG_MOVE: u8 = 0x01;
const TAG_PASS: u8 = 0x02;
const TAG_SHOOT: u8 = 0x03;
const TAG_TACKLE: u8 = 0x04;
const TAG_SPRINT: u8 = 0x05;
const TAG_SKILL: u8 = 0x06;

/// Compute the result hash for a match, hex-encoded.
pub fn compute_result_hash<'a, I>(seed: u64, engine_version: &str, inputs: I) -> String
where
    I: IntoIterator<Item = &'a PlayerInput>,
{
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update((engine_version.len() as u32).to_le_bytes());
    hasher.update(engine_version.as_bytes());
    for input in inputs {
        encode_input(&mut hasher, input);
    }
    hex::encode(hasher.finalize())
}

fn encode_input(hasher: &mut Sha256, input: &PlayerInput) {
    hasher.update(input.player.to_le_bytes());
    hasher.update(input.tick.to_le_bytes());
    hasher.update(input.timestamp_ms.to_le_bytes());
    match &input.action {
        PlayerAction::Move { x, y } => {
            hasher.update([TAG_MOVE]);
            hasher.update(x.to_le_bytes());
            hasher.update(y.to_le_bytes());
        }
        PlayerAction::Pass { power } => {
            hasher.update([TAG_PASS]);
            hasher.update(power.to_le_bytes());
        }
        PlayerAction::Shoot { power } => {
            hasher.update([TAG_SHOOT]);
            hasher.update(power.to_le_bytes());
        }
        PlayerAction::Tackle { target } => {
            hasher.update([TAG_TACKLE]);
            hasher.update(target.to_le_bytes());
        }
        PlayerAction::Sprint => {
            hasher.update([TAG_SPRINT]);
        }
        PlayerAction::Skill { skill } => {
            hasher.update([TAG_SKILL]);
            hasher.update((skill.len() as u32).to_le_bytes());
            hasher.update(skill.as_bytes());
        }
    }
}
